//! Principal language persistence synchronization.

use std::collections::HashMap;
use std::sync::{
    Arc,
    Mutex,
    PoisonError,
};

use thiserror::Error;

use crate::runtime::resolve::reduce_language_tag;

/// Failure surfaced by a [`PrincipalStore`] implementation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Principal store failure: {0}")]
pub struct StoreError(pub String);

/// Persistence seam for long-lived user records.
///
/// Implemented by the serving layer over whatever store it already uses.
pub trait PrincipalStore: Send + Sync {
    /// Stored language preference for a principal.
    fn language(
        &self,
        principal: &str,
    ) -> impl Future<Output = Result<Option<String>, StoreError>> + Send;

    /// Persist a new language preference.
    fn set_language(
        &self,
        principal: &str,
        language: &str,
    ) -> impl Future<Output = Result<(), StoreError>> + Send;
}

/// Registry of per-principal write locks, created on first use.
///
/// Locking is scoped to one principal id; requests for unrelated principals
/// never contend.
#[derive(Debug, Default)]
pub(crate) struct PrincipalLocks {
    /// Principal id → its write lock.
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl PrincipalLocks {
    /// Lock handle for one principal.
    fn lock_for(&self, principal: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(locks.entry(principal.to_string()).or_default())
    }
}

/// Align a principal's persisted language with the request's resolved one.
///
/// No-op when they already match. On mismatch the preference is rewritten
/// under that principal's exclusive lock; the guard is released on every
/// exit path — store failures included — and the error propagates to the
/// caller, which decides whether the response still proceeds.
///
/// Returns whether the preference was rewritten.
pub(crate) async fn sync_principal_language<S: PrincipalStore>(
    locks: &PrincipalLocks,
    store: &S,
    principal: &str,
    resolved_language: &str,
) -> Result<bool, StoreError> {
    let resolved = reduce_language_tag(resolved_language);

    let stored = store.language(principal).await?;
    if stored.as_deref() == Some(resolved) {
        return Ok(false);
    }

    let principal_lock = locks.lock_for(principal);
    let _guard = principal_lock.lock().await;

    store.set_language(principal, resolved).await?;
    tracing::debug!(%principal, language = %resolved, "Synchronized principal language");

    Ok(true)
}
