//! Runtime wiring: hook surface, catalog serving, principal sync.

use std::path::{
    Path,
    PathBuf,
};
use std::sync::Arc;

use serde_json::Value;

use crate::compiler::{
    CompileError,
    CompileManifest,
};
use crate::config::CatalogSettings;
use crate::runtime::render::{
    RenderContext,
    TranslationEngine,
};
use crate::runtime::resolve::resolve_language;
use crate::runtime::serve;
use crate::runtime::session::SessionLanguageMap;
use crate::runtime::sync::{
    PrincipalLocks,
    PrincipalStore,
    StoreError,
    sync_principal_language,
};
use crate::runtime::types::{
    RequestContext,
    SessionTranslator,
    SocketCallOptions,
};

/// Runtime configuration, injected explicitly at process start-up.
///
/// The compile manifest is loaded from the compile artifact and passed in;
/// nothing here is shared mutable state.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Namespaces/locales discovered by the last compile run.
    pub manifest: CompileManifest,
    /// Directory holding the compiled `<namespace>.<locale>.json` files.
    pub catalog_dir: PathBuf,
    pub fallback_language: String,
    /// Bound for the session language map.
    pub session_capacity: usize,
}

impl RuntimeConfig {
    /// Build a runtime configuration from compiler settings.
    ///
    /// Loads the manifest written by the compile step; paths resolve against
    /// `root` the same way the compile task resolved them.
    ///
    /// # Errors
    /// - Manifest read or parse failure
    pub fn from_settings(settings: &CatalogSettings, root: &Path) -> Result<Self, CompileError> {
        let manifest = CompileManifest::load(&root.join(&settings.manifest_path))?;
        Ok(Self {
            manifest,
            catalog_dir: root.join(&settings.output_dir),
            fallback_language: settings.fallback_language.clone(),
            session_capacity: settings.session_capacity,
        })
    }
}

/// Per-process runtime for language resolution and translation serving.
///
/// Owns the session language map and the per-principal lock registry; the
/// serving layer calls the hooks below from its render and socket
/// pipelines.
pub struct LocaleRuntime {
    /// Injected configuration.
    config: RuntimeConfig,
    /// Shared session → language map.
    sessions: Arc<SessionLanguageMap>,
    /// External translation engine.
    engine: Arc<dyn TranslationEngine>,
    /// Write locks for principal preference sync.
    principal_locks: PrincipalLocks,
}

impl LocaleRuntime {
    /// Wire a runtime from its configuration and the external engine.
    #[must_use]
    pub fn new(config: RuntimeConfig, engine: Arc<dyn TranslationEngine>) -> Self {
        let sessions = Arc::new(SessionLanguageMap::new(config.session_capacity));
        Self { config, sessions, engine, principal_locks: PrincipalLocks::default() }
    }

    /// The manifest this runtime serves from.
    #[must_use]
    pub const fn manifest(&self) -> &CompileManifest {
        &self.config.manifest
    }

    /// Shared session language map.
    #[must_use]
    pub fn sessions(&self) -> &SessionLanguageMap {
        &self.sessions
    }

    /// Record an explicit language choice for a session.
    ///
    /// Called when a user picks a language; consulted by both the render and
    /// socket paths afterwards.
    pub fn set_session_language(&self, session_id: &str, language: &str) {
        tracing::debug!(%session_id, %language, "Session language set");
        self.sessions.set_language(session_id, language);
    }

    /// Pre-render hook.
    ///
    /// Resolves the active language for the request (session entry, then
    /// negotiated language, then fallback) and returns the render context
    /// carrying the memoized translate function.
    #[must_use]
    pub fn render_hook(&self, request: &RequestContext) -> RenderContext {
        let session_language =
            request.session_id.as_deref().and_then(|sid| self.sessions.get_language(sid));

        let language = resolve_language(
            session_language.as_deref(),
            request.negotiated_language.as_deref(),
            &self.config.fallback_language,
        );

        tracing::debug!(%language, session = ?request.session_id, "Resolved render language");

        RenderContext::new(language, Arc::clone(&self.engine))
    }

    /// Pre-socket-call hook.
    ///
    /// Augments the options with a translate function bound to the calling
    /// session/user.
    pub fn socket_hook(&self, opts: &mut SocketCallOptions) {
        opts.translator = Some(SessionTranslator::new(
            Arc::clone(&self.sessions),
            Arc::clone(&self.engine),
            opts.session_id.clone(),
            opts.user_language.clone(),
            self.config.fallback_language.clone(),
        ));
    }

    /// Serve the compiled catalog document for a pair.
    ///
    /// Backs `GET /locales/:namespace.:locale.json`; an unknown or missing
    /// pair yields `{}` with no error.
    pub async fn serve_catalog(&self, namespace: &str, locale: &str) -> Value {
        serve::load_catalog_document(
            &self.config.catalog_dir,
            &self.config.manifest,
            namespace,
            locale,
        )
        .await
    }

    /// Align a principal's persisted language with the resolved one.
    ///
    /// Runs under an exclusive lock scoped to that principal; returns
    /// whether the stored preference was rewritten. Store failures propagate
    /// to the caller's error handling and never leak the lock.
    pub async fn sync_principal_language<S: PrincipalStore>(
        &self,
        store: &S,
        principal: &str,
        resolved_language: &str,
    ) -> Result<bool, StoreError> {
        sync_principal_language(&self.principal_locks, store, principal, resolved_language).await
    }
}

impl std::fmt::Debug for LocaleRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LocaleRuntime")
            .field("config", &self.config)
            .field("sessions", &self.sessions.len())
            .finish_non_exhaustive()
    }
}
