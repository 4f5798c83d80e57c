//! Fragment loading and `(namespace, locale)` key derivation.

use std::path::{
    Path,
    PathBuf,
};

use futures::StreamExt;
use serde_json::Value;

use crate::compiler::types::{
    CompileError,
    LocaleFragment,
};

/// Derive the `(namespace, locale)` key from a fragment file stem.
///
/// A stem with a dot separator names its own namespace; a bare stem is the
/// locale under the configured default namespace. Segments past the second
/// are ignored.
///
/// # Examples
/// - `common.en` → (`common`, `en`)
/// - `en` + default namespace `default` → (`default`, `en`)
#[must_use]
pub fn derive_fragment_key(stem: &str, default_namespace: &str) -> (String, String) {
    let mut segments = stem.split('.');
    match (segments.next(), segments.next()) {
        (Some(namespace), Some(locale)) => (namespace.to_string(), locale.to_string()),
        _ => (default_namespace.to_string(), stem.to_string()),
    }
}

/// Load fragment files in path order.
///
/// Reads are issued with bounded concurrency (`read_width` at a time), but
/// the returned fragments keep the order of `paths` — merge order must not
/// depend on I/O completion order.
///
/// # Errors
/// - `CompileError::Read` when a file cannot be read
/// - `CompileError::MalformedFragment` when content is not a JSON object
pub async fn load_fragments(
    paths: &[PathBuf],
    default_namespace: &str,
    read_width: usize,
) -> Result<Vec<LocaleFragment>, CompileError> {
    let mut loads = futures::stream::iter(paths.to_vec().into_iter().map(move |path| {
        async move { load_fragment(&path, default_namespace).await }
    }))
    .buffered(read_width.max(1));

    let mut fragments = Vec::with_capacity(paths.len());
    while let Some(fragment) = loads.next().await {
        fragments.push(fragment?);
    }

    Ok(fragments)
}

/// Load one fragment file.
async fn load_fragment(
    path: &Path,
    default_namespace: &str,
) -> Result<LocaleFragment, CompileError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| CompileError::Read { path: path.to_path_buf(), source })?;

    let json: Value = serde_json::from_str(&content).map_err(|e| {
        CompileError::MalformedFragment { path: path.to_path_buf(), reason: e.to_string() }
    })?;

    let Value::Object(object) = json else {
        return Err(CompileError::MalformedFragment {
            path: path.to_path_buf(),
            reason: "top-level value is not a JSON object".to_string(),
        });
    };

    let stem = path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    let (namespace, locale) = derive_fragment_key(&stem, default_namespace);

    tracing::debug!(path = %path.display(), %namespace, %locale, "Loaded fragment");

    Ok(LocaleFragment { namespace, locale, source_path: path.to_path_buf(), content: object })
}
