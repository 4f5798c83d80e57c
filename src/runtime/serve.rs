//! Compiled catalog lookups backing the locale GET endpoint.

use std::path::Path;

use serde_json::{
    Map,
    Value,
};

use crate::compiler::CompileManifest;

/// Load the compiled document for a `(namespace, locale)` pair.
///
/// Both names are validated against the manifest before any file path is
/// formed from them, so request segments outside the discovered set can
/// never address the filesystem. A missing pair, missing file or unreadable
/// file yields an empty object — the calling translation engine falls back
/// to defaults rather than erroring a live request.
pub(crate) async fn load_catalog_document(
    catalog_dir: &Path,
    manifest: &CompileManifest,
    namespace: &str,
    locale: &str,
) -> Value {
    if !manifest.contains(namespace, locale) {
        tracing::debug!(%namespace, %locale, "Requested pair not in manifest");
        return empty_document();
    }

    let path = catalog_dir.join(format!("{namespace}.{locale}.json"));
    let bytes = match tokio::fs::read(&path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "Compiled catalog file missing");
            return empty_document();
        }
    };

    serde_json::from_slice(&bytes).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Compiled catalog file unreadable");
        empty_document()
    })
}

/// The `{}` served when a pair cannot be loaded.
fn empty_document() -> Value {
    Value::Object(Map::new())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn manifest() -> CompileManifest {
        CompileManifest {
            locales: vec!["en".to_string()],
            namespaces: vec!["common".to_string()],
        }
    }

    #[tokio::test]
    async fn serves_the_compiled_document() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("common.en.json"), r#"{"hello":"Hello"}"#).unwrap();

        let doc = load_catalog_document(temp_dir.path(), &manifest(), "common", "en").await;

        assert_eq!(doc, json!({"hello": "Hello"}));
    }

    #[tokio::test]
    async fn unknown_pair_is_an_empty_object() {
        let temp_dir = TempDir::new().unwrap();

        let doc = load_catalog_document(temp_dir.path(), &manifest(), "missing", "xx").await;

        assert_eq!(doc, json!({}));
    }

    #[tokio::test]
    async fn traversal_segments_never_reach_the_filesystem() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("secret.txt"), "nope").unwrap();

        let doc =
            load_catalog_document(temp_dir.path(), &manifest(), "../secret", "txt").await;

        assert_eq!(doc, json!({}));
    }

    #[tokio::test]
    async fn manifest_pair_with_missing_file_is_an_empty_object() {
        let temp_dir = TempDir::new().unwrap();

        let doc = load_catalog_document(temp_dir.path(), &manifest(), "common", "en").await;

        assert_eq!(doc, json!({}));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_empty_object() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("common.en.json"), "{ nope").unwrap();

        let doc = load_catalog_document(temp_dir.path(), &manifest(), "common", "en").await;

        assert_eq!(doc, json!({}));
    }
}
