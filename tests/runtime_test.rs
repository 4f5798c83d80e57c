//! Tests for the runtime hook surface over a compiled catalog.

#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]
#![allow(missing_docs)]

use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};

use i18n_catalog::{
    CompileTask,
    LocaleRuntime,
};
use i18n_catalog::config::CatalogSettings;
use i18n_catalog::runtime::{
    RequestContext,
    RuntimeConfig,
    SocketCallOptions,
    TranslationEngine,
};
use pretty_assertions::assert_eq;
use serde_json::{
    Map,
    Value,
    json,
};
use tempfile::TempDir;

/// Engine that counts invocations and echoes its inputs.
#[derive(Default)]
struct CountingEngine {
    calls: AtomicUsize,
}

impl TranslationEngine for CountingEngine {
    fn translate(&self, language: &str, key: &str, _args: &Map<String, Value>) -> String {
        self.calls.fetch_add(1, Ordering::SeqCst);
        format!("{language}:{key}")
    }
}

fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Compile a small tree and wire a runtime over the artifacts.
async fn compiled_runtime(temp_dir: &TempDir) -> (LocaleRuntime, Arc<CountingEngine>) {
    write_file(temp_dir.path(), "app/locales/common.en.json", r#"{"hello": "Hello"}"#);
    write_file(temp_dir.path(), "app/locales/common.fr.json", r#"{"hello": "Bonjour"}"#);

    let settings = CatalogSettings::default();
    CompileTask::new(settings.clone(), temp_dir.path()).run(&[]).await.unwrap();

    let config = RuntimeConfig::from_settings(&settings, temp_dir.path()).unwrap();
    let engine = Arc::new(CountingEngine::default());
    (LocaleRuntime::new(config, Arc::clone(&engine) as Arc<dyn TranslationEngine>), engine)
}

#[tokio::test]
async fn serve_catalog_returns_the_compiled_pair() {
    let temp_dir = TempDir::new().unwrap();
    let (runtime, _engine) = compiled_runtime(&temp_dir).await;

    let doc = runtime.serve_catalog("common", "fr").await;

    assert_eq!(doc, json!({"hello": "Bonjour"}));
}

#[tokio::test]
async fn serve_catalog_returns_empty_object_for_unknown_pairs() {
    let temp_dir = TempDir::new().unwrap();
    let (runtime, _engine) = compiled_runtime(&temp_dir).await;

    assert_eq!(runtime.serve_catalog("missing", "xx").await, json!({}));
    assert_eq!(runtime.serve_catalog("../../etc/passwd", "en").await, json!({}));
}

#[tokio::test]
async fn render_language_precedence_is_session_then_negotiated_then_fallback() {
    let temp_dir = TempDir::new().unwrap();
    let (runtime, _engine) = compiled_runtime(&temp_dir).await;
    runtime.set_session_language("sess-1", "fr");

    let with_session = runtime.render_hook(&RequestContext {
        session_id: Some("sess-1".to_string()),
        negotiated_language: Some("de".to_string()),
        principal: None,
    });
    let with_negotiated = runtime.render_hook(&RequestContext {
        session_id: Some("sess-2".to_string()),
        negotiated_language: Some("de".to_string()),
        principal: None,
    });
    let with_neither = runtime.render_hook(&RequestContext::default());

    assert_eq!(with_session.language(), "fr");
    assert_eq!(with_negotiated.language(), "de");
    assert_eq!(with_neither.language(), "en");
}

#[tokio::test]
async fn identical_translate_calls_hit_the_engine_once_per_render() {
    let temp_dir = TempDir::new().unwrap();
    let (runtime, engine) = compiled_runtime(&temp_dir).await;
    let mut render = runtime.render_hook(&RequestContext::default());
    let args = json!({"count": 3}).as_object().unwrap().clone();

    let first = render.translate("cart.items", &args);
    let second = render.translate("cart.items", &args);

    assert_eq!(first, "en:cart.items");
    assert_eq!(first, second);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 1);

    // A new render context starts cold.
    let mut next_render = runtime.render_hook(&RequestContext::default());
    let _ = next_render.translate("cart.items", &args);
    assert_eq!(engine.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn socket_translator_follows_session_language_changes() {
    let temp_dir = TempDir::new().unwrap();
    let (runtime, _engine) = compiled_runtime(&temp_dir).await;
    let mut opts = SocketCallOptions::new("sess-1", None);
    runtime.socket_hook(&mut opts);
    let translator = opts.translator.unwrap();

    let before = translator.translate("hello", &Map::new());
    runtime.set_session_language("sess-1", "fr");
    let after = translator.translate("hello", &Map::new());

    assert_eq!(before, "en:hello");
    assert_eq!(after, "fr:hello");
}

mod principal_sync {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use i18n_catalog::runtime::{
        PrincipalStore,
        StoreError,
    };
    use pretty_assertions::assert_eq;

    use super::*;

    /// In-memory store with optional write-failure injection.
    #[derive(Default)]
    struct FakeStore {
        languages: Mutex<HashMap<String, String>>,
        fail_writes: bool,
    }

    impl PrincipalStore for FakeStore {
        async fn language(&self, principal: &str) -> Result<Option<String>, StoreError> {
            Ok(self.languages.lock().unwrap().get(principal).cloned())
        }

        async fn set_language(&self, principal: &str, language: &str) -> Result<(), StoreError> {
            if self.fail_writes {
                return Err(StoreError("persistence unavailable".to_string()));
            }
            self.languages
                .lock()
                .unwrap()
                .insert(principal.to_string(), language.to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn resolved_language_is_persisted_on_mismatch() {
        let temp_dir = TempDir::new().unwrap();
        let (runtime, _engine) = compiled_runtime(&temp_dir).await;
        let store = FakeStore::default();
        runtime.set_session_language("sess-1", "fr");
        let render = runtime.render_hook(&RequestContext {
            session_id: Some("sess-1".to_string()),
            negotiated_language: None,
            principal: Some("user-1".to_string()),
        });

        let updated =
            runtime.sync_principal_language(&store, "user-1", render.language()).await.unwrap();

        assert!(updated);
        assert_eq!(store.language("user-1").await.unwrap(), Some("fr".to_string()));
    }

    #[tokio::test]
    async fn store_failure_surfaces_without_leaking_the_lock() {
        let temp_dir = TempDir::new().unwrap();
        let (runtime, _engine) = compiled_runtime(&temp_dir).await;
        let failing = FakeStore { fail_writes: true, ..FakeStore::default() };

        let result = runtime.sync_principal_language(&failing, "user-1", "fr").await;
        assert!(result.is_err());

        let working = FakeStore::default();
        let updated = runtime.sync_principal_language(&working, "user-1", "fr").await.unwrap();
        assert!(updated);
    }
}
