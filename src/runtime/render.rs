//! Per-render translation memoization.

use std::collections::{
    BTreeMap,
    HashMap,
};
use std::sync::Arc;

use serde_json::{
    Map,
    Value,
};

/// Seam to the external translation-string engine.
///
/// The runtime decides *which* language applies and *whether* a value needs
/// recomputing; rendering the message catalog (pluralization, interpolation)
/// stays behind this trait.
pub trait TranslationEngine: Send + Sync {
    /// Render the string for `key` in `language` with `args`.
    fn translate(&self, language: &str, key: &str, args: &Map<String, Value>) -> String;
}

/// Translation state for the lifetime of one render.
///
/// Holds the resolved language and a memo of translate results keyed by the
/// call signature. The memo dies with the context; it never crosses
/// requests.
pub struct RenderContext {
    /// Language resolved for this render.
    language: String,
    /// Engine the first call per signature delegates to.
    engine: Arc<dyn TranslationEngine>,
    /// Serialized `(key, args)` signature → rendered string.
    memo: HashMap<String, String>,
}

impl RenderContext {
    /// Bind a context to a resolved language and engine.
    pub(crate) fn new(language: String, engine: Arc<dyn TranslationEngine>) -> Self {
        Self { language, engine, memo: HashMap::new() }
    }

    /// Language resolved for this render.
    #[must_use]
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Translate `key` with `args`, memoized for this render.
    ///
    /// The first call per `(key, args)` signature delegates to the engine;
    /// repeated identical calls return the stored value without re-invoking
    /// it.
    pub fn translate(&mut self, key: &str, args: &Map<String, Value>) -> String {
        let signature = call_signature(key, args);

        if let Some(rendered) = self.memo.get(&signature) {
            return rendered.clone();
        }

        let rendered = self.engine.translate(&self.language, key, args);
        self.memo.insert(signature, rendered.clone());
        rendered
    }

    /// Number of memoized signatures (test observability).
    #[must_use]
    pub fn memo_len(&self) -> usize {
        self.memo.len()
    }
}

impl std::fmt::Debug for RenderContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("language", &self.language)
            .field("memo", &self.memo.len())
            .finish_non_exhaustive()
    }
}

/// Deterministic signature for a translate call.
///
/// Object keys are ordered at every nesting level before serializing, so the
/// signature does not depend on argument construction order.
fn call_signature(key: &str, args: &Map<String, Value>) -> String {
    let canonical_args: BTreeMap<&String, Value> =
        args.iter().map(|(k, v)| (k, canonicalize(v))).collect();
    serde_json::to_string(&(key, canonical_args)).unwrap_or_else(|_| key.to_string())
}

/// Rebuild a value with object keys in sorted order at every level.
fn canonicalize(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let ordered: BTreeMap<&String, Value> =
                map.iter().map(|(k, v)| (k, canonicalize(v))).collect();
            serde_json::to_value(ordered).unwrap_or_else(|_| value.clone())
        }
        Value::Array(items) => Value::Array(items.iter().map(canonicalize).collect()),
        other => other.clone(),
    }
}
