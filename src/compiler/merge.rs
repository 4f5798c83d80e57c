//! Deep-merge of locale fragments into a compiled catalog.

use serde_json::Value;

use crate::compiler::types::{
    CompileManifest,
    CompiledCatalog,
    LocaleFragment,
};

/// Merge fragments into one document per `(namespace, locale)` pair.
///
/// Fragments sharing a pair are folded left-to-right in the given order, so
/// a later fragment overrides earlier values. Namespace and locale names are
/// recorded in the manifest in first-seen order, each exactly once.
///
/// Pure and deterministic: the same fragment sequence always produces an
/// identical catalog and manifest.
#[must_use]
pub fn merge(fragments: Vec<LocaleFragment>) -> (CompiledCatalog, CompileManifest) {
    let mut catalog = CompiledCatalog::default();
    let mut manifest = CompileManifest::default();

    for fragment in fragments {
        manifest.record(&fragment.namespace, &fragment.locale);

        let document = catalog.document_mut(&fragment.namespace, &fragment.locale);
        deep_merge(document, Value::Object(fragment.content));
    }

    (catalog, manifest)
}

/// Merge `overlay` into `base`.
///
/// Object keys merge recursively. Any other overlay value — arrays included —
/// replaces the base value wholesale.
pub fn deep_merge(base: &mut Value, overlay: Value) {
    match overlay {
        Value::Object(overlay_map) if base.is_object() => {
            let Some(base_map) = base.as_object_mut() else {
                return;
            };
            for (key, value) in overlay_map {
                if let Some(existing) = base_map.get_mut(&key) {
                    deep_merge(existing, value);
                } else {
                    base_map.insert(key, value);
                }
            }
        }
        other => *base = other,
    }
}
