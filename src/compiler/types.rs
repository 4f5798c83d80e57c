//! Compiler type definitions.

use std::collections::HashMap;
use std::path::{
    Path,
    PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use serde_json::{
    Map,
    Value,
};
use thiserror::Error;

/// One source JSON file contributing translations for a
/// `(namespace, locale)` pair. Immutable once loaded; consumed by the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleFragment {
    pub namespace: String,
    pub locale: String,
    pub source_path: PathBuf,
    /// Top-level JSON object of the fragment file.
    pub content: Map<String, Value>,
}

/// Merged translation documents, `namespace → locale → document`.
///
/// Built fresh on every compile run; the output writer fully rewrites the
/// output directory so stale pairs cannot linger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompiledCatalog {
    /// Merged documents by namespace, then locale.
    documents: HashMap<String, HashMap<String, Value>>,
}

impl CompiledCatalog {
    /// Merged document for a pair, if any fragment contributed to it.
    #[must_use]
    pub fn document(&self, namespace: &str, locale: &str) -> Option<&Value> {
        self.documents.get(namespace)?.get(locale)
    }

    /// Document slot for a pair, created as an empty object when absent.
    pub(crate) fn document_mut(&mut self, namespace: &str, locale: &str) -> &mut Value {
        self.documents
            .entry(namespace.to_string())
            .or_default()
            .entry(locale.to_string())
            .or_insert_with(|| Value::Object(Map::new()))
    }

    /// Number of `(namespace, locale)` pairs present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.documents.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Index of all namespaces and locales discovered during a compile run,
/// in first-discovery order. Persisted alongside the compiled catalog and
/// consumed by process start-up configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompileManifest {
    pub locales: Vec<String>,
    pub namespaces: Vec<String>,
}

impl CompileManifest {
    /// Record a pair, keeping each name once in first-seen order.
    pub(crate) fn record(&mut self, namespace: &str, locale: &str) {
        if !self.namespaces.iter().any(|n| n == namespace) {
            self.namespaces.push(namespace.to_string());
        }
        if !self.locales.iter().any(|l| l == locale) {
            self.locales.push(locale.to_string());
        }
    }

    /// Whether both names were discovered during the compile run.
    ///
    /// Request path segments are checked against this before any file path
    /// is formed from them.
    #[must_use]
    pub fn contains(&self, namespace: &str, locale: &str) -> bool {
        self.namespaces.iter().any(|n| n == namespace) && self.locales.iter().any(|l| l == locale)
    }

    /// Load a manifest written by a previous compile run.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    pub fn load(path: &Path) -> Result<Self, CompileError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| CompileError::Read { path: path.to_path_buf(), source })?;
        serde_json::from_str(&content)
            .map_err(|source| CompileError::Manifest { path: path.to_path_buf(), source })
    }
}

#[derive(Error, Debug)]
pub enum CompileError {
    /// Fragment file whose content is not a JSON object. Fails the whole
    /// batch; a corrupt translation file must never be skipped silently.
    #[error("Malformed translation fragment '{path}': {reason}")]
    MalformedFragment { path: PathBuf, reason: String },

    #[error("Invalid glob pattern '{pattern}': {source}")]
    InvalidPattern { pattern: String, source: globset::Error },

    #[error("Failed to read '{path}': {source}")]
    Read { path: PathBuf, source: std::io::Error },

    #[error("Failed to write compiled output '{path}': {source}")]
    Write { path: PathBuf, source: std::io::Error },

    #[error("Failed to serialize compiled output '{path}': {source}")]
    Serialize { path: PathBuf, source: serde_json::Error },

    #[error("Failed to parse manifest '{path}': {source}")]
    Manifest { path: PathBuf, source: serde_json::Error },
}
