use serde::{
    Deserialize,
    Serialize,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Configuration error in '{field_path}': {message}")]
pub struct ValidationError {
    /// JSON path to the field (e.g., "excludePatterns[0]")
    pub field_path: String,
    pub message: String,
}

impl ValidationError {
    #[must_use]
    pub fn new(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self { field_path: field_path.into(), message: message.into() }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration validation failed:\n{}", format_validation_errors(.0))]
    ValidationErrors(Vec<ValidationError>),

    #[error("Failed to load configuration file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, err)| format!("  {}. {} - {}", i + 1, err.field_path, err.message))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Settings for the locale catalog compiler and the runtime layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CatalogSettings {
    /// Glob matching translation fragment files, relative to the source root.
    pub source_pattern: String,
    pub exclude_patterns: Vec<String>,

    /// Namespace applied to fragments named `<locale>.json` (no namespace
    /// segment in the file name).
    pub default_namespace: String,

    /// Directory the compiled `<namespace>.<locale>.json` files are written
    /// to. Cleared on every compile run.
    pub output_dir: String,
    /// Path of the manifest index artifact.
    pub manifest_path: String,

    /// Language served when neither the session nor the request carries one.
    pub fallback_language: String,

    /// Upper bound on remembered session → language entries.
    pub session_capacity: usize,

    pub compile: CompileConfig,
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CompileConfig {
    /// Parallel fragment-read width.
    /// Default: 80% of CPU cores (minimum 1).
    pub num_threads: Option<usize>,
}

impl CompileConfig {
    /// Effective read width for fragment loading.
    #[must_use]
    pub fn effective_threads(&self) -> usize {
        self.num_threads.unwrap_or_else(|| (num_cpus::get() * 4 / 5).max(1))
    }
}

impl CatalogSettings {
    /// # Errors
    /// - Required field is empty
    /// - Invalid glob pattern
    /// - Zero session capacity
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if self.source_pattern.is_empty() {
            errors.push(ValidationError::new(
                "sourcePattern",
                "The pattern cannot be empty. Example: \"**/locales/*.json\"",
            ));
        } else if let Err(e) = globset::Glob::new(&self.source_pattern) {
            errors.push(ValidationError::new(
                "sourcePattern",
                format!("Invalid glob pattern '{}': {e}", self.source_pattern),
            ));
        }

        for (index, pattern) in self.exclude_patterns.iter().enumerate() {
            if let Err(e) = globset::Glob::new(pattern) {
                errors.push(ValidationError::new(
                    format!("excludePatterns[{index}]"),
                    format!("Invalid glob pattern '{pattern}': {e}"),
                ));
            }
        }

        if self.default_namespace.is_empty() {
            errors.push(ValidationError::new(
                "defaultNamespace",
                "The namespace cannot be empty. Example: \"default\"",
            ));
        }

        if self.output_dir.is_empty() {
            errors.push(ValidationError::new(
                "outputDir",
                "The directory cannot be empty. Example: \"dist/locales\"",
            ));
        }

        if self.manifest_path.is_empty() {
            errors.push(ValidationError::new(
                "manifestPath",
                "The path cannot be empty. Example: \"dist/locales/.index.json\"",
            ));
        }

        if self.fallback_language.is_empty() {
            errors.push(ValidationError::new(
                "fallbackLanguage",
                "The language tag cannot be empty. Example: \"en\"",
            ));
        }

        if self.session_capacity == 0 {
            errors.push(ValidationError::new("sessionCapacity", "The capacity must be at least 1"));
        }

        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            source_pattern: "**/locales/*.json".to_string(),
            exclude_patterns: vec!["node_modules/**".to_string()],
            default_namespace: "default".to_string(),
            output_dir: "dist/locales".to_string(),
            manifest_path: "dist/locales/.index.json".to_string(),
            fallback_language: "en".to_string(),
            session_capacity: 10_000,
            compile: CompileConfig::default(),
        }
    }
}
