//! Build task surface consumed by an external task runner.

use std::path::PathBuf;

use tokio::sync::Mutex;

use crate::compiler::{
    discover,
    fragment,
    merge,
    output,
};
use crate::compiler::types::CompileError;
use crate::config::CatalogSettings;

/// One compile batch over a source tree.
///
/// The task runner hands `run` the glob pattern(s) to compile (changed-file
/// driven rebuilds pass the same patterns) and watches whatever `watch`
/// returns. Overlapping `run` calls are serialized internally: the
/// clear-then-write step over the output directory is not transactional, so
/// at most one compile per task may touch it at a time.
#[derive(Debug)]
pub struct CompileTask {
    /// Effective settings for this task.
    settings: CatalogSettings,
    /// Root the source pattern and output paths are resolved against.
    source_root: PathBuf,
    /// Single-flight guard over the output directory.
    run_lock: Mutex<()>,
}

impl CompileTask {
    /// Create a task over a source root.
    #[must_use]
    pub fn new(settings: CatalogSettings, source_root: impl Into<PathBuf>) -> Self {
        Self { settings, source_root: source_root.into(), run_lock: Mutex::new(()) }
    }

    /// Run one compile batch.
    ///
    /// `files` are glob patterns relative to the source root; an empty list
    /// compiles the configured source pattern. Returns a status message for
    /// the task runner.
    ///
    /// # Errors
    /// Any discovery, load, merge or write failure fails the whole batch;
    /// the task runner decides whether to retry.
    pub async fn run(&self, files: &[String]) -> Result<String, CompileError> {
        let _flight = self.run_lock.lock().await;

        let patterns = if files.is_empty() {
            vec![self.settings.source_pattern.clone()]
        } else {
            files.to_vec()
        };

        // The output directory is always excluded from discovery so a
        // compile never ingests its own artifacts.
        let mut exclude_patterns = self.settings.exclude_patterns.clone();
        exclude_patterns.push(format!("{}/**", self.settings.output_dir));

        tracing::debug!(?patterns, source_root = %self.source_root.display(), "Starting compile");

        let paths =
            discover::find_fragment_files(&self.source_root, &patterns, &exclude_patterns)?;

        let fragments = fragment::load_fragments(
            &paths,
            &self.settings.default_namespace,
            self.settings.compile.effective_threads(),
        )
        .await?;

        let (catalog, manifest) = merge::merge(fragments);

        let output_dir = self.source_root.join(&self.settings.output_dir);
        let manifest_path = self.source_root.join(&self.settings.manifest_path);
        output::write_catalog(&catalog, &manifest, &output_dir, &manifest_path).await?;

        tracing::info!(
            locales = manifest.locales.len(),
            namespaces = manifest.namespaces.len(),
            pairs = catalog.len(),
            "Compile finished"
        );

        Ok(format!(
            "compiled {} locales across {} namespaces",
            manifest.locales.len(),
            manifest.namespaces.len()
        ))
    }

    /// Glob pattern(s) the task runner should watch for rebuilds.
    #[must_use]
    pub fn watch(&self) -> Vec<String> {
        vec![self.settings.source_pattern.clone()]
    }
}
