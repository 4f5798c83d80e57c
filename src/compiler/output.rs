//! Compiled catalog output.

use std::path::Path;

use crate::compiler::types::{
    CompileError,
    CompileManifest,
    CompiledCatalog,
};

/// Write the compiled catalog and manifest.
///
/// The output directory is cleared and recreated, then one
/// `<namespace>.<locale>.json` file is written per pair, iterating the
/// manifest's namespace × locale order. Running twice with identical inputs
/// yields byte-identical output.
///
/// Any failure fails the whole batch; already-written files are not rolled
/// back, the caller treats the run as failed and re-runs.
///
/// # Errors
/// - `CompileError::Write` when the directory cannot be cleared or a file
///   cannot be written
/// - `CompileError::Serialize` when a document cannot be serialized
pub async fn write_catalog(
    catalog: &CompiledCatalog,
    manifest: &CompileManifest,
    output_dir: &Path,
    manifest_path: &Path,
) -> Result<(), CompileError> {
    clear_dir(output_dir).await?;

    for namespace in &manifest.namespaces {
        for locale in &manifest.locales {
            let Some(document) = catalog.document(namespace, locale) else {
                continue;
            };

            let path = output_dir.join(format!("{namespace}.{locale}.json"));
            let bytes = serde_json::to_vec(document)
                .map_err(|source| CompileError::Serialize { path: path.clone(), source })?;
            tokio::fs::write(&path, bytes)
                .await
                .map_err(|source| CompileError::Write { path: path.clone(), source })?;
            tracing::debug!(path = %path.display(), "Wrote catalog file");
        }
    }

    write_manifest(manifest, manifest_path).await
}

/// Remove all prior contents of the output directory and recreate it.
async fn clear_dir(output_dir: &Path) -> Result<(), CompileError> {
    match tokio::fs::remove_dir_all(output_dir).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(source) => {
            return Err(CompileError::Write { path: output_dir.to_path_buf(), source });
        }
    }

    tokio::fs::create_dir_all(output_dir)
        .await
        .map_err(|source| CompileError::Write { path: output_dir.to_path_buf(), source })
}

/// Write the manifest index artifact.
async fn write_manifest(
    manifest: &CompileManifest,
    manifest_path: &Path,
) -> Result<(), CompileError> {
    if let Some(parent) = manifest_path.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|source| CompileError::Write { path: parent.to_path_buf(), source })?;
    }

    let bytes = serde_json::to_vec_pretty(manifest)
        .map_err(|source| CompileError::Serialize { path: manifest_path.to_path_buf(), source })?;
    tokio::fs::write(manifest_path, bytes)
        .await
        .map_err(|source| CompileError::Write { path: manifest_path.to_path_buf(), source })?;

    tracing::debug!(path = %manifest_path.display(), "Wrote manifest");

    Ok(())
}
