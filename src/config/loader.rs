//! Configuration file loading.

use std::path::Path;

use super::{
    CatalogSettings,
    ConfigError,
};

/// Load settings from a workspace.
///
/// Looks for an `.i18n-catalog.json` file in the workspace root.
///
/// # Arguments
/// * `workspace_root` - Root path of the workspace
///
/// # Returns
/// - `Ok(Some(settings))`: configuration file found and parsed
/// - `Ok(None)`: no configuration file present
/// - `Err(ConfigError)`: read or parse failure
///
/// # Errors
/// - File read error
/// - JSON parse error
pub(super) fn load_from_workspace(
    workspace_root: &Path,
) -> Result<Option<CatalogSettings>, ConfigError> {
    let config_path = workspace_root.join(".i18n-catalog.json");

    if !config_path.exists() {
        tracing::debug!("Configuration file not found: {:?}", config_path);
        return Ok(None);
    }

    tracing::debug!("Loading configuration from: {:?}", config_path);

    let content = std::fs::read_to_string(&config_path)?;
    let settings: CatalogSettings = serde_json::from_str(&content)?;

    Ok(Some(settings))
}
