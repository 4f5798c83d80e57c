//! Settings management.

use std::path::PathBuf;

use super::{
    CatalogSettings,
    ConfigError,
    loader,
};

/// Holds the currently effective settings.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// Current settings
    current_settings: CatalogSettings,

    /// Workspace root path
    workspace_root: Option<PathBuf>,
}

impl ConfigManager {
    /// Create a new manager with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: CatalogSettings::default(), workspace_root: None }
    }

    /// Load settings for a workspace.
    ///
    /// Falls back to defaults when no workspace or no configuration file is
    /// present; loaded settings are validated before they take effect.
    ///
    /// # Errors
    /// - File read error
    /// - JSON parse error
    /// - Validation error
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for workspace: {:?}", workspace_root);

        let settings = if let Some(root) = &workspace_root {
            loader::load_from_workspace(root)?.map_or_else(CatalogSettings::default, |ws| {
                tracing::debug!("Loaded workspace settings: {:?}", ws);
                ws
            })
        } else {
            CatalogSettings::default()
        };

        settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = settings;
        self.workspace_root = workspace_root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// Replace the current settings.
    pub fn update_settings(&mut self, new_settings: CatalogSettings) -> Result<(), ConfigError> {
        tracing::debug!("Updating settings...");

        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        self.current_settings = new_settings;
        tracing::debug!("Settings updated successfully");

        Ok(())
    }

    /// Current settings.
    #[must_use]
    pub const fn get_settings(&self) -> &CatalogSettings {
        &self.current_settings
    }

    /// Workspace root, when one was loaded.
    #[must_use]
    pub const fn workspace_root(&self) -> Option<&PathBuf> {
        self.workspace_root.as_ref()
    }
}
