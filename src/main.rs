//! Entry point for the catalog compile binary.

use std::process::ExitCode;

use i18n_catalog::CompileTask;
use i18n_catalog::config::ConfigManager;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt().init();

    let workspace_root = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!("Failed to determine working directory: {e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config_manager = ConfigManager::new();
    if let Err(e) = config_manager.load_settings(Some(workspace_root.clone())) {
        tracing::error!("{e}");
        return ExitCode::FAILURE;
    }

    let task = CompileTask::new(config_manager.get_settings().clone(), workspace_root);
    match task.run(&[]).await {
        Ok(status) => {
            tracing::info!("{status}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("Compile failed: {e}");
            ExitCode::FAILURE
        }
    }
}
