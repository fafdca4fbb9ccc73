use planisphere_backend::config::BackendConfig;
use planisphere_backend::module::batch;

use anyhow::Result;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = BackendConfig::load_or_default(&config_path)?;

    // Initialize logging
    let _logging_guard = planisphere_backend::logging::init_logging(
        &config.log_dir,
        "planisphere-backend",
        &config.log_level,
    )?;

    tracing::info!("Planisphere backend starting...");
    tracing::info!("Writing star wheels to {}", config.output_dir.display());

    let report = batch::run_batch(config).await?;
    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} star wheels failed",
            report.failed,
            report.failed + report.rendered
        );
    }

    Ok(())
}
