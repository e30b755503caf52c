//! Mech template builder binary.
//!
//! Composition root: loads configuration, installs logging, assembles the
//! workshop through [`client_bootstrap::RuntimeBuilder`] and hands it to the
//! selected front-end.
//!
//! # Features
//!
//! - `frontend-cli`: numbered console menus (default)
//!
//! ```bash
//! cargo run -p mech-client
//! ```

use anyhow::Result;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    #[cfg(feature = "frontend-cli")]
    {
        run_cli()?;
    }

    #[cfg(not(feature = "frontend-cli"))]
    {
        compile_error!("At least one frontend feature must be enabled (frontend-cli)");
    }

    Ok(())
}

/// Run the console frontend.
#[cfg(feature = "frontend-cli")]
fn run_cli() -> Result<()> {
    use client_bootstrap::{RuntimeBuilder, RuntimeConfig};
    use client_frontend_cli::{CliConfig, CliFrontend, logging};

    // 1. Load configuration from environment
    let runtime_config = RuntimeConfig::from_env();
    let cli_config = CliConfig::from_env();

    // 2. Setup logging
    logging::setup_logging()?;

    tracing::info!("Starting mech template builder");
    tracing::info!("Data directory: {}", runtime_config.data_dir.display());
    tracing::info!("Save directory: {}", runtime_config.save_data_dir.display());

    // 3. Build the workshop
    let setup = RuntimeBuilder::new().config(runtime_config).build()?;

    // 4. Run the menus until the user quits
    let mut frontend = CliFrontend::stdio(cli_config, setup);
    frontend.run()?;

    tracing::info!("Client shutdown complete");
    Ok(())
}
