//! Paystub service
//!
//! Serves `POST /process` with the configuration from `--config`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use paystub_engine::api::{AppState, create_router};
use paystub_engine::config::ConfigLoader;

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "paystubs", version, about = "Issues PDF paystubs from payroll CSV uploads")]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(long, env = "PAYSTUBS_CONFIG", default_value = "config/paystubs.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let loader = match ConfigLoader::load(&cli.config) {
        Ok(loader) => loader,
        Err(e) => {
            error!(error = %e, "Failed to load configuration");
            return ExitCode::FAILURE;
        }
    };

    let address = loader.config().server.bind_address();
    let listener = match tokio::net::TcpListener::bind(&address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!(address = %address, error = %e, "Failed to bind listener");
            return ExitCode::FAILURE;
        }
    };

    info!(
        address = %address,
        config = %cli.config.display(),
        outbox = %loader.config().mail.outbox_dir.display(),
        "Paystub service listening"
    );

    let router = create_router(AppState::new(loader));
    match axum::serve(listener, router).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Server stopped");
            ExitCode::FAILURE
        }
    }
}
