//! gandi-rrr entry point

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use gandi_rrr_core::{Config, DEFAULT_CONFIG_PATH, DomainService};
use gandi_rrr_provider::create_zone_api;
use gandi_rrr_web::{logging, server};

#[derive(Debug, Parser)]
#[command(name = "gandi-rrr", about, disable_version_flag = true)]
struct Cli {
    /// Print version and exit
    #[arg(short = 'v', long = "version")]
    version: bool,

    /// Path to the JSON config file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[actix_web::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.version {
        println!("gandi-rrr v{}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    let config = match Config::load(&cli.config) {
        Ok(config) => Arc::new(config),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    // Flushes buffered log lines when dropped
    let _guard = match logging::init(&config.log_file) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{e:#}");
            return ExitCode::FAILURE;
        }
    };

    let api = match create_zone_api(config.provider_credentials()) {
        Ok(api) => api,
        Err(e) => {
            tracing::error!("Failed to create zone API: {e}");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        "Serving {} token(s) through the {} zone API",
        config.tokens.len(),
        api.id()
    );
    let domains = Arc::new(DomainService::new(api));

    if let Err(e) = server::run(config, domains).await {
        tracing::error!("{e:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
