mod server;

use anyhow::Result;
use clap::Parser;
use datefr_core::{Config, DateExtractor};
use std::{path::PathBuf, process::ExitCode, sync::Arc};
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "datefr=info,datefr_core=info";

/// datefr: extracts due and completion dates from French text over HTTP
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Address to bind (overrides `host` from config.toml, default 0.0.0.0)
    #[arg(long, env = "DATEFR_HOST")]
    host: Option<String>,
    /// Port to listen on (overrides `port` from config.toml, default 8080)
    #[arg(long, short, env = "DATEFR_PORT")]
    port: Option<u16>,
    /// Read this config file instead of searching the standard locations
    #[arg(long, short, env = "DATEFR_CONFIG")]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER)),
        )
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("datefr: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = match cli.config.as_deref() {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(host) = cli.host {
        config.host = host;
    }
    if let Some(port) = cli.port {
        config.port = port;
    }

    tracing::info!(
        timezone = %config.timezone,
        prefer_dates_from = config.prefer_dates_from.as_ref(),
        window_len = config.window_len,
        "datefr starting v{}",
        env!("CARGO_PKG_VERSION")
    );

    let listener = server::bind(&config.bind_addr()).await?;
    let extractor = Arc::new(DateExtractor::with_config(config));
    server::serve(listener, extractor, server::shutdown_signal()).await
}
