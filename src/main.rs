use anyhow::Context;
use clap::Parser;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tripwire::api;
use tripwire::config::Config;
use tripwire::monitor::Monitor;

/// Command-line arguments for the alerting service
#[derive(Parser)]
#[command(
    name = "tripwire",
    about = "Windowed threshold alerting over client event streams",
    long_about = "An HTTP service that records discrete client events, matches them \
                  against registered per-(client, event type) alert rules, and fires \
                  console or email notifications when an event-count threshold is \
                  exceeded within a tumbling or sliding time window."
)]
struct Cli {
    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Bind address override
    #[arg(
        short,
        long,
        value_name = "ADDR",
        help = "Bind address override, e.g. 127.0.0.1:9090"
    )]
    bind: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging output (debug level)")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let config = Config::load(cli.config.as_deref())?;
    let bind = cli.bind.unwrap_or(config.server.bind);

    // One monitor instance shared by every inbound request.
    let monitor = Arc::new(Monitor::new());
    let app = api::router(monitor);

    let listener = TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {}", bind))?;
    info!("Server starting on {}", bind);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
