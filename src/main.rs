//! Average service entry point.

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tokio::net::TcpListener;
use tracing::{error, info, warn};

use average_service::api::{create_router, AppState};
use average_service::config::{load_dotenv, Config, DotenvOutcome};
use average_service::metrics;
use average_service::telemetry::{self, LogSettings};
use average_service::utils::shutdown_signal;

/// HTTP service returning the arithmetic mean of a list of numbers.
#[derive(Parser, Debug)]
#[command(name = "average-service")]
#[command(about = "Computes the arithmetic mean of a list of positive numbers over HTTP")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Option<Command>,

    /// HTTP listening port (overrides PORT).
    #[arg(short, long, global = true)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Check configuration validity.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let dotenv = load_dotenv();
    let mut config = Config::from_env()?;
    if let Some(port) = args.port {
        config.port = port;
    }

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&config),
        Some(Command::Serve) | None => cmd_serve(config, dotenv).await,
    }
}

/// Check configuration validity.
fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    println!("======================================================================");
    println!("AVERAGE SERVICE - CONFIGURATION CHECK");
    println!("======================================================================");

    print!("Validating configuration... ");
    match config.validate() {
        Ok(()) => println!("OK"),
        Err(e) => {
            println!("FAILED");
            println!("  Error: {}", e);
            return Err(anyhow::anyhow!("Configuration validation failed"));
        }
    }

    println!("----------------------------------------------------------------------");
    println!("Configuration Summary:");
    println!("  Environment: {}", config.env);
    println!("  Port: {}", config.port);
    println!("  Log Level: {}", config.log_level);
    println!("======================================================================");
    println!("CONFIGURATION CHECK PASSED");
    println!("======================================================================");

    Ok(())
}

/// Run the HTTP server until a shutdown signal arrives.
async fn cmd_serve(config: Config, dotenv: DotenvOutcome) -> anyhow::Result<()> {
    config.ensure_valid()?;

    telemetry::init(&LogSettings::from(&config))?;

    match dotenv {
        DotenvOutcome::Loaded(path) => info!(path = %path.display(), "Loaded .env file"),
        DotenvOutcome::Missing(e) => warn!(error = %e, "No .env file found"),
        DotenvOutcome::Skipped => {}
    }

    let handle = metrics::install_recorder()?;
    let app_state = AppState::new().with_metrics(handle);
    let router = create_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        error!(error = %e, %addr, "Failed to bind HTTP listener");
        e
    })?;

    info!(env = %config.env, port = config.port, "Starting server");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}
