//! MVC dispatcher server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ http::server ──▶ dispatch::Dispatcher
//!                                         │  ParsedRequest::parse
//!                                         │  RouteTable::match_path
//!                                         │  naming (StudlyCaps / camelCase)
//!                                         ▼
//!                                     ActionInvoker ──▶ app controllers
//!                                                          │
//!     Client Response                                      ▼
//!     ◀────────────── http::response ◀── views / JSON / redirect
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use mvc_dispatch::config::{self, AppConfig};
use mvc_dispatch::observability::{logging, metrics};
use mvc_dispatch::{app, Dispatcher, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "mvc-dispatch")]
#[command(about = "Serve controller actions resolved from URL routes", long_about = None)]
struct Cli {
    /// Configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => AppConfig::default(),
    };

    logging::init(&config.observability.log_level);
    tracing::info!("mvc-dispatch v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.server.bind_address,
        environment = ?config.app.environment,
        routes = config.routes.len(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let dispatcher = Dispatcher::from_config(&config.routes, app::registry());

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    shutdown.trigger_on_signal();

    HttpServer::new(config, dispatcher)
        .run(listener, shutdown.subscribe())
        .await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
