use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use mvc_dispatch::config::{self, AppConfig};
use mvc_dispatch::{app, Dispatcher};

#[derive(Parser)]
#[command(name = "route-cli")]
#[command(about = "Inspect the route table and URL resolution", long_about = None)]
struct Cli {
    /// Configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List routes in match order
    Routes,
    /// Show the controller, action and arguments a URL resolves to
    Resolve {
        /// Path with optional query, e.g. `posts/7?page=2`
        url: String,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match config::load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => AppConfig::default(),
    };
    let dispatcher = Dispatcher::from_config(&config.routes, app::registry());

    let output = match cli.command {
        Commands::Routes => Ok(routes(&dispatcher)),
        Commands::Resolve { url } => dispatcher
            .resolve(&url)
            .map_err(|e| e.to_string())
            .and_then(|resolved| serde_json::to_value(resolved).map_err(|e| e.to_string())),
    };

    match output {
        Ok(value) => {
            match serde_json::to_string_pretty(&value) {
                Ok(text) => println!("{text}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn routes(dispatcher: &Dispatcher) -> Value {
    let routes: Vec<Value> = dispatcher
        .routes()
        .routes()
        .iter()
        .map(|route| {
            json!({
                "pattern": route.spec(),
                "matchable": route.pattern().is_matchable(),
                "defaults": route.defaults(),
            })
        })
        .collect();
    json!({ "routes": routes, "controllers": dispatcher.registry().identifiers() })
}
