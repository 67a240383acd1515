mod careers;
mod config;
mod errors;
mod export;
mod render;
mod routes;
mod state;

use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::careers::CareerLoader;
use crate::config::Config;
use crate::export::export_site;
use crate::routes::build_router;
use crate::state::AppState;

#[derive(Parser)]
#[command(name = "site", version, about = "Career requirements site generator")]
struct Cli {
    /// Directory holding the career YAML files (overrides CAREERS_DIR)
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the static site into the output directory
    Build {
        /// Output directory (overrides OUT_DIR)
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
    /// Serve the pages and a JSON view of the records
    Serve {
        /// Listen port (overrides PORT)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Validate every content file and report the ones that fail
    Check,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    if let Some(dir) = cli.content_dir {
        config.content_dir = dir;
    }

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let loader = CareerLoader::new(&config.content_dir, config.value_policy);
    info!(
        "Career content: {} (value policy: {:?})",
        loader.content_dir().display(),
        loader.policy()
    );

    match cli.command {
        Command::Build { out_dir } => {
            let out_dir = out_dir.unwrap_or(config.out_dir);
            export_site(&loader, &out_dir).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Serve { port } => {
            serve(loader, port.unwrap_or(config.port)).await?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Check => Ok(check(&loader).await),
    }
}

async fn serve(loader: CareerLoader, port: u16) -> Result<()> {
    let app = build_router(AppState { loader })
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn check(loader: &CareerLoader) -> ExitCode {
    let report = loader.load_report().await;
    for failure in &report.failures {
        println!("{}: {}", failure.id, failure.error);
    }
    println!(
        "{} valid, {} invalid",
        report.records.len(),
        report.failures.len()
    );
    if report.failures.is_empty() {
        ExitCode::SUCCESS
    } else {
        warn!("{} content file(s) failed validation", report.failures.len());
        ExitCode::FAILURE
    }
}
