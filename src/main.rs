// Pokemon evaluation server binary.
//
// Serves the HTTP/WebSocket evaluation API over a scripted environment.
// A real emulator adapter plugs in through the same factory seam.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use pokemon_eval::config::{ServerConfig, DEFAULT_MAX_SESSION_SECS, DEFAULT_OUTPUT_DIR};
use pokemon_eval::env::scripted_factory;
use pokemon_eval::session::SessionManager;

#[derive(Debug, Parser)]
#[command(
    name = "pokemon-eval-server",
    about = "API server for evaluating AI agents on Pokemon Red gameplay",
    version
)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Path to the Pokemon ROM file
    #[arg(long, default_value = "Pokemon_Red.gb")]
    rom: PathBuf,

    /// Base directory for per-session output
    #[arg(long, default_value = DEFAULT_OUTPUT_DIR)]
    output_dir: PathBuf,

    /// Maximum session duration in seconds before forced teardown
    #[arg(long, default_value_t = DEFAULT_MAX_SESSION_SECS)]
    max_session_secs: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let config = ServerConfig {
        rom_path: args.rom,
        output_dir: args.output_dir,
        max_session_duration: Duration::from_secs(args.max_session_secs),
    };

    log::info!(
        "pokemon-eval-server v{} (max session duration {}s, output dir {})",
        pokemon_eval::VERSION,
        args.max_session_secs,
        config.output_dir.display()
    );

    let factory = scripted_factory(config.rom_path.clone());
    let manager = Arc::new(SessionManager::new(config, factory));

    let addr = format!("{}:{}", args.host, args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    pokemon_eval::server::serve(listener, manager)
        .await
        .context("Server error")?;
    Ok(())
}
