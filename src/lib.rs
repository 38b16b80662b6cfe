//! # Pokemon Evaluation Server
//!
//! HTTP/WebSocket wrapper around a Pokemon game environment for
//! programmatic evaluation of AI agents. One game session is live at a
//! time; every action is scored against milestone achievement sets
//! (locations visited, Pokemon seen, badges earned) and durably logged
//! with a per-step screenshot.
//!
//! ## Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use pokemon_eval::config::ServerConfig;
//! use pokemon_eval::env::scripted_factory;
//! use pokemon_eval::session::SessionManager;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let factory = scripted_factory(config.rom_path.clone());
//!     let manager = Arc::new(SessionManager::new(config, factory));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     pokemon_eval::server::serve(listener, manager).await
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`session`]: `SessionManager` — lifecycle, timeout enforcement,
//!   serialized access to the one environment handle, observer fan-out
//! - [`evaluator`]: monotonic achievement sets and milestone scoring
//! - [`steplog`]: append-only per-session CSV log, screenshots, summary
//! - [`env`]: the `GameEnvironment` seam the emulator plugs into
//! - [`server`]: axum routes and the WebSocket observer endpoint
//! - [`error`]: error types and the crate `Result` alias
//!
//! ## Session lifecycle
//!
//! `POST /initialize` creates a session (implicitly stopping any prior
//! one), arms a single-shot timeout, and returns the step-0 snapshot.
//! Each `POST /action` steps the environment, folds the result into the
//! evaluator, appends a step record, and broadcasts the snapshot to any
//! WebSocket observers. `POST /stop` (or the timeout firing) tears the
//! session down and persists the final evaluation summary. An action
//! against a timed-out session receives a sentinel snapshot (location
//! `SESSION_TIMEOUT`) rather than an error.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod env;
pub mod error;
pub mod evaluator;
pub mod server;
pub mod session;
pub mod steplog;

pub use config::ServerConfig;
pub use error::{EvalError, Result};
pub use evaluator::{Evaluator, ScoreSummary};
pub use session::{GameEvent, GameStateSnapshot, SessionManager};
pub use steplog::{StepLog, StepRecord};

/// Version of the server crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
