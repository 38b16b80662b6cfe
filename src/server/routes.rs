//! HTTP request handlers
//!
//! Thin adapters between the wire types and the `SessionManager`; all
//! session logic lives behind the manager.

use std::sync::Arc;

use axum::extract::{Json, State};

use crate::env::EnvOptions;
use crate::error::Result;
use crate::session::{GameStateSnapshot, SessionManager, StatusReport, StopReport};

use super::types::{ActionRequest, EvaluationReport};

/// `POST /initialize` — start a new session (implicitly stopping any
/// existing one) and return the step-0 snapshot
pub async fn initialize(
    State(manager): State<Arc<SessionManager>>,
    Json(options): Json<EnvOptions>,
) -> Result<Json<GameStateSnapshot>> {
    let snapshot = manager.initialize(options).await?;
    Ok(Json(snapshot))
}

/// `POST /action` — apply one action and return the new snapshot (or
/// the timeout sentinel)
pub async fn take_action(
    State(manager): State<Arc<SessionManager>>,
    Json(request): Json<ActionRequest>,
) -> Result<Json<GameStateSnapshot>> {
    let (action, reasoning) = request.into_action()?;
    let snapshot = manager.act(action, reasoning).await?;
    Ok(Json(snapshot))
}

/// `GET /status` — read-only session status
pub async fn status(State(manager): State<Arc<SessionManager>>) -> Json<StatusReport> {
    Json(manager.status().await)
}

/// `POST /stop` — stop the session and return the final score summary
pub async fn stop(State(manager): State<Arc<SessionManager>>) -> Json<StopReport> {
    Json(manager.stop().await)
}

/// `GET /evaluate` — current score breakdown; 400 when no session is
/// active
pub async fn evaluate(
    State(manager): State<Arc<SessionManager>>,
) -> Result<Json<EvaluationReport>> {
    let summary = manager.score_summary().await?;
    Ok(Json(summary.into()))
}
