//! HTTP/WebSocket surface
//!
//! One JSON document per request/response; errors map to
//! `{"detail": ...}` bodies (`NotInitialized`/`BadRequest` -> 400,
//! everything else -> 500).

mod routes;
mod types;
mod ws;

pub use types::{ActionRequest, CategoryBreakdown, EvaluationReport};

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;

use crate::error::EvalError;
use crate::session::SessionManager;

impl IntoResponse for EvalError {
    fn into_response(self) -> Response {
        let status = match &self {
            EvalError::NotInitialized | EvalError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}

/// Router serving the evaluation API over the given manager
#[must_use]
pub fn app(manager: Arc<SessionManager>) -> Router {
    Router::new()
        .route("/initialize", post(routes::initialize))
        .route("/action", post(routes::take_action))
        .route("/status", get(routes::status))
        .route("/stop", post(routes::stop))
        .route("/evaluate", get(routes::evaluate))
        .route("/ws", get(ws::ws_handler))
        .with_state(manager)
}

/// Serve the evaluation API on an already-bound listener until the
/// process exits
pub async fn serve(listener: TcpListener, manager: Arc<SessionManager>) -> std::io::Result<()> {
    log::info!(
        "Pokemon evaluation server listening on {}",
        listener.local_addr()?
    );
    axum::serve(listener, app(manager)).await
}
