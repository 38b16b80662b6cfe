//! Session state structures
//!
//! The snapshot returned to clients after every operation, the observer
//! event envelope, and the internal state machine slot the manager
//! serializes behind its mutex.

use std::path::PathBuf;
use std::time::Instant;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::env::{GameEnvironment, GameState};
use crate::evaluator::Evaluator;
use crate::steplog::StepLog;

/// Location string carried by the timeout sentinel snapshot
pub const TIMEOUT_LOCATION: &str = "SESSION_TIMEOUT";

/// Dialog text carried by the timeout sentinel snapshot
pub const TIMEOUT_DIALOG: &str = "Session has timed out. Please initialize a new session.";

/// Full observable game state returned after an action or at
/// initialization
///
/// `step_number` is strictly increasing within a session and starts at 0
/// for the post-initialize snapshot. `score` reflects the step's own
/// achievements (the aggregator is folded before the snapshot is sealed).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameStateSnapshot {
    /// Observable game state from the environment
    #[serde(flatten)]
    pub state: GameState,
    /// Walkability grid rendering, when available
    pub collision_map: Option<String>,
    /// Step number this snapshot describes
    pub step_number: u64,
    /// Wall-clock seconds since the previous response
    pub execution_time: f64,
    /// Cumulative score as of this snapshot
    pub score: f64,
}

impl GameStateSnapshot {
    /// Sentinel returned for actions against a timed-out session: empty
    /// fields, descriptive dialog, and the last known score. Not an
    /// error, so automated clients can detect it without exception
    /// handling.
    #[must_use]
    pub fn timeout_sentinel(last_score: f64) -> Self {
        Self {
            state: GameState {
                location: TIMEOUT_LOCATION.to_string(),
                dialog: Some(TIMEOUT_DIALOG.to_string()),
                ..GameState::default()
            },
            collision_map: None,
            step_number: 0,
            execution_time: 0.0,
            score: last_score,
        }
    }

    /// Whether this is the timeout sentinel
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        self.state.location == TIMEOUT_LOCATION
    }
}

/// Action description attached to broadcast events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionInfo {
    /// Action type (`press_key` / `wait`)
    #[serde(rename = "type")]
    pub action_type: String,
    /// Primary action parameters
    pub details: ActionDetails,
    /// Free-text rationale supplied by the acting agent, if any
    pub reasoning: Option<String>,
    /// Milliseconds since the Unix epoch
    pub timestamp: i64,
}

/// Primary parameters of a broadcast action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionDetails {
    /// First pressed button for `press_key` actions
    pub button: Option<String>,
    /// Frame count for `wait` actions
    pub frames: Option<u32>,
}

/// One broadcast fan-out event: the post-action snapshot plus the action
/// that produced it (absent for the initialize broadcast)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEvent {
    /// Snapshot after the operation
    pub state: GameStateSnapshot,
    /// Originating action, when the event was produced by `/action`
    pub action: Option<ActionInfo>,
}

/// All state owned by one running session
///
/// Exclusively owned by the manager's slot; the evaluator and step log
/// are recreated, never reused, on each initialize.
pub(crate) struct ActiveSession {
    /// Guards the timeout task against firing into a successor session
    pub id: Uuid,
    /// The one live environment handle
    pub env: Box<dyn GameEnvironment>,
    /// Achievement sets and score for this session
    pub evaluator: Evaluator,
    /// Durable per-step log
    pub step_log: StepLog,
    /// When the session began (drives the timeout check)
    pub started_at: Instant,
    /// When the previous response was produced (drives execution_time)
    pub last_response_at: Instant,
    /// Single-shot timeout task, armed once at initialize
    pub timeout_handle: JoinHandle<()>,
}

/// The manager's process-wide session slot
pub(crate) enum SessionSlot {
    /// No session has been started (or the previous one was replaced)
    Uninitialized,
    /// A session is live
    Running(Box<ActiveSession>),
    /// The previous session was stopped explicitly
    Stopped {
        /// Where the session's artifacts were written
        session_dir: PathBuf,
        /// Final score at stop time
        final_score: f64,
    },
    /// The previous session hit its duration cap; actions now receive
    /// the timeout sentinel carrying this score
    TimedOut {
        /// Where the session's artifacts were written
        session_dir: PathBuf,
        /// Score when the timeout fired
        last_score: f64,
    },
}

impl SessionSlot {
    /// Wire-level status string for this state
    #[must_use]
    pub fn status_str(&self) -> &'static str {
        match self {
            SessionSlot::Uninitialized => "not_initialized",
            SessionSlot::Running(_) => "running",
            SessionSlot::Stopped { .. } => "stopped",
            SessionSlot::TimedOut { .. } => "timed_out",
        }
    }
}
