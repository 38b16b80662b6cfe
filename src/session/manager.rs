//! Session lifecycle management
//!
//! `SessionManager` owns the single active game session. Every mutation
//! (initialize, action, stop, timeout) funnels through one
//! `tokio::sync::Mutex`, so actions can never interleave with an
//! in-flight initialize/stop and the timeout task can never race a
//! request: whoever takes the lock first wins, and a fired timeout
//! leaves the slot in `TimedOut` for in-flight callers to observe.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use serde::Serialize;
use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::config::{ServerConfig, BROADCAST_CAPACITY};
use crate::env::{Action, EnvOptions, EnvironmentFactory};
use crate::error::{EvalError, Result};
use crate::evaluator::{Evaluator, ScoreSummary};
use crate::steplog::{StepLog, StepRecord};

use super::state::{
    ActionDetails, ActionInfo, ActiveSession, GameEvent, GameStateSnapshot, SessionSlot,
};

/// Read-only session status document
#[derive(Debug, Clone, Serialize, Default)]
pub struct StatusReport {
    /// `not_initialized` / `running` / `stopped` / `timed_out`
    pub status: String,
    /// Steps taken so far, when a session is live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps_taken: Option<u64>,
    /// Session artifact directory, once one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<String>,
    /// Seconds until forced timeout, when a session is live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time_seconds: Option<f64>,
    /// Same remaining time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_time_minutes: Option<f64>,
    /// Current score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    /// Distinct species seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokemon_count: Option<usize>,
    /// Distinct badges earned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges_count: Option<usize>,
    /// Distinct locations visited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_count: Option<usize>,
}

/// Outcome of a stop request
#[derive(Debug, Clone, Serialize, Default)]
pub struct StopReport {
    /// `stopped`, or `not_initialized` when there was nothing to stop
    pub status: String,
    /// Session artifact directory
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_dir: Option<String>,
    /// Final cumulative score
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<f64>,
    /// Sorted species listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokemon_collected: Option<Vec<String>>,
    /// Sorted badge listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges_earned: Option<Vec<String>>,
    /// Sorted location listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_visited: Option<Vec<String>>,
    /// Distinct species seen
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pokemon_count: Option<usize>,
    /// Distinct badges earned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badges_count: Option<usize>,
    /// Distinct locations visited
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations_count: Option<usize>,
}

/// Owner of the single live session and its timeout, scoring, and
/// logging state
pub struct SessionManager {
    config: ServerConfig,
    factory: EnvironmentFactory,
    slot: Arc<Mutex<SessionSlot>>,
    events: broadcast::Sender<GameEvent>,
}

impl SessionManager {
    /// Manager with no session; environments are acquired through
    /// `factory` on each initialize
    #[must_use]
    pub fn new(config: ServerConfig, factory: EnvironmentFactory) -> Self {
        let (events, _) = broadcast::channel(BROADCAST_CAPACITY);
        Self {
            config,
            factory,
            slot: Arc::new(Mutex::new(SessionSlot::Uninitialized)),
            events,
        }
    }

    /// Subscribe to post-operation broadcast events
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Start a new session, implicitly stopping any existing one
    ///
    /// Creates the session directory, a fresh evaluator and step log,
    /// acquires a new environment handle, arms the timeout task, logs
    /// step 0 and returns its snapshot (score 0, execution time 0).
    pub async fn initialize(&self, options: EnvOptions) -> Result<GameStateSnapshot> {
        let mut slot = self.slot.lock().await;

        // Implicit stop-then-create: a prior running session is torn
        // down exactly as an explicit stop would, summary included.
        let prior = std::mem::replace(&mut *slot, SessionSlot::Uninitialized);
        if let SessionSlot::Running(session) = prior {
            log::info!("Stopping existing session before initialize");
            teardown_session(*session);
        }

        // Acquire the environment before touching the filesystem so a
        // failed initialize leaves no half-made session directory.
        let env = (self.factory)(&options)?;
        let step_log = StepLog::create(&self.config.output_dir)?;

        let state = env.state();
        let collision_map = env.collision_map();
        let snapshot = GameStateSnapshot {
            state,
            collision_map,
            step_number: 0,
            execution_time: 0.0,
            score: 0.0,
        };

        let mut session = ActiveSession {
            id: Uuid::new_v4(),
            env,
            evaluator: Evaluator::new(),
            step_log,
            started_at: Instant::now(),
            last_response_at: Instant::now(),
            timeout_handle: spawn_noop(),
        };
        session.timeout_handle = spawn_timeout(
            Arc::clone(&self.slot),
            session.id,
            self.config.max_session_duration,
        );

        let record = build_record(&snapshot, "initialize", serde_json::Value::Null);
        if let Err(e) = session.step_log.append(&record) {
            log::error!("Error logging initialize row: {e}");
        }
        session
            .step_log
            .save_screenshot(&snapshot.state.screenshot_base64, 0, "initialize");

        log::info!(
            "Session {} started (max duration {:?})",
            session.id,
            self.config.max_session_duration
        );
        *slot = SessionSlot::Running(Box::new(session));
        drop(slot);

        self.publish(GameEvent {
            state: snapshot.clone(),
            action: None,
        });
        Ok(snapshot)
    }

    /// Apply one action to the live session
    ///
    /// Returns `NotInitialized` when no session exists; returns the
    /// timeout sentinel (never an error) when the session's duration cap
    /// has been reached, tearing the session down if the background
    /// timer has not fired yet.
    pub async fn act(
        &self,
        action: Action,
        reasoning: Option<String>,
    ) -> Result<GameStateSnapshot> {
        let mut slot = self.slot.lock().await;

        match &mut *slot {
            SessionSlot::Uninitialized | SessionSlot::Stopped { .. } => {
                Err(EvalError::NotInitialized)
            }
            SessionSlot::TimedOut { last_score, .. } => {
                let sentinel = GameStateSnapshot::timeout_sentinel(*last_score);
                drop(slot);
                self.publish(GameEvent {
                    state: sentinel.clone(),
                    action: None,
                });
                Ok(sentinel)
            }
            SessionSlot::Running(session) => {
                // Defensive duration check; the background timer performs
                // the same teardown if it wins the lock first.
                if session.started_at.elapsed() > self.config.max_session_duration {
                    let taken = std::mem::replace(&mut *slot, SessionSlot::Uninitialized);
                    let SessionSlot::Running(session) = taken else {
                        return Err(EvalError::NotInitialized);
                    };
                    log::warn!("Session duration exceeded; forcing session to stop");
                    let (summary, session_dir) = teardown_session(*session);
                    let sentinel = GameStateSnapshot::timeout_sentinel(summary.total_score);
                    *slot = SessionSlot::TimedOut {
                        session_dir,
                        last_score: summary.total_score,
                    };
                    drop(slot);
                    self.publish(GameEvent {
                        state: sentinel.clone(),
                        action: None,
                    });
                    return Ok(sentinel);
                }

                let execution_time = session.last_response_at.elapsed().as_secs_f64();
                let state = session.env.step(&action)?;
                let collision_map = session.env.collision_map();
                let step_number = session.env.steps_taken();

                session
                    .evaluator
                    .observe(&state.location, &state.badges, &state.pokemons);

                let snapshot = GameStateSnapshot {
                    state,
                    collision_map,
                    step_number,
                    execution_time,
                    score: session.evaluator.total_score(),
                };

                let record = build_record(&snapshot, action.action_type(), action.details());
                if let Err(e) = session.step_log.append(&record) {
                    log::error!("Error logging step {step_number}: {e}");
                }
                session.step_log.save_screenshot(
                    &snapshot.state.screenshot_base64,
                    step_number,
                    &action.label(),
                );
                session.last_response_at = Instant::now();

                let action_info = action_info(&action, reasoning);
                drop(slot);
                self.publish(GameEvent {
                    state: snapshot.clone(),
                    action: Some(action_info),
                });
                Ok(snapshot)
            }
        }
    }

    /// Read-only status; never blocks behind a long operation beyond
    /// the slot lock itself
    pub async fn status(&self) -> StatusReport {
        let slot = self.slot.lock().await;
        match &*slot {
            SessionSlot::Uninitialized => StatusReport {
                status: slot.status_str().to_string(),
                ..StatusReport::default()
            },
            SessionSlot::Running(session) => {
                let elapsed = session.started_at.elapsed();
                let remaining = self
                    .config
                    .max_session_duration
                    .saturating_sub(elapsed)
                    .as_secs_f64();
                StatusReport {
                    status: slot.status_str().to_string(),
                    steps_taken: Some(session.env.steps_taken()),
                    session_dir: Some(session.step_log.session_dir().display().to_string()),
                    remaining_time_seconds: Some(remaining),
                    remaining_time_minutes: Some(remaining / 60.0),
                    score: Some(session.evaluator.total_score()),
                    pokemon_count: Some(session.evaluator.pokemon_count()),
                    badges_count: Some(session.evaluator.badges_count()),
                    locations_count: Some(session.evaluator.locations_count()),
                }
            }
            SessionSlot::Stopped {
                session_dir,
                final_score,
            } => StatusReport {
                status: slot.status_str().to_string(),
                session_dir: Some(session_dir.display().to_string()),
                score: Some(*final_score),
                ..StatusReport::default()
            },
            SessionSlot::TimedOut {
                session_dir,
                last_score,
            } => StatusReport {
                status: slot.status_str().to_string(),
                session_dir: Some(session_dir.display().to_string()),
                score: Some(*last_score),
                ..StatusReport::default()
            },
        }
    }

    /// Stop the live session: cancel the timer, write the summary,
    /// flush and close the log, release the environment. Idempotent;
    /// with nothing to stop it reports `not_initialized`.
    pub async fn stop(&self) -> StopReport {
        let mut slot = self.slot.lock().await;

        let taken = std::mem::replace(&mut *slot, SessionSlot::Uninitialized);
        let session = match taken {
            SessionSlot::Running(session) => session,
            other => {
                *slot = other;
                return StopReport {
                    status: "not_initialized".to_string(),
                    ..StopReport::default()
                };
            }
        };

        let (summary, session_dir) = teardown_session(*session);
        log::info!("Session data saved to {}", session_dir.display());
        *slot = SessionSlot::Stopped {
            session_dir: session_dir.clone(),
            final_score: summary.total_score,
        };

        StopReport {
            status: "stopped".to_string(),
            session_dir: Some(session_dir.display().to_string()),
            final_score: Some(summary.total_score),
            pokemon_count: Some(summary.pokemon_seen.len()),
            badges_count: Some(summary.badges_earned.len()),
            locations_count: Some(summary.locations_visited.len()),
            pokemon_collected: Some(summary.pokemon_seen),
            badges_earned: Some(summary.badges_earned),
            locations_visited: Some(summary.locations_visited),
        }
    }

    /// Current score breakdown; `NotInitialized` when no session is
    /// active
    pub async fn score_summary(&self) -> Result<ScoreSummary> {
        let slot = self.slot.lock().await;
        match &*slot {
            SessionSlot::Running(session) => Ok(session.evaluator.summary()),
            _ => Err(EvalError::NotInitialized),
        }
    }

    fn publish(&self, event: GameEvent) {
        // Fire-and-forget: no receivers (or lagged ones) never affect
        // the request path.
        let _ = self.events.send(event);
    }
}

/// Tear a session down: cancel its timer, persist the final summary,
/// flush the log, release the environment. Returns the final score
/// summary and the session directory.
fn teardown_session(mut session: ActiveSession) -> (ScoreSummary, PathBuf) {
    session.timeout_handle.abort();

    let summary = session.evaluator.summary();
    if let Err(e) = session.step_log.write_summary(&summary) {
        log::error!("Error writing evaluation summary: {e}");
    }
    session.step_log.close();
    if let Err(e) = session.env.stop() {
        log::error!("Error stopping environment: {e}");
    }

    let session_dir = session.step_log.session_dir().to_path_buf();
    (summary, session_dir)
}

/// Single-shot timer that performs the timeout teardown through the
/// same mutex as ordinary requests. The id check makes a stale timer a
/// no-op once a successor session exists.
fn spawn_timeout(
    slot: Arc<Mutex<SessionSlot>>,
    session_id: Uuid,
    max_duration: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(max_duration).await;

        let mut guard = slot.lock().await;
        let taken = std::mem::replace(&mut *guard, SessionSlot::Uninitialized);
        match taken {
            SessionSlot::Running(session) if session.id == session_id => {
                log::warn!(
                    "Session timeout reached ({:.1} minutes). Forcing session to stop.",
                    max_duration.as_secs_f64() / 60.0
                );
                let (summary, session_dir) = teardown_session(*session);
                *guard = SessionSlot::TimedOut {
                    session_dir,
                    last_score: summary.total_score,
                };
            }
            other => *guard = other,
        }
    })
}

/// Placeholder handle used while an `ActiveSession` is being assembled
fn spawn_noop() -> JoinHandle<()> {
    tokio::spawn(async {})
}

fn build_record(
    snapshot: &GameStateSnapshot,
    action_type: &str,
    action_details: serde_json::Value,
) -> StepRecord {
    StepRecord {
        timestamp: Utc::now().to_rfc3339(),
        step_number: snapshot.step_number,
        action_type: action_type.to_string(),
        action_details: action_details.to_string(),
        badges: json_cell(&snapshot.state.badges),
        inventory: json_cell(&snapshot.state.inventory),
        location: snapshot.state.location.clone(),
        money: snapshot.state.money,
        coordinates: json_cell(&snapshot.state.coordinates),
        pokemons: json_cell(&snapshot.state.pokemons),
        dialog: snapshot.state.dialog.clone().unwrap_or_default(),
        execution_time: snapshot.execution_time,
        score: snapshot.score,
    }
}

fn json_cell<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_string())
}

fn action_info(action: &Action, reasoning: Option<String>) -> ActionInfo {
    let details = match action {
        Action::PressKey { keys } => ActionDetails {
            button: keys.first().cloned(),
            frames: None,
        },
        Action::Wait { frames } => ActionDetails {
            button: None,
            frames: Some(*frames),
        },
    };
    ActionInfo {
        action_type: action.action_type().to_string(),
        details,
        reasoning,
        timestamp: Utc::now().timestamp_millis(),
    }
}
