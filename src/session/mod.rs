//! Session lifecycle and observer fan-out
//!
//! - `manager` - `SessionManager` with the public lifecycle API
//! - `state` - snapshot, broadcast event, and slot state machine types

mod manager;
mod state;

pub use manager::{SessionManager, StatusReport, StopReport};
pub use state::{
    ActionDetails, ActionInfo, GameEvent, GameStateSnapshot, TIMEOUT_DIALOG, TIMEOUT_LOCATION,
};
