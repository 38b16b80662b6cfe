//! Game environment seam
//!
//! The emulator is an external collaborator. This module defines the
//! interface the session layer consumes (`GameEnvironment`), the action
//! vocabulary, and the observable state an environment produces per step.
//! A deterministic [`ScriptedEnvironment`] stands in for a real emulator
//! adapter in tests and the demo binary.

mod scripted;

pub use scripted::{scripted_factory, ScriptedEnvironment};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// One discrete input to the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Press one or more Game Boy buttons for a single input window
    PressKey {
        /// Button names, e.g. `a`, `b`, `start`, `up`
        keys: Vec<String>,
    },

    /// Advance the emulator by a number of frames without input
    Wait {
        /// Number of frames to advance
        frames: u32,
    },
}

impl Action {
    /// The wire-level action type string (`press_key` / `wait`)
    #[must_use]
    pub fn action_type(&self) -> &'static str {
        match self {
            Action::PressKey { .. } => "press_key",
            Action::Wait { .. } => "wait",
        }
    }

    /// Normalized label used for screenshot filenames:
    /// `press_<keys-joined-by-dash>` or `wait_<frames>`
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Action::PressKey { keys } => format!("press_{}", keys.join("-")),
            Action::Wait { frames } => format!("wait_{frames}"),
        }
    }

    /// Action parameters as a JSON document, as logged to the step log
    /// and broadcast to observers
    #[must_use]
    pub fn details(&self) -> serde_json::Value {
        match self {
            Action::PressKey { keys } => serde_json::json!({ "keys": keys }),
            Action::Wait { frames } => serde_json::json!({ "frames": frames }),
        }
    }
}

/// One item record in the player's inventory
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct InventoryItem {
    /// Item name
    pub item: String,
    /// Held quantity
    pub quantity: u32,
}

/// One Pokemon in the player's party
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PartyPokemon {
    /// Species name, e.g. `Pikachu`
    pub species: String,
    /// Current level
    pub level: u32,
}

/// Observable game state produced by the environment after each step
///
/// Opaque to the session layer beyond the fields the evaluator consumes
/// (location, badges, party species).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct GameState {
    /// Player character name
    pub player_name: String,
    /// Rival character name
    pub rival_name: String,
    /// Money on hand
    pub money: i64,
    /// Current map/location string
    pub location: String,
    /// Player tile coordinates `[x, y]`
    pub coordinates: [i32; 2],
    /// Badge names currently held
    pub badges: Vec<String>,
    /// Directions the player can currently move
    pub valid_moves: Vec<String>,
    /// Inventory contents
    pub inventory: Vec<InventoryItem>,
    /// On-screen dialog text, if any
    pub dialog: Option<String>,
    /// Current party
    pub pokemons: Vec<PartyPokemon>,
    /// Base64-encoded PNG screenshot of the current frame
    pub screenshot_base64: String,
}

/// Options supplied when a new environment is created
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EnvOptions {
    /// Run without a visible emulator window
    #[serde(default = "default_headless")]
    pub headless: bool,
    /// Enable emulated sound
    #[serde(default)]
    pub sound: bool,
}

fn default_headless() -> bool {
    true
}

impl Default for EnvOptions {
    fn default() -> Self {
        Self {
            headless: true,
            sound: false,
        }
    }
}

/// Interface to a running game environment instance
///
/// Implementations own the emulator handle. The session layer guarantees
/// all calls are serialized, so no interior synchronization is required.
pub trait GameEnvironment: Send {
    /// Current observable state without advancing the game
    fn state(&self) -> GameState;

    /// Apply one action and return the resulting state
    fn step(&mut self, action: &Action) -> Result<GameState>;

    /// ASCII rendering of the walkability grid around the player, when
    /// the environment can produce one
    fn collision_map(&self) -> Option<String>;

    /// Number of successful steps taken since creation
    fn steps_taken(&self) -> u64;

    /// Release the emulator handle
    fn stop(&mut self) -> Result<()>;
}

/// Factory injected into the session manager; invoked once per
/// `initialize` to acquire a fresh environment handle
pub type EnvironmentFactory =
    Arc<dyn Fn(&EnvOptions) -> Result<Box<dyn GameEnvironment>> + Send + Sync>;
