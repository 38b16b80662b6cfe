//! Deterministic scripted environment
//!
//! Replays a fixed sequence of game states, one per step, so session and
//! scoring behavior can be exercised without an emulator. Step N beyond
//! the end of the script holds the final state.

use std::path::PathBuf;
use std::sync::Arc;

use crate::error::{EvalError, Result};

use super::{Action, EnvOptions, EnvironmentFactory, GameEnvironment, GameState, PartyPokemon};

/// Base64 of a 1x1 transparent PNG, used as the scripted screenshot
pub const PLACEHOLDER_SCREENSHOT: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8BQDwAEhQGAhKmMIQAAAABJRU5ErkJggg==";

/// Environment that replays a fixed state script
pub struct ScriptedEnvironment {
    script: Vec<GameState>,
    steps_taken: u64,
    stopped: bool,
}

impl ScriptedEnvironment {
    /// Environment replaying the default short storyline (Pallet Town to
    /// the first badge)
    #[must_use]
    pub fn new(_options: &EnvOptions) -> Self {
        Self::with_script(default_storyline())
    }

    /// Environment replaying an explicit script; index 0 is the
    /// post-initialize state. An empty script is padded with a single
    /// default state.
    #[must_use]
    pub fn with_script(mut script: Vec<GameState>) -> Self {
        if script.is_empty() {
            script.push(GameState::default());
        }
        Self {
            script,
            steps_taken: 0,
            stopped: false,
        }
    }

    fn state_at(&self, step: u64) -> GameState {
        let idx = (step as usize).min(self.script.len() - 1);
        self.script[idx].clone()
    }
}

impl GameEnvironment for ScriptedEnvironment {
    fn state(&self) -> GameState {
        self.state_at(self.steps_taken)
    }

    fn step(&mut self, _action: &Action) -> Result<GameState> {
        if self.stopped {
            return Err(EvalError::environment("environment already stopped"));
        }
        self.steps_taken += 1;
        Ok(self.state_at(self.steps_taken))
    }

    fn collision_map(&self) -> Option<String> {
        None
    }

    fn steps_taken(&self) -> u64 {
        self.steps_taken
    }

    fn stop(&mut self) -> Result<()> {
        self.stopped = true;
        Ok(())
    }
}

/// Factory producing scripted environments
///
/// Checks that the configured ROM file exists before creating each
/// environment, failing initialize the same way a real emulator adapter
/// does when the ROM cannot be loaded.
#[must_use]
pub fn scripted_factory(rom_path: PathBuf) -> EnvironmentFactory {
    Arc::new(move |options: &EnvOptions| {
        if !rom_path.is_file() {
            return Err(EvalError::environment(format!(
                "ROM file not found: {}",
                rom_path.display()
            )));
        }
        Ok(Box::new(ScriptedEnvironment::new(options)) as Box<dyn GameEnvironment>)
    })
}

fn base_state(location: &str, x: i32, y: i32) -> GameState {
    GameState {
        player_name: "RED".to_string(),
        rival_name: "BLUE".to_string(),
        money: 3000,
        location: location.to_string(),
        coordinates: [x, y],
        badges: Vec::new(),
        valid_moves: vec!["up".into(), "down".into(), "left".into(), "right".into()],
        inventory: Vec::new(),
        dialog: None,
        pokemons: Vec::new(),
        screenshot_base64: PLACEHOLDER_SCREENSHOT.to_string(),
    }
}

/// The default storyline: leave Pallet Town, pick up a starter, reach
/// Pewter City and earn the Boulder Badge
fn default_storyline() -> Vec<GameState> {
    let mut script = Vec::new();

    script.push(base_state("Pallet Town", 5, 6));
    script.push(base_state("Pallet Town", 5, 5));

    let mut with_starter = base_state("Pallet Town", 6, 5);
    with_starter.pokemons.push(PartyPokemon {
        species: "Charmander".to_string(),
        level: 5,
    });
    script.push(with_starter.clone());

    with_starter.location = "Route 1".to_string();
    with_starter.coordinates = [10, 18];
    script.push(with_starter.clone());

    with_starter.location = "Viridian City".to_string();
    with_starter.coordinates = [23, 26];
    script.push(with_starter.clone());

    with_starter.location = "Viridian Forest".to_string();
    with_starter.coordinates = [17, 40];
    with_starter.pokemons.push(PartyPokemon {
        species: "Pidgey".to_string(),
        level: 4,
    });
    script.push(with_starter.clone());

    with_starter.location = "Pewter City".to_string();
    with_starter.coordinates = [14, 20];
    script.push(with_starter.clone());

    with_starter.badges.push("Boulder Badge".to_string());
    with_starter.dialog = Some("RED received the Boulder Badge!".to_string());
    script.push(with_starter);

    script
}
