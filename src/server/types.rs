//! Wire types for the HTTP API

use serde::{Deserialize, Serialize};

use crate::env::Action;
use crate::error::{EvalError, Result};
use crate::evaluator::ScoreSummary;

/// Body of `POST /action`
#[derive(Debug, Clone, Deserialize)]
pub struct ActionRequest {
    /// `press_key` or `wait`
    pub action_type: String,
    /// Buttons for `press_key`
    #[serde(default)]
    pub keys: Option<Vec<String>>,
    /// Frame count for `wait`
    #[serde(default)]
    pub frames: Option<u32>,
    /// Optional free-text rationale, forwarded to observers
    #[serde(default)]
    pub reasoning: Option<String>,
}

impl ActionRequest {
    /// Validate and convert into the action vocabulary
    pub fn into_action(self) -> Result<(Action, Option<String>)> {
        let action = match self.action_type.as_str() {
            "press_key" => {
                let keys = self.keys.unwrap_or_default();
                if keys.is_empty() {
                    return Err(EvalError::bad_request(
                        "Keys parameter is required for press_key action.",
                    ));
                }
                Action::PressKey { keys }
            }
            "wait" => {
                let frames = self.frames.unwrap_or(0);
                if frames == 0 {
                    return Err(EvalError::bad_request(
                        "Frames parameter is required for wait action.",
                    ));
                }
                Action::Wait { frames }
            }
            other => {
                return Err(EvalError::bad_request(format!(
                    "Unknown action type: {other}"
                )))
            }
        };
        Ok((action, self.reasoning))
    }
}

/// One achievement category in the evaluation breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    /// Number of distinct items
    pub count: usize,
    /// Sorted item listing
    pub items: Vec<String>,
}

impl From<Vec<String>> for CategoryBreakdown {
    fn from(items: Vec<String>) -> Self {
        Self {
            count: items.len(),
            items,
        }
    }
}

/// Response of `GET /evaluate`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Cumulative score
    pub score: f64,
    /// Species breakdown
    pub pokemon: CategoryBreakdown,
    /// Badge breakdown
    pub badges: CategoryBreakdown,
    /// Location breakdown
    pub locations: CategoryBreakdown,
}

impl From<ScoreSummary> for EvaluationReport {
    fn from(summary: ScoreSummary) -> Self {
        Self {
            score: summary.total_score,
            pokemon: summary.pokemon_seen.into(),
            badges: summary.badges_earned.into(),
            locations: summary.locations_visited.into(),
        }
    }
}
