//! Gameplay scoring
//!
//! `Evaluator` folds a stream of per-step observations into three
//! monotonic achievement sets (locations visited, Pokemon seen, badges
//! earned) and a cumulative score. Sets only ever grow; re-observing a
//! known entity is a no-op, so the score is non-decreasing for the life
//! of a session. A fresh session gets a fresh `Evaluator`.

pub mod milestones;

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::env::PartyPokemon;
use crate::steplog::StepRecord;

/// Snapshot of the evaluator's achievement sets and score
///
/// Listings are sorted (the sets are ordered), matching the final
/// summary file layout.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ScoreSummary {
    /// Cumulative score
    pub total_score: f64,
    /// Distinct species ever present in the party, sorted
    pub pokemon_seen: Vec<String>,
    /// Distinct badges ever held, sorted
    pub badges_earned: Vec<String>,
    /// Distinct locations ever visited (normalized), sorted
    pub locations_visited: Vec<String>,
}

/// Aggregates achievements and score over one session
#[derive(Debug, Default)]
pub struct Evaluator {
    pokemon_seen: BTreeSet<String>,
    badges_earned: BTreeSet<String>,
    locations_visited: BTreeSet<String>,
    total_score: f64,
}

impl Evaluator {
    /// Fresh evaluator with empty sets and a zero score
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one step's observable fields into the sets and score
    pub fn observe(&mut self, location: &str, badges: &[String], party: &[PartyPokemon]) {
        self.observe_location(location);
        for badge in badges {
            self.observe_badge(badge);
        }
        for pokemon in party {
            self.observe_pokemon(&pokemon.species);
        }
    }

    /// Record a location sighting; names are normalized with underscores
    /// before lookup and insertion
    pub fn observe_location(&mut self, location: &str) {
        let name = location.trim().replace(' ', "_");
        if name.is_empty() || self.locations_visited.contains(&name) {
            return;
        }
        let points = milestones::rating(&name).unwrap_or(milestones::DEFAULT_LOCATION_RATING);
        self.total_score += points;
        log::info!("New location: {name}, score +{points}");
        self.locations_visited.insert(name);
    }

    /// Record a badge sighting
    pub fn observe_badge(&mut self, badge: &str) {
        let name = badge.trim();
        if name.is_empty() || self.badges_earned.contains(name) {
            return;
        }
        let points = milestones::rating(name).unwrap_or(milestones::DEFAULT_BADGE_RATING);
        self.total_score += points;
        log::info!("New badge: {name}, score +{points}");
        self.badges_earned.insert(name.to_string());
    }

    /// Record a party species sighting
    pub fn observe_pokemon(&mut self, species: &str) {
        let name = species.trim();
        if name.is_empty() || self.pokemon_seen.contains(name) {
            return;
        }
        let points = milestones::rating(name).unwrap_or(milestones::DEFAULT_POKEMON_RATING);
        self.total_score += points;
        log::info!("New Pokemon: {name}, score +{points}");
        self.pokemon_seen.insert(name.to_string());
    }

    /// Fold one persisted step-log row, the entry point for offline
    /// re-scoring. Malformed cells are logged and skipped; this never
    /// fails.
    pub fn record_row(&mut self, row: &StepRecord) {
        match serde_json::from_str::<Vec<PartyPokemon>>(&row.pokemons) {
            Ok(party) => {
                for pokemon in &party {
                    self.observe_pokemon(&pokemon.species);
                }
            }
            Err(e) => log::warn!("Skipping unparseable pokemons cell: {e}"),
        }

        match serde_json::from_str::<Vec<String>>(&row.badges) {
            Ok(badges) => {
                for badge in &badges {
                    self.observe_badge(badge);
                }
            }
            Err(e) => log::warn!("Skipping unparseable badges cell: {e}"),
        }

        self.observe_location(&row.location);
    }

    /// Current cumulative score
    #[must_use]
    pub fn total_score(&self) -> f64 {
        self.total_score
    }

    /// Number of distinct species seen
    #[must_use]
    pub fn pokemon_count(&self) -> usize {
        self.pokemon_seen.len()
    }

    /// Number of distinct badges earned
    #[must_use]
    pub fn badges_count(&self) -> usize {
        self.badges_earned.len()
    }

    /// Number of distinct locations visited
    #[must_use]
    pub fn locations_count(&self) -> usize {
        self.locations_visited.len()
    }

    /// Pure read of the sets and score
    #[must_use]
    pub fn summary(&self) -> ScoreSummary {
        ScoreSummary {
            total_score: self.total_score,
            pokemon_seen: self.pokemon_seen.iter().cloned().collect(),
            badges_earned: self.badges_earned.iter().cloned().collect(),
            locations_visited: self.locations_visited.iter().cloned().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn party(species: &[&str]) -> Vec<PartyPokemon> {
        species
            .iter()
            .map(|s| PartyPokemon {
                species: (*s).to_string(),
                level: 5,
            })
            .collect()
    }

    #[test]
    fn first_sighting_scores_and_duplicates_are_idempotent() {
        let mut eval = Evaluator::new();
        eval.observe("Pewter City", &["Boulder Badge".to_string()], &party(&["Pikachu"]));
        let score = eval.total_score();
        assert_eq!(eval.badges_count(), 1);
        assert_eq!(eval.pokemon_count(), 1);
        assert_eq!(eval.locations_count(), 1);
        assert_eq!(score, 25.0 + 12.0 + 10.0);

        eval.observe("Pewter City", &["Boulder Badge".to_string()], &party(&["Pikachu"]));
        assert_eq!(eval.total_score(), score);
        assert_eq!(eval.badges_count(), 1);
    }

    #[test]
    fn unknown_names_join_sets_with_default_ratings() {
        let mut eval = Evaluator::new();
        eval.observe_location("Glitch City");
        eval.observe_pokemon("MissingNo");
        assert_eq!(eval.locations_count(), 1);
        assert_eq!(eval.pokemon_count(), 1);
        assert_eq!(
            eval.total_score(),
            milestones::DEFAULT_LOCATION_RATING + milestones::DEFAULT_POKEMON_RATING
        );
    }

    #[test]
    fn empty_names_are_skipped() {
        let mut eval = Evaluator::new();
        eval.observe_location("");
        eval.observe_badge("  ");
        eval.observe_pokemon("");
        assert_eq!(eval.total_score(), 0.0);
        assert!(eval.summary().locations_visited.is_empty());
    }

    #[test]
    fn summary_listings_are_sorted() {
        let mut eval = Evaluator::new();
        eval.observe_pokemon("Zubat");
        eval.observe_pokemon("Abra");
        eval.observe_pokemon("Meowth");
        assert_eq!(eval.summary().pokemon_seen, vec!["Abra", "Meowth", "Zubat"]);
    }
}
