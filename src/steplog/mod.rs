//! Durable per-session step log
//!
//! Each session gets its own timestamp-named directory under the
//! configured output root, holding an append-only CSV of step rows
//! (flushed per row, so a crash loses at most the in-flight record), a
//! per-step screenshot folder, and the final evaluation summary:
//!
//! ```text
//! gameplay_sessions/session_<timestamp>/
//!   gameplay_data.csv
//!   evaluation_summary.txt
//!   images/<step>_<label>.png
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::config::IMAGES_FOLDER;
use crate::error::Result;
use crate::evaluator::ScoreSummary;

/// Name of the tabular log inside a session directory
pub const CSV_FILENAME: &str = "gameplay_data.csv";

/// Name of the final summary file inside a session directory
pub const SUMMARY_FILENAME: &str = "evaluation_summary.txt";

/// One row of the step log; never mutated after write
///
/// Nested fields (action details, badges, inventory, coordinates, party)
/// are stored as JSON documents inside their cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    /// RFC 3339 wall-clock timestamp of the write
    pub timestamp: String,
    /// Step number this row describes (0 = post-initialize)
    pub step_number: u64,
    /// Action type (`initialize`, `press_key`, `wait`)
    pub action_type: String,
    /// Action parameters as JSON
    pub action_details: String,
    /// Badge list as JSON
    pub badges: String,
    /// Inventory list as JSON
    pub inventory: String,
    /// Location string as reported by the environment
    pub location: String,
    /// Money on hand
    pub money: i64,
    /// Coordinates as JSON `[x, y]`
    pub coordinates: String,
    /// Party list as JSON
    pub pokemons: String,
    /// Dialog text, empty when none
    pub dialog: String,
    /// Wall-clock seconds since the previous response
    pub execution_time: f64,
    /// Cumulative score as of this step
    pub score: f64,
}

/// Append-only writer for one session's gameplay data
pub struct StepLog {
    session_dir: PathBuf,
    writer: Option<csv::Writer<File>>,
}

impl StepLog {
    /// Create a fresh session directory (with images subdirectory) under
    /// `output_dir` and open the CSV log inside it
    pub fn create(output_dir: &Path) -> Result<Self> {
        let session_dir = unique_session_dir(output_dir)?;
        fs::create_dir_all(session_dir.join(IMAGES_FOLDER))?;

        let csv_path = session_dir.join(CSV_FILENAME);
        let writer = csv::Writer::from_path(&csv_path)?;
        log::info!("Response data will be logged to {}", csv_path.display());

        Ok(Self {
            session_dir,
            writer: Some(writer),
        })
    }

    /// Directory this session's artifacts live in
    #[must_use]
    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    /// Append one row and flush immediately
    pub fn append(&mut self, record: &StepRecord) -> Result<()> {
        let Some(writer) = self.writer.as_mut() else {
            log::warn!("Step log already closed; dropping row {}", record.step_number);
            return Ok(());
        };
        writer.serialize(record)?;
        writer.flush()?;
        log::debug!("Step {} logged to CSV", record.step_number);
        Ok(())
    }

    /// Persist the step's screenshot under `images/<step>_<label>.png`
    ///
    /// Failures never propagate; an unwritable or malformed screenshot
    /// must not fail the request that produced it.
    pub fn save_screenshot(&self, screenshot_base64: &str, step_number: u64, label: &str) {
        if screenshot_base64.is_empty() {
            return;
        }
        let filename = self
            .session_dir
            .join(IMAGES_FOLDER)
            .join(format!("{step_number}_{label}.png"));
        match BASE64.decode(screenshot_base64) {
            Ok(bytes) => {
                if let Err(e) = fs::write(&filename, bytes) {
                    log::error!("Error saving screenshot {}: {e}", filename.display());
                } else {
                    log::debug!("Screenshot saved to {}", filename.display());
                }
            }
            Err(e) => log::error!("Error decoding screenshot for step {step_number}: {e}"),
        }
    }

    /// Write the final textual evaluation summary
    pub fn write_summary(&self, summary: &ScoreSummary) -> Result<()> {
        let path = self.session_dir.join(SUMMARY_FILENAME);
        let mut file = File::create(&path)?;

        writeln!(file, "=== Pokemon Gameplay Evaluation Summary ===")?;
        writeln!(file)?;
        writeln!(file, "Final Score: {:.2}", summary.total_score)?;
        writeln!(file, "Pokemon Collected: {}", summary.pokemon_seen.len())?;
        writeln!(file, "Badges Earned: {}", summary.badges_earned.len())?;
        writeln!(file, "Locations Visited: {}", summary.locations_visited.len())?;
        writeln!(file)?;

        writeln!(file, "--- Pokemon Details ---")?;
        for pokemon in &summary.pokemon_seen {
            writeln!(file, "- {pokemon}")?;
        }

        writeln!(file)?;
        writeln!(file, "--- Badge Details ---")?;
        for badge in &summary.badges_earned {
            writeln!(file, "- {badge}")?;
        }

        writeln!(file)?;
        writeln!(file, "--- Location Details ---")?;
        for location in &summary.locations_visited {
            writeln!(file, "- {location}")?;
        }

        Ok(())
    }

    /// Flush and release the CSV writer; safe to call repeatedly
    pub fn close(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            log::info!("Closing CSV log file");
            if let Err(e) = writer.flush() {
                log::error!("Error flushing CSV log: {e}");
            }
        }
    }
}

impl Drop for StepLog {
    fn drop(&mut self) {
        self.close();
    }
}

/// Timestamp-named session directory that does not collide with an
/// earlier session created within the same second
fn unique_session_dir(output_dir: &Path) -> Result<PathBuf> {
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    let base = output_dir.join(format!("session_{timestamp}"));

    let mut candidate = base.clone();
    let mut suffix = 1u32;
    while candidate.exists() {
        candidate = PathBuf::from(format!("{}_{suffix}", base.display()));
        suffix += 1;
    }

    fs::create_dir_all(&candidate)?;
    log::info!("Created session directory: {}", candidate.display());
    Ok(candidate)
}
