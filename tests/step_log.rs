//! Step log persistence tests
//!
//! Verifies the on-disk session layout, per-row flushing, screenshot
//! naming, and the summary file format against temp directories.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;

use pokemon_eval::evaluator::Evaluator;
use pokemon_eval::steplog::{StepLog, StepRecord, CSV_FILENAME, SUMMARY_FILENAME};

fn record(step: u64, location: &str) -> StepRecord {
    StepRecord {
        timestamp: "2026-08-23T12:00:00Z".to_string(),
        step_number: step,
        action_type: "press_key".to_string(),
        action_details: r#"{"keys":["a"]}"#.to_string(),
        badges: "[]".to_string(),
        inventory: "[]".to_string(),
        location: location.to_string(),
        money: 3000,
        coordinates: "[5,6]".to_string(),
        pokemons: "[]".to_string(),
        dialog: String::new(),
        execution_time: 0.25,
        score: 2.0,
    }
}

#[test]
fn create_lays_out_session_directory() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let log = StepLog::create(dir.path()).unwrap();

    let session_dir = log.session_dir();
    assert!(session_dir.starts_with(dir.path()));
    assert!(session_dir
        .file_name()
        .unwrap()
        .to_string_lossy()
        .starts_with("session_"));
    assert!(session_dir.join(CSV_FILENAME).exists());
    assert!(session_dir.join("images").is_dir());
}

#[test]
fn concurrent_sessions_get_distinct_directories() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();

    // Created within the same wall-clock second.
    let first = StepLog::create(dir.path()).unwrap();
    let second = StepLog::create(dir.path()).unwrap();
    assert_ne!(first.session_dir(), second.session_dir());
}

#[test]
fn rows_are_flushed_as_written() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let mut log = StepLog::create(dir.path()).unwrap();

    log.append(&record(0, "Pallet Town")).unwrap();
    log.append(&record(1, "Route 1")).unwrap();

    // Readable before close; append flushes per row.
    let csv = std::fs::read_to_string(log.session_dir().join(CSV_FILENAME)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("timestamp,step_number,action_type"));
    assert!(lines[1].contains("Pallet Town"));
    assert!(lines[2].contains("Route 1"));
}

#[test]
fn rows_round_trip_through_the_reader() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let mut log = StepLog::create(dir.path()).unwrap();
    log.append(&record(3, "Viridian City")).unwrap();

    let mut reader = csv::Reader::from_path(log.session_dir().join(CSV_FILENAME)).unwrap();
    let rows: Vec<StepRecord> = reader.deserialize().collect::<Result<_, _>>().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].step_number, 3);
    assert_eq!(rows[0].location, "Viridian City");
    assert_eq!(rows[0].money, 3000);
    assert_eq!(rows[0].action_details, r#"{"keys":["a"]}"#);
}

#[test]
fn screenshots_are_named_step_then_label() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let log = StepLog::create(dir.path()).unwrap();

    let payload = b"not a real png, content is opaque here";
    log.save_screenshot(&BASE64.encode(payload), 7, "press_a-b");

    let path = log.session_dir().join("images").join("7_press_a-b.png");
    assert_eq!(std::fs::read(path).unwrap(), payload);
}

#[test]
fn bad_screenshots_never_fail_the_step() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let log = StepLog::create(dir.path()).unwrap();

    // Invalid base64 and empty payloads are swallowed.
    log.save_screenshot("%%% not base64 %%%", 1, "wait_30");
    log.save_screenshot("", 2, "wait_30");

    let images: Vec<_> = std::fs::read_dir(log.session_dir().join("images"))
        .unwrap()
        .collect();
    assert!(images.is_empty());
}

#[test]
fn summary_file_lists_every_achievement() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let log = StepLog::create(dir.path()).unwrap();

    let mut evaluator = Evaluator::new();
    evaluator.observe_location("Pallet Town");
    evaluator.observe_location("Pewter City");
    evaluator.observe_badge("Boulder Badge");
    evaluator.observe_pokemon("Charmander");
    log.write_summary(&evaluator.summary()).unwrap();

    let text = std::fs::read_to_string(log.session_dir().join(SUMMARY_FILENAME)).unwrap();
    assert!(text.starts_with("=== Pokemon Gameplay Evaluation Summary ==="));
    assert!(text.contains(&format!("Final Score: {:.2}", evaluator.total_score())));
    assert!(text.contains("Pokemon Collected: 1"));
    assert!(text.contains("Badges Earned: 1"));
    assert!(text.contains("Locations Visited: 2"));
    assert!(text.contains("- Charmander"));
    assert!(text.contains("- Boulder Badge"));
    assert!(text.contains("- Pallet_Town"));
    assert!(text.contains("- Pewter_City"));
}

#[test]
fn append_after_close_is_a_noop() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let mut log = StepLog::create(dir.path()).unwrap();

    log.append(&record(0, "Pallet Town")).unwrap();
    log.close();
    log.close();
    log.append(&record(1, "Route 1")).unwrap();

    let csv = std::fs::read_to_string(log.session_dir().join(CSV_FILENAME)).unwrap();
    assert_eq!(csv.lines().count(), 2);
}
