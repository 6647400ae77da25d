// SPDX-License-Identifier: AGPL-3.0-only

//! Integration tests: run configuration → report → JSON on disk, and the
//! scripted-stdin flow the driver uses to resolve missing values.

use std::io::Cursor;

use fibonacci_phonon::chain::MAX_GENERATIONS;
use fibonacci_phonon::config::{RunConfig, RunOverrides, DEFAULT_STIFFNESS};
use fibonacci_phonon::prompt::{Choice, Prompter, RetryPolicy};
use fibonacci_phonon::report::analyze;
use fibonacci_phonon::PhononError;

fn run_config(generations: u32, mass_a: f64, mass_b: f64) -> RunConfig {
    RunConfig {
        generations,
        mass_a,
        mass_b,
        stiffness: DEFAULT_STIFFNESS,
        diagnostics: true,
        sweep: false,
        output_dir: None,
    }
}

#[test]
fn report_round_trips_through_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("report.json");

    let report = analyze(&run_config(7, 1.0, 2.5)).expect("analyze");
    report.write_json(&path).expect("write");

    let text = std::fs::read_to_string(&path).expect("read back");
    let value: serde_json::Value = serde_json::from_str(&text).expect("parse");
    assert_eq!(value["chain"].as_array().map(Vec::len), Some(report.chain.len()));
    assert_eq!(value["tokens"].as_str().map(str::len), Some(report.chain.len()));
    assert!(value["occurrence"]["ratio"].as_f64().is_some());
    assert_eq!(
        value["spectrum"]["modes"].as_array().map(Vec::len),
        Some(report.spectrum.frequencies.len())
    );
}

#[test]
fn write_into_missing_directory_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("absent").join("report.json");
    let report = analyze(&run_config(4, 1.0, 1.0)).expect("analyze");
    assert!(matches!(report.write_json(&path), Err(PhononError::Io(_))));
}

#[test]
fn scripted_session_resolves_full_config() {
    // bad generations, then good; masses; sweep "n"; diagnostics "y"
    let input = "zero\n6\n1\n2\nn\ny\n";
    let mut prompter = Prompter::new(Cursor::new(input), Vec::new(), RetryPolicy::Unbounded);

    let config = RunConfig::resolve(&RunOverrides::default(), &mut prompter).expect("resolve");
    assert!(config.diagnostics);
    assert!(!config.sweep);

    let report = analyze(&config).expect("analyze");
    assert_eq!(report.chain.len(), 20);
    assert!((report.occurrence.expect("ratio").ratio - 1.5).abs() < 1e-15);

    let transcript = String::from_utf8(prompter.into_writer()).expect("utf8");
    assert_eq!(transcript.matches("Input must be a positive integer").count(), 1);
    assert!(transcript.contains(Choice::Print.prompt()));
}

#[test]
fn uniform_session_never_asks_for_diagnostics() {
    let input = "5\n1\n1\nn\n";
    let mut prompter = Prompter::new(Cursor::new(input), Vec::new(), RetryPolicy::Limited(1));

    let config = RunConfig::resolve(&RunOverrides::default(), &mut prompter).expect("resolve");
    let report = analyze(&config).expect("analyze");
    assert!(report.occurrence.is_none());
    assert!(report.analytical.is_some());

    let transcript = String::from_utf8(prompter.into_writer()).expect("utf8");
    assert!(!transcript.contains(Choice::Print.prompt()));
}

#[test]
fn generation_ceiling_reported_by_analyze() {
    let overrides = RunOverrides {
        generations: Some(MAX_GENERATIONS + 7),
        mass_a: Some(1.0),
        mass_b: Some(2.0),
        sweep: Some(false),
        diagnostics: Some(false),
        ..RunOverrides::default()
    };
    let mut prompter = Prompter::new(Cursor::new(""), Vec::new(), RetryPolicy::Unbounded);
    let config = RunConfig::resolve(&overrides, &mut prompter).expect("resolve");
    assert!(matches!(
        analyze(&config),
        Err(PhononError::TooManyGenerations { .. })
    ));
}

#[test]
fn exhausted_retries_abort_session() {
    let input = "-1\n0\nabc\n";
    let mut prompter = Prompter::new(Cursor::new(input), Vec::new(), RetryPolicy::Limited(3));
    assert!(matches!(
        prompter.generations(),
        Err(PhononError::RetriesExhausted(3))
    ));
}
