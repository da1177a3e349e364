//! Run both lookup directions over a fixture directory and print the report
//!
//! Usage: cargo run --example fixture_report [-- <fixture-dir>]
//! Set RUST_LOG=reconciliation_core=debug to see why each link was made.

use reconciliation_core::{
    utils::{validate_records, JsonFixtureSource},
    ReconciliationEngine, ReconciliationReport, RecordSource,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(true)
        .with_level(true)
        .init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures"));

    let source = JsonFixtureSource::new(dir);
    println!("📂 Fixture directory: {}", source.dir().display());
    let transactions = source.transactions()?;
    let attachments = source.attachments()?;
    validate_records(&transactions, &attachments)?;

    let engine = ReconciliationEngine::with_config(source.load_config()?)?;
    let expected = source.load_expected()?;
    let report = ReconciliationReport::build(&engine, &transactions, &attachments, &expected)?;

    print!("{report}");
    println!(
        "{}/{} lookups as expected",
        report.passed_count(),
        report.total_count()
    );

    if !report.all_passed() {
        eprintln!(
            "❌ {} lookups in {} differ from expected.json",
            report.failures().count(),
            source.dir().display()
        );
        std::process::exit(1);
    }
    Ok(())
}
