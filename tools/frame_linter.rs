/// Frame Linter: validates the structure of a frame database.
///
/// Usage: frame_linter --db <db.json|db.ron>
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::process;

use frame_grammar::core::database::FrameDatabase;
use frame_grammar::core::lint::lint;
use frame_grammar::logging::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "frame_linter", about = "Check a frame database for structural problems")]
struct Args {
    /// Database to check (`.json` or `.ron`).
    #[arg(long)]
    db: PathBuf,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let db = FrameDatabase::load(&args.db)
        .with_context(|| format!("loading database '{}'", args.db.display()))?;
    println!(
        "Loaded {} lexemes, {} frames",
        db.lexeme_count(),
        db.frame_count()
    );

    let report = lint(&db);

    println!("\n=== Frame Lint Report ===\n");

    if report.is_clean() {
        println!("All checks passed!");
    }

    for warning in &report.warnings {
        println!("WARNING: {}", warning);
    }

    for error in &report.errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        report.errors.len(),
        report.warnings.len()
    );

    if !report.errors.is_empty() {
        process::exit(1);
    }
    Ok(())
}
