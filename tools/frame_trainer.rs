/// Frame Trainer: builds a frame database from a text corpus.
///
/// Usage: frame_trainer --input <corpus.txt|-> --output <db.json|db.ron> [--init <db>]
///        frame_trainer --parsed <parser_output.txt> --output <db.json>
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::Read;
use std::path::{Path, PathBuf};

use frame_grammar::config::Config;
use frame_grammar::core::database::FrameDatabase;
use frame_grammar::core::parser::StanfordParser;
use frame_grammar::core::trainer::{self, TrainReport, Trainer};
use frame_grammar::logging::init_tracing;

#[derive(Debug, Parser)]
#[command(name = "frame_trainer", about = "Train a frame database from a corpus")]
struct Args {
    /// Raw corpus text, or `-` for standard input.
    #[arg(long)]
    input: Option<String>,
    /// Pre-computed parser output to train on instead of running the parser.
    #[arg(long, conflicts_with = "input")]
    parsed: Option<String>,
    /// Where to write the database (`.json` or `.ron`).
    #[arg(long)]
    output: PathBuf,
    /// Existing database to continue training from.
    #[arg(long)]
    init: Option<PathBuf>,
    /// RON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `parser.parser_dir`.
    #[arg(long)]
    parser_dir: Option<String>,
    /// Overrides `trainer.batch_size`.
    #[arg(long)]
    batch_size: Option<usize>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_ron(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => Config::default(),
    };
    if let Some(dir) = args.parser_dir {
        config.parser.parser_dir = dir;
    }
    if let Some(size) = args.batch_size {
        config.trainer.batch_size = size;
    }

    let db = match &args.init {
        Some(path) => FrameDatabase::load(path)
            .with_context(|| format!("loading initial database '{}'", path.display()))?,
        None => FrameDatabase::new(),
    };

    let (db, report) = match (&args.parsed, &args.input) {
        (Some(parsed), _) => {
            let output = read_input(parsed)?;
            let mut db = db;
            let report = trainer::train_parsed(&mut db, &output);
            (db, report)
        }
        (None, Some(input)) => {
            let corpus = read_input(input)?;
            let parser = StanfordParser::new(config.parser);
            let mut trainer = Trainer::resume(parser, config.trainer, db);
            let report = trainer.train_corpus(&corpus)?;
            (trainer.into_database(), report)
        }
        (None, None) => bail!("one of --input or --parsed is required"),
    };

    db.save(&args.output)
        .with_context(|| format!("saving database to '{}'", args.output.display()))?;
    print_report(&report, &db, &args.output);
    Ok(())
}

fn read_input(source: &str) -> Result<String> {
    if source == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading standard input")?;
        return Ok(text);
    }
    std::fs::read_to_string(Path::new(source)).with_context(|| format!("reading '{source}'"))
}

fn print_report(report: &TrainReport, db: &FrameDatabase, output: &Path) {
    println!(
        "Trained on {} sentences in {} batches ({} sentences and {} batches skipped)",
        report.sentences, report.batches, report.skipped_sentences, report.skipped_batches
    );
    println!(
        "Database: {} lexemes, {} frames ({} new) saved to '{}'",
        db.lexeme_count(),
        db.frame_count(),
        report.frames,
        output.display()
    );
}
