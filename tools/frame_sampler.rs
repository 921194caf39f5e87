/// Frame Sampler: generates sentences from a frame database.
///
/// Usage: frame_sampler --db <db.json|db.ron> [--count <n>] [--seed <n>] [--start <lexeme>] [--pos <tag>]
use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;

use frame_grammar::config::Config;
use frame_grammar::core::database::FrameDatabase;
use frame_grammar::core::sampler::FrameSampler;
use frame_grammar::logging::init_tracing;
use frame_grammar::schema::frame::ROOT;

#[derive(Debug, Parser)]
#[command(name = "frame_sampler", about = "Generate sentences from a frame database")]
struct Args {
    /// Database to sample from (`.json` or `.ron`).
    #[arg(long)]
    db: PathBuf,
    /// Number of sentences to print.
    #[arg(long, default_value_t = 1)]
    count: usize,
    /// RNG seed; omitted means a fresh random seed.
    #[arg(long)]
    seed: Option<u64>,
    /// Lexeme to start from.
    #[arg(long, default_value = ROOT)]
    start: String,
    /// Part-of-speech of the start lexeme.
    #[arg(long)]
    pos: Option<String>,
    /// RON configuration file.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides `sampler.max_depth`.
    #[arg(long)]
    max_depth: Option<usize>,
}

fn main() -> Result<()> {
    init_tracing();
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_ron(path)
            .with_context(|| format!("loading config '{}'", path.display()))?,
        None => Config::default(),
    };
    if let Some(depth) = args.max_depth {
        config.sampler.max_depth = depth;
    }

    let db = FrameDatabase::load(&args.db)
        .with_context(|| format!("loading database '{}'", args.db.display()))?;
    let sampler = FrameSampler::with_config(&db, &config.sampler);

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    for _ in 0..args.count {
        println!(
            "{}",
            sampler.generate_from(&mut rng, &args.start, args.pos.as_deref())
        );
    }
    Ok(())
}
