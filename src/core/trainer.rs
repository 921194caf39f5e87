/// Training: folds a corpus through the parser and extractor into a
/// frame database.

use thiserror::Error;
use tracing::{info, warn};

use crate::config::TrainerConfig;
use crate::core::database::{DatabaseError, FrameDatabase};
use crate::core::extractor::ParsedBatch;
use crate::core::parser::{DependencyParser, ParserError};

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("parser error: {0}")]
    Parser(#[from] ParserError),
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),
}

/// Counters describing one training run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainReport {
    pub batches: usize,
    pub skipped_batches: usize,
    pub sentences: usize,
    pub skipped_sentences: usize,
    pub frames: usize,
}

/// Cut corpus text into sentences on `delimiter`, dropping blank pieces.
pub fn split_sentences<'a>(text: &'a str, delimiter: &'a str) -> impl Iterator<Item = &'a str> {
    text.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub struct Trainer<P> {
    parser: P,
    config: TrainerConfig,
    db: FrameDatabase,
}

impl<P: DependencyParser> Trainer<P> {
    pub fn new(parser: P, config: TrainerConfig) -> Self {
        Self::resume(parser, config, FrameDatabase::new())
    }

    /// Continue training on top of an existing database.
    pub fn resume(parser: P, config: TrainerConfig, db: FrameDatabase) -> Self {
        Self { parser, config, db }
    }

    /// Continue training on a database persisted at `path`.
    pub fn resume_from_file(
        parser: P,
        config: TrainerConfig,
        path: &std::path::Path,
    ) -> Result<Self, TrainError> {
        let db = FrameDatabase::load(path)?;
        Ok(Self::resume(parser, config, db))
    }

    pub fn database(&self) -> &FrameDatabase {
        &self.db
    }

    pub fn into_database(self) -> FrameDatabase {
        self.db
    }

    /// Split `corpus` into sentence batches and train on each.
    ///
    /// A batch the parser runs out of memory on is skipped; any other parser
    /// failure stops the run.
    pub fn train_corpus(&mut self, corpus: &str) -> Result<TrainReport, TrainError> {
        let sentences: Vec<&str> =
            split_sentences(corpus, &self.config.sentence_delimiter).collect();
        let batch_size = self.config.batch_size.max(1);
        let total = sentences.len().div_ceil(batch_size);

        let mut report = TrainReport::default();
        for (i, chunk) in sentences.chunks(batch_size).enumerate() {
            let batch = chunk.join(&self.config.sentence_delimiter);
            report.batches += 1;
            let output = match self.parser.parse(&batch) {
                Ok(output) => output,
                Err(e @ ParserError::OutOfMemory { .. }) => {
                    warn!(error = %e, "skipping batch");
                    report.skipped_batches += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            absorb(&mut self.db, &output, &mut report);
            if (i + 1) % 100 == 0 {
                info!(batch = i + 1, total, frames = report.frames, "training progress");
            }
        }

        info!(
            batches = report.batches,
            skipped_batches = report.skipped_batches,
            sentences = report.sentences,
            skipped_sentences = report.skipped_sentences,
            frames = report.frames,
            "training finished"
        );
        Ok(report)
    }

    /// Train on parser output that has already been produced.
    pub fn train_parsed(&mut self, output: &str) -> TrainReport {
        train_parsed(&mut self.db, output)
    }
}

/// Fold already-produced parser output into `db`.
pub fn train_parsed(db: &mut FrameDatabase, output: &str) -> TrainReport {
    let mut report = TrainReport {
        batches: 1,
        ..TrainReport::default()
    };
    absorb(db, output, &mut report);
    report
}

fn absorb(db: &mut FrameDatabase, output: &str, report: &mut TrainReport) {
    for sentence in ParsedBatch::new(output).sentences() {
        report.sentences += 1;
        match sentence {
            Ok(triples) => {
                report.frames += triples.len();
                db.extend(triples);
            }
            Err(e) => {
                warn!(error = %e, "skipping malformed sentence");
                report.skipped_sentences += 1;
            }
        }
    }
}
