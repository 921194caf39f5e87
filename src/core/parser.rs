/// External dependency parser: the collaborator that turns raw sentences
/// into the `wordsAndTags,typedDependencies` text the extractor reads.

use std::io::{ErrorKind, Write};
use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::debug;

use crate::config::ParserConfig;

const PARSER_CLASS: &str = "edu.stanford.nlp.parser.lexparser.LexicalizedParser";
const OUTPUT_FORMAT: &str = "wordsAndTags,typedDependencies";

#[derive(Debug, Error)]
pub enum ParserError {
    #[error("could not execute 'java'; is Java installed?")]
    JavaNotFound,
    #[error("Stanford parser classes not found; is the parser in '{path}'?")]
    ParserNotFound { path: String },
    #[error("parser ran out of memory on batch {batch:?}")]
    OutOfMemory { batch: String },
    #[error("parser exited with {status} on batch {batch:?}: {stderr}")]
    Failed {
        status: String,
        stderr: String,
        batch: String,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Anything that can produce parser output for a batch of sentences.
pub trait DependencyParser {
    fn parse(&self, sentences: &str) -> Result<String, ParserError>;
}

/// Runs the Stanford lexicalized parser as a child JVM per batch.
#[derive(Debug, Clone)]
pub struct StanfordParser {
    config: ParserConfig,
}

impl StanfordParser {
    pub fn new(config: ParserConfig) -> Self {
        Self { config }
    }

    /// The command line for one invocation, reading sentences from stdin.
    pub fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.java);
        cmd.arg(format!("-mx{}", self.config.java_heap))
            .arg("-cp")
            .arg(format!("{}/*:", self.config.parser_dir))
            .arg(PARSER_CLASS)
            .arg("-outputFormat")
            .arg(OUTPUT_FORMAT)
            .arg(&self.config.model)
            .arg("/dev/stdin");
        cmd
    }
}

impl DependencyParser for StanfordParser {
    fn parse(&self, sentences: &str) -> Result<String, ParserError> {
        let mut child = match self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
        {
            Ok(child) => child,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(ParserError::JavaNotFound),
            Err(e) => return Err(e.into()),
        };

        // Feed stdin from its own thread so a full stdout pipe cannot stall us.
        let writer = child.stdin.take().map(|mut stdin| {
            let input = sentences.to_string();
            std::thread::spawn(move || stdin.write_all(input.as_bytes()))
        });
        let output = child.wait_with_output()?;
        let written = match writer.map(|writer| writer.join()) {
            Some(Ok(result)) => result,
            Some(Err(_)) => Err(std::io::Error::other("stdin writer panicked")),
            None => Ok(()),
        };
        debug!(status = %output.status, bytes = output.stdout.len(), "parser finished");

        if output.status.success() {
            written?;
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        // An early exit breaks the stdin pipe; classify from stderr instead.
        if let Err(e) = written {
            debug!(error = %e, "stdin writer failed");
        }
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        Err(classify_failure(
            &output.status.to_string(),
            &stderr,
            sentences,
            &self.config.parser_dir,
        ))
    }
}

/// Map a failed run's diagnostics onto a [`ParserError`].
fn classify_failure(status: &str, stderr: &str, batch: &str, parser_dir: &str) -> ParserError {
    if stderr.contains("Could not find or load main class") {
        ParserError::ParserNotFound {
            path: parser_dir.to_string(),
        }
    } else if stderr.contains("OUT OF MEMORY!") {
        ParserError::OutOfMemory {
            batch: batch.to_string(),
        }
    } else {
        ParserError::Failed {
            status: status.to_string(),
            stderr: stderr.trim().to_string(),
            batch: batch.to_string(),
        }
    }
}
