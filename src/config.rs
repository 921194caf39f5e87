/// Configuration for training and sampling, loadable from RON.
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Bound on frame expansion depth. Expansion at a depth beyond
/// `max_depth` always falls back to the literal word.
pub const DEFAULT_MAX_DEPTH: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    pub max_depth: usize,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// How to invoke the Stanford lexicalized parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Java launcher, looked up on `PATH` unless it is a path.
    pub java: String,
    /// Directory holding the parser's jar files.
    pub parser_dir: String,
    /// JVM heap limit, passed as `-mx<java_heap>`.
    pub java_heap: String,
    /// Grammar model resource path.
    pub model: String,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            java: "java".to_string(),
            parser_dir: "stanford-parser".to_string(),
            java_heap: "768m".to_string(),
            model: "edu/stanford/nlp/models/lexparser/englishPCFG.ser.gz".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Corpus text is cut into sentences on this delimiter.
    pub sentence_delimiter: String,
    /// Sentences handed to the parser per invocation.
    pub batch_size: usize,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            sentence_delimiter: ". ".to_string(),
            batch_size: 1,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sampler: SamplerConfig,
    pub parser: ParserConfig,
    pub trainer: TrainerConfig,
}

impl Config {
    /// Load a configuration from a RON file.
    pub fn load_from_ron(path: &Path) -> Result<Config, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse_ron(&contents)
    }

    /// Parse a configuration from a RON string. Missing fields take their
    /// defaults.
    pub fn parse_ron(input: &str) -> Result<Config, ConfigError> {
        Ok(ron::from_str(input)?)
    }
}
