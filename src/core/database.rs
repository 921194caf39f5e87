/// Frame database: frames grouped by lexeme, then part-of-speech.
///
/// Frames are appended, never deduplicated: a pattern observed five times is
/// stored five times, which is what makes uniform sampling over a list
/// reproduce observed frequencies.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

use crate::schema::frame::{Frame, FrameTriple};

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("RON deserialization error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("RON serialization error: {0}")]
    RonSerialize(#[from] ron::Error),
    #[error("unknown database format for '{path}': expected a .json or .ron extension")]
    UnknownFormat { path: String },
}

/// Part-of-speech tag → observed frames, in training order.
pub type PosFrames = BTreeMap<String, Vec<Frame>>;

/// On-disk encoding of a [`FrameDatabase`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Ron,
}

impl Format {
    /// Pick the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<Format, DatabaseError> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("json") => Ok(Format::Json),
            Some("ron") => Ok(Format::Ron),
            _ => Err(DatabaseError::UnknownFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FrameDatabase {
    entries: BTreeMap<String, PosFrames>,
}

impl FrameDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `frame` to the list for `lexeme`/`pos`.
    pub fn insert(&mut self, lexeme: impl Into<String>, pos: impl Into<String>, frame: Frame) {
        self.entries
            .entry(lexeme.into())
            .or_default()
            .entry(pos.into())
            .or_default()
            .push(frame);
    }

    pub fn insert_triple(&mut self, triple: FrameTriple) {
        self.insert(triple.lexeme, triple.pos, triple.frame);
    }

    /// Append every frame of `other`, keeping its order.
    pub fn merge(&mut self, other: FrameDatabase) {
        for (lexeme, groups) in other.entries {
            for (pos, frames) in groups {
                for frame in frames {
                    self.insert(lexeme.clone(), pos.clone(), frame);
                }
            }
        }
    }

    /// Every part-of-speech group registered for `lexeme`.
    pub fn get(&self, lexeme: &str) -> Option<&PosFrames> {
        self.entries.get(lexeme)
    }

    pub fn frames(&self, lexeme: &str, pos: &str) -> Option<&[Frame]> {
        self.entries
            .get(lexeme)
            .and_then(|groups| groups.get(pos))
            .map(Vec::as_slice)
    }

    pub fn contains(&self, lexeme: &str) -> bool {
        self.entries.contains_key(lexeme)
    }

    pub fn lexemes(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn parts_of_speech<'a>(&'a self, lexeme: &str) -> impl Iterator<Item = &'a str> {
        self.entries
            .get(lexeme)
            .into_iter()
            .flat_map(|groups| groups.keys().map(String::as_str))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &PosFrames)> {
        self.entries.iter().map(|(lexeme, groups)| (lexeme.as_str(), groups))
    }

    pub fn lexeme_count(&self) -> usize {
        self.entries.len()
    }

    /// Total number of stored frames, duplicates included.
    pub fn frame_count(&self) -> usize {
        self.entries
            .values()
            .flat_map(|groups| groups.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, DatabaseError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(input: &str) -> Result<FrameDatabase, DatabaseError> {
        Ok(serde_json::from_str(input)?)
    }

    pub fn to_ron(&self) -> Result<String, DatabaseError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    pub fn from_ron(input: &str) -> Result<FrameDatabase, DatabaseError> {
        Ok(ron::from_str(input)?)
    }

    /// Save to `path`, encoded according to its extension.
    pub fn save(&self, path: &Path) -> Result<(), DatabaseError> {
        let serialized = match Format::from_path(path)? {
            Format::Json => self.to_json()?,
            Format::Ron => self.to_ron()?,
        };
        std::fs::write(path, serialized)?;
        info!(
            path = %path.display(),
            lexemes = self.lexeme_count(),
            frames = self.frame_count(),
            "saved frame database"
        );
        Ok(())
    }

    /// Load from `path`, decoded according to its extension.
    pub fn load(path: &Path) -> Result<FrameDatabase, DatabaseError> {
        let format = Format::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;
        let db = match format {
            Format::Json => Self::from_json(&contents)?,
            Format::Ron => Self::from_ron(&contents)?,
        };
        info!(
            path = %path.display(),
            lexemes = db.lexeme_count(),
            frames = db.frame_count(),
            "loaded frame database"
        );
        Ok(db)
    }
}

impl Extend<FrameTriple> for FrameDatabase {
    fn extend<I: IntoIterator<Item = FrameTriple>>(&mut self, iter: I) {
        for triple in iter {
            self.insert_triple(triple);
        }
    }
}

impl FromIterator<FrameTriple> for FrameDatabase {
    fn from_iter<I: IntoIterator<Item = FrameTriple>>(iter: I) -> Self {
        let mut db = FrameDatabase::new();
        db.extend(iter);
        db
    }
}
