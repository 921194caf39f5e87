/// Frame types: the records stored in a frame database.
use serde::{Deserialize, Serialize};

use crate::schema::token::Token;

/// Relation label of the self-reference entry that marks a head word's own
/// position within its frame.
pub const HEAD: &str = "HEAD";

/// Lexeme the parser gives the synthetic top of every dependency tree.
pub const ROOT: &str = "ROOT";

/// One `(relation, part-of-speech, lexeme)` record of a frame.
///
/// Persisted as a 3-element array `[relation, pos, lexeme]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(
    from = "(String, String, String)",
    into = "(String, String, String)"
)]
pub struct FrameEntry {
    pub relation: String,
    pub pos: String,
    pub lexeme: String,
}

impl FrameEntry {
    pub fn new(
        relation: impl Into<String>,
        pos: impl Into<String>,
        lexeme: impl Into<String>,
    ) -> Self {
        Self {
            relation: relation.into(),
            pos: pos.into(),
            lexeme: lexeme.into(),
        }
    }

    /// Build the entry for `token` reached through `relation`.
    pub fn from_token(relation: impl Into<String>, token: &Token) -> Self {
        Self::new(relation, token.pos.clone(), token.lexeme.clone())
    }

    pub fn is_head(&self) -> bool {
        self.relation == HEAD
    }

    /// The `HEAD` entry of the sentence root, which is never emitted as text.
    pub fn is_root_head(&self) -> bool {
        self.is_head() && self.lexeme == ROOT
    }

    /// The surface word embedded in a collapsed relation label.
    ///
    /// `prep_to` yields `to`; multi-word labels such as `prep_according_to`
    /// yield every word after the first underscore, `according to`. Labels
    /// without an underscore, or with nothing after it (`prep_`), yield `None`
    /// so no empty prefix is emitted.
    pub fn embedded_word(&self) -> Option<String> {
        let (_, rest) = self.relation.split_once('_')?;
        if rest.is_empty() {
            return None;
        }
        Some(rest.replace('_', " "))
    }
}

impl From<(String, String, String)> for FrameEntry {
    fn from((relation, pos, lexeme): (String, String, String)) -> Self {
        Self {
            relation,
            pos,
            lexeme,
        }
    }
}

impl From<FrameEntry> for (String, String, String) {
    fn from(entry: FrameEntry) -> Self {
        (entry.relation, entry.pos, entry.lexeme)
    }
}

/// The relations attached to one head word in one observed sentence, in
/// source-sentence order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Frame {
    pub entries: Vec<FrameEntry>,
}

impl Frame {
    pub fn new(entries: Vec<FrameEntry>) -> Self {
        Self { entries }
    }

    /// The degenerate frame of a word with no dependents: only itself.
    pub fn leaf(token: &Token) -> Self {
        Self::new(vec![FrameEntry::from_token(HEAD, token)])
    }

    /// Build a frame from `(relation, token)` pairs by ordering them on the
    /// tokens' sentence positions and then discarding the positions.
    ///
    /// The sort is stable, so two relations to the same token keep the
    /// order they were observed in.
    pub fn from_relations(mut relations: Vec<(String, Token)>) -> Self {
        relations.sort_by_key(|(_, token)| token.index);
        Self::new(
            relations
                .into_iter()
                .map(|(relation, token)| FrameEntry {
                    relation,
                    pos: token.pos,
                    lexeme: token.lexeme,
                })
                .collect(),
        )
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FrameEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn head_count(&self) -> usize {
        self.entries.iter().filter(|e| e.is_head()).count()
    }

    /// The first `HEAD` entry, if any.
    pub fn head(&self) -> Option<&FrameEntry> {
        self.entries.iter().find(|e| e.is_head())
    }
}

impl<'a> IntoIterator for &'a Frame {
    type Item = &'a FrameEntry;
    type IntoIter = std::slice::Iter<'a, FrameEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// One extractor output record: a head word, its part-of-speech and the
/// frame observed for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameTriple {
    pub lexeme: String,
    pub pos: String,
    pub frame: Frame,
}
