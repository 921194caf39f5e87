/// Frame extraction from dependency-parser output.
///
/// The parser emits, per sentence, a `word/TAG` line, a blank line, then one
/// `relation(head-N, dependent-M)` line per typed dependency, terminated by
/// another blank line. Every head word of a sentence becomes one frame, and
/// every dependent that never governs anything becomes a single-entry frame.

use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};
use std::iter::Peekable;
use std::str::Lines;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::{debug, warn};

use crate::schema::frame::{Frame, FrameTriple, HEAD, ROOT};
use crate::schema::token::Token;

static RELATION_LINE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^([a-z_]+)\((.*), (.*)\)$").ok());

/// A sentence that could not be turned into frames. Only that sentence is
/// lost; extraction resumes with the next one.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("sentence {sentence}: tag line entry '{word}' has no '/TAG' suffix")]
    MalformedTagLine { sentence: usize, word: String },
    #[error("sentence {sentence}: malformed relation line '{line}'")]
    MalformedRelation { sentence: usize, line: String },
    #[error("sentence {sentence}: malformed token descriptor '{token}'")]
    MalformedToken { sentence: usize, token: String },
    #[error("sentence {sentence}: token '{token}' has index {index} but the sentence has {len} tags")]
    IndexOutOfRange {
        sentence: usize,
        token: String,
        index: usize,
        len: usize,
    },
}

impl ExtractError {
    /// 1-based position of the offending sentence within its batch.
    pub fn sentence(&self) -> usize {
        match self {
            ExtractError::MalformedTagLine { sentence, .. }
            | ExtractError::MalformedRelation { sentence, .. }
            | ExtractError::MalformedToken { sentence, .. }
            | ExtractError::IndexOutOfRange { sentence, .. } => *sentence,
        }
    }
}

/// Raw parser output for one batch of sentences.
///
/// Iteration is lazy and can be restarted any number of times; nothing is
/// parsed until one of the iterators is driven.
#[derive(Debug, Clone, Copy)]
pub struct ParsedBatch<'a> {
    text: &'a str,
}

impl<'a> ParsedBatch<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text }
    }

    /// Frames of each sentence, or the error that made that sentence unusable.
    pub fn sentences(&self) -> Sentences<'a> {
        Sentences {
            lines: self.text.lines().peekable(),
            sentence: 0,
        }
    }

    /// Every frame of the batch. Malformed sentences are logged and skipped.
    pub fn frames(&self) -> impl Iterator<Item = FrameTriple> + 'a {
        self.sentences()
            .filter_map(|result| match result {
                Ok(frames) => Some(frames),
                Err(e) => {
                    warn!(error = %e, "skipping malformed sentence");
                    None
                }
            })
            .flatten()
    }
}

/// Iterator over the sentences of a [`ParsedBatch`].
pub struct Sentences<'a> {
    lines: Peekable<Lines<'a>>,
    sentence: usize,
}

impl Iterator for Sentences<'_> {
    type Item = Result<Vec<FrameTriple>, ExtractError>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag_line = loop {
            let line = self.lines.next()?;
            if !is_blank(line) {
                break line;
            }
        };
        self.sentence += 1;
        Some(self.read_sentence(tag_line))
    }
}

impl Sentences<'_> {
    fn read_sentence(&mut self, tag_line: &str) -> Result<Vec<FrameTriple>, ExtractError> {
        let sentence = self.sentence;
        let tags = parse_tag_line(tag_line, sentence);
        self.skip_separator();
        let tags = match tags {
            Ok(tags) => tags,
            Err(e) => {
                self.skip_block();
                return Err(e);
            }
        };

        let mut frames = FrameBuilder::default();
        while let Some(line) = self.lines.next() {
            if is_blank(line) {
                break;
            }
            let parsed = parse_relation(line, &tags, sentence);
            match parsed {
                Ok((relation, head, dependent)) => frames.add(relation, head, dependent),
                Err(e) => {
                    self.skip_block();
                    return Err(e);
                }
            }
        }

        let triples = frames.finish();
        debug!(sentence, frames = triples.len(), "extracted sentence frames");
        Ok(triples)
    }

    /// Consume the one blank line between the tag line and the relations,
    /// if present. A second blank line ends a sentence without relations.
    fn skip_separator(&mut self) {
        self.lines.next_if(|line| is_blank(line));
    }

    /// Discard the rest of the current relation block.
    fn skip_block(&mut self) {
        for line in self.lines.by_ref() {
            if is_blank(line) {
                break;
            }
        }
    }
}

/// Per-sentence accumulator of head words and their relations.
#[derive(Default)]
struct FrameBuilder {
    heads: Vec<(Token, Vec<(String, Token)>)>,
    head_slots: FxHashMap<Token, usize>,
    dependents: Vec<Token>,
    seen_dependents: FxHashSet<Token>,
}

impl FrameBuilder {
    fn add(&mut self, relation: String, head: Token, dependent: Token) {
        let slot = match self.head_slots.get(&head) {
            Some(&slot) => slot,
            None => {
                let slot = self.heads.len();
                self.heads
                    .push((head.clone(), vec![(HEAD.to_string(), head.clone())]));
                self.head_slots.insert(head, slot);
                slot
            }
        };
        self.heads[slot].1.push((relation, dependent.clone()));

        if self.seen_dependents.insert(dependent.clone()) {
            self.dependents.push(dependent);
        }
    }

    fn finish(self) -> Vec<FrameTriple> {
        let FrameBuilder {
            heads,
            head_slots,
            dependents,
            ..
        } = self;

        let leaves = dependents
            .into_iter()
            .filter(|token| !head_slots.contains_key(token))
            .map(|token| {
                let frame = Frame::leaf(&token);
                (token, frame)
            });

        heads
            .into_iter()
            .map(|(head, relations)| (head, Frame::from_relations(relations)))
            .chain(leaves)
            .map(|(token, frame)| FrameTriple {
                lexeme: token.lexeme,
                pos: token.pos,
                frame,
            })
            .collect()
    }
}

fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Collect the part-of-speech tags of a `word/TAG word/TAG ...` line in
/// serial order. Words may themselves contain `/`, so the tag is whatever
/// follows the last one.
fn parse_tag_line(line: &str, sentence: usize) -> Result<Vec<String>, ExtractError> {
    line.split_whitespace()
        .map(|word| match word.rsplit_once('/') {
            Some((_, tag)) if !tag.is_empty() => Ok(tag.to_string()),
            _ => Err(ExtractError::MalformedTagLine {
                sentence,
                word: word.to_string(),
            }),
        })
        .collect()
}

fn parse_relation(
    line: &str,
    tags: &[String],
    sentence: usize,
) -> Result<(String, Token, Token), ExtractError> {
    let line = line.trim();
    let caps = RELATION_LINE
        .as_ref()
        .and_then(|re| re.captures(line))
        .ok_or_else(|| ExtractError::MalformedRelation {
            sentence,
            line: line.to_string(),
        })?;
    let head = parse_token(&caps[2], tags, sentence)?;
    let dependent = parse_token(&caps[3], tags, sentence)?;
    Ok((caps[1].to_string(), head, dependent))
}

/// Resolve a `lexeme-index` descriptor against the sentence's tags.
///
/// The index follows the last hyphen, since lexemes may contain hyphens.
/// Surrounding quotes and the trailing primes the parser puts on copy nodes
/// (`went-3'`) are dropped. Index 0 is the parser's `ROOT`, which has no tag
/// of its own and is tagged `ROOT`.
fn parse_token(descriptor: &str, tags: &[String], sentence: usize) -> Result<Token, ExtractError> {
    let malformed = || ExtractError::MalformedToken {
        sentence,
        token: descriptor.to_string(),
    };

    let stripped = strip_quotes(descriptor.trim());
    let (lexeme, index) = stripped.rsplit_once('-').ok_or_else(malformed)?;
    let lexeme = strip_quotes(lexeme);
    if lexeme.is_empty() {
        return Err(malformed());
    }
    let index: usize = index
        .trim_end_matches('\'')
        .parse()
        .map_err(|_| malformed())?;

    let pos = if index == 0 {
        ROOT.to_string()
    } else {
        tags.get(index - 1)
            .cloned()
            .ok_or_else(|| ExtractError::IndexOutOfRange {
                sentence,
                token: descriptor.to_string(),
                index,
                len: tags.len(),
            })?
    };

    Ok(Token::new(index, lexeme, pos))
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['\'', '"'] {
        if s.len() > 2 && s.starts_with(quote) && s.ends_with(quote) {
            return &s[1..s.len() - 1];
        }
    }
    s
}
