/// Generative sampler: recursive expansion of a frame database into text.

use rand::seq::{IteratorRandom, SliceRandom};
use rand::Rng;

use crate::config::{SamplerConfig, DEFAULT_MAX_DEPTH};
use crate::core::database::FrameDatabase;
use crate::schema::frame::{Frame, ROOT};

/// The literal text of a word that is not expanded any further.
///
/// The parser escapes square brackets as `-LSB-`/`-RSB-`; those are mapped
/// back. Everything else is echoed unchanged.
pub fn surface_form(lexeme: &str) -> &str {
    match lexeme {
        "-LSB-" => "[",
        "-RSB-" => "]",
        other => other,
    }
}

/// The `ROOT` sentinel has no surface form and expands to nothing.
fn base_form(lexeme: &str) -> String {
    if lexeme == ROOT {
        String::new()
    } else {
        surface_form(lexeme).to_string()
    }
}

/// Samples sentences from a frame database.
///
/// The database is only read, so one sampler (or many) can run against the
/// same database from several threads.
#[derive(Debug, Clone, Copy)]
pub struct FrameSampler<'a> {
    db: &'a FrameDatabase,
    max_depth: usize,
}

impl<'a> FrameSampler<'a> {
    pub fn new(db: &'a FrameDatabase) -> Self {
        Self {
            db,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_config(db: &'a FrameDatabase, config: &SamplerConfig) -> Self {
        Self {
            db,
            max_depth: config.max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Generate one sentence starting from the `ROOT` sentinel.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        self.expand(rng, ROOT, None, 0, false)
    }

    /// Generate text rooted at `lexeme`, optionally restricted to `pos`.
    pub fn generate_from<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        lexeme: &str,
        pos: Option<&str>,
    ) -> String {
        self.expand(rng, lexeme, pos, 0, false)
    }

    /// Expand `lexeme` at `depth`.
    ///
    /// Words beyond the depth bound, words missing from the database, and
    /// words reached through a `HEAD` entry (`force_base`) come out as their
    /// literal surface form; a bare `ROOT` comes out empty and is dropped.
    /// Otherwise one frame is drawn uniformly from the word's `pos` group (or
    /// from a uniformly chosen group when `pos` is absent or unknown) and each
    /// of its entries is expanded one level deeper, in stored order, joined by
    /// single spaces.
    pub fn expand<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        lexeme: &str,
        pos: Option<&str>,
        depth: usize,
        force_base: bool,
    ) -> String {
        if depth > self.max_depth || force_base {
            return base_form(lexeme);
        }
        let Some(frame) = self.choose_frame(rng, lexeme, pos) else {
            return base_form(lexeme);
        };

        let pieces: Vec<String> = frame
            .iter()
            .filter(|entry| !entry.is_root_head())
            .filter_map(|entry| {
                let word = self.expand(
                    rng,
                    &entry.lexeme,
                    Some(entry.pos.as_str()),
                    depth + 1,
                    entry.is_head(),
                );
                if word.is_empty() {
                    return None;
                }
                Some(match entry.embedded_word() {
                    Some(prefix) => format!("{prefix} {word}"),
                    None => word,
                })
            })
            .collect();
        pieces.join(" ")
    }

    fn choose_frame<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        lexeme: &str,
        pos: Option<&str>,
    ) -> Option<&'a Frame> {
        let groups = self.db.get(lexeme)?;
        let frames = match pos.and_then(|p| groups.get(p)) {
            Some(frames) => frames,
            None => groups.values().choose(rng)?,
        };
        frames.choose(rng)
    }
}

/// Expand `lexeme` against `db` with the default depth bound.
pub fn generate<R: Rng + ?Sized>(
    rng: &mut R,
    lexeme: &str,
    pos: Option<&str>,
    db: &FrameDatabase,
    depth: usize,
    force_base: bool,
) -> String {
    FrameSampler::new(db).expand(rng, lexeme, pos, depth, force_base)
}
