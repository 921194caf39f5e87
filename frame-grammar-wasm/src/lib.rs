//! WASM bindings for frame-grammar: powers the in-browser sampler demo.

use rand::rngs::StdRng;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

use frame_grammar::core::database::FrameDatabase;
use frame_grammar::core::lint::lint;
use frame_grammar::core::sampler::FrameSampler;
use frame_grammar::core::trainer::train_parsed;

// ---------------------------------------------------------------------------
// Embedded sample data: compiled into the WASM binary
// ---------------------------------------------------------------------------
mod data {
    pub const SAMPLE_PARSE: &str = include_str!("../../tests/fixtures/parsed_sample.txt");
}

// ---------------------------------------------------------------------------
// JSON helper types for communication across the WASM boundary
// ---------------------------------------------------------------------------
#[derive(serde::Serialize)]
struct DatabaseStats {
    lexemes: usize,
    frames: usize,
    errors: Vec<String>,
    warnings: Vec<String>,
}

// ---------------------------------------------------------------------------
// FrameDemo: the main exported struct
// ---------------------------------------------------------------------------
#[wasm_bindgen]
pub struct FrameDemo {
    db: FrameDatabase,
    rng: StdRng,
}

#[wasm_bindgen]
impl FrameDemo {
    /// Create a demo over a persisted JSON frame database.
    #[wasm_bindgen(constructor)]
    pub fn new(db_json: &str, seed: u64) -> Result<FrameDemo, JsError> {
        let db = FrameDatabase::from_json(db_json)
            .map_err(|e| JsError::new(&format!("Database parse error: {e}")))?;
        Ok(FrameDemo::with_database(db, seed))
    }

    /// Create a demo by training on raw parser output.
    pub fn from_parsed(parser_output: &str, seed: u64) -> FrameDemo {
        let mut db = FrameDatabase::new();
        train_parsed(&mut db, parser_output);
        FrameDemo::with_database(db, seed)
    }

    /// Create a demo trained on the bundled sample sentences.
    pub fn sample(seed: u64) -> FrameDemo {
        FrameDemo::from_parsed(data::SAMPLE_PARSE, seed)
    }

    /// Generate one sentence from the sentence root.
    pub fn generate(&mut self) -> String {
        FrameSampler::new(&self.db).generate(&mut self.rng)
    }

    /// Generate text rooted at a given lexeme. An empty `pos` means any.
    pub fn generate_from(&mut self, lexeme: &str, pos: &str) -> String {
        let pos = (!pos.is_empty()).then_some(pos);
        FrameSampler::new(&self.db).generate_from(&mut self.rng, lexeme, pos)
    }

    /// Generate several sentences. Returns a JSON array of strings.
    pub fn generate_many(&mut self, count: usize) -> Result<String, JsError> {
        let sampler = FrameSampler::new(&self.db);
        let sentences: Vec<String> = (0..count).map(|_| sampler.generate(&mut self.rng)).collect();
        serde_json::to_string(&sentences)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Return a JSON array of every lexeme in the database.
    pub fn lexemes(&self) -> String {
        let lexemes: Vec<&str> = self.db.lexemes().collect();
        serde_json::to_string(&lexemes).unwrap_or_else(|_| "[]".to_string())
    }

    /// Return JSON with database size and lint findings.
    pub fn stats(&self) -> Result<String, JsError> {
        let report = lint(&self.db);
        let stats = DatabaseStats {
            lexemes: self.db.lexeme_count(),
            frames: self.db.frame_count(),
            errors: report.errors,
            warnings: report.warnings,
        };
        serde_json::to_string(&stats)
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Export the database as pretty JSON.
    pub fn export_json(&self) -> Result<String, JsError> {
        self.db
            .to_json()
            .map_err(|e| JsError::new(&format!("Serialization error: {e}")))
    }

    /// Reseed the generator.
    pub fn reset(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

// Private helpers
impl FrameDemo {
    fn with_database(db: FrameDatabase, seed: u64) -> FrameDemo {
        FrameDemo {
            db,
            rng: StdRng::seed_from_u64(seed),
        }
    }
}
