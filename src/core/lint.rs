/// Frame database linting: structural checks on a trained or hand-edited
/// database.

use std::collections::BTreeSet;

use crate::core::database::FrameDatabase;
use crate::schema::frame::ROOT;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl LintReport {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

pub fn lint(db: &FrameDatabase) -> LintReport {
    let mut report = LintReport::default();

    if !db.contains(ROOT) {
        report.warnings.push(format!(
            "No '{ROOT}' entry; generating from the sentence root will only echo it"
        ));
    }

    let mut unexpanded = BTreeSet::new();

    for (lexeme, groups) in db.iter() {
        for (pos, frames) in groups {
            if frames.is_empty() {
                report
                    .errors
                    .push(format!("'{lexeme}'/{pos} has an empty frame list"));
            }

            for (i, frame) in frames.iter().enumerate() {
                let heads = frame.head_count();
                if heads != 1 {
                    report.errors.push(format!(
                        "'{lexeme}'/{pos} frame {i} has {heads} HEAD entries (expected 1)"
                    ));
                } else if let Some(head) = frame.head() {
                    if head.lexeme != lexeme || head.pos != *pos {
                        report.errors.push(format!(
                            "'{lexeme}'/{pos} frame {i} has HEAD '{}'/{}",
                            head.lexeme, head.pos
                        ));
                    }
                }

                for entry in frame.iter().filter(|e| !e.is_head()) {
                    if !db.contains(&entry.lexeme) {
                        unexpanded.insert(entry.lexeme.clone());
                    }
                }
            }
        }
    }

    for lexeme in unexpanded {
        report.warnings.push(format!(
            "'{lexeme}' appears as a dependent but has no frames of its own"
        ));
    }

    report
}
