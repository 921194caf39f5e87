/// A token resolved from a dependency parse.
///
/// `index` is the 1-based serial position in the sentence (`0` for the
/// parser's synthetic `ROOT`). It only exists to recover word order and is
/// dropped once a frame has been sorted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    pub index: usize,
    pub lexeme: String,
    pub pos: String,
}

impl Token {
    pub fn new(index: usize, lexeme: impl Into<String>, pos: impl Into<String>) -> Self {
        Self {
            index,
            lexeme: lexeme.into(),
            pos: pos.into(),
        }
    }
}
