pub mod frame;
pub mod token;

pub use frame::{Frame, FrameEntry, FrameTriple, HEAD, ROOT};
pub use token::Token;
