pub mod database;
pub mod extractor;
pub mod lint;
pub mod parser;
pub mod sampler;
pub mod trainer;
