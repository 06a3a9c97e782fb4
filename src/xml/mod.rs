pub mod node;
pub mod parser;
pub mod writer;
