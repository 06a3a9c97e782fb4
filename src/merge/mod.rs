pub mod error;
pub mod fs;
pub mod merger;
pub mod progress;
pub mod suite;
