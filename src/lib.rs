//! Merge several JUnit XML reports into one.
//!
//! Suites that share a `name` across reports become a single suite: the
//! `tests`, `assertions`, `failures` and `errors` counters add up, `time` is
//! summed or maxed per [`TimeMode`], and every child node is concatenated in
//! source order.

pub mod cli;
pub mod merge;
pub mod report;
pub mod xml;

pub use merge::error::{MergeError, MergeResult, SourceError};
pub use merge::merger::ReportMerger;
pub use merge::suite::TimeMode;
pub use report::summary::MergeSummary;
