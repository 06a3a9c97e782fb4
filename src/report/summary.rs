use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::merge::suite::{SuiteCounters, SuiteEntry, TimeMode};

// ============================================================================
// Merge summary — what a finished merge produced
// ============================================================================

/// Outcome of a successful merge.
///
/// Returned by `ReportMerger::execute()`. Consumed by the console and JSON
/// renderers in the CLI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeSummary {
    /// Where the merged report was written
    pub destination: PathBuf,

    /// Time policy used for colliding suites
    pub time_mode: TimeMode,

    /// Final totals per suite, in first-seen order
    pub suites: Vec<SuiteTotals>,

    /// Sources that parsed and were folded in
    pub merged_sources: Vec<MergedSource>,

    /// Sources that were missing or unparseable
    pub skipped_sources: Vec<SkippedSource>,
}

impl MergeSummary {
    /// Number of distinct suite names written.
    pub fn suites_written(&self) -> usize {
        self.suites.len()
    }

    /// Counters summed over every written suite.
    pub fn totals(&self) -> SuiteCounters {
        let mut totals = SuiteCounters::default();
        for suite in &self.suites {
            totals.add(suite.counters);
        }
        totals
    }

    pub fn has_skipped(&self) -> bool {
        !self.skipped_sources.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteTotals {
    pub name: String,
    #[serde(flatten)]
    pub counters: SuiteCounters,
    pub time: f64,
    /// Child nodes that are elements (usually `testcase`)
    pub child_elements: usize,
}

impl From<&SuiteEntry> for SuiteTotals {
    fn from(entry: &SuiteEntry) -> Self {
        Self {
            name: entry.name.clone(),
            counters: entry.counters,
            time: entry.time,
            child_elements: entry
                .children
                .iter()
                .filter(|child| child.as_element().is_some())
                .count(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergedSource {
    pub path: PathBuf,
    /// `testsuite` elements folded from this source
    pub suites: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedSource {
    pub path: PathBuf,
    pub reason: String,
}
