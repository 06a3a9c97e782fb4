use std::fmt;
use std::path::PathBuf;

use tracing::{info, warn};

// ============================================================================
// Progress events
// ============================================================================

/// Informational messages emitted while a merge runs.
///
/// These never drive control flow; the `Display` text is what a calling
/// harness shows to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum MergeEvent {
    Started { destination: PathBuf },
    Processing { source: PathBuf },
    /// The source was missing or unparseable and contributed nothing.
    Skipped { source: PathBuf, reason: String },
    /// The source parsed but its root is not a `testsuites` container.
    NoSuites { source: PathBuf, root: String },
    Saved { destination: PathBuf, suites: usize },
}

impl fmt::Display for MergeEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MergeEvent::Started { destination } => {
                write!(f, "Merging JUnit XML reports into {}", destination.display())
            }
            MergeEvent::Processing { source } => write!(f, "Processing {}", source.display()),
            MergeEvent::Skipped { reason, .. } => write!(f, "{}", reason),
            MergeEvent::NoSuites { source, root } => write!(
                f,
                "File {} has no test suites (root element is <{}>, expected <testsuites>)",
                source.display(),
                root
            ),
            MergeEvent::Saved {
                destination,
                suites,
            } => write!(
                f,
                "File {} saved. {} suites added",
                destination.display(),
                suites
            ),
        }
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Receives progress events from a running merge.
pub trait ProgressSink {
    fn emit(&mut self, event: &MergeEvent);
}

impl<F: FnMut(&MergeEvent)> ProgressSink for F {
    fn emit(&mut self, event: &MergeEvent) {
        self(event)
    }
}

/// Forwards every event to `tracing`. Skips are logged as warnings.
#[derive(Debug, Default)]
pub struct TracingProgress;

impl ProgressSink for TracingProgress {
    fn emit(&mut self, event: &MergeEvent) {
        match event {
            MergeEvent::Skipped { source, .. } => {
                warn!(source = %source.display(), "{}", event)
            }
            MergeEvent::NoSuites { source, .. } => {
                warn!(source = %source.display(), "{}", event)
            }
            _ => info!("{}", event),
        }
    }
}

/// Keeps every event; `lines()` gives the rendered text.
#[derive(Debug, Default)]
pub struct CollectingProgress {
    pub events: Vec<MergeEvent>,
}

impl CollectingProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(ToString::to_string).collect()
    }
}

impl ProgressSink for CollectingProgress {
    fn emit(&mut self, event: &MergeEvent) {
        self.events.push(event.clone());
    }
}
