use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::merge::error::{MergeError, MergeResult, SourceError};
use crate::merge::fs::{LocalFs, ReportFs};
use crate::merge::progress::{MergeEvent, ProgressSink};
use crate::merge::suite::{SuiteEntry, TimeMode};
use crate::report::summary::{MergeSummary, MergedSource, SkippedSource, SuiteTotals};
use crate::xml::node::{XmlElement, XmlNode};
use crate::xml::parser::parse_bytes;
use crate::xml::writer::write_document;

pub const ROOT_ELEMENT: &str = "testsuites";
pub const SUITE_ELEMENT: &str = "testsuite";

// ============================================================================
// Suite accumulator
// ============================================================================

/// Name-keyed suite entries that remember first-seen order.
#[derive(Debug, Default)]
pub struct SuiteAccumulator {
    entries: Vec<SuiteEntry>,
    index: HashMap<String, usize>,
}

impl SuiteAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a suite into the entry for its name, creating the entry on
    /// first sight.
    pub fn fold_suite(&mut self, suite: &XmlElement, mode: TimeMode) {
        let name = suite.attribute("name").unwrap_or_default();
        let slot = match self.index.get(name) {
            Some(&slot) => slot,
            None => {
                self.entries.push(SuiteEntry::seed(suite));
                self.index.insert(name.to_string(), self.entries.len() - 1);
                self.entries.len() - 1
            }
        };
        self.entries[slot].fold(suite, mode);
    }

    pub fn get(&self, name: &str) -> Option<&SuiteEntry> {
        self.index.get(name).map(|&slot| &self.entries[slot])
    }

    /// Entries in first-seen order.
    pub fn entries(&self) -> &[SuiteEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the destination `testsuites` root, one suite per line.
    pub fn into_document(self) -> XmlElement {
        let mut root = XmlElement::new(ROOT_ELEMENT);
        let has_entries = !self.is_empty();
        for entry in self.entries {
            root.children.push(XmlNode::Text("\n  ".to_string()));
            root.children.push(XmlNode::Element(entry.into_element()));
        }
        if has_entries {
            root.children.push(XmlNode::Text("\n".to_string()));
        }
        root
    }
}

/// The `testsuite` elements directly under a `testsuites` root.
///
/// Any other root contributes nothing, and deeper nesting is not searched.
pub fn collect_suites(document: &XmlElement) -> Vec<&XmlElement> {
    if document.name != ROOT_ELEMENT {
        return Vec::new();
    }
    document.children_named(SUITE_ELEMENT).collect()
}

/// Read and parse one source, classifying why it can't be used.
pub fn load_source(fs: &dyn ReportFs, path: &Path) -> Result<XmlElement, SourceError> {
    if !fs.exists(path) {
        return Err(SourceError::Unavailable(path.to_path_buf()));
    }
    let content = fs.read(path).map_err(|source| SourceError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    parse_bytes(&content).map_err(|source| SourceError::Unparseable {
        path: path.to_path_buf(),
        source,
    })
}

// ============================================================================
// Report merger — configure, then execute
// ============================================================================

/// Merges JUnit XML reports, combining suites that share a name.
///
/// ```no_run
/// use junit_merge::merge::merger::ReportMerger;
/// use junit_merge::merge::progress::TracingProgress;
///
/// let summary = ReportMerger::new(["unit.xml", "api.xml"])
///     .with_destination("merged.xml")
///     .max_time()
///     .run(&mut TracingProgress)?;
/// println!("{} suites", summary.suites_written());
/// # Ok::<(), junit_merge::merge::error::MergeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ReportMerger {
    sources: Vec<PathBuf>,
    destination: Option<PathBuf>,
    time_mode: TimeMode,
}

impl ReportMerger {
    pub fn new<I, P>(sources: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            sources: sources.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Append one source after the existing ones.
    pub fn with_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.sources.push(path.into());
        self
    }

    /// Put a batch of sources in front of the existing ones.
    pub fn with_sources<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let mut batch: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        batch.append(&mut self.sources);
        self.sources = batch;
        self
    }

    pub fn with_destination(mut self, path: impl Into<PathBuf>) -> Self {
        self.destination = Some(path.into());
        self
    }

    pub fn with_time_mode(mut self, mode: TimeMode) -> Self {
        self.time_mode = mode;
        self
    }

    pub fn sum_time(self) -> Self {
        self.with_time_mode(TimeMode::Sum)
    }

    pub fn max_time(self) -> Self {
        self.with_time_mode(TimeMode::Max)
    }

    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn time_mode(&self) -> TimeMode {
        self.time_mode
    }

    /// Merge on the local filesystem.
    pub fn run(&self, sink: &mut dyn ProgressSink) -> MergeResult<MergeSummary> {
        self.execute(&LocalFs, sink)
    }

    /// Merge every source into the destination.
    ///
    /// Sources are folded strictly in list order. Missing or malformed
    /// sources are reported through `sink` and skipped. The destination is
    /// written once, after all sources are read. Fails without touching
    /// `fs` when no destination is set.
    pub fn execute(
        &self,
        fs: &dyn ReportFs,
        sink: &mut dyn ProgressSink,
    ) -> MergeResult<MergeSummary> {
        let destination = self.destination.as_ref().ok_or(MergeError::NoDestination)?;

        sink.emit(&MergeEvent::Started {
            destination: destination.clone(),
        });
        debug!(
            sources = self.sources.len(),
            time_mode = %self.time_mode,
            "merging reports"
        );

        let mut accumulator = SuiteAccumulator::new();
        let mut merged_sources = Vec::new();
        let mut skipped_sources = Vec::new();

        for source in &self.sources {
            sink.emit(&MergeEvent::Processing {
                source: source.clone(),
            });

            let document = match load_source(fs, source) {
                Ok(document) => document,
                Err(err) => {
                    let reason = err.to_string();
                    sink.emit(&MergeEvent::Skipped {
                        source: source.clone(),
                        reason: reason.clone(),
                    });
                    skipped_sources.push(SkippedSource {
                        path: err.path().clone(),
                        reason,
                    });
                    continue;
                }
            };

            if document.name != ROOT_ELEMENT {
                sink.emit(&MergeEvent::NoSuites {
                    source: source.clone(),
                    root: document.name.clone(),
                });
            }

            let suites = collect_suites(&document);
            debug!(source = %source.display(), suites = suites.len(), "folding suites");
            for suite in &suites {
                accumulator.fold_suite(suite, self.time_mode);
            }
            merged_sources.push(MergedSource {
                path: source.clone(),
                suites: suites.len(),
            });
        }

        debug!(suites = accumulator.len(), skipped = skipped_sources.len(), "writing merged report");
        let totals: Vec<SuiteTotals> = accumulator.entries().iter().map(SuiteTotals::from).collect();
        let xml = write_document(&accumulator.into_document());
        fs.write(destination, &xml)
            .map_err(|source| MergeError::Write {
                path: destination.clone(),
                source,
            })?;

        sink.emit(&MergeEvent::Saved {
            destination: destination.clone(),
            suites: totals.len(),
        });

        Ok(MergeSummary {
            destination: destination.clone(),
            time_mode: self.time_mode,
            suites: totals,
            merged_sources,
            skipped_sources,
        })
    }
}
