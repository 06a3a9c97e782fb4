use std::fmt;

use serde::{Deserialize, Serialize};

use crate::xml::node::{XmlElement, XmlNode};

// ============================================================================
// Time aggregation policy
// ============================================================================

/// How the `time` attribute of same-named suites is combined.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum TimeMode {
    /// Add the times together (suites ran one after another).
    #[default]
    Sum,
    /// Keep the longest time (suites ran in parallel).
    Max,
}

impl fmt::Display for TimeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeMode::Sum => write!(f, "sum"),
            TimeMode::Max => write!(f, "max"),
        }
    }
}

// ============================================================================
// Counters
// ============================================================================

/// The integer counters carried on a `testsuite` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SuiteCounters {
    pub tests: i64,
    pub assertions: i64,
    pub failures: i64,
    pub errors: i64,
}

impl SuiteCounters {
    pub const ATTRIBUTES: [&'static str; 4] = ["tests", "assertions", "failures", "errors"];

    /// Read the counters off a suite element, coercing bad values to zero.
    pub fn from_element(suite: &XmlElement) -> Self {
        Self {
            tests: parse_counter(suite.attribute("tests")),
            assertions: parse_counter(suite.attribute("assertions")),
            failures: parse_counter(suite.attribute("failures")),
            errors: parse_counter(suite.attribute("errors")),
        }
    }

    /// Add `other` into these counters, clamping at the `i64` bounds.
    pub fn add(&mut self, other: SuiteCounters) {
        self.tests = self.tests.saturating_add(other.tests);
        self.assertions = self.assertions.saturating_add(other.assertions);
        self.failures = self.failures.saturating_add(other.failures);
        self.errors = self.errors.saturating_add(other.errors);
    }

    fn values(&self) -> [i64; 4] {
        [self.tests, self.assertions, self.failures, self.errors]
    }
}

// ============================================================================
// Accumulator entry
// ============================================================================

/// The in-progress merge of every suite sharing one name.
#[derive(Debug, Clone, PartialEq)]
pub struct SuiteEntry {
    pub name: String,
    /// Attributes copied from the first suite seen with this name.
    pub attributes: Vec<(String, String)>,
    pub counters: SuiteCounters,
    pub time: f64,
    pub children: Vec<XmlNode>,
}

impl SuiteEntry {
    /// Start an empty entry from the first suite seen with its name.
    ///
    /// Counters start at zero; the caller still has to `fold` the suite.
    pub fn seed(suite: &XmlElement) -> Self {
        Self {
            name: suite.attribute("name").unwrap_or_default().to_string(),
            attributes: suite.attributes.clone(),
            counters: SuiteCounters::default(),
            time: 0.0,
            children: Vec::new(),
        }
    }

    /// Fold `current` into this entry.
    ///
    /// Counters add, `time` follows `mode`, and deep copies of every child
    /// node are appended after the ones already collected. The fold is
    /// additive: folding the same element twice counts it twice.
    pub fn fold(&mut self, current: &XmlElement, mode: TimeMode) {
        self.counters.add(SuiteCounters::from_element(current));

        let time = parse_time(current.attribute("time"));
        self.time = match mode {
            TimeMode::Sum => time + self.time,
            TimeMode::Max => time.max(self.time),
        };

        self.children.extend(current.children.iter().cloned());
    }

    /// Finish the entry as a `testsuite` element.
    pub fn into_element(self) -> XmlElement {
        let mut element = XmlElement {
            name: "testsuite".to_string(),
            attributes: self.attributes,
            children: self.children,
        };
        element.set_attribute("name", self.name);
        for (key, value) in SuiteCounters::ATTRIBUTES.iter().zip(self.counters.values()) {
            element.set_attribute(*key, value.to_string());
        }
        element.set_attribute("time", format_time(self.time));
        element
    }
}

// ============================================================================
// Lenient attribute parsing
// ============================================================================

/// Parse an integer counter. Absent, empty or non-numeric values are 0;
/// a decimal value is truncated toward zero.
pub fn parse_counter(value: Option<&str>) -> i64 {
    let Some(raw) = value.map(str::trim) else {
        return 0;
    };
    raw.parse::<i64>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .map(|v| v.trunc() as i64)
        })
        .unwrap_or(0)
}

/// Parse a time in seconds. Absent, empty or non-numeric values are 0.
pub fn parse_time(value: Option<&str>) -> f64 {
    value
        .and_then(|raw| raw.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Format seconds as the shortest decimal that reads back to the same
/// value, after rounding to 12 significant digits to drop float noise
/// (`0.1 + 0.2` prints as `0.3`, `1e-7` as `0.0000001`).
pub fn format_time(seconds: f64) -> String {
    let rounded = format!("{:.11e}", seconds)
        .parse::<f64>()
        .unwrap_or(seconds);
    match rounded.to_string().as_str() {
        "-0" => "0".to_string(),
        other => other.to_string(),
    }
}
