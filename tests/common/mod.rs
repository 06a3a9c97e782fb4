#![allow(dead_code)]

use std::path::{Path, PathBuf};

use junit_merge::xml::node::XmlElement;
use junit_merge::xml::parser::parse_document;

// ============================================================================
// Report fixtures
// ============================================================================

/// A `testsuite` element with the given counters and `testcase` children.
pub fn suite_xml(name: &str, tests: u32, errors: u32, time: &str, cases: &[&str]) -> String {
    let mut body = String::new();
    for case in cases {
        body.push_str(&format!(
            "\n    <testcase name=\"{}\" classname=\"{}\" time=\"0.1\"/>",
            case, name
        ));
    }
    format!(
        "  <testsuite name=\"{}\" tests=\"{}\" assertions=\"{}\" failures=\"0\" errors=\"{}\" time=\"{}\">{}\n  </testsuite>",
        name, tests, tests, errors, time, body
    )
}

/// Wrap suites in a `testsuites` document.
pub fn report_xml(suites: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<testsuites>\n{}\n</testsuites>\n",
        suites.join("\n")
    )
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

// ============================================================================
// Output inspection
// ============================================================================

/// The top-level suites of a merged document.
pub fn merged_suites(xml: &str) -> Vec<XmlElement> {
    let root = parse_document(xml).expect("merged output must be well-formed");
    assert_eq!(root.name, "testsuites");
    root.children_named("testsuite").cloned().collect()
}

pub fn suite_named<'a>(suites: &'a [XmlElement], name: &str) -> &'a XmlElement {
    suites
        .iter()
        .find(|s| s.attribute("name") == Some(name))
        .unwrap_or_else(|| panic!("suite '{}' not found", name))
}

pub fn suite_names(suites: &[XmlElement]) -> Vec<String> {
    suites
        .iter()
        .map(|s| s.attribute("name").unwrap_or_default().to_string())
        .collect()
}

/// Names of the `testcase` children, in order.
pub fn case_names(suite: &XmlElement) -> Vec<String> {
    suite
        .children_named("testcase")
        .map(|c| c.attribute("name").unwrap_or_default().to_string())
        .collect()
}

/// Counter attribute values, keyed the way they appear in the output.
pub fn counters(suite: &XmlElement) -> [String; 4] {
    ["tests", "assertions", "failures", "errors"]
        .map(|key| suite.attribute(key).unwrap_or_default().to_string())
}
