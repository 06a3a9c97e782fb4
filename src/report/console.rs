use crate::merge::suite::format_time;
use crate::report::summary::MergeSummary;

// ============================================================================
// Console reporter — formatted terminal output
// ============================================================================

/// Format a merge summary for terminal output.
///
/// Produces output like:
/// ```text
/// === Merged 2 suites into build/merged.xml (time: sum) ===
///
///   Core  tests=8 assertions=12 failures=0 errors=1 time=4 (5 children)
///   Api   tests=2 assertions=2 failures=1 errors=0 time=0.75 (2 children)
///
/// [SKIP] File missing.xml could not be found
///
/// === Sources: 2 merged, 1 skipped | tests=10 failures=1 errors=1 ===
/// ```
pub fn format_console_summary(summary: &MergeSummary) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "=== Merged {} suites into {} (time: {}) ===\n\n",
        summary.suites_written(),
        summary.destination.display(),
        summary.time_mode
    ));

    let width = summary
        .suites
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(0);

    for suite in &summary.suites {
        out.push_str(&format!(
            "  {:<width$}  tests={} assertions={} failures={} errors={} time={} ({} children)\n",
            suite.name,
            suite.counters.tests,
            suite.counters.assertions,
            suite.counters.failures,
            suite.counters.errors,
            format_time(suite.time),
            suite.child_elements,
            width = width
        ));
    }

    if summary.has_skipped() {
        out.push('\n');
        for skipped in &summary.skipped_sources {
            out.push_str(&format!("[SKIP] {}\n", skipped.reason));
        }
    }

    let totals = summary.totals();
    out.push_str(&format!(
        "\n=== Sources: {} merged, {} skipped | tests={} failures={} errors={} ===\n",
        summary.merged_sources.len(),
        summary.skipped_sources.len(),
        totals.tests,
        totals.failures,
        totals.errors
    ));

    out
}
