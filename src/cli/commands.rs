use crate::cli::config::{MergeConfig, build_merger};
use crate::merge::progress::TracingProgress;
use crate::merge::suite::TimeMode;
use crate::report::console::format_console_summary;
use crate::report::summary::MergeSummary;

// ============================================================================
// merge subcommand
// ============================================================================

/// Merge the given reports and print a summary in `format`.
pub fn cmd_merge(
    sources: &[String],
    into: Option<&str>,
    time: Option<TimeMode>,
    format: &str,
    config: &MergeConfig,
) -> Result<MergeSummary, Box<dyn std::error::Error>> {
    let merger = build_merger(sources, into, time, config);

    if merger.sources().is_empty() {
        tracing::warn!("no source reports given; writing an empty report");
    }

    let summary = merger.run(&mut TracingProgress)?;
    print!("{}", render_summary(&summary, format)?);
    Ok(summary)
}

/// Render a summary as console text or JSON.
pub fn render_summary(
    summary: &MergeSummary,
    format: &str,
) -> Result<String, Box<dyn std::error::Error>> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(summary)? + "\n"),
        _ => Ok(format_console_summary(summary)),
    }
}
