use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::merge::merger::ReportMerger;
use crate::merge::suite::TimeMode;

pub const DEFAULT_CONFIG_PATH: &str = "junit-merge.yaml";

// ============================================================================
// CLI Argument Parsing (clap derive)
// ============================================================================

#[derive(Parser, Debug)]
#[command(
    name = "junit-merge",
    version,
    about = "Merge JUnit XML test reports into a single report"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config file (default: junit-merge.yaml in current dir)
    #[arg(long, global = true)]
    pub config: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Merge report files, combining suites with the same name
    Merge {
        /// Source report files, merged in the order given
        sources: Vec<String>,

        /// Destination file for the merged report
        #[arg(short = 'o', long)]
        into: Option<String>,

        /// How to combine `time` of same-named suites
        #[arg(long, value_enum)]
        time: Option<TimeMode>,

        /// Summary format: text, json
        #[arg(long, default_value = "text")]
        format: String,
    },
}

// ============================================================================
// Config File Model (optional YAML)
// ============================================================================

/// Optional YAML config file: `junit-merge.yaml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub merge: MergeConfig,

    /// Log filter used when neither -v nor RUST_LOG is given
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MergeConfig {
    #[serde(default)]
    pub time: TimeMode,

    pub into: Option<String>,

    /// Sources merged before any given on the command line
    #[serde(default)]
    pub sources: Vec<String>,
}

// ============================================================================
// Config File Loading
// ============================================================================

/// Load config from a YAML file. Returns defaults if file is missing or malformed.
pub fn load_config(path: Option<&str>) -> AppConfig {
    let config_path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    match std::fs::read_to_string(config_path) {
        Ok(content) => serde_yaml::from_str(&content).unwrap_or_else(|e| {
            tracing::warn!(path = config_path, "ignoring malformed config: {}", e);
            AppConfig::default()
        }),
        Err(_) => AppConfig::default(),
    }
}

// ============================================================================
// Config Builders (merge CLI args with config file)
// ============================================================================

/// Build a ReportMerger from resolved CLI/config values.
///
/// Config sources come first, then CLI sources. A CLI destination or time
/// mode overrides the config file.
pub fn build_merger(
    sources: &[String],
    into: Option<&str>,
    time: Option<TimeMode>,
    config: &MergeConfig,
) -> ReportMerger {
    let mut merger = ReportMerger::new(sources).with_sources(&config.sources);
    if let Some(destination) = into.or(config.into.as_deref()) {
        merger = merger.with_destination(destination);
    }
    merger.with_time_mode(time.unwrap_or(config.time))
}

/// Log filter directive for the given verbosity.
pub fn log_filter(verbose: u8, configured: Option<&str>) -> String {
    match verbose {
        0 => configured.unwrap_or("warn").to_string(),
        1 => "info".to_string(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    }
}
