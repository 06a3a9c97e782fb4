use clap::Parser;
use junit_merge::cli::commands::cmd_merge;
use junit_merge::cli::config::{Cli, Commands, load_config, log_filter};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref());

    // Resolve log level: RUST_LOG > -v > config > warn
    init_logging(&log_filter(cli.verbose, config.log_level.as_deref()));

    match cli.command {
        Commands::Merge {
            sources,
            into,
            time,
            format,
        } => {
            cmd_merge(&sources, into.as_deref(), time, &format, &config.merge)?;
        }
    }

    Ok(())
}

/// Initialize logging based on log level
fn init_logging(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init()
        .ok(); // Ignore error if already initialized
}
