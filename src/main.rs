//! Ripple-Core command-line entry point
//!
//! Runs the configured analyzer and pipeline over a saved HTML page, the
//! same way a dispatcher would run them over a freshly downloaded one.

use anyhow::Context;
use clap::Parser;
use ripple_core::config::{build_analyzer, build_pipeline_with_sink, load_config_with_hash};
use ripple_core::output::{open_page, process_page};
use ripple_core::pipeline::ItemSink;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Ripple-Core: analyze a saved page and push its items through the pipeline
#[derive(Parser, Debug)]
#[command(name = "ripple")]
#[command(version)]
#[command(about = "Runs crawl processing stages over a saved page", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Path to the saved HTML page
    #[arg(value_name = "PAGE")]
    page: PathBuf,

    /// URL the page was fetched from
    #[arg(long)]
    url: String,

    /// Crawl depth of the page
    #[arg(long, default_value_t = 0)]
    depth: u32,

    /// Print stage summaries after processing
    #[arg(long)]
    summary: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    // Build stages
    let analyzer = build_analyzer(&config)?;
    let sink = ItemSink::new();
    let pipeline = build_pipeline_with_sink(&config, &sink)?;

    // Process the page
    let response = open_page(&cli.page, &cli.url, cli.depth)
        .with_context(|| format!("failed to open {}", cli.page.display()))?;
    let mut report = process_page(&analyzer, &pipeline, &sink, response);
    if cli.summary {
        report = report.with_summaries(&analyzer, &pipeline);
    }

    println!("{}", report.to_json_pretty()?);
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so the JSON report on stdout stays parseable.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("ripple_core=info,warn"),
            1 => EnvFilter::new("ripple_core=debug,info"),
            2 => EnvFilter::new("ripple_core=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
