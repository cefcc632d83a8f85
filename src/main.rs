use anyhow::{Context, Result};
use clap::Parser;
use fastseek_bench_report::metrics::print_summary;
use fastseek_bench_report::{generate_report, ReportConfig, ReportError};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "fastseek-bench-report")]
#[command(about = "Render a FastSeek vs Samtools benchmark comparison chart")]
struct Cli {
    /// FastSeek index-time record, FastSeek search-time record, Samtools
    /// index-time record, Samtools search-time record, FastSeek index file,
    /// Samtools index file, then the output SVG path
    #[arg(value_name = "PATH", required_unless_present = "config")]
    paths: Vec<PathBuf>,

    /// Read inputs and output from a JSON config file instead
    #[arg(short, long, conflicts_with = "paths")]
    config: Option<PathBuf>,

    /// Do not print the summary table
    #[arg(short, long, default_value = "false")]
    quiet: bool,
}

fn main() {
    let report_log = std::env::var("FASTSEEK_REPORT_LOG").ok();
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = log_directive(report_log.as_deref(), rust_log.as_deref());

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);

        let exit_code = match e.downcast_ref::<ReportError>() {
            Some(ReportError::Config(_)) => 2,
            Some(ReportError::InputMissing { .. }) => 3,
            Some(ReportError::FormatViolation { .. }) | Some(ReportError::InvalidMetric { .. }) => 4,
            Some(ReportError::OutputWrite { .. }) => 5,
            _ => 1,
        };
        process::exit(exit_code);
    }
}

/// FASTSEEK_REPORT_LOG wins over RUST_LOG; unset or empty falls through to `info`.
fn log_directive<'a>(report_log: Option<&'a str>, rust_log: Option<&'a str>) -> &'a str {
    report_log
        .filter(|v| !v.trim().is_empty())
        .or(rust_log.filter(|v| !v.trim().is_empty()))
        .unwrap_or("info")
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ReportConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ReportConfig::from_paths(&cli.paths)?,
    };

    let report = generate_report(&config).context("Failed to generate comparison chart")?;

    if !cli.quiet {
        print_summary(&report.metrics);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_directive_precedence() {
        assert_eq!(log_directive(Some("debug"), Some("warn")), "debug");
        assert_eq!(log_directive(None, Some("warn")), "warn");
        assert_eq!(log_directive(Some(""), Some("warn")), "warn");
        assert_eq!(log_directive(None, None), "info");
    }
}
