//! # trendpack CLI
//!
//! Command-line interface for the trendpack library.

use std::io::{Read, Write};
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use trendpack::cli::Args;
use trendpack::clock::{FixedClock, SystemClock};
use trendpack::format::{OutputFormat, to_format_string, write_to_format};
use trendpack::report::UpdateInfo;
use trendpack::{MessageComposer, PushConfig, ReportData, TrendpackError};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), TrendpackError> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    eprintln!("📦 trendpack v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    eprintln!("📂 Report:   {}", args.report);
    eprintln!("📡 Platform: {}", args.platform);
    eprintln!("📄 Format:   {}", args.format);

    let config = build_config(&args)?;
    let report = load_report(&args.report)?;
    eprintln!(
        "   {} keyword groups, {} new-item groups, {} failed sources",
        report.stats.len(),
        report.new_titles.len(),
        report.failed_ids.len()
    );

    let mut composer = MessageComposer::new(config).with_strategy(args.strategy.into());
    if let Some(at) = args.at.as_deref() {
        composer = composer.with_clock(FixedClock::parse(at)?);
        eprintln!("🕒 Time:     {}", at.trim());
    } else {
        composer = composer.with_clock(SystemClock);
    }
    if let Some(bytes) = args.max_bytes {
        if bytes == 0 {
            return Err(TrendpackError::invalid_config("--max-bytes must be greater than 0"));
        }
        composer = composer.with_budget(bytes);
    }

    let update = match (&args.remote_version, &args.current_version) {
        (Some(remote), Some(current)) => Some(UpdateInfo::new(remote.as_str(), current.as_str())),
        _ => None,
    };

    let budget = composer.budget_for(args.platform);
    let (messages, oversized) = composer.compose_checked(&report, args.platform, update.as_ref());

    let format: OutputFormat = args.format.into();
    match args.output.as_deref() {
        Some(path) => {
            write_to_format(&messages, path, format)?;
            eprintln!("💾 Output:   {}", path);
        }
        None => {
            let content = to_format_string(&messages, format)?;
            std::io::stdout().write_all(content.as_bytes())?;
        }
    }

    eprintln!();
    eprintln!("📊 Summary:");
    eprintln!("   Items:     {}", report.item_count());
    eprintln!("   Budget:    {} bytes", budget);
    eprintln!("   Messages:  {}", messages.len());
    if let Some(largest) = messages.iter().map(String::len).max() {
        eprintln!("   Largest:   {} bytes", largest);
    }
    if !oversized.is_empty() {
        eprintln!("⚠️  {} message(s) over budget", oversized.len());
    }
    eprintln!(
        "✅ Done in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );

    Ok(())
}

/// Loads the push configuration and applies command-line overrides.
fn build_config(args: &Args) -> Result<PushConfig, TrendpackError> {
    let mut config = match args.config.as_deref() {
        Some(path) => {
            eprintln!("⚙️  Config:   {}", path);
            PushConfig::from_json_file(path)?
        }
        None => PushConfig::default(),
    };

    if let Some(mode) = args.mode {
        config = config.with_mode(mode);
    }
    if let Some(max) = args.max_total {
        config = config.with_max_total_items(max);
    }
    if args.hide_stats {
        config = config.with_show_stats(false);
    }
    if args.reverse {
        config = config.with_reverse_order(true);
    }
    if let Some(separator) = args.separator.as_deref() {
        config = config.with_separator(separator);
    }
    if let Some(locale) = args.locale {
        config = config.with_locale(locale);
    }

    Ok(config)
}

/// Reads a report from a file, or from stdin when `path` is `-`.
fn load_report(path: &str) -> Result<ReportData, TrendpackError> {
    if path == "-" {
        let mut content = String::new();
        std::io::stdin().read_to_string(&mut content)?;
        ReportData::from_json_str(&content)
    } else {
        ReportData::from_json_file(path)
    }
}
