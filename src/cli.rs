//! Command-line interface definition using clap.
//!
//! This module defines:
//! - [`Args`] - CLI argument structure (for use with clap)
//! - [`OutputFormat`] - Output format options
//! - [`StrategyArg`] - How messages are produced
//!
//! Platform, report mode and locale arguments parse through the library
//! types' own `FromStr` implementations, so the CLI accepts the same names
//! and aliases as configuration files.

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ReportMode;
use crate::core::Strategy;
use crate::labels::Locale;
use crate::platform::Platform;

/// Render a trend report into notification messages that fit each
/// platform's size limit.
#[derive(Parser, Debug, Clone)]
#[command(name = "trendpack")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    trendpack report.json --platform telegram
    trendpack report.json -p feishu --max-bytes 8000 -o feishu.txt
    trendpack report.json -p dd --format json --strategy split
    cat report.json | trendpack - -p ntfy --locale en")]
pub struct Args {
    /// Path to the report JSON file ("-" reads stdin)
    pub report: String,

    /// Destination platform
    #[arg(short, long, default_value = "generic")]
    pub platform: Platform,

    /// Path to output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Push configuration JSON file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Report mode (daily, incremental, current)
    #[arg(short, long)]
    pub mode: Option<ReportMode>,

    /// Byte budget per message, overriding the configured one
    #[arg(long, value_name = "BYTES")]
    pub max_bytes: Option<usize>,

    /// Cap on the number of headlines shown (0 = unlimited)
    #[arg(long, value_name = "N")]
    pub max_total: Option<usize>,

    /// Hide keyword statistics and list their headlines flat
    #[arg(long)]
    pub hide_stats: bool,

    /// Put new items before keyword statistics
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Separator placed between sections on platforms that use one
    #[arg(long, value_name = "TEXT")]
    pub separator: Option<String>,

    /// Message language (zh, en)
    #[arg(short, long)]
    pub locale: Option<Locale>,

    /// Timestamp printed in headers and footers (YYYY-MM-DD HH:MM:SS)
    #[arg(long, value_name = "TIME")]
    pub at: Option<String>,

    /// Newer version available upstream, shown in the footer
    #[arg(long, value_name = "VERSION", requires = "current_version")]
    pub remote_version: Option<String>,

    /// Version currently running
    #[arg(long, value_name = "VERSION", requires = "remote_version")]
    pub current_version: Option<String>,

    /// How messages are produced
    #[arg(short, long, value_enum, default_value = "auto")]
    pub strategy: StrategyArg,
}

/// Output format options.
///
/// - [`Text`](OutputFormat::Text) - Message bodies separated by divider lines
/// - [`Json`](OutputFormat::Json) - Array of batches with their sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Plain text (default)
    #[default]
    #[value(alias = "txt")]
    Text,

    /// JSON array of batches
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        crate::format::OutputFormat::from(*self).fmt(f)
    }
}

// Conversion to library format type
impl From<OutputFormat> for crate::format::OutputFormat {
    fn from(format: OutputFormat) -> crate::format::OutputFormat {
        match format {
            OutputFormat::Text => crate::format::OutputFormat::Text,
            OutputFormat::Json => crate::format::OutputFormat::Json,
        }
    }
}

/// Message production strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Default)]
pub enum StrategyArg {
    /// Single message on Feishu and DingTalk while it fits, split elsewhere
    #[default]
    Auto,
    /// Always split into size-limited batches
    Split,
    /// Always render one message
    Single,
}

impl From<StrategyArg> for Strategy {
    fn from(strategy: StrategyArg) -> Strategy {
        match strategy {
            StrategyArg::Auto => Strategy::Auto,
            StrategyArg::Split => Strategy::Split,
            StrategyArg::Single => Strategy::Single,
        }
    }
}
