//! # Trendpack
//!
//! A Rust library for turning a news-trend report into the notification
//! messages sent to chat and push platforms.
//!
//! ## Overview
//!
//! A report holds keyword statistics, newly seen headlines grouped by source,
//! and the sources that failed to fetch. Trendpack renders it in each
//! platform's markup dialect:
//! - **Feishu / Lark** — markdown with `<font>` colouring
//! - **DingTalk** — markdown with a detailed header
//! - **WeWork** and **Bark** — markdown with wide gaps
//! - **Telegram** — HTML
//! - **Slack** — mrkdwn
//! - **ntfy** and a generic markdown fallback
//!
//! Every platform caps the size of one message, so long reports are split
//! into several batches. Each batch repeats the report header and footer,
//! keeps a keyword or source header together with its first headline, and
//! stays under the platform's byte budget whenever a single headline fits.
//!
//! ## Quick Start
//!
//! ```rust
//! use trendpack::prelude::*;
//!
//! let report = ReportData::new()
//!     .with_stat(StatGroup::new("AI", vec![
//!         TitleItem::new("Open model tops leaderboard", "HN")
//!             .with_url("https://example.com/1")
//!             .with_ranks(vec![1, 3]),
//!     ]))
//!     .with_failed_id("zhihu");
//!
//! let composer = MessageComposer::new(PushConfig::default())
//!     .with_clock(FixedClock::parse("2025-01-15 09:30:00").unwrap());
//!
//! for platform in Platform::all() {
//!     let messages = composer.compose(&report, *platform, None);
//!     assert!(!messages.is_empty());
//! }
//! ```
//!
//! ## Loading Reports
//!
//! With the `json` feature (on by default), reports and configuration load
//! from JSON documents:
//!
//! ```rust,no_run
//! use trendpack::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let config = PushConfig::from_json_file("push.json")?;
//!     let report = ReportData::from_json_file("report.json")?;
//!     let messages = MessageComposer::new(config).compose(&report, Platform::Telegram, None);
//!     write_to_format(&messages, "telegram.txt", OutputFormat::Text)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`report`] — Report data model ([`ReportData`], [`report::TitleItem`])
//! - [`platform`] — Destination platforms ([`Platform`])
//! - [`config`] — Push settings and byte budgets ([`PushConfig`])
//! - [`labels`] — Localized fixed strings
//! - [`clock`] — Injectable time source for headers and footers
//! - [`core`] — Rendering and splitting
//!   - [`core::render`] — Single-message rendering
//!   - [`core::splitter`] — Size-limited batch splitting
//!   - [`core::compose`] — [`MessageComposer`], picks one of the two
//! - [`format`] — Text and JSON output of generated batches
//! - [`error`] — Unified error types ([`TrendpackError`], [`Result`])
//! - [`prelude`] — Convenient re-exports

pub mod clock;
pub mod config;
pub mod core;
pub mod error;
pub mod format;
pub mod labels;
pub mod platform;
pub mod report;

#[cfg(feature = "cli")]
pub mod cli;

// Re-export the main types at the crate root for convenience
pub use config::PushConfig;
pub use core::MessageComposer;
pub use error::{Result, TrendpackError};
pub use platform::Platform;
pub use report::ReportData;

/// Convenient re-exports for common usage.
///
/// Import everything you need with a single line:
///
/// ```rust
/// use trendpack::prelude::*;
/// ```
pub mod prelude {
    // Report model
    pub use crate::report::{ReportData, SourceGroup, StatGroup, TitleItem, UpdateInfo};

    // Error types
    pub use crate::error::{Result, TrendpackError};

    // Destinations and settings
    pub use crate::config::{BatchSizes, PushConfig, ReportMode};
    pub use crate::labels::Locale;
    pub use crate::platform::Platform;

    // Time
    pub use crate::clock::{Clock, FixedClock, SystemClock};

    // Generation
    pub use crate::core::{
        BatchSplitter, ContentRenderer, MessageComposer, Strategy, TitleFormatter, check_batch_sizes,
    };

    // Output
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
}
