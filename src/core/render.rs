//! Single-message rendering.
//!
//! [`ContentRenderer`] turns a whole report into one message body, without
//! any size limit. Feishu and DingTalk prefer this layout while it fits their
//! budget; see [`MessageComposer`](crate::core::compose::MessageComposer).
//!
//! Layout of a rendered message:
//!
//! ```text
//! header (platform dependent, may be empty)
//! keyword statistics      ┐ swapped when reverse_order is set,
//! section break           │ break only when both are present
//! new items by source     ┘
//! (placeholder when both are empty)
//! section break + failed sources (break omitted after the placeholder)
//! footer
//! ```
//!
//! # Example
//!
//! ```rust
//! use trendpack::clock::FixedClock;
//! use trendpack::config::PushConfig;
//! use trendpack::core::render::ContentRenderer;
//! use trendpack::platform::Platform;
//! use trendpack::report::{ReportData, StatGroup, TitleItem};
//!
//! let renderer = ContentRenderer::new(PushConfig::default())
//!     .with_clock(FixedClock::parse("2025-01-15 09:30:00").unwrap());
//!
//! let report = ReportData::new()
//!     .with_stat(StatGroup::new("AI", vec![TitleItem::new("Model released", "HN")]));
//!
//! let body = renderer.render(&report, Platform::Feishu, None);
//! assert!(body.starts_with("📊 **热点词汇统计**"));
//! assert!(body.ends_with("<font color='grey'>更新时间：2025-01-15 09:30:00</font>"));
//! ```

use std::sync::Arc;

use crate::clock::{Clock, SystemClock};
use crate::config::PushConfig;
use crate::core::formatter::{LocalizedTitleFormatter, TitleFormatter};
use crate::core::preprocess::{Layout, PreparedReport, Preprocessor};
use crate::core::profile::PlatformProfile;
use crate::platform::Platform;
use crate::report::{ReportData, UpdateInfo};

/// Renders a report into one complete message body.
#[derive(Clone)]
pub struct ContentRenderer {
    config: PushConfig,
    formatter: Arc<dyn TitleFormatter>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for ContentRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContentRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl ContentRenderer {
    /// Creates a renderer using the wall clock and the markup formatter.
    pub fn new(config: PushConfig) -> Self {
        let formatter = LocalizedTitleFormatter::new(config.locale.labels());
        Self {
            config,
            formatter: Arc::new(formatter),
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the title formatter.
    #[must_use]
    pub fn with_formatter(self, formatter: impl TitleFormatter + 'static) -> Self {
        self.with_shared_formatter(Arc::new(formatter))
    }

    /// Replaces the title formatter with a shared one.
    #[must_use]
    pub fn with_shared_formatter(mut self, formatter: Arc<dyn TitleFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        self.with_shared_clock(Arc::new(clock))
    }

    /// Replaces the clock with a shared one.
    #[must_use]
    pub fn with_shared_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PushConfig {
        &self.config
    }

    /// Prepares and renders a report.
    pub fn render(&self, report: &ReportData, platform: Platform, update: Option<&UpdateInfo>) -> String {
        let prepared = Preprocessor::from_config(&self.config, Layout::Single).apply(report);
        self.render_prepared(&prepared, platform, update)
    }

    /// Renders an already prepared report.
    pub fn render_prepared(
        &self,
        report: &PreparedReport,
        platform: Platform,
        update: Option<&UpdateInfo>,
    ) -> String {
        let profile = PlatformProfile::for_platform(platform);
        let labels = self.config.locale.labels();
        let now = self.clock.now();
        let section_break = profile.section_break(&self.config.separator);

        let stats = self.stats_section(report, profile);
        let new_items = self.new_items_section(report, profile);
        let (first, second) = if self.config.reverse_order {
            (new_items, stats)
        } else {
            (stats, new_items)
        };

        let mut body = String::new();
        body.push_str(&first);
        if !first.is_empty() && !second.is_empty() {
            body.push_str(&section_break);
        }
        body.push_str(&second);

        let placeholder = body.is_empty();
        if placeholder {
            body = profile.no_matches(labels, self.config.mode);
        }

        if !report.failed_ids.is_empty() {
            if !placeholder {
                body.push_str(&section_break);
            }
            body.push_str(&profile.failed_title(labels));
            for id in &report.failed_ids {
                body.push_str(&profile.failed_line(id));
            }
        }

        let mut message = profile.header(labels, report.total_titles(), now);
        message.push_str(&body);
        message.push_str(&profile.footer(labels, now, update));
        message
    }

    fn stats_section(&self, report: &PreparedReport, profile: &PlatformProfile) -> String {
        if report.stats.is_empty() {
            return String::new();
        }
        let labels = self.config.locale.labels();
        let total = report.stats.len();

        let mut out = profile.stats_title(labels);
        for (i, stat) in report.stats.iter().enumerate() {
            out.push_str(&profile.word_header(labels, &stat.word, stat.count, i + 1, total));
            for (j, item) in stat.titles.iter().enumerate() {
                let line = self.formatter.format_title(profile.platform, item, true);
                out.push_str(&format!("  {}. {}\n", j + 1, line));
                if j + 1 < stat.titles.len() {
                    out.push('\n');
                }
            }
            if i + 1 < total {
                out.push_str(&profile.section_break(&self.config.separator));
            }
        }
        out
    }

    fn new_items_section(&self, report: &PreparedReport, profile: &PlatformProfile) -> String {
        let labels = self.config.locale.labels();
        let mut out = String::new();
        let mut index = 0;

        for group in &report.new_titles {
            let indent = if group.flattened {
                ""
            } else {
                out.push_str(&profile.source_header(labels, &group.source_name, group.titles.len()));
                "  "
            };
            for item in &group.titles {
                index += 1;
                let line = self.formatter.format_title(profile.platform, &item.as_seen(), true);
                out.push_str(&format!("{}{}. {}\n", indent, index, line));
            }
            if !group.flattened {
                out.push('\n');
            }
        }
        out
    }
}
