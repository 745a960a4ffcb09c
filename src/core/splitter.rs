//! Splitting a report into size-limited messages.
//!
//! [`BatchSplitter`] produces an ordered list of message bodies. Every body
//! carries the platform header and footer, and none exceeds the byte budget
//! unless a single unit of content is larger than the budget by itself.
//!
//! # Algorithm
//!
//! Content is appended chunk by chunk to a [`BatchAccumulator`]. Before each
//! append the accumulator checks whether
//! `current + chunk + footer` stays strictly below the budget:
//!
//! - if it does, the chunk is appended;
//! - if not, the current batch is closed with the footer (only when it holds
//!   real content) and a new batch is started from the header, the re-headers
//!   that give the chunk its context (section title, group header), and the
//!   chunk itself.
//!
//! A group header always travels with its first item, and a section title
//! with its first group, so no batch ends on a dangling header. Separators
//! are only kept when they fit; they never open a batch of their own.
//!
//! A unit too large for an empty batch is still placed, so no content is ever
//! dropped. [`check_batch_sizes`] reports such batches afterwards.
//!
//! # Example
//!
//! ```rust
//! use trendpack::clock::FixedClock;
//! use trendpack::config::PushConfig;
//! use trendpack::core::splitter::BatchSplitter;
//! use trendpack::platform::Platform;
//! use trendpack::report::{ReportData, StatGroup, TitleItem};
//!
//! let titles = (1..=40)
//!     .map(|i| TitleItem::new(format!("Headline number {i}"), "Weibo"))
//!     .collect();
//! let report = ReportData::new().with_stat(StatGroup::new("AI", titles));
//!
//! let splitter = BatchSplitter::new(PushConfig::default())
//!     .with_clock(FixedClock::parse("2025-01-15 09:30:00").unwrap());
//! let batches = splitter.split_with_budget(&report, Platform::Telegram, 600, None);
//!
//! assert!(batches.len() > 1);
//! assert!(batches.iter().all(|b| b.len() <= 600));
//! assert!(batches.iter().all(|b| b.starts_with("总新闻数： 40")));
//! ```

use std::sync::Arc;

use tracing::{debug, warn};

use crate::clock::{Clock, SystemClock};
use crate::config::PushConfig;
use crate::core::formatter::{LocalizedTitleFormatter, TitleFormatter};
use crate::core::preprocess::{Layout, PreparedReport, Preprocessor};
use crate::core::profile::PlatformProfile;
use crate::platform::Platform;
use crate::report::{ReportData, UpdateInfo};

// ============================================================================
// BatchAccumulator
// ============================================================================

/// Batch buffer threaded through the splitting steps.
///
/// ```rust
/// use trendpack::core::splitter::BatchAccumulator;
///
/// let mut acc = BatchAccumulator::new("H\n", "\nF", 12);
/// acc.push_unit("one\n", "");
/// acc.push_unit("two\n", "");
/// assert_eq!(acc.finish(), vec!["H\none\n\nF", "H\ntwo\n\nF"]);
/// ```
#[derive(Debug, Clone)]
pub struct BatchAccumulator {
    header: String,
    footer: String,
    budget: usize,
    current: String,
    has_content: bool,
    batches: Vec<String>,
}

impl BatchAccumulator {
    /// Starts an accumulator whose first batch holds only `header`.
    pub fn new(header: impl Into<String>, footer: impl Into<String>, budget: usize) -> Self {
        let header = header.into();
        Self {
            current: header.clone(),
            header,
            footer: footer.into(),
            budget,
            has_content: false,
            batches: Vec::new(),
        }
    }

    /// Whether `chunk` can be appended and still leave room for the footer.
    pub fn fits(&self, chunk: &str) -> bool {
        self.current.len() + chunk.len() + self.footer.len() < self.budget
    }

    /// Appends a unit of content.
    ///
    /// When the unit does not fit, the current batch is closed and a new one
    /// is started as `header + context + chunk`, even if that alone exceeds
    /// the budget.
    pub fn push_unit(&mut self, chunk: &str, context: &str) {
        if self.fits(chunk) {
            self.current.push_str(chunk);
        } else {
            self.flush();
            self.current.push_str(context);
            self.current.push_str(chunk);
            if self.current.len() + self.footer.len() > self.budget {
                debug!(
                    bytes = self.current.len() + self.footer.len(),
                    budget = self.budget,
                    "unit does not fit an empty batch, placing it anyway"
                );
            }
        }
        self.has_content = true;
    }

    /// Appends `chunk` only if it fits. Returns whether it was kept.
    pub fn push_optional(&mut self, chunk: &str) -> bool {
        if self.fits(chunk) {
            self.current.push_str(chunk);
            true
        } else {
            false
        }
    }

    /// Whether the current batch holds anything besides the header.
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// Number of batches closed so far.
    pub fn closed_batches(&self) -> usize {
        self.batches.len()
    }

    fn flush(&mut self) {
        if self.has_content {
            let mut batch = std::mem::replace(&mut self.current, self.header.clone());
            batch.push_str(&self.footer);
            self.batches.push(batch);
        } else {
            self.current.clone_from(&self.header);
        }
        self.has_content = false;
    }

    /// Closes the last batch (if it has content) and returns all batches.
    pub fn finish(mut self) -> Vec<String> {
        if self.has_content {
            self.current.push_str(&self.footer);
            self.batches.push(self.current);
        }
        self.batches
    }
}

// ============================================================================
// Size check
// ============================================================================

/// A generated batch larger than its budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OversizedBatch {
    /// Position in the batch list.
    pub index: usize,
    /// Encoded size in bytes.
    pub bytes: usize,
    /// Budget the batch was generated for.
    pub budget: usize,
}

impl OversizedBatch {
    /// Bytes over the budget.
    pub fn excess(&self) -> usize {
        self.bytes.saturating_sub(self.budget)
    }
}

/// Finds batches larger than `budget` and logs a warning for each.
pub fn check_batch_sizes(batches: &[String], budget: usize) -> Vec<OversizedBatch> {
    batches
        .iter()
        .enumerate()
        .filter(|(_, batch)| batch.len() > budget)
        .map(|(index, batch)| {
            let oversized = OversizedBatch {
                index,
                bytes: batch.len(),
                budget,
            };
            warn!(
                index,
                bytes = oversized.bytes,
                budget,
                "Batch exceeds platform size limit"
            );
            oversized
        })
        .collect()
}

// ============================================================================
// BatchSplitter
// ============================================================================

/// Splits a report into messages that fit a platform's byte budget.
#[derive(Clone)]
pub struct BatchSplitter {
    config: PushConfig,
    formatter: Arc<dyn TitleFormatter>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for BatchSplitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BatchSplitter")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Per-call state shared by the section steps.
struct SplitContext<'a> {
    profile: &'static PlatformProfile,
    labels: &'static crate::labels::Labels,
    formatter: &'a dyn TitleFormatter,
    section_break: String,
}

impl BatchSplitter {
    /// Creates a splitter using the wall clock and the markup formatter.
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

    /// Splits a report using the configured budget of `platform`.
    pub fn split(&self, report: &ReportData, platform: Platform, update: Option<&UpdateInfo>) -> Vec<String> {
        let budget = self.config.batch_sizes.budget_for(platform);
        self.split_with_budget(report, platform, budget, update)
    }

    /// Splits a report using an explicit budget.
    pub fn split_with_budget(
        &self,
        report: &ReportData,
        platform: Platform,
        budget: usize,
        update: Option<&UpdateInfo>,
    ) -> Vec<String> {
        let prepared = Preprocessor::from_config(&self.config, Layout::Batched).apply(report);
        self.split_prepared(&prepared, platform, budget, update)
    }

    /// Splits an already prepared report.
    pub fn split_prepared(
        &self,
        report: &PreparedReport,
        platform: Platform,
        budget: usize,
        update: Option<&UpdateInfo>,
    ) -> Vec<String> {
        let profile = PlatformProfile::for_platform(platform);
        let labels = self.config.locale.labels();
        let now = self.clock.now();

        let header = profile.header(labels, report.total_titles(), now);
        let footer = profile.footer(labels, now, update);

        if report.is_empty() {
            let placeholder = profile.no_matches(labels, self.config.mode);
            return vec![format!("{}{}{}", header, placeholder, footer)];
        }

        let ctx = SplitContext {
            profile,
            labels,
            formatter: self.formatter.as_ref(),
            section_break: profile.section_break(&self.config.separator),
        };
        let mut acc = BatchAccumulator::new(header, footer, budget);

        if self.config.reverse_order {
            push_new_items(&mut acc, &ctx, report);
            push_stats(&mut acc, &ctx, report);
        } else {
            push_stats(&mut acc, &ctx, report);
            push_new_items(&mut acc, &ctx, report);
        }
        push_failed(&mut acc, &ctx, report);

        let batches = acc.finish();
        debug!(
            platform = %platform,
            budget,
            batches = batches.len(),
            "split report into batches"
        );
        batches
    }
}

/// Separator between two sections, kept only if it fits.
fn push_section_break(acc: &mut BatchAccumulator, ctx: &SplitContext<'_>) {
    if acc.has_content() {
        acc.push_optional(&ctx.section_break);
    }
}

fn push_stats(acc: &mut BatchAccumulator, ctx: &SplitContext<'_>, report: &PreparedReport) {
    if report.stats.is_empty() {
        return;
    }
    push_section_break(acc, ctx);

    let title = ctx.profile.stats_title(ctx.labels);
    let total = report.stats.len();

    for (i, stat) in report.stats.iter().enumerate() {
        let word_header = ctx
            .profile
            .word_header(ctx.labels, &stat.word, stat.count, i + 1, total);

        for (j, item) in stat.titles.iter().enumerate() {
            let mut line = format!(
                "  {}. {}\n",
                j + 1,
                ctx.formatter.format_title(ctx.profile.platform, item, true)
            );
            if j + 1 < stat.titles.len() {
                line.push('\n');
            }

            match (i, j) {
                (0, 0) => acc.push_unit(&format!("{}{}{}", title, word_header, line), ""),
                (_, 0) => acc.push_unit(&format!("{}{}", word_header, line), &title),
                _ => acc.push_unit(&line, &format!("{}{}", title, word_header)),
            }
        }

        if i + 1 < total {
            acc.push_optional(&ctx.section_break);
        }
    }
}

fn push_new_items(acc: &mut BatchAccumulator, ctx: &SplitContext<'_>, report: &PreparedReport) {
    if report.new_titles.is_empty() {
        return;
    }
    push_section_break(acc, ctx);

    let hint = report.truncation_hint(ctx.labels);
    let title = ctx
        .profile
        .new_items_title(ctx.labels, report.display_total, &hint);

    for (g, group) in report.new_titles.iter().enumerate() {
        let (source_header, indent) = if group.flattened {
            (String::new(), "")
        } else {
            (
                ctx.profile
                    .source_header(ctx.labels, &group.source_name, group.titles.len()),
                "  ",
            )
        };

        for (j, item) in group.titles.iter().enumerate() {
            let formatted =
                ctx.formatter
                    .format_title(ctx.profile.platform, &item.as_seen(), group.flattened);
            let line = format!("{}{}. {}\n", indent, j + 1, formatted);

            match (g, j) {
                (0, 0) => acc.push_unit(&format!("{}{}{}", title, source_header, line), ""),
                (_, 0) => acc.push_unit(&format!("{}{}", source_header, line), &title),
                _ => acc.push_unit(&line, &format!("{}{}", title, source_header)),
            }
        }

        // blank line closing the group; dropped only at the end of a full batch
        acc.push_optional("\n");
    }
}

fn push_failed(acc: &mut BatchAccumulator, ctx: &SplitContext<'_>, report: &PreparedReport) {
    if report.failed_ids.is_empty() {
        return;
    }
    push_section_break(acc, ctx);

    let title = ctx.profile.failed_title(ctx.labels);
    for (k, id) in report.failed_ids.iter().enumerate() {
        let line = ctx.profile.failed_line(id);
        if k == 0 {
            acc.push_unit(&format!("{}{}", title, line), "");
        } else {
            acc.push_unit(&line, &title);
        }
    }
}
