//! Truncation and flattening applied before rendering or splitting.
//!
//! Both output paths see the report through [`PreparedReport`]. The steps:
//!
//! 1. When statistics are hidden, their items may be moved into one
//!    synthetic group placed before the new-items groups ("flattening").
//! 2. With a positive item cap, groups are walked in order (statistics
//!    first, then new items) and each keeps only the prefix that still fits
//!    under the cap. Once the cap is reached, later groups are dropped.
//! 3. Groups without items are dropped.
//!
//! The two output paths disagree on step 1 when there is no cap: the single
//! message layout flattens hidden statistics, the batched layout simply
//! drops them. [`Layout`] selects which behavior applies.
//!
//! # Example
//!
//! ```rust
//! use trendpack::core::preprocess::{Layout, preprocess};
//! use trendpack::report::{ReportData, StatGroup, TitleItem};
//!
//! let report = ReportData::new()
//!     .with_stat(StatGroup::new("AI", vec![TitleItem::new("a", "s"); 3]))
//!     .with_stat(StatGroup::new("Chips", vec![TitleItem::new("b", "s"); 3]));
//!
//! let prepared = preprocess(&report, true, 2, Layout::Batched);
//! assert_eq!(prepared.stats.len(), 1);
//! assert_eq!(prepared.stats[0].count, 2);
//! ```

use crate::config::PushConfig;
use crate::labels::Labels;
use crate::report::{ReportData, SourceGroup, StatGroup, TitleItem};

/// Which output path the report is prepared for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One complete message; hidden statistics are always flattened.
    Single,
    /// Size-limited batches; hidden statistics are flattened only when an
    /// item cap is set, otherwise they are dropped.
    Batched,
}

/// A report after truncation and flattening.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreparedReport {
    /// Keyword groups to show (empty when statistics are hidden).
    pub stats: Vec<StatGroup>,
    /// New-items groups, led by the flattened group if any.
    pub new_titles: Vec<SourceGroup>,
    /// Failed source ids, untouched.
    pub failed_ids: Vec<String>,
    /// New item count before truncation, as reported by the aggregator.
    pub total_new_count: usize,
    /// Total shown in the new-items title: flattened items plus
    /// `total_new_count`.
    pub display_total: usize,
    /// Whether an item cap was applied.
    pub truncated: bool,
}

impl PreparedReport {
    /// Items listed in keyword groups whose count is positive.
    pub fn total_titles(&self) -> usize {
        self.stats
            .iter()
            .filter(|stat| stat.count > 0)
            .map(|stat| stat.titles.len())
            .sum()
    }

    /// Items listed in the new-items section.
    pub fn shown_new_count(&self) -> usize {
        self.new_titles.iter().map(|group| group.titles.len()).sum()
    }

    /// Items listed across both sections.
    pub fn shown_count(&self) -> usize {
        self.stats.iter().map(|stat| stat.titles.len()).sum::<usize>() + self.shown_new_count()
    }

    /// `" (已截取前 N 条)"` when a cap hid some new items, empty otherwise.
    pub fn truncation_hint(&self, labels: &Labels) -> String {
        let shown = self.shown_new_count();
        if self.truncated && shown < self.display_total {
            labels.truncation_hint(shown)
        } else {
            String::new()
        }
    }

    /// Returns `true` if there is nothing to list and no failed source.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.new_titles.is_empty() && self.failed_ids.is_empty()
    }

    /// Returns `true` if both item sections are empty.
    pub fn has_no_items(&self) -> bool {
        self.stats.is_empty() && self.new_titles.is_empty()
    }
}

/// Builder for the preparation step.
///
/// ```rust
/// use trendpack::core::preprocess::{Layout, Preprocessor};
/// use trendpack::report::ReportData;
///
/// let prepared = Preprocessor::new(Layout::Single)
///     .with_show_stats(false)
///     .with_max_total(10)
///     .apply(&ReportData::new());
/// assert!(prepared.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Preprocessor<'a> {
    /// Show statistics grouped by keyword.
    pub show_stats: bool,
    /// Item cap across all groups, 0 for none.
    pub max_total: usize,
    /// Output path being prepared for.
    pub layout: Layout,
    /// Name given to the flattened group.
    pub flattened_label: &'a str,
}

impl<'a> Preprocessor<'a> {
    /// Creates a preprocessor that shows statistics and applies no cap.
    pub fn new(layout: Layout) -> Self {
        Self {
            show_stats: true,
            max_total: 0,
            layout,
            flattened_label: crate::labels::Locale::default().labels().matched_items,
        }
    }

    /// Creates a preprocessor from a push configuration.
    pub fn from_config(config: &PushConfig, layout: Layout) -> Self {
        Self {
            show_stats: config.show_stats,
            max_total: config.max_total_items,
            layout,
            flattened_label: config.locale.labels().matched_items,
        }
    }

    /// Sets whether statistics are shown grouped.
    #[must_use]
    pub fn with_show_stats(mut self, show: bool) -> Self {
        self.show_stats = show;
        self
    }

    /// Sets the item cap.
    #[must_use]
    pub fn with_max_total(mut self, max: usize) -> Self {
        self.max_total = max;
        self
    }

    /// Sets the flattened group name.
    #[must_use]
    pub fn with_flattened_label(mut self, label: &'a str) -> Self {
        self.flattened_label = label;
        self
    }

    /// Prepares a report. The input is never modified.
    pub fn apply(&self, report: &ReportData) -> PreparedReport {
        let flatten = !self.show_stats
            && !report.stats.is_empty()
            && (self.layout == Layout::Single || self.max_total > 0);

        let mut display_total = report.total_new_count;
        let mut new_titles = Vec::with_capacity(report.new_titles.len() + 1);
        if flatten {
            let titles: Vec<TitleItem> = report
                .stats
                .iter()
                .flat_map(|stat| stat.titles.iter().cloned())
                .collect();
            display_total += titles.len();
            new_titles.push(SourceGroup::flattened(self.flattened_label, titles));
        }
        new_titles.extend(report.new_titles.iter().cloned());

        let stats: &[StatGroup] = if self.show_stats { &report.stats } else { &[] };

        let (stats, new_titles) = if self.max_total > 0 {
            let mut remaining = self.max_total;
            let stats = truncate_groups(stats, &mut remaining, |stat, titles| StatGroup {
                word: stat.word.clone(),
                count: titles.len(),
                titles,
            });
            let new_titles = truncate_groups(&new_titles, &mut remaining, |group, titles| {
                SourceGroup {
                    source_name: group.source_name.clone(),
                    titles,
                    flattened: group.flattened,
                }
            });
            (stats, new_titles)
        } else {
            (
                stats.iter().filter(|s| !s.is_empty()).cloned().collect(),
                new_titles.into_iter().filter(|g| !g.is_empty()).collect(),
            )
        };

        PreparedReport {
            stats,
            new_titles,
            failed_ids: report.failed_ids.clone(),
            total_new_count: report.total_new_count,
            display_total,
            truncated: self.max_total > 0,
        }
    }
}

/// Keeps the prefix of each group that fits in `remaining`, in order.
fn truncate_groups<G: HasTitles>(
    groups: &[G],
    remaining: &mut usize,
    rebuild: impl Fn(&G, Vec<TitleItem>) -> G,
) -> Vec<G> {
    let mut kept = Vec::new();
    for group in groups {
        if *remaining == 0 {
            break;
        }
        let titles: Vec<TitleItem> = group.titles().iter().take(*remaining).cloned().collect();
        if titles.is_empty() {
            continue;
        }
        *remaining -= titles.len();
        kept.push(rebuild(group, titles));
    }
    kept
}

trait HasTitles {
    fn titles(&self) -> &[TitleItem];
}

impl HasTitles for StatGroup {
    fn titles(&self) -> &[TitleItem] {
        &self.titles
    }
}

impl HasTitles for SourceGroup {
    fn titles(&self) -> &[TitleItem] {
        &self.titles
    }
}

/// Prepares a report with the default flattened group name.
pub fn preprocess(
    report: &ReportData,
    show_stats: bool,
    max_total: usize,
    layout: Layout,
) -> PreparedReport {
    Preprocessor::new(layout)
        .with_show_stats(show_stats)
        .with_max_total(max_total)
        .apply(report)
}
