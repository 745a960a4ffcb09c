//! Report data consumed by the renderer and the batch splitter.
//!
//! A [`ReportData`] is produced once per report cycle by the aggregator and is
//! treated as read-only here. It holds:
//!
//! - **stats**: keyword groups ([`StatGroup`]) with their matched items
//! - **new_titles**: newly seen items grouped by source ([`SourceGroup`])
//! - **failed_ids**: sources that could not be fetched
//! - **total_new_count**: number of new items before any truncation
//!
//! # Example
//!
//! ```
//! use trendpack::report::{ReportData, SourceGroup, StatGroup, TitleItem};
//!
//! let report = ReportData::new()
//!     .with_stat(StatGroup::new("AI", vec![TitleItem::new("Model released", "Hacker News")]))
//!     .with_new_titles(SourceGroup::new("Weibo", vec![TitleItem::new("Heat wave", "Weibo")]))
//!     .with_failed_id("zhihu");
//!
//! assert_eq!(report.stats[0].count, 1);
//! assert!(!report.is_empty());
//! ```

use serde::{Deserialize, Serialize};

/// One news item, as handed to the title formatter.
///
/// `is_new` marks items first seen in this cycle. The new-items section of a
/// message shows items without the badge, so it renders [`TitleItem::as_seen`]
/// copies instead of touching the shared report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TitleItem {
    /// Headline text.
    pub title: String,

    /// Display name of the source the item was fetched from.
    pub source_name: String,

    /// Desktop link.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,

    /// Mobile link, preferred over `url` when present.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub mobile_url: String,

    /// Every rank the item reached during the cycle.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ranks: Vec<u32>,

    /// Ranks numerically at or below this value (the top spots) are highlighted.
    pub rank_threshold: u32,

    /// How many times the item was seen.
    pub count: u32,

    /// Human readable first/last seen range, e.g. `"08:00 ~ 10:30"`.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub time_display: String,

    /// Whether the item first appeared in this cycle.
    pub is_new: bool,
}

impl Default for TitleItem {
    fn default() -> Self {
        Self {
            title: String::new(),
            source_name: String::new(),
            url: String::new(),
            mobile_url: String::new(),
            ranks: Vec::new(),
            rank_threshold: 5,
            count: 1,
            time_display: String::new(),
            is_new: false,
        }
    }
}

impl TitleItem {
    /// Creates an item with a title and a source name.
    ///
    /// ```
    /// use trendpack::report::TitleItem;
    ///
    /// let item = TitleItem::new("Rust 2024 ships", "Hacker News");
    /// assert_eq!(item.count, 1);
    /// assert!(!item.is_new);
    /// ```
    pub fn new(title: impl Into<String>, source_name: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            source_name: source_name.into(),
            ..Self::default()
        }
    }

    /// Sets the desktop link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Sets the mobile link.
    #[must_use]
    pub fn with_mobile_url(mut self, url: impl Into<String>) -> Self {
        self.mobile_url = url.into();
        self
    }

    /// Sets the observed ranks.
    #[must_use]
    pub fn with_ranks(mut self, ranks: impl Into<Vec<u32>>) -> Self {
        self.ranks = ranks.into();
        self
    }

    /// Sets the highlight threshold for ranks.
    #[must_use]
    pub fn with_rank_threshold(mut self, threshold: u32) -> Self {
        self.rank_threshold = threshold;
        self
    }

    /// Sets how many times the item was seen.
    #[must_use]
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Sets the time range display.
    #[must_use]
    pub fn with_time_display(mut self, display: impl Into<String>) -> Self {
        self.time_display = display.into();
        self
    }

    /// Marks the item as new in this cycle.
    #[must_use]
    pub fn with_new(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    /// Returns the link to render, preferring the mobile one.
    pub fn link(&self) -> Option<&str> {
        [self.mobile_url.as_str(), self.url.as_str()]
            .into_iter()
            .find(|url| !url.is_empty())
    }

    /// Returns a copy with the new-badge cleared.
    pub fn as_seen(&self) -> Self {
        Self {
            is_new: false,
            ..self.clone()
        }
    }
}

/// Items matched by one keyword group.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StatGroup {
    /// The keyword (or keyword group label).
    pub word: String,

    /// Number of matched items. Equals `titles.len()` as produced by the
    /// aggregator; truncation rewrites it to the kept length.
    pub count: usize,

    /// Matched items in rank order.
    pub titles: Vec<TitleItem>,
}

impl StatGroup {
    /// Creates a group whose `count` matches its titles.
    pub fn new(word: impl Into<String>, titles: Vec<TitleItem>) -> Self {
        Self {
            word: word.into(),
            count: titles.len(),
            titles,
        }
    }

    /// Returns `true` if the group has no items.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// New items from one source.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceGroup {
    /// Display name of the source.
    pub source_name: String,

    /// New items in display order.
    pub titles: Vec<TitleItem>,

    /// Set on the synthetic group that holds flattened statistics. Such a
    /// group is rendered without a source header.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub flattened: bool,
}

impl SourceGroup {
    /// Creates a group for a real source.
    pub fn new(source_name: impl Into<String>, titles: Vec<TitleItem>) -> Self {
        Self {
            source_name: source_name.into(),
            titles,
            flattened: false,
        }
    }

    /// Creates the synthetic group that replaces hidden statistics.
    pub fn flattened(label: impl Into<String>, titles: Vec<TitleItem>) -> Self {
        Self {
            source_name: label.into(),
            titles,
            flattened: true,
        }
    }

    /// Returns `true` if the group has no items.
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Version upgrade notice appended to the message footer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    /// Latest published version.
    pub remote_version: String,

    /// Version currently running.
    pub current_version: String,
}

impl UpdateInfo {
    /// Creates an update notice.
    pub fn new(remote_version: impl Into<String>, current_version: impl Into<String>) -> Self {
        Self {
            remote_version: remote_version.into(),
            current_version: current_version.into(),
        }
    }
}

/// Aggregated report for one cycle.
///
/// Every field defaults to empty, so `{}` is a valid (empty) report document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportData {
    /// Keyword statistics in display order.
    pub stats: Vec<StatGroup>,

    /// New items grouped by source.
    pub new_titles: Vec<SourceGroup>,

    /// Sources that failed to fetch.
    pub failed_ids: Vec<String>,

    /// Number of new items before truncation.
    pub total_new_count: usize,
}

impl ReportData {
    /// Creates an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a statistics group.
    #[must_use]
    pub fn with_stat(mut self, group: StatGroup) -> Self {
        self.stats.push(group);
        self
    }

    /// Appends a new-items group and adds its items to `total_new_count`.
    #[must_use]
    pub fn with_new_titles(mut self, group: SourceGroup) -> Self {
        self.total_new_count += group.titles.len();
        self.new_titles.push(group);
        self
    }

    /// Appends a failed source id.
    #[must_use]
    pub fn with_failed_id(mut self, id: impl Into<String>) -> Self {
        self.failed_ids.push(id.into());
        self
    }

    /// Overrides the total number of new items.
    #[must_use]
    pub fn with_total_new_count(mut self, total: usize) -> Self {
        self.total_new_count = total;
        self
    }

    /// Returns `true` if there is nothing to report at all.
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty() && self.new_titles.is_empty() && self.failed_ids.is_empty()
    }

    /// Total number of items across statistics and new-items groups.
    pub fn item_count(&self) -> usize {
        self.stats.iter().map(|s| s.titles.len()).sum::<usize>()
            + self.new_titles.iter().map(|s| s.titles.len()).sum::<usize>()
    }

    /// Decodes a report from a JSON document.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        serde_json::from_str(json).map_err(|e| crate::TrendpackError::report_json(e, None))
    }

    /// Reads and decodes a report from a JSON file.
    #[cfg(feature = "json")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| crate::TrendpackError::report_json(e, Some(path.to_path_buf())))
    }
}
