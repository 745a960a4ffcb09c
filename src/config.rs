//! Configuration types for rendering and splitting.
//!
//! This module provides plain configuration structs for library usage,
//! without any CLI framework dependencies.
//!
//! - [`ReportMode`] - which report cycle produced the data
//! - [`BatchSizes`] - per-platform byte budgets
//! - [`PushConfig`] - everything the renderer and splitter need besides the report
//!
//! # Example
//!
//! ```rust
//! use trendpack::config::{PushConfig, ReportMode};
//! use trendpack::platform::Platform;
//!
//! let config = PushConfig::new()
//!     .with_mode(ReportMode::Incremental)
//!     .with_max_total_items(20)
//!     .with_budget("telegram", 3000);
//!
//! assert_eq!(config.batch_sizes.budget_for(Platform::Telegram), 3000);
//! assert_eq!(config.batch_sizes.budget_for(Platform::Feishu), 29000);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::TrendpackError;
use crate::labels::Locale;
use crate::platform::Platform;

// ============================================================================
// ReportMode
// ============================================================================

/// The report cycle a message belongs to.
///
/// Only the wording of the "no matches" placeholder depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportMode {
    /// Daily summary of everything seen so far
    #[default]
    Daily,
    /// Only items that appeared since the last push
    Incremental,
    /// Snapshot of the current ranking boards
    Current,
}

impl ReportMode {
    /// Returns the lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            ReportMode::Daily => "daily",
            ReportMode::Incremental => "incremental",
            ReportMode::Current => "current",
        }
    }
}

impl std::fmt::Display for ReportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ReportMode {
    type Err = TrendpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(ReportMode::Daily),
            "incremental" => Ok(ReportMode::Incremental),
            "current" => Ok(ReportMode::Current),
            _ => Err(TrendpackError::invalid_mode(s)),
        }
    }
}

// ============================================================================
// BatchSizes
// ============================================================================

/// Key of the budget shared by platforms without a dedicated one.
pub const DEFAULT_BUDGET_KEY: &str = "default";

/// Byte budgets keyed by platform name.
///
/// Always contains the built-in defaults; caller values are merged over them.
/// When decoded from JSON, the document only needs to list the overrides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, usize>", into = "BTreeMap<String, usize>")]
pub struct BatchSizes {
    sizes: BTreeMap<String, usize>,
}

impl Default for BatchSizes {
    fn default() -> Self {
        let sizes = [
            ("dingtalk", 20_000),
            ("feishu", 29_000),
            ("ntfy", 3_800),
            (DEFAULT_BUDGET_KEY, 4_000),
        ]
        .into_iter()
        .map(|(key, bytes)| (key.to_string(), bytes))
        .collect();
        Self { sizes }
    }
}

impl From<BTreeMap<String, usize>> for BatchSizes {
    fn from(overrides: BTreeMap<String, usize>) -> Self {
        Self::default().merged(overrides)
    }
}

impl From<BatchSizes> for BTreeMap<String, usize> {
    fn from(sizes: BatchSizes) -> Self {
        sizes.sizes
    }
}

impl BatchSizes {
    /// Creates the built-in budgets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the budget for one key (a platform name or `default`).
    #[must_use]
    pub fn with_override(mut self, key: impl Into<String>, bytes: usize) -> Self {
        self.sizes.insert(key.into().to_lowercase(), bytes);
        self
    }

    /// Merges a caller-supplied map over the current budgets.
    #[must_use]
    pub fn merged<K: Into<String>>(mut self, overrides: impl IntoIterator<Item = (K, usize)>) -> Self {
        for (key, bytes) in overrides {
            self.sizes.insert(key.into().to_lowercase(), bytes);
        }
        self
    }

    /// Returns the budget for a platform.
    ///
    /// Looks up the platform's own name, then its shared budget key, then
    /// `default`.
    pub fn budget_for(&self, platform: Platform) -> usize {
        self.sizes
            .get(platform.name())
            .or_else(|| self.sizes.get(platform.budget_key()))
            .or_else(|| self.sizes.get(DEFAULT_BUDGET_KEY))
            .copied()
            .unwrap_or(4_000)
    }

    /// Returns the budget stored under a key, if any.
    pub fn get(&self, key: &str) -> Option<usize> {
        self.sizes.get(key).copied()
    }

    /// Iterates over all `(key, bytes)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.sizes.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

// ============================================================================
// PushConfig
// ============================================================================

/// Settings shared by the renderer, the splitter and the composer.
///
/// # Example
///
/// ```rust
/// use trendpack::config::PushConfig;
///
/// let config = PushConfig::new()
///     .with_show_stats(false)
///     .with_reverse_order(true);
///
/// assert_eq!(config.separator, "---");
/// assert_eq!(config.max_total_items, 0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PushConfig {
    /// Report cycle (default: daily)
    pub mode: ReportMode,

    /// Separator placed between sections on rule-style platforms (default: `---`)
    pub separator: String,

    /// Put new items before keyword statistics (default: false)
    pub reverse_order: bool,

    /// Maximum number of items across all groups, 0 for unlimited (default: 0)
    pub max_total_items: usize,

    /// Show keyword statistics grouped by keyword (default: true)
    pub show_stats: bool,

    /// Byte budgets per platform
    pub batch_sizes: BatchSizes,

    /// Message wording (default: zh)
    pub locale: Locale,
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            mode: ReportMode::default(),
            separator: "---".to_string(),
            reverse_order: false,
            max_total_items: 0,
            show_stats: true,
            batch_sizes: BatchSizes::default(),
            locale: Locale::default(),
        }
    }
}

impl PushConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the report mode.
    #[must_use]
    pub fn with_mode(mut self, mode: ReportMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the section separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets whether new items come before statistics.
    #[must_use]
    pub fn with_reverse_order(mut self, reverse: bool) -> Self {
        self.reverse_order = reverse;
        self
    }

    /// Sets the global item cap (0 for unlimited).
    #[must_use]
    pub fn with_max_total_items(mut self, max: usize) -> Self {
        self.max_total_items = max;
        self
    }

    /// Sets whether statistics are shown grouped.
    #[must_use]
    pub fn with_show_stats(mut self, show: bool) -> Self {
        self.show_stats = show;
        self
    }

    /// Replaces the byte budgets.
    #[must_use]
    pub fn with_batch_sizes(mut self, sizes: BatchSizes) -> Self {
        self.batch_sizes = sizes;
        self
    }

    /// Overrides one byte budget.
    #[must_use]
    pub fn with_budget(mut self, key: impl Into<String>, bytes: usize) -> Self {
        self.batch_sizes = self.batch_sizes.with_override(key, bytes);
        self
    }

    /// Sets the message wording.
    #[must_use]
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Checks that every budget is positive.
    pub fn validate(&self) -> crate::Result<()> {
        if let Some((key, _)) = self.batch_sizes.iter().find(|(_, bytes)| *bytes == 0) {
            return Err(TrendpackError::invalid_config(format!(
                "batch size for '{}' must be greater than 0",
                key
            )));
        }
        Ok(())
    }

    /// Decodes and validates a configuration from a JSON document.
    #[cfg(feature = "json")]
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TrendpackError::config_json(e, None))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, decodes and validates a configuration file.
    #[cfg(feature = "json")]
    pub fn from_json_file(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| TrendpackError::config_json(e, Some(path.to_path_buf())))?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_report_mode_from_str() {
        assert_eq!(ReportMode::from_str("daily").unwrap(), ReportMode::Daily);
        assert_eq!(ReportMode::from_str("INCREMENTAL").unwrap(), ReportMode::Incremental);
        assert_eq!(ReportMode::from_str("current").unwrap(), ReportMode::Current);
        assert!(ReportMode::from_str("weekly").unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_report_mode_display() {
        assert_eq!(ReportMode::Incremental.to_string(), "incremental");
        assert_eq!(ReportMode::default(), ReportMode::Daily);
    }

    #[test]
    fn test_default_budgets() {
        let sizes = BatchSizes::default();
        assert_eq!(sizes.budget_for(Platform::DingTalk), 20_000);
        assert_eq!(sizes.budget_for(Platform::Feishu), 29_000);
        assert_eq!(sizes.budget_for(Platform::Ntfy), 3_800);
        assert_eq!(sizes.budget_for(Platform::Telegram), 4_000);
        assert_eq!(sizes.budget_for(Platform::WeWork), 4_000);
        assert_eq!(sizes.budget_for(Platform::Generic), 4_000);
    }

    #[test]
    fn test_budget_lookup_prefers_platform_name() {
        let sizes = BatchSizes::default()
            .with_override("slack", 2_000)
            .with_override("default", 5_000);
        assert_eq!(sizes.budget_for(Platform::Slack), 2_000);
        assert_eq!(sizes.budget_for(Platform::Bark), 5_000);
        assert_eq!(sizes.budget_for(Platform::Feishu), 29_000);
    }

    #[test]
    fn test_merged_keeps_unlisted_defaults() {
        let sizes = BatchSizes::default().merged([("Feishu", 10_000)]);
        assert_eq!(sizes.get("feishu"), Some(10_000));
        assert_eq!(sizes.get("dingtalk"), Some(20_000));
    }

    #[test]
    fn test_batch_sizes_from_json_merges_over_defaults() {
        let sizes: BatchSizes = serde_json::from_str(r#"{"ntfy": 1000}"#).unwrap();
        assert_eq!(sizes.budget_for(Platform::Ntfy), 1_000);
        assert_eq!(sizes.budget_for(Platform::DingTalk), 20_000);
    }

    #[test]
    fn test_push_config_defaults() {
        let config = PushConfig::default();
        assert_eq!(config.mode, ReportMode::Daily);
        assert_eq!(config.separator, "---");
        assert!(!config.reverse_order);
        assert_eq!(config.max_total_items, 0);
        assert!(config.show_stats);
        assert_eq!(config.locale, Locale::Zh);
    }

    #[test]
    fn test_push_config_builder() {
        let config = PushConfig::new()
            .with_mode(ReportMode::Current)
            .with_separator("===")
            .with_reverse_order(true)
            .with_max_total_items(10)
            .with_show_stats(false)
            .with_locale(Locale::En);
        assert_eq!(config.mode, ReportMode::Current);
        assert_eq!(config.separator, "===");
        assert!(config.reverse_order);
        assert_eq!(config.max_total_items, 10);
        assert!(!config.show_stats);
        assert_eq!(config.locale, Locale::En);
    }

    #[test]
    fn test_push_config_from_json() {
        let json = r#"{"mode": "incremental", "max_total_items": 5, "batch_sizes": {"telegram": 3000}}"#;
        let config = PushConfig::from_json_str(json).unwrap();
        assert_eq!(config.mode, ReportMode::Incremental);
        assert_eq!(config.max_total_items, 5);
        assert!(config.show_stats);
        assert_eq!(config.batch_sizes.budget_for(Platform::Telegram), 3_000);
        assert_eq!(config.batch_sizes.budget_for(Platform::Feishu), 29_000);
    }

    #[test]
    fn test_push_config_rejects_unknown_keys() {
        let err = PushConfig::from_json_str(r#"{"max_items": 5}"#).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_push_config_rejects_zero_budget() {
        let err = PushConfig::from_json_str(r#"{"batch_sizes": {"feishu": 0}}"#).unwrap_err();
        assert!(err.is_invalid_config());
        assert!(err.to_string().contains("feishu"));
    }
}
