//! Fixed wording used in generated messages.
//!
//! Every piece of prose that appears in a message comes from one [`Labels`]
//! table, selected by [`Locale`]. Markup (bold, colors, quotes) is added
//! later by the platform profile, so labels are plain text.
//!
//! The default locale is Chinese, matching the wording the report system has
//! always pushed.
//!
//! ```
//! use trendpack::config::ReportMode;
//! use trendpack::labels::Locale;
//!
//! let labels = Locale::En.labels();
//! assert_eq!(labels.no_matches(ReportMode::Daily), "No matching trending keywords");
//! ```

use serde::{Deserialize, Serialize};

use crate::config::ReportMode;

/// Language of the generated messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Simplified Chinese (default)
    #[default]
    Zh,
    /// English
    En,
}

impl Locale {
    /// Returns the wording table for this locale.
    pub fn labels(self) -> &'static Labels {
        match self {
            Locale::Zh => &ZH,
            Locale::En => &EN,
        }
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "zh" | "zh-cn" | "chinese" => Ok(Locale::Zh),
            "en" | "en-us" | "english" => Ok(Locale::En),
            _ => Err(format!("Unknown locale: '{}'. Expected one of: zh, en", s)),
        }
    }
}

/// Plain-text wording for one locale.
#[derive(Debug)]
pub struct Labels {
    /// Label before the total item count in the message header.
    pub total_items: &'static str,
    /// Label before the generation time in the detailed header.
    pub time: &'static str,
    /// Label before the report type in the detailed header.
    pub report_type: &'static str,
    /// Report type value in the detailed header.
    pub report_kind: &'static str,
    /// Title of the keyword statistics section.
    pub stats_title: &'static str,
    /// Title of the new-items section.
    pub new_items_title: &'static str,
    /// Title of the failed-sources section.
    pub failed_title: &'static str,
    /// Unit noun after item counts.
    pub items_unit: &'static str,
    /// Label before the footer timestamp.
    pub updated_at: &'static str,
    /// Name of the synthetic group that holds flattened statistics.
    pub matched_items: &'static str,
    /// Product name used in the version notice.
    pub app_name: &'static str,
    no_matches_daily: &'static str,
    no_matches_incremental: &'static str,
    no_matches_current: &'static str,
    locale: Locale,
}

static ZH: Labels = Labels {
    total_items: "总新闻数：",
    time: "时间：",
    report_type: "类型：",
    report_kind: "热点分析报告",
    stats_title: "热点词汇统计",
    new_items_title: "本次新增热点新闻",
    failed_title: "数据获取失败的平台：",
    items_unit: "条",
    updated_at: "更新时间：",
    matched_items: "匹配的新闻",
    app_name: "TrendRadar",
    no_matches_daily: "暂无匹配的热点词汇",
    no_matches_incremental: "增量模式下暂无新增匹配的热点词汇",
    no_matches_current: "当前榜单模式下暂无匹配的热点词汇",
    locale: Locale::Zh,
};

static EN: Labels = Labels {
    total_items: "Total items:",
    time: "Time:",
    report_type: "Type:",
    report_kind: "Trend analysis report",
    stats_title: "Trending keywords",
    new_items_title: "New trending items",
    failed_title: "Failed to fetch:",
    items_unit: "items",
    updated_at: "Updated: ",
    matched_items: "Matched items",
    app_name: "TrendRadar",
    no_matches_daily: "No matching trending keywords",
    no_matches_incremental: "No new matching trending keywords in incremental mode",
    no_matches_current: "No matching trending keywords on the current board",
    locale: Locale::En,
};

impl Labels {
    /// Placeholder shown when a report has nothing to list.
    pub fn no_matches(&self, mode: ReportMode) -> &'static str {
        match mode {
            ReportMode::Incremental => self.no_matches_incremental,
            ReportMode::Current => self.no_matches_current,
            ReportMode::Daily => self.no_matches_daily,
        }
    }

    /// `"(共 12 条)"`, with an optional hint inside the parentheses.
    pub fn total_count(&self, total: usize, hint: &str) -> String {
        match self.locale {
            Locale::Zh => format!("(共 {} 条{})", total, hint),
            Locale::En => format!("({} total{})", total, hint),
        }
    }

    /// Hint appended to the total when only a prefix is shown.
    pub fn truncation_hint(&self, shown: usize) -> String {
        match self.locale {
            Locale::Zh => format!(" (已截取前 {} 条)", shown),
            Locale::En => format!(", showing first {}", shown),
        }
    }

    /// Version notice body; the version strings arrive already marked up.
    pub fn update_notice(&self, remote: &str, current: &str) -> String {
        match self.locale {
            Locale::Zh => format!("{} 发现新版本 {}，当前 {}", self.app_name, remote, current),
            Locale::En => format!(
                "{} new version {} available, running {}",
                self.app_name, remote, current
            ),
        }
    }

    /// Repeat counter shown after an item title.
    pub fn seen_times(&self, count: u32) -> String {
        match self.locale {
            Locale::Zh => format!("({}次)", count),
            Locale::En => format!("({}x)", count),
        }
    }
}
