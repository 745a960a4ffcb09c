//! Rendering of a single news item.
//!
//! The renderer and the splitter never format items themselves; they call a
//! [`TitleFormatter`]. Applications with their own item markup implement the
//! trait, everyone else uses [`MarkupTitleFormatter`].
//!
//! # Example
//!
//! ```rust
//! use trendpack::core::formatter::{MarkupTitleFormatter, TitleFormatter};
//! use trendpack::platform::Platform;
//! use trendpack::report::TitleItem;
//!
//! let item = TitleItem::new("Rust 2024 ships", "Hacker News")
//!     .with_url("https://example.com/rust")
//!     .with_ranks(vec![2, 4]);
//!
//! let line = MarkupTitleFormatter.format_title(Platform::Ntfy, &item, true);
//! assert_eq!(line, "[Hacker News] [Rust 2024 ships](https://example.com/rust) **[2 - 4]**");
//! ```

use crate::core::profile::{CountStyle, LinkStyle, PlatformProfile, escape_html};
use crate::labels::{Labels, Locale};
use crate::platform::Platform;
use crate::report::TitleItem;

/// Renders one news item into platform markup.
///
/// Implementations must be pure: the same input always yields the same text.
pub trait TitleFormatter: Send + Sync {
    /// Formats `item` for `platform`, prefixing the source name when
    /// `show_source` is set.
    fn format_title(&self, platform: Platform, item: &TitleItem, show_source: bool) -> String;
}

impl<F> TitleFormatter for F
where
    F: Fn(Platform, &TitleItem, bool) -> String + Send + Sync,
{
    fn format_title(&self, platform: Platform, item: &TitleItem, show_source: bool) -> String {
        self(platform, item, show_source)
    }
}

/// Default formatter: source, new badge, linked title, rank range, time
/// range and repeat counter, in the platform's link and emphasis syntax.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupTitleFormatter;

/// [`MarkupTitleFormatter`] with the repeat counter worded for a locale.
#[derive(Debug, Clone, Copy)]
pub struct LocalizedTitleFormatter {
    labels: &'static Labels,
}

impl LocalizedTitleFormatter {
    /// Creates a formatter using the given wording.
    pub fn new(labels: &'static Labels) -> Self {
        Self { labels }
    }
}

impl TitleFormatter for MarkupTitleFormatter {
    fn format_title(&self, platform: Platform, item: &TitleItem, show_source: bool) -> String {
        format_item(platform, item, show_source, Locale::default().labels())
    }
}

impl TitleFormatter for LocalizedTitleFormatter {
    fn format_title(&self, platform: Platform, item: &TitleItem, show_source: bool) -> String {
        format_item(platform, item, show_source, self.labels)
    }
}

fn format_item(platform: Platform, item: &TitleItem, show_source: bool, labels: &Labels) -> String {
    let profile = PlatformProfile::for_platform(platform);
    let grey = |text: &str| format!("<font color='grey'>{}</font>", text);
    let colored = profile.count_style == CountStyle::Color;

    let mut line = String::new();

    if show_source {
        line.push_str(&format!("[{}] ", profile.escape(&item.source_name)));
    }
    if item.is_new {
        line.push_str("🆕 ");
    }
    line.push_str(&link(profile.link_style, &item.title, item.link()));

    if let Some((best, text)) = rank_range(item) {
        let highlighted = best <= item.rank_threshold;
        let rank = match (colored, highlighted) {
            (true, true) => format!("<font color='red'>**{}**</font>", text),
            (true, false) => grey(&text),
            (false, true) => emphasize(profile, &text),
            (false, false) => text,
        };
        line.push(' ');
        line.push_str(&rank);
    }

    if !item.time_display.is_empty() {
        if colored {
            line.push(' ');
            line.push_str(&grey(&format!("- {}", item.time_display)));
        } else {
            line.push_str(&format!(" - {}", item.time_display));
        }
    }

    if item.count > 1 {
        let seen = labels.seen_times(item.count);
        if colored {
            line.push_str(&format!(" <font color='green'>{}</font>", seen));
        } else {
            line.push(' ');
            line.push_str(&seen);
        }
    }

    line
}

/// `[3]` or `[1 - 5]`, with the best (lowest) rank.
fn rank_range(item: &TitleItem) -> Option<(u32, String)> {
    let best = *item.ranks.iter().min()?;
    let worst = *item.ranks.iter().max()?;
    let text = if best == worst {
        format!("[{}]", best)
    } else {
        format!("[{} - {}]", best, worst)
    };
    Some((best, text))
}

fn emphasize(profile: &PlatformProfile, text: &str) -> String {
    match profile.link_style {
        LinkStyle::Html => format!("<b>{}</b>", text),
        _ => profile.bold(text),
    }
}

fn link(style: LinkStyle, title: &str, url: Option<&str>) -> String {
    match (style, url) {
        (LinkStyle::Markdown, Some(url)) => format!("[{}]({})", title, url),
        (LinkStyle::Markdown, None) => title.to_string(),
        (LinkStyle::Html, Some(url)) => format!("<a href=\"{}\">{}</a>", url, escape_html(title)),
        (LinkStyle::Html, None) => escape_html(title),
        (LinkStyle::Slack, Some(url)) => format!("<{}|{}>", url, escape_html(title)),
        (LinkStyle::Slack, None) => escape_html(title),
    }
}
