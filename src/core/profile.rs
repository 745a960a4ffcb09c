//! Per-platform markup table.
//!
//! Every string the renderer and the splitter emit around the formatted
//! items (headers, footers, section titles, separators, failed-source lines)
//! is built here from one [`PlatformProfile`] record and the active
//! [`Labels`]. Callers never branch on [`Platform`] themselves.

use std::borrow::Cow;

use chrono::NaiveDateTime;

use crate::clock::format_time;
use crate::config::ReportMode;
use crate::labels::Labels;
use crate::platform::Platform;
use crate::report::UpdateInfo;

// ============================================================================
// Style enums
// ============================================================================

/// How an item count of 5 or more is emphasized in a keyword header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountStyle {
    /// Wrap in the platform's bold markers
    Bold,
    /// `<font color='red'>` (10+) or `<font color='orange'>` (5+), sequence in grey
    Color,
}

/// What precedes the body of every message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderStyle {
    /// No header
    None,
    /// Total item count followed by the given gap
    Total(&'static str),
    /// Total count, time and report type, closed by a rule
    Detailed,
}

/// How the timestamp footer is decorated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FooterStyle {
    /// Markdown quote lines; versions in bold
    Quote,
    /// `<font color='grey'>` lines
    GreyFont,
    /// Underscore-italic lines; versions in bold
    Italic,
    /// Undecorated lines
    Plain,
}

/// What goes between keyword groups and between sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionBreak {
    /// Fixed run of newlines
    Blank(&'static str),
    /// The configured separator on its own line
    Separator,
    /// A fixed horizontal rule on its own line
    Rule(&'static str),
}

/// How a failed source id is listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailedStyle {
    Plain,
    Bold,
    Red,
}

/// Link syntax used by the title formatter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// `[title](url)`
    Markdown,
    /// `<a href="url">title</a>`
    Html,
    /// `<url|title>`
    Slack,
}

// ============================================================================
// PlatformProfile
// ============================================================================

/// Markup dialect and message layout of one platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    /// The platform this profile describes.
    pub platform: Platform,
    /// Bold marker, written on both sides (`**`, `*`, or empty).
    pub bold: &'static str,
    pub count_style: CountStyle,
    pub header: HeaderStyle,
    pub footer: FooterStyle,
    /// Newlines between the body and the footer's first line.
    pub footer_gap: &'static str,
    pub section_break: SectionBreak,
    pub failed_style: FailedStyle,
    pub link_style: LinkStyle,
    /// Whether the platform has a single-message rendering that is preferred
    /// while it fits the budget.
    pub single_message: bool,
}

const fn markdown(platform: Platform) -> PlatformProfile {
    PlatformProfile {
        platform,
        bold: "**",
        count_style: CountStyle::Bold,
        header: HeaderStyle::Total("\n\n"),
        footer: FooterStyle::Quote,
        footer_gap: "\n\n",
        section_break: SectionBreak::Blank("\n\n"),
        failed_style: FailedStyle::Plain,
        link_style: LinkStyle::Markdown,
        single_message: false,
    }
}

const FEISHU: PlatformProfile = PlatformProfile {
    count_style: CountStyle::Color,
    header: HeaderStyle::None,
    footer: FooterStyle::GreyFont,
    section_break: SectionBreak::Separator,
    failed_style: FailedStyle::Red,
    single_message: true,
    ..markdown(Platform::Feishu)
};

const DINGTALK: PlatformProfile = PlatformProfile {
    header: HeaderStyle::Detailed,
    section_break: SectionBreak::Rule("---"),
    failed_style: FailedStyle::Bold,
    single_message: true,
    ..markdown(Platform::DingTalk)
};

const WEWORK: PlatformProfile = PlatformProfile {
    header: HeaderStyle::Total("\n\n\n\n"),
    footer_gap: "\n\n\n",
    section_break: SectionBreak::Blank("\n\n\n\n"),
    ..markdown(Platform::WeWork)
};

const BARK: PlatformProfile = PlatformProfile {
    platform: Platform::Bark,
    ..WEWORK
};

const TELEGRAM: PlatformProfile = PlatformProfile {
    bold: "",
    footer: FooterStyle::Plain,
    link_style: LinkStyle::Html,
    ..markdown(Platform::Telegram)
};

const NTFY: PlatformProfile = markdown(Platform::Ntfy);

const SLACK: PlatformProfile = PlatformProfile {
    bold: "*",
    footer: FooterStyle::Italic,
    link_style: LinkStyle::Slack,
    ..markdown(Platform::Slack)
};

const GENERIC: PlatformProfile = markdown(Platform::Generic);

impl PlatformProfile {
    /// Returns the profile of a platform.
    pub fn for_platform(platform: Platform) -> &'static PlatformProfile {
        match platform {
            Platform::Feishu => &FEISHU,
            Platform::DingTalk => &DINGTALK,
            Platform::WeWork => &WEWORK,
            Platform::Bark => &BARK,
            Platform::Telegram => &TELEGRAM,
            Platform::Ntfy => &NTFY,
            Platform::Slack => &SLACK,
            Platform::Generic => &GENERIC,
        }
    }

    /// Escapes report text for platforms that parse `<`, `>` and `&` as markup.
    pub fn escape<'a>(&self, text: &'a str) -> Cow<'a, str> {
        match self.link_style {
            LinkStyle::Markdown => Cow::Borrowed(text),
            LinkStyle::Html | LinkStyle::Slack => Cow::Owned(escape_html(text)),
        }
    }

    /// Wraps text in the platform's bold markers.
    pub fn bold(&self, text: &str) -> String {
        format!("{0}{1}{0}", self.bold, text)
    }

    /// Header placed at the top of every message.
    pub fn header(&self, labels: &Labels, total: usize, now: NaiveDateTime) -> String {
        match self.header {
            HeaderStyle::None => String::new(),
            HeaderStyle::Total(gap) => {
                format!("{} {}{}", self.bold(labels.total_items), total, gap)
            }
            HeaderStyle::Detailed => format!(
                "{} {}\n\n{} {}\n\n{} {}\n\n---\n\n",
                self.bold(labels.total_items),
                total,
                self.bold(labels.time),
                format_time(now),
                self.bold(labels.report_type),
                labels.report_kind,
            ),
        }
    }

    /// Footer closing every message: timestamp, then the optional version notice.
    pub fn footer(&self, labels: &Labels, now: NaiveDateTime, update: Option<&UpdateInfo>) -> String {
        let time_line = format!("{}{}", labels.updated_at, format_time(now));
        let notice = update.map(|info| {
            let (remote, current) = match self.footer {
                FooterStyle::Quote | FooterStyle::Italic => {
                    (self.bold(&info.remote_version), self.bold(&info.current_version))
                }
                FooterStyle::GreyFont | FooterStyle::Plain => {
                    (info.remote_version.clone(), info.current_version.clone())
                }
            };
            labels.update_notice(&remote, &current)
        });

        let decorate = |line: &str| match self.footer {
            FooterStyle::Quote => format!("> {}", line),
            FooterStyle::GreyFont => format!("<font color='grey'>{}</font>", line),
            FooterStyle::Italic => format!("_{}_", line),
            FooterStyle::Plain => line.to_string(),
        };

        let mut footer = format!("{}{}", self.footer_gap, decorate(&time_line));
        if let Some(notice) = notice {
            footer.push('\n');
            footer.push_str(&decorate(&notice));
        }
        footer
    }

    /// Break between keyword groups and between sections.
    pub fn section_break(&self, separator: &str) -> String {
        match self.section_break {
            SectionBreak::Blank(newlines) => newlines.to_string(),
            SectionBreak::Separator => format!("\n{}\n\n", separator),
            SectionBreak::Rule(rule) => format!("\n{}\n\n", rule),
        }
    }

    /// `📊 Keyword statistics` title.
    pub fn stats_title(&self, labels: &Labels) -> String {
        format!("📊 {}\n\n", self.bold(labels.stats_title))
    }

    /// Header line of one keyword group, e.g. `🔥 [1/3] **AI** : **12** 条`.
    pub fn word_header(
        &self,
        labels: &Labels,
        word: &str,
        count: usize,
        index: usize,
        total: usize,
    ) -> String {
        let icon = if count >= 10 {
            "🔥"
        } else if count >= 5 {
            "📈"
        } else {
            "📌"
        };

        let sequence = format!("[{}/{}]", index, total);
        let (sequence, count_display) = match self.count_style {
            CountStyle::Color => {
                let count_display = if count >= 10 {
                    format!("<font color='red'>{}</font>", count)
                } else if count >= 5 {
                    format!("<font color='orange'>{}</font>", count)
                } else {
                    count.to_string()
                };
                (format!("<font color='grey'>{}</font>", sequence), count_display)
            }
            CountStyle::Bold => {
                let count_display = if count >= 5 {
                    self.bold(&count.to_string())
                } else {
                    count.to_string()
                };
                (sequence, count_display)
            }
        };

        format!(
            "{} {} {} : {} {}\n\n",
            icon,
            sequence,
            self.bold(&self.escape(word)),
            count_display,
            labels.items_unit
        )
    }

    /// `🆕 New items (共 N 条)` title, without any leading break.
    pub fn new_items_title(&self, labels: &Labels, total: usize, hint: &str) -> String {
        format!(
            "🆕 {} {}\n\n",
            self.bold(labels.new_items_title),
            labels.total_count(total, hint)
        )
    }

    /// Header line of one source group.
    pub fn source_header(&self, labels: &Labels, source_name: &str, count: usize) -> String {
        format!(
            "{} ({} {}):\n\n",
            self.bold(&self.escape(source_name)),
            count,
            labels.items_unit
        )
    }

    /// `⚠️ Failed sources` title, without any leading break.
    pub fn failed_title(&self, labels: &Labels) -> String {
        format!("⚠️ {}\n\n", self.bold(labels.failed_title))
    }

    /// One bulleted failed source id.
    pub fn failed_line(&self, id: &str) -> String {
        let id = self.escape(id);
        match self.failed_style {
            FailedStyle::Plain => format!("  • {}\n", id),
            FailedStyle::Bold => format!("  • **{}**\n", id),
            FailedStyle::Red => format!("  • <font color='red'>{}</font>\n", id),
        }
    }

    /// Placeholder body used when there is nothing to list.
    pub fn no_matches(&self, labels: &Labels, mode: ReportMode) -> String {
        format!("📭 {}\n\n", labels.no_matches(mode))
    }
}

pub(crate) fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
