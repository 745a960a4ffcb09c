//! Notification destinations.
//!
//! [`Platform`] identifies which markup dialect and size budget a message is
//! generated for. The per-platform details live in
//! [`PlatformProfile`](crate::core::profile::PlatformProfile); this module only
//! deals with naming.
//!
//! # Example
//!
//! ```rust
//! use trendpack::platform::Platform;
//! use std::str::FromStr;
//!
//! let platform = Platform::from_str("feishu").unwrap();
//! assert_eq!(platform, Platform::Feishu);
//!
//! // Aliases are supported
//! let platform = Platform::from_str("lark").unwrap();
//! assert_eq!(platform, Platform::Feishu);
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TrendpackError;

/// Supported notification platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Platform {
    /// Feishu / Lark interactive cards (lark markdown with `<font>` colors)
    #[serde(alias = "lark")]
    Feishu,

    /// DingTalk robot markdown
    #[serde(alias = "dd")]
    DingTalk,

    /// WeCom (WeChat Work) robot markdown
    #[serde(alias = "wecom", alias = "wxwork")]
    WeWork,

    /// Bark push notifications (markdown body)
    Bark,

    /// Telegram bot messages
    #[serde(alias = "tg")]
    Telegram,

    /// ntfy topic messages (markdown)
    Ntfy,

    /// Slack incoming webhooks (mrkdwn)
    Slack,

    /// Any other destination: markdown body, default budget
    Generic,
}

impl Platform {
    /// Returns the canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Platform::Feishu => "feishu",
            Platform::DingTalk => "dingtalk",
            Platform::WeWork => "wework",
            Platform::Bark => "bark",
            Platform::Telegram => "telegram",
            Platform::Ntfy => "ntfy",
            Platform::Slack => "slack",
            Platform::Generic => "generic",
        }
    }

    /// Returns the key used to look up the built-in byte budget.
    ///
    /// Only DingTalk, Feishu and ntfy have dedicated defaults; everything
    /// else shares the `default` budget.
    pub fn budget_key(&self) -> &'static str {
        match self {
            Platform::DingTalk => "dingtalk",
            Platform::Feishu => "feishu",
            Platform::Ntfy => "ntfy",
            _ => "default",
        }
    }

    /// Returns all platform names including aliases.
    pub fn all_names() -> &'static [&'static str] {
        &[
            "feishu", "lark", "dingtalk", "dd", "wework", "wecom", "wxwork", "bark", "telegram",
            "tg", "ntfy", "slack", "generic",
        ]
    }

    /// Returns all available platforms.
    pub fn all() -> &'static [Platform] {
        &[
            Platform::Feishu,
            Platform::DingTalk,
            Platform::WeWork,
            Platform::Bark,
            Platform::Telegram,
            Platform::Ntfy,
            Platform::Slack,
            Platform::Generic,
        ]
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Feishu => write!(f, "Feishu"),
            Platform::DingTalk => write!(f, "DingTalk"),
            Platform::WeWork => write!(f, "WeWork"),
            Platform::Bark => write!(f, "Bark"),
            Platform::Telegram => write!(f, "Telegram"),
            Platform::Ntfy => write!(f, "ntfy"),
            Platform::Slack => write!(f, "Slack"),
            Platform::Generic => write!(f, "Generic"),
        }
    }
}

impl std::str::FromStr for Platform {
    type Err = TrendpackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "feishu" | "lark" => Ok(Platform::Feishu),
            "dingtalk" | "dd" => Ok(Platform::DingTalk),
            "wework" | "wecom" | "wxwork" => Ok(Platform::WeWork),
            "bark" => Ok(Platform::Bark),
            "telegram" | "tg" => Ok(Platform::Telegram),
            "ntfy" => Ok(Platform::Ntfy),
            "slack" => Ok(Platform::Slack),
            "generic" => Ok(Platform::Generic),
            _ => Err(TrendpackError::invalid_platform(s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_platform_from_str() {
        assert_eq!(Platform::from_str("feishu").unwrap(), Platform::Feishu);
        assert_eq!(Platform::from_str("LARK").unwrap(), Platform::Feishu);
        assert_eq!(Platform::from_str("dd").unwrap(), Platform::DingTalk);
        assert_eq!(Platform::from_str("wecom").unwrap(), Platform::WeWork);
        assert_eq!(Platform::from_str("tg").unwrap(), Platform::Telegram);
        assert_eq!(Platform::from_str("Slack").unwrap(), Platform::Slack);
    }

    #[test]
    fn test_platform_from_str_error() {
        let err = Platform::from_str("signal").unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(Platform::from_str("").is_err());
    }

    #[test]
    fn test_every_name_parses() {
        for name in Platform::all_names() {
            assert!(Platform::from_str(name).is_ok(), "{name} should parse");
        }
    }

    #[test]
    fn test_name_roundtrip() {
        for platform in Platform::all() {
            assert_eq!(Platform::from_str(platform.name()).unwrap(), *platform);
        }
    }

    #[test]
    fn test_budget_key() {
        assert_eq!(Platform::DingTalk.budget_key(), "dingtalk");
        assert_eq!(Platform::Feishu.budget_key(), "feishu");
        assert_eq!(Platform::Ntfy.budget_key(), "ntfy");
        assert_eq!(Platform::Telegram.budget_key(), "default");
        assert_eq!(Platform::Slack.budget_key(), "default");
    }

    #[test]
    fn test_platform_serde() {
        let json = serde_json::to_string(&Platform::DingTalk).unwrap();
        assert_eq!(json, "\"dingtalk\"");

        let parsed: Platform = serde_json::from_str("\"tg\"").unwrap();
        assert_eq!(parsed, Platform::Telegram);

        let parsed: Platform = serde_json::from_str("\"wecom\"").unwrap();
        assert_eq!(parsed, Platform::WeWork);
    }
}
