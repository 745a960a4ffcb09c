//! Choosing between single-message rendering and splitting.
//!
//! [`MessageComposer`] is the entry point used by delivery code: it returns
//! the list of message bodies to send for one platform.
//!
//! Platforms with a single-message layout (Feishu, DingTalk) get the
//! rendered message as-is while it fits their budget. Everything else, and
//! any rendered message over budget, goes through the splitter. The result is
//! always size-checked and oversized batches are logged.
//!
//! # Example
//!
//! ```rust
//! use trendpack::clock::FixedClock;
//! use trendpack::config::PushConfig;
//! use trendpack::core::compose::MessageComposer;
//! use trendpack::platform::Platform;
//! use trendpack::report::{ReportData, StatGroup, TitleItem};
//!
//! let composer = MessageComposer::new(PushConfig::default())
//!     .with_clock(FixedClock::parse("2025-01-15 09:30:00").unwrap());
//! let report = ReportData::new()
//!     .with_stat(StatGroup::new("AI", vec![TitleItem::new("Model released", "HN")]));
//!
//! for platform in [Platform::Feishu, Platform::Telegram] {
//!     let messages = composer.compose(&report, platform, None);
//!     assert_eq!(messages.len(), 1);
//! }
//! ```

use std::sync::Arc;

use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::config::PushConfig;
use crate::core::formatter::{LocalizedTitleFormatter, TitleFormatter};
use crate::core::profile::PlatformProfile;
use crate::core::render::ContentRenderer;
use crate::core::splitter::{BatchSplitter, OversizedBatch, check_batch_sizes};
use crate::platform::Platform;
use crate::report::{ReportData, UpdateInfo};

/// How the messages for a platform are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strategy {
    /// Single message for platforms that have one and it fits, else split
    #[default]
    Auto,
    /// Always split
    Split,
    /// Always render one message, whatever its size
    Single,
}

/// Produces the messages to send for one platform.
#[derive(Debug, Clone)]
pub struct MessageComposer {
    renderer: ContentRenderer,
    splitter: BatchSplitter,
    strategy: Strategy,
    budget_override: Option<usize>,
}

impl MessageComposer {
    /// Creates a composer using the wall clock and the markup formatter.
    pub fn new(config: PushConfig) -> Self {
        let formatter: Arc<dyn TitleFormatter> =
            Arc::new(LocalizedTitleFormatter::new(config.locale.labels()));
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            renderer: ContentRenderer::new(config.clone())
                .with_shared_formatter(Arc::clone(&formatter))
                .with_shared_clock(Arc::clone(&clock)),
            splitter: BatchSplitter::new(config)
                .with_shared_formatter(formatter)
                .with_shared_clock(clock),
            strategy: Strategy::Auto,
            budget_override: None,
        }
    }

    /// Replaces the title formatter.
    #[must_use]
    pub fn with_formatter(self, formatter: impl TitleFormatter + 'static) -> Self {
        let formatter: Arc<dyn TitleFormatter> = Arc::new(formatter);
        Self {
            renderer: self.renderer.with_shared_formatter(Arc::clone(&formatter)),
            splitter: self.splitter.with_shared_formatter(formatter),
            ..self
        }
    }

    /// Replaces the clock.
    #[must_use]
    pub fn with_clock(self, clock: impl Clock + 'static) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(clock);
        Self {
            renderer: self.renderer.with_shared_clock(Arc::clone(&clock)),
            splitter: self.splitter.with_shared_clock(clock),
            ..self
        }
    }

    /// Sets the strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Uses `bytes` as the budget for every platform.
    #[must_use]
    pub fn with_budget(mut self, bytes: usize) -> Self {
        self.budget_override = Some(bytes);
        self
    }

    /// Returns the configuration.
    pub fn config(&self) -> &PushConfig {
        self.splitter.config()
    }

    /// Byte budget used for `platform`.
    pub fn budget_for(&self, platform: Platform) -> usize {
        self.budget_override
            .unwrap_or_else(|| self.config().batch_sizes.budget_for(platform))
    }

    /// Returns the message bodies to send, in order.
    pub fn compose(&self, report: &ReportData, platform: Platform, update: Option<&UpdateInfo>) -> Vec<String> {
        self.compose_checked(report, platform, update).0
    }

    /// Like [`compose`](Self::compose), also returning the batches over budget.
    pub fn compose_checked(
        &self,
        report: &ReportData,
        platform: Platform,
        update: Option<&UpdateInfo>,
    ) -> (Vec<String>, Vec<OversizedBatch>) {
        let budget = self.budget_for(platform);
        let profile = PlatformProfile::for_platform(platform);

        let messages = match self.strategy {
            Strategy::Single => vec![self.renderer.render(report, platform, update)],
            Strategy::Split => self.splitter.split_with_budget(report, platform, budget, update),
            Strategy::Auto if profile.single_message => {
                let rendered = self.renderer.render(report, platform, update);
                if rendered.len() <= budget {
                    vec![rendered]
                } else {
                    debug!(
                        platform = %platform,
                        bytes = rendered.len(),
                        budget,
                        "rendered message over budget, splitting"
                    );
                    self.splitter.split_with_budget(report, platform, budget, update)
                }
            }
            Strategy::Auto => self.splitter.split_with_budget(report, platform, budget, update),
        };

        let oversized = check_batch_sizes(&messages, budget);
        (messages, oversized)
    }
}
