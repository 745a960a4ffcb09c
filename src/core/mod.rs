//! Core message generation for trendpack.
//!
//! This module contains:
//! - [`profile`] - Per-platform markup table
//! - [`formatter`] - Single item formatting ([`TitleFormatter`])
//! - [`preprocess`] - Truncation and flattening
//! - [`render`] - Single-message rendering
//! - [`splitter`] - Size-limited batch splitting
//! - [`compose`] - Choosing between the two
//!
//! # Quick Start
//!
//! ```rust
//! use trendpack::core::{MessageComposer, check_batch_sizes};
//! use trendpack::config::PushConfig;
//! use trendpack::platform::Platform;
//! use trendpack::report::ReportData;
//!
//! let composer = MessageComposer::new(PushConfig::default());
//! let messages = composer.compose(&ReportData::new(), Platform::Ntfy, None);
//! assert!(check_batch_sizes(&messages, 3800).is_empty());
//! ```

pub mod compose;
pub mod formatter;
pub mod preprocess;
pub mod profile;
pub mod render;
pub mod splitter;

pub use compose::{MessageComposer, Strategy};
pub use formatter::{LocalizedTitleFormatter, MarkupTitleFormatter, TitleFormatter};
pub use preprocess::{Layout, PreparedReport, Preprocessor, preprocess};
pub use profile::PlatformProfile;
pub use render::ContentRenderer;
pub use splitter::{BatchAccumulator, BatchSplitter, OversizedBatch, check_batch_sizes};
