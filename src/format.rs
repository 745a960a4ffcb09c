//! Output encodings for generated batches.
//!
//! Delivery code normally consumes the `Vec<String>` returned by the
//! composer directly. This module is for showing or saving that list: as
//! plain text with a divider between messages, or as a JSON array that
//! records each message's size.
//!
//! # Example
//!
//! ```rust
//! use trendpack::format::{OutputFormat, to_format_string};
//!
//! let batches = vec!["first".to_string(), "second".to_string()];
//! let text = to_format_string(&batches, OutputFormat::Text).unwrap();
//! assert_eq!(text, "first\n\n-----8<----- [2/2]\n\nsecond\n");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::TrendpackError;

/// Encoding used when printing or saving batches.
///
/// # Example
///
/// ```rust
/// use trendpack::format::OutputFormat;
/// use std::str::FromStr;
///
/// let format = OutputFormat::from_str("json").unwrap();
/// assert_eq!(format, OutputFormat::Json);
/// assert_eq!(format.extension(), "json");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum OutputFormat {
    /// Message bodies separated by a divider line (default)
    #[default]
    Text,

    /// JSON array of `{ index, bytes, content }` objects
    Json,
}

impl OutputFormat {
    /// Returns the file extension for this format (without dot).
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }

    /// Returns all supported format names.
    pub fn all_names() -> &'static [&'static str] {
        &["text", "txt", "json"]
    }

    /// Returns all available formats.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Text, OutputFormat::Json]
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "Text"),
            OutputFormat::Json => write!(f, "JSON"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// One batch as written in JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    /// 1-based position.
    pub index: usize,
    /// UTF-8 size of `content`.
    pub bytes: usize,
    /// Message body.
    pub content: String,
}

/// Divider line placed before every batch but the first in text output.
pub fn divider(index: usize, total: usize) -> String {
    format!("\n\n-----8<----- [{}/{}]\n\n", index, total)
}

/// Converts batches to a string in the specified format.
pub fn to_format_string(batches: &[String], format: OutputFormat) -> crate::Result<String> {
    match format {
        OutputFormat::Text => {
            let mut out = String::new();
            for (i, batch) in batches.iter().enumerate() {
                if i > 0 {
                    out.push_str(&divider(i + 1, batches.len()));
                }
                out.push_str(batch);
            }
            if !out.is_empty() {
                out.push('\n');
            }
            Ok(out)
        }
        #[cfg(feature = "json")]
        OutputFormat::Json => {
            let records: Vec<BatchRecord> = batches
                .iter()
                .enumerate()
                .map(|(i, batch)| BatchRecord {
                    index: i + 1,
                    bytes: batch.len(),
                    content: batch.clone(),
                })
                .collect();
            serde_json::to_string_pretty(&records).map_err(TrendpackError::output_json)
        }
        #[allow(unreachable_patterns)]
        _ => Err(TrendpackError::invalid_config(format!(
            "Output format {} requires the 'json' feature to be enabled",
            format
        ))),
    }
}

/// Writes batches to a file in the specified format.
pub fn write_to_format(
    batches: &[String],
    path: impl AsRef<std::path::Path>,
    format: OutputFormat,
) -> crate::Result<()> {
    let content = to_format_string(batches, format)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn batches() -> Vec<String> {
        vec!["总新闻数： 1".to_string(), "second".to_string()]
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("text").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("TXT").unwrap(), OutputFormat::Text);
        assert_eq!(OutputFormat::from_str("json").unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_str("csv").is_err());
    }

    #[test]
    fn test_format_display_and_default() {
        assert_eq!(OutputFormat::Text.to_string(), "Text");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
        assert_eq!(OutputFormat::all().len(), 2);
    }

    #[test]
    fn test_text_output() {
        let text = to_format_string(&batches(), OutputFormat::Text).unwrap();
        assert_eq!(text, "总新闻数： 1\n\n-----8<----- [2/2]\n\nsecond\n");
    }

    #[test]
    fn test_text_output_single_and_empty() {
        let single = to_format_string(&["only".to_string()], OutputFormat::Text).unwrap();
        assert_eq!(single, "only\n");
        assert_eq!(to_format_string(&[], OutputFormat::Text).unwrap(), "");
    }

    #[test]
    fn test_json_output_records_bytes() {
        let json = to_format_string(&batches(), OutputFormat::Json).unwrap();
        let records: Vec<BatchRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].index, 1);
        assert_eq!(records[0].bytes, "总新闻数： 1".len());
        assert_eq!(records[1].content, "second");
    }

    #[test]
    fn test_write_to_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        write_to_format(&batches(), &path, OutputFormat::Json).unwrap();
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("\"index\": 2"));
    }
}
