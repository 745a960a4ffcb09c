//! End-to-end CLI tests for trendpack.
//!
//! These tests verify the complete CLI workflow by running the actual binary
//! with various arguments and checking the output.
//!
//! # Test Categories
//!
//! - **Basic functionality**: Rendering to stdout and to files
//! - **Output formats**: Text and JSON batch output
//! - **Flags**: Budgets, modes, locales and strategies
//! - **Error handling**: Proper error messages for bad input
//!
//! # Running Tests
//!
//! ```bash
//! cargo test --test cli_e2e
//! ```

#![cfg(feature = "cli")]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{TempDir, tempdir};

const AT: &str = "2025-01-15 09:30:00";

// ============================================================================
// Test Fixtures
// ============================================================================

/// Creates a temporary directory with report and config fixtures.
fn setup_fixtures() -> TempDir {
    let dir = tempdir().expect("Failed to create temp dir");

    let simple = r#"{
  "stats": [
    {"word": "AI", "count": 2, "titles": [
      {"title": "Open model tops leaderboard", "source_name": "Hacker News", "url": "https://example.com/1", "ranks": [1, 2]},
      {"title": "芯片出口新规发布", "source_name": "微博", "ranks": [8], "count": 3}
    ]}
  ],
  "new_titles": [
    {"source_name": "知乎", "titles": [
      {"title": "高考志愿填报指南", "source_name": "知乎", "is_new": true}
    ]}
  ],
  "failed_ids": ["bilibili"],
  "total_new_count": 1
}"#;
    fs::write(dir.path().join("simple.json"), simple).unwrap();

    let titles: Vec<String> = (1..=60)
        .map(|i| {
            format!(
                r#"{{"title": "Headline number {} with some padding text", "source_name": "HN"}}"#,
                i
            )
        })
        .collect();
    let large = format!(
        r#"{{"stats": [{{"word": "AI", "count": 60, "titles": [{}]}}]}}"#,
        titles.join(",")
    );
    fs::write(dir.path().join("large.json"), large).unwrap();

    fs::write(dir.path().join("empty.json"), "{}").unwrap();
    fs::write(dir.path().join("broken.json"), "{ not json").unwrap();

    let config = r#"{"mode": "incremental", "batch_sizes": {"telegram": 900}}"#;
    fs::write(dir.path().join("push.json"), config).unwrap();
    fs::write(dir.path().join("bad_push.json"), r#"{"batch_sizes": {"telegram": 0}}"#).unwrap();

    dir
}

fn trendpack_cmd() -> Command {
    let cmd = std::process::Command::new(env!("CARGO_BIN_EXE_trendpack"));
    Command::from_std(cmd)
}

fn fixture(dir: &TempDir, name: &str) -> String {
    dir.path().join(name).to_str().unwrap().to_string()
}

fn output_path(dir: &TempDir, name: &str) -> PathBuf {
    dir.path().join(name)
}

// ============================================================================
// Basic Functionality Tests
// ============================================================================

mod basic_functionality {
    use super::*;

    #[test]
    fn test_renders_to_stdout() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "simple.json"), "-p", "ntfy", "--at", AT])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("**总新闻数：** 2\n\n📊 **热点词汇统计**"))
            .stdout(predicate::str::contains("高考志愿填报指南"))
            .stdout(predicate::str::contains("bilibili"))
            .stdout(predicate::str::contains("> 更新时间：2025-01-15 09:30:00"))
            .stderr(predicate::str::contains("Messages:  1"));
    }

    #[test]
    fn test_writes_output_file() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "feishu.txt");

        trendpack_cmd()
            .args([
                &fixture(&fixtures, "simple.json"),
                "-p",
                "lark",
                "--at",
                AT,
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("Done"));

        let content = fs::read_to_string(&output).unwrap();
        assert!(content.contains("<font color='grey'>更新时间：2025-01-15 09:30:00</font>"));
        assert!(content.contains("[Open model tops leaderboard](https://example.com/1)"));
    }

    #[test]
    fn test_reads_stdin() {
        let fixtures = setup_fixtures();
        let report = fs::read_to_string(fixtures.path().join("simple.json")).unwrap();

        trendpack_cmd()
            .args(["-", "-p", "slack", "--at", AT])
            .write_stdin(report)
            .assert()
            .success()
            .stdout(predicate::str::contains("_更新时间：2025-01-15 09:30:00_"));
    }

    #[test]
    fn test_empty_report_prints_placeholder() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "empty.json"), "--mode", "current", "--at", AT])
            .assert()
            .success()
            .stdout(predicate::str::contains("📭 当前榜单模式下暂无匹配的热点词汇"));
    }
}

// ============================================================================
// Output Format Tests
// ============================================================================

mod output_formats {
    use super::*;

    #[test]
    fn test_text_divider_between_batches() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "large.json"), "-p", "tg", "--max-bytes", "800", "--at", AT])
            .assert()
            .success()
            .stdout(predicate::str::contains("-----8<----- [2/"));
    }

    #[test]
    fn test_json_output_respects_budget() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "batches.json");

        trendpack_cmd()
            .args([
                &fixture(&fixtures, "large.json"),
                "-p",
                "telegram",
                "--max-bytes",
                "800",
                "--format",
                "json",
                "--at",
                AT,
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let content = fs::read_to_string(&output).unwrap();
        let batches: Vec<serde_json::Value> = serde_json::from_str(&content).unwrap();
        assert!(batches.len() > 1);
        for (i, batch) in batches.iter().enumerate() {
            assert_eq!(batch["index"].as_u64().unwrap() as usize, i + 1);
            let text = batch["content"].as_str().unwrap();
            assert_eq!(batch["bytes"].as_u64().unwrap() as usize, text.len());
            assert!(text.len() <= 800);
        }
    }
}

// ============================================================================
// Flag Tests
// ============================================================================

mod flags {
    use super::*;

    #[test]
    fn test_config_file_budget_and_mode() {
        let fixtures = setup_fixtures();
        let output = output_path(&fixtures, "out.json");

        trendpack_cmd()
            .args([
                &fixture(&fixtures, "large.json"),
                "-p",
                "telegram",
                "-c",
                &fixture(&fixtures, "push.json"),
                "-f",
                "json",
                "--at",
                AT,
                "-o",
                output.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stderr(predicate::str::contains("Budget:    900 bytes"));

        let batches: Vec<serde_json::Value> =
            serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert!(batches.iter().all(|b| b["bytes"].as_u64().unwrap() <= 900));
    }

    #[test]
    fn test_max_total_truncates() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "large.json"), "-p", "ntfy", "--max-total", "3", "--at", AT])
            .assert()
            .success()
            .stdout(predicate::str::contains("Headline number 3 "))
            .stdout(predicate::str::contains("Headline number 4 ").not());
    }

    #[test]
    fn test_english_locale() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "simple.json"), "-p", "ntfy", "-l", "en", "--at", AT])
            .assert()
            .success()
            .stdout(predicate::str::contains("Updated: 2025-01-15 09:30:00"))
            .stdout(predicate::str::contains("总新闻数").not());
    }

    #[test]
    fn test_update_notice() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([
                &fixture(&fixtures, "simple.json"),
                "-p",
                "dingtalk",
                "--remote-version",
                "3.1.0",
                "--current-version",
                "3.0.2",
                "--at",
                AT,
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("> TrendRadar 发现新版本 **3.1.0**，当前 **3.0.2**"));
    }

    #[test]
    fn test_single_strategy_keeps_one_message() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([
                &fixture(&fixtures, "large.json"),
                "-p",
                "ntfy",
                "--max-bytes",
                "500",
                "--strategy",
                "single",
                "--at",
                AT,
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("-----8<-----").not())
            .stderr(predicate::str::contains("over budget"));
    }

    #[test]
    fn test_oversized_batch_warned_once() {
        let fixtures = setup_fixtures();

        let output = trendpack_cmd()
            .env_remove("RUST_LOG")
            .args([
                &fixture(&fixtures, "large.json"),
                "-p",
                "ntfy",
                "--max-bytes",
                "500",
                "--strategy",
                "single",
                "--at",
                AT,
            ])
            .output()
            .unwrap();

        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert_eq!(stderr.matches("Batch exceeds platform size limit").count(), 1, "{stderr}");
        assert!(stderr.contains("1 message(s) over budget"));
    }
}

// ============================================================================
// Error Handling Tests
// ============================================================================

mod error_handling {
    use super::*;

    #[test]
    fn test_missing_report() {
        trendpack_cmd()
            .args(["/nonexistent/report.json"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Error"));
    }

    #[test]
    fn test_broken_report() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "broken.json")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("JSON error in report"));
    }

    #[test]
    fn test_unknown_platform() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "simple.json"), "-p", "myspace"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown platform"));
    }

    #[test]
    fn test_invalid_time() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "simple.json"), "--at", "yesterday"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid time"));
    }

    #[test]
    fn test_zero_budget() {
        let fixtures = setup_fixtures();

        trendpack_cmd()
            .args([&fixture(&fixtures, "simple.json"), "--max-bytes", "0"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("greater than 0"));

        trendpack_cmd()
            .args([&fixture(&fixtures, "simple.json"), "-c", &fixture(&fixtures, "bad_push.json")])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid configuration"));
    }

    #[test]
    fn test_help() {
        trendpack_cmd()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--platform"))
            .stdout(predicate::str::contains("--max-bytes"));
    }
}
