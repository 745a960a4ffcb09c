//! Integration tests for report splitting and rendering.
//!
//! Each scenario drives the public API end to end with a fixed clock and a
//! plain title formatter, so batch contents can be checked exactly.

use trendpack::core::{Layout, preprocess};
use trendpack::prelude::*;

fn clock() -> FixedClock {
    FixedClock::parse("2025-01-15 09:30:00").unwrap()
}

fn plain_title(_: Platform, item: &TitleItem, _: bool) -> String {
    item.title.clone()
}

fn splitter(config: PushConfig) -> BatchSplitter {
    BatchSplitter::new(config)
        .with_clock(clock())
        .with_formatter(plain_title)
}

fn items(prefix: &str, n: usize) -> Vec<TitleItem> {
    (1..=n)
        .map(|i| TitleItem::new(format!("{prefix}{i}"), "Weibo"))
        .collect()
}

// ============================================================================
// Scenario 1: everything fits
// ============================================================================

#[test]
fn test_single_group_fits_one_batch() {
    let report = ReportData::new().with_stat(StatGroup::new("AI", items("headline-", 3)));

    let batches = splitter(PushConfig::default()).split_with_budget(&report, Platform::Ntfy, 4000, None);

    assert_eq!(batches.len(), 1);
    let batch = &batches[0];
    assert!(batch.starts_with("**总新闻数：** 3\n\n📊 **热点词汇统计**\n\n📌 [1/1] **AI** : 3 条\n\n"));
    for i in 1..=3 {
        assert!(batch.contains(&format!("  {i}. headline-{i}\n")));
    }
    assert!(batch.ends_with("> 更新时间：2025-01-15 09:30:00"));
    assert!(!batch.contains("⚠️"));
}

// ============================================================================
// Scenario 2: one large group over a small budget
// ============================================================================

#[test]
fn test_large_group_is_split_with_repeated_headers() {
    // ~80 bytes per formatted line
    let titles = (1..=50)
        .map(|i| TitleItem::new(format!("{:02} {}", i, "x".repeat(70)), "Weibo"))
        .collect();
    let report = ReportData::new().with_stat(StatGroup::new("AI", titles));

    let batches = splitter(PushConfig::default()).split_with_budget(&report, Platform::Ntfy, 500, None);

    assert!(batches.len() > 1);
    let prefix = "**总新闻数：** 50\n\n📊 **热点词汇统计**\n\n📌 [1/1] **AI** : 50 条\n\n";
    for batch in &batches {
        assert!(batch.len() <= 500, "batch of {} bytes", batch.len());
        assert!(batch.starts_with(prefix), "missing re-header in {batch:?}");
        assert!(batch.ends_with("> 更新时间：2025-01-15 09:30:00"));
    }
    // first item directly follows the group header
    assert!(batches[0][prefix.len()..].starts_with("  1. 01 "));

    let joined = batches.concat();
    for i in 1..=50 {
        assert_eq!(joined.matches(&format!(". {:02} x", i)).count(), 1, "item {i}");
    }
}

// ============================================================================
// Scenario 3: truncation keeps whole leading groups
// ============================================================================

#[test]
fn test_truncation_drops_trailing_groups() {
    let report = ReportData::new()
        .with_stat(StatGroup::new("first", items("a", 3)))
        .with_stat(StatGroup::new("second", items("b", 3)));

    let prepared = preprocess(&report, true, 2, Layout::Batched);
    assert_eq!(prepared.stats.len(), 1);
    assert_eq!(prepared.stats[0].word, "first");
    assert_eq!(prepared.stats[0].titles.len(), 2);

    let batches = splitter(PushConfig::default().with_max_total_items(2)).split(&report, Platform::Ntfy, None);
    assert_eq!(batches.len(), 1);
    assert!(batches[0].contains("  1. a1\n"));
    assert!(batches[0].contains("  2. a2\n"));
    assert!(!batches[0].contains("a3"));
    assert!(!batches[0].contains("second"));
}

// ============================================================================
// Scenario 4: failed sources alone are content
// ============================================================================

#[test]
fn test_failed_sources_only() {
    let report = ReportData::new()
        .with_failed_id("zhihu")
        .with_failed_id("baidu");

    for budget in [4000, 120] {
        let batches = splitter(PushConfig::default()).split_with_budget(&report, Platform::Ntfy, budget, None);
        assert!(!batches.is_empty());
        for batch in &batches {
            assert!(batch.starts_with("**总新闻数：** 0\n\n⚠️ **数据获取失败的平台：**\n\n"));
            assert!(!batch.contains("📭"));
        }
        let joined = batches.concat();
        assert!(joined.contains("  • zhihu\n"));
        assert!(joined.contains("  • baidu\n"));
    }
}

// ============================================================================
// Scenario 5: hidden statistics without a cap
// ============================================================================

#[test]
fn test_hidden_stats_without_cap_are_cleared_when_splitting() {
    let report = ReportData::new().with_stat(StatGroup::new("AI", items("a", 3)));
    let config = PushConfig::default().with_show_stats(false).with_max_total_items(0);

    let batches = splitter(config.clone()).split(&report, Platform::Ntfy, None);
    assert_eq!(
        batches,
        vec!["**总新闻数：** 0\n\n📭 暂无匹配的热点词汇\n\n\n\n> 更新时间：2025-01-15 09:30:00".to_string()]
    );

    // The single-message layout flattens the same input instead.
    let rendered = ContentRenderer::new(config)
        .with_clock(clock())
        .with_formatter(plain_title)
        .render(&report, Platform::Ntfy, None);
    assert!(rendered.contains("1. a1\n2. a2\n3. a3\n"));
    assert!(!rendered.contains("📭"));
}

// ============================================================================
// Composer across platforms
// ============================================================================

#[test]
fn test_every_platform_produces_bounded_messages() {
    let mut report = ReportData::new();
    for g in 0..6 {
        let titles = (0..15)
            .map(|i| {
                TitleItem::new(format!("热点 {g}-{i} 标题"), "微博")
                    .with_url(format!("https://example.com/{g}/{i}"))
                    .with_ranks(vec![i + 1, i + 3])
                    .with_count(2)
                    .with_time_display("08:00 ~ 10:30")
            })
            .collect();
        report = report.with_stat(StatGroup::new(format!("词{g}"), titles));
    }
    report = report
        .with_new_titles(SourceGroup::new("知乎", items("new-", 10)))
        .with_failed_id("bilibili");

    let composer = MessageComposer::new(PushConfig::default())
        .with_clock(clock())
        .with_budget(1500);

    for platform in Platform::all() {
        let messages = composer.compose(&report, *platform, None);
        assert!(messages.len() > 1, "{platform} should split");
        assert!(
            check_batch_sizes(&messages, 1500).is_empty(),
            "{platform} produced an oversized batch"
        );
        let joined = messages.concat();
        for g in 0..6 {
            for i in 0..15 {
                assert_eq!(joined.matches(&format!("热点 {g}-{i} 标题")).count(), 1);
            }
        }
    }
}

#[test]
fn test_update_notice_in_every_batch() {
    let report = ReportData::new().with_new_titles(SourceGroup::new("Weibo", items("headline-", 40)));
    let info = UpdateInfo::new("3.1.0", "3.0.2");

    let batches = splitter(PushConfig::default()).split_with_budget(&report, Platform::Slack, 400, Some(&info));
    assert!(batches.len() > 1);
    for batch in &batches {
        assert!(batch.ends_with("_TrendRadar 发现新版本 *3.1.0*，当前 *3.0.2*_"), "{batch:?}");
    }
}

#[test]
fn test_english_locale() {
    let report = ReportData::new()
        .with_stat(StatGroup::new("AI", items("a", 1)))
        .with_failed_id("zhihu");
    let config = PushConfig::default().with_locale(Locale::En);

    let batches = splitter(config).split(&report, Platform::Telegram, None);
    assert_eq!(batches.len(), 1);
    assert!(!batches[0].contains("总新闻数"));
    assert!(batches[0].contains("Updated: 2025-01-15 09:30:00"));
}

#[test]
fn test_report_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.json");
    std::fs::write(
        &path,
        r#"{
  "stats": [
    {"word": "AI", "count": 1, "titles": [
      {"title": "Model released", "source_name": "HN", "url": "https://example.com", "ranks": [2]}
    ]}
  ],
  "failed_ids": ["zhihu"]
}"#,
    )
    .unwrap();

    let report = ReportData::from_json_file(&path).unwrap();
    assert_eq!(report.stats[0].titles[0].rank_threshold, 5);

    let batches = splitter(PushConfig::default()).split(&report, Platform::Ntfy, None);
    assert!(batches[0].contains("  1. Model released\n"));
    assert!(batches[0].contains("  • zhihu\n"));
}
