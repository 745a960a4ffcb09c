//! Synthetic report generator for stress testing trendpack.
//!
//! Usage: cargo run --features gen-report --bin gen_report -- [items] [output]
//! Example: cargo run --features gen-report --bin gen_report -- 5000 big_report.json
//!
//! Headlines mix CJK text, emoji, markup metacharacters and very long lines
//! so that splitting is exercised near the byte budgets.

use std::env;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use rand::Rng;
use rand::seq::SliceRandom;

use trendpack::report::{ReportData, SourceGroup, StatGroup, TitleItem};
use trendpack::{Result, TrendpackError};

const SOURCES: &[&str] = &[
    "微博",
    "知乎",
    "百度热搜",
    "今日头条",
    "Hacker News",
    "GitHub Trending",
    "华尔街见闻",
    "Bilibili",
];

const WORDS: &[&str] = &[
    "AI", "芯片", "新能源", "比特币", "OpenAI", "地震", "高考", "Rust", "央行", "油价",
];

const FRAGMENTS: &[&str] = &[
    "发布",
    "突破",
    "官方回应",
    "价格暴跌",
    "record high",
    "open source release",
    "🔥🔥🔥",
    "👨‍👩‍👧‍👦",
    "<script>alert(1)</script>",
    "[brackets](and) *stars* _under_",
    "a & b < c > d",
    "|pipes|",
];

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    let count: usize = args.get(1).and_then(|s| s.parse().ok()).unwrap_or(500);
    let output = args.get(2).map(|s| s.as_str()).unwrap_or("synthetic_report.json");

    println!("🧪 Report Generator");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Items:  {}", count);
    println!("   Output: {}", output);
    println!();

    let start = Instant::now();
    let mut rng = rand::thread_rng();
    let report = generate_report(&mut rng, count);

    let file = File::create(output)?;
    let mut writer = BufWriter::with_capacity(1024 * 1024, file);
    serde_json::to_writer_pretty(&mut writer, &report).map_err(TrendpackError::output_json)?;
    writer.flush()?;

    let bytes = std::fs::metadata(output)?.len();
    println!("✅ Done!");
    println!("   Keywords: {}", report.stats.len());
    println!("   Sources:  {}", report.new_titles.len());
    println!("   Size:     {:.2} KB", bytes as f64 / 1024.0);
    println!("   Time:     {:.2}s", start.elapsed().as_secs_f64());
    Ok(())
}

fn generate_report(rng: &mut impl Rng, count: usize) -> ReportData {
    // Two thirds of the items go to keyword groups, the rest are new items.
    let stat_items = count * 2 / 3;
    let new_items = count - stat_items;

    let mut report = ReportData::new();

    let mut remaining = stat_items;
    for word in WORDS {
        if remaining == 0 {
            break;
        }
        let n = rng.gen_range(1..=remaining.min(40));
        remaining -= n;
        let titles = (0..n).map(|i| generate_item(&mut *rng, i)).collect();
        report = report.with_stat(StatGroup::new(*word, titles));
    }

    let mut remaining = new_items;
    for source in SOURCES {
        if remaining == 0 {
            break;
        }
        let n = rng.gen_range(1..=remaining.min(25));
        remaining -= n;
        let titles = (0..n)
            .map(|i| {
                let mut item = generate_item(&mut *rng, i);
                item.source_name = (*source).to_string();
                item.with_new(true)
            })
            .collect();
        report = report.with_new_titles(SourceGroup::new(*source, titles));
    }

    let failed = rng.gen_range(0..3);
    for source in SOURCES.choose_multiple(rng, failed) {
        report = report.with_failed_id(source.to_lowercase().replace(' ', "-"));
    }

    report
}

fn generate_item(rng: &mut impl Rng, i: usize) -> TitleItem {
    let parts = rng.gen_range(1..6);
    let mut title = String::new();
    for _ in 0..parts {
        if let Some(fragment) = FRAGMENTS.choose(rng) {
            title.push_str(fragment);
            title.push(' ');
        }
    }
    // Roughly one in fifty headlines is very long.
    if rng.gen_ratio(1, 50) {
        title.push_str(&"长".repeat(rng.gen_range(200..1500)));
    }
    title.push_str(&format!("#{}", i + 1));

    let source = SOURCES.choose(rng).copied().unwrap_or("unknown");
    let first_rank = rng.gen_range(1..=50);
    let appearances = rng.gen_range(1..4);
    let ranks: Vec<u32> = (0..appearances)
        .map(|k| first_rank + k * rng.gen_range(0..5))
        .collect();

    let mut item = TitleItem::new(title.trim_end(), source)
        .with_ranks(ranks)
        .with_count(rng.gen_range(1..8));
    if rng.gen_bool(0.8) {
        item = item.with_url(format!("https://example.com/news/{}", rng.r#gen::<u32>()));
    }
    if rng.gen_bool(0.3) {
        item = item.with_mobile_url(format!("https://m.example.com/news/{}", rng.r#gen::<u32>()));
    }
    if rng.gen_bool(0.5) {
        let h = rng.gen_range(0..22);
        item = item.with_time_display(format!("{:02}:00 ~ {:02}:30", h, h + 1));
    }
    item
}
