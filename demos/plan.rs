//! Layout planning example
//!
//! Run with: cargo run --example plan [PATH]
//!
//! Without a path, a small built-in newsletter is used.

use newsletter_rs::extract::extract_entries;
use newsletter_rs::{DEFAULT_BATCH_SIZE, Placement, plan_layout};

const SAMPLE: &str = r#"---
layout: newsletter
title: "Weekly"
type: "blog"
posts:
  - title: "Release notes"
    url: "https://example.com/release"
    image: "/assets/images/release.png"
    date: "2024-10-07"
    tags: ["featured", "release"]
  - title: "Parser internals"
    url: "https://example.com/parser"
    date: "2024-10-06"
  - title: "Benchmarks"
    url: "https://example.com/bench"
    date: "2024-10-05"
  - title: "Community update"
    url: "https://example.com/community"
    date: "2024-10-04"
---
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    let content = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE.to_string(),
    };

    let extraction = extract_entries(&content);
    println!(
        "Extracted {} entries ({} strategy)",
        extraction.entries.len(),
        extraction.strategy
    );

    let plan = plan_layout(extraction.entries, DEFAULT_BATCH_SIZE)?;
    for entry in plan.entries() {
        let marker = match entry.placement {
            Some(Placement::Single) => "[ wide ]",
            Some(Placement::Batched) => "[ grid ]",
            None => "[  --  ]",
        };
        println!("{} {}", marker, entry.title);
    }

    let stats = plan.stats();
    println!(
        "\n{} single ({} featured), {} batched",
        stats.single, stats.featured, stats.batched
    );

    Ok(())
}
