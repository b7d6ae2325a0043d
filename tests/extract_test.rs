//! Entry extraction tests
//!
//! Covers strategy selection and rendered newsletters read back through both
//! strategies.

use newsletter_rs::extract::extract_pattern;
use newsletter_rs::front_matter::split_document;
use newsletter_rs::{
    Entry, FEATURED_TAG, NewsletterKind, RenderOptions, Strategy, extract_entries, plan_layout,
    render_newsletter,
};

fn posts(n: usize) -> Vec<Entry> {
    (1..=n)
        .map(|i| {
            Entry::new(
                format!("Post {}", i),
                format!("https://example.com/posts/{}", i),
                format!("/assets/images/{}.png", i),
                format!("2024-10-{:02}", i),
            )
        })
        .collect()
}

fn strip_placement(entries: &[Entry]) -> Vec<Entry> {
    entries
        .iter()
        .cloned()
        .map(|mut e| {
            e.placement = None;
            e
        })
        .collect()
}

#[test]
fn test_structured_preserves_count_and_order() {
    let doc = "\
---
title: Weekly
posts:
  - title: \"C\"
    url: https://example.com/c
  - title: \"A\"
    url: https://example.com/a
    tags: [featured]
  - title: \"B\"
    link: https://example.com/b
    timestamp: 2024-10-03
---
<div class=\"grid-item\">ignored when posts exist</div>
";
    let extraction = extract_entries(doc);

    assert_eq!(extraction.strategy, Strategy::Structured);
    let titles: Vec<&str> = extraction.entries.iter().map(|e| e.title.as_str()).collect();
    assert_eq!(titles, vec!["C", "A", "B"]);
    assert!(extraction.entries[1].is_featured());
    assert_eq!(extraction.entries[2].link, "https://example.com/b");
    assert_eq!(extraction.entries[2].timestamp, "2024-10-03");
    assert_eq!(extraction.entries[0].image, "");
    assert_eq!(extraction.metadata.get_str("title"), Some("Weekly"));
}

#[test]
fn test_empty_posts_list_stays_structured() {
    let extraction = extract_entries("---\nposts:\n---\n");
    assert_eq!(extraction.strategy, Strategy::Structured);
    assert!(extraction.entries.is_empty());
}

#[test]
fn test_document_without_posts_uses_pattern() {
    let doc = "\
---
title: Old issue
---
<div class=\"grid-item\">
    <a href=\"https://example.com/1\">
        <img src=\"/img/1.png\" alt=\"One &amp; only\">
    </a>
    <h3><a href=\"https://example.com/1\">One</a></h3>
    <p class=\"post-date\"> 2024-09-01 </p>
</div>
";
    let extraction = extract_entries(doc);

    assert_eq!(extraction.strategy, Strategy::Pattern);
    assert_eq!(extraction.entries.len(), 1);
    let entry = &extraction.entries[0];
    assert_eq!(entry.title, "One & only");
    assert_eq!(entry.link, "https://example.com/1");
    assert_eq!(entry.image, "/img/1.png");
    assert_eq!(entry.timestamp, "2024-09-01");
    assert!(entry.tags.is_empty());
}

#[test]
fn test_plain_document_yields_nothing() {
    let extraction = extract_entries("Nothing to see here.\n");
    assert_eq!(extraction.strategy, Strategy::Pattern);
    assert!(extraction.entries.is_empty());
    assert!(extraction.metadata.is_empty());
}

#[test]
fn test_featured_matches_are_prepended_in_reverse() {
    let featured = |n: u32| {
        format!(
            "<div class=\"featured-post\">\n<a href=\"/f{n}\">\n<img src=\"/f{n}.png\" alt=\"Featured {n}\">\n</a>\n<h2>Featured {n}</h2>\n<p class=\"post-date\">d{n}</p>\n</div>\n"
        )
    };
    let grid = "<div class=\"grid-item\">\n<a href=\"/g\">\n<img src=\"/g.png\" alt=\"Grid\">\n</a>\n<h3>Grid</h3>\n<p class=\"post-date\">dg</p>\n</div>\n";
    let body = format!("{}{}{}", featured(1), grid, featured(2));

    let titles: Vec<String> = extract_pattern(&body).into_iter().map(|e| e.title).collect();
    assert_eq!(titles, vec!["Featured 2", "Featured 1", "Grid"]);
}

#[test]
fn test_rendered_newsletter_round_trips_structured() {
    let mut entries = posts(7);
    entries[3] = entries[3]
        .clone()
        .with_tags(["release", FEATURED_TAG])
        .with_description("Notes: \"quoted\" & <escaped>");
    let plan = plan_layout(entries, 4).unwrap();
    let options = RenderOptions::new(NewsletterKind::Blog, "Weekly", "2024-10-07");

    let doc = render_newsletter(&plan, &options);
    let extraction = extract_entries(&doc);

    assert_eq!(extraction.strategy, Strategy::Structured);
    assert_eq!(extraction.entries, strip_placement(plan.entries()));
    assert_eq!(extraction.metadata.get_str("type"), Some("blog"));
    assert_eq!(extraction.metadata.get_str("date"), Some("2024-10-07"));
}

#[test]
fn test_rendered_body_round_trips_pattern() {
    let plan = plan_layout(posts(10), 4).unwrap();
    let options = RenderOptions::new(NewsletterKind::Blog, "Weekly & more", "2024-10-07");
    let doc = render_newsletter(&plan, &options);
    let (_, body) = split_document(&doc);

    let extracted = extract_pattern(body);
    let titles: Vec<&str> = extracted.iter().map(|e| e.title.as_str()).collect();

    // Wide sections hold posts 1 and 6; they are prepended last-first
    assert_eq!(
        titles,
        vec![
            "Post 6", "Post 1", "Post 2", "Post 3", "Post 4", "Post 5", "Post 7", "Post 8",
            "Post 9", "Post 10"
        ]
    );
    assert_eq!(extracted[0].link, "https://example.com/posts/6");
    assert_eq!(extracted[0].image, "/assets/images/6.png");
    assert_eq!(extracted[0].timestamp, "2024-10-06");
}

#[test]
fn test_mosaic_links_carry_tracking_params() {
    let plan = plan_layout(posts(2), 4).unwrap();
    let options = RenderOptions::new(NewsletterKind::Mosaic, "Mosaic", "2024-10-07");
    let doc = render_newsletter(&plan, &options);

    let (_, body) = split_document(&doc);
    let extracted = extract_pattern(body);
    assert_eq!(extracted.len(), 2);
    assert!(extracted
        .iter()
        .all(|e| e.link.ends_with("?mtm_campaign=newsletter&mtm_source=mosaic")));

    // Structured posts keep the plain link
    let structured = extract_entries(&doc);
    assert_eq!(structured.entries[0].link, "https://example.com/posts/1");
}
