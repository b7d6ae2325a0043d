//! Encoding metadata back into a front matter block

use newsletter_rs::front_matter::parse_front_matter;
use newsletter_rs::{Metadata, MetadataValue, Record};

fn sample() -> Metadata {
    let mut metadata = Metadata::new();
    metadata.insert("title", MetadataValue::Scalar("Weekly: issue 42".into()));
    metadata.insert("layout", MetadataValue::Scalar("newsletter".into()));
    metadata.insert(
        "categories",
        MetadataValue::ScalarList(vec!["rust".into(), "news".into()]),
    );
    metadata.insert(
        "posts",
        MetadataValue::RecordList(vec![
            Record::new()
                .with("title", "First")
                .with("url", "https://example.com/1")
                .with_list("tags", ["featured", "release"]),
            Record::new(),
            Record::new().with("title", "Third"),
        ]),
    );
    metadata
}

#[test]
fn test_encoded_block_decodes_to_same_metadata() {
    let metadata = sample();
    assert_eq!(parse_front_matter(&metadata.to_front_matter()), metadata);
}

#[test]
fn test_keys_are_sorted() {
    let block = sample().to_front_matter();
    let keys: Vec<&str> = block
        .lines()
        .filter(|l| !l.starts_with(' ') && l.contains(':'))
        .filter_map(|l| l.split(':').next())
        .collect();

    assert_eq!(keys, vec!["categories", "layout", "posts", "title"]);
}

#[test]
fn test_newlines_in_values_are_folded() {
    let mut metadata = Metadata::new();
    metadata.insert("title", MetadataValue::Scalar("two\nlines".into()));

    let block = metadata.to_front_matter();
    assert_eq!(block, "---\ntitle: \"two lines\"\n---\n");
    assert_eq!(parse_front_matter(&block).get_str("title"), Some("two lines"));
}

#[test]
fn test_empty_metadata() {
    let block = Metadata::new().to_front_matter();
    assert_eq!(block, "---\n---\n");
    assert!(parse_front_matter(&block).is_empty());
}
