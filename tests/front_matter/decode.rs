//! Scalar, list and block boundary decoding

use newsletter_rs::front_matter::{parse_document, parse_front_matter, split_document};
use newsletter_rs::{FieldValue, MetadataValue};

#[test]
fn test_scalars_and_inline_list() {
    let doc = "---\ntitle: \"Weekly\"\ntags: [a, b, c]\n---\nBody\n";
    let metadata = parse_front_matter(doc);

    assert_eq!(
        metadata.get("title"),
        Some(&MetadataValue::Scalar("Weekly".to_string()))
    );
    assert_eq!(
        metadata.get("tags"),
        Some(&MetadataValue::ScalarList(vec![
            "a".to_string(),
            "b".to_string(),
            "c".to_string()
        ]))
    );
    assert_eq!(metadata.len(), 2);
}

#[test]
fn test_no_metadata_block() {
    let doc = "# Just a heading\n\ntitle: not metadata\n";
    let document = parse_document(doc);

    assert!(document.metadata.is_empty());
    assert_eq!(document.body, doc);
}

#[test]
fn test_unclosed_block_is_not_metadata() {
    let doc = "---\ntitle: Weekly\nno closing marker\n";
    assert!(parse_front_matter(doc).is_empty());
    assert_eq!(split_document(doc), (None, doc));
}

#[test]
fn test_body_follows_closing_marker() {
    let document = parse_document("---\ntitle: Weekly\n---\n<p>Hello</p>\n");
    assert_eq!(document.body, "<p>Hello</p>\n");
    assert_eq!(document.metadata.get_str("title"), Some("Weekly"));
}

#[test]
fn test_closing_marker_at_end_of_input() {
    let document = parse_document("---\ntitle: Weekly\n---");
    assert_eq!(document.body, "");
    assert_eq!(document.metadata.get_str("title"), Some("Weekly"));
}

#[test]
fn test_crlf_line_endings() {
    let doc = "---\r\ntitle: \"Weekly\"\r\ntags: [x, y]\r\n---\r\nBody\r\n";
    let metadata = parse_front_matter(doc);

    assert_eq!(metadata.get_str("title"), Some("Weekly"));
    assert_eq!(
        metadata.get_list("tags"),
        Some(&["x".to_string(), "y".to_string()][..])
    );
}

#[test]
fn test_urls_keep_their_colons() {
    let metadata = parse_front_matter("---\nurl: https://example.com:8080/a\n---\n");
    assert_eq!(metadata.get_str("url"), Some("https://example.com:8080/a"));
}

#[test]
fn test_malformed_lines_are_skipped() {
    let doc = "---\njust some words\ntitle: Kept\n: no key\n   \n---\n";
    let metadata = parse_front_matter(doc);

    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata.get_str("title"), Some("Kept"));
}

#[test]
fn test_quoted_values() {
    let doc = "---\na: 'single'\nb: \"double\"\nc: \"mismatched'\nd: [\"x\", 'y', z]\n---\n";
    let metadata = parse_front_matter(doc);

    assert_eq!(metadata.get_str("a"), Some("single"));
    assert_eq!(metadata.get_str("b"), Some("double"));
    assert_eq!(metadata.get_str("c"), Some("\"mismatched'"));
    assert_eq!(
        metadata.get_list("d"),
        Some(&["x".to_string(), "y".to_string(), "z".to_string()][..])
    );
}

#[test]
fn test_block_scalar_list() {
    let doc = "---\ncategories:\n  - rust\n  - \"parsing\"\ntitle: After\n---\n";
    let metadata = parse_front_matter(doc);

    assert_eq!(
        metadata.get("categories"),
        Some(&MetadataValue::ScalarList(vec![
            "rust".to_string(),
            "parsing".to_string()
        ]))
    );
    assert_eq!(metadata.get_str("title"), Some("After"));
}

#[test]
fn test_decoding_is_deterministic() {
    let doc = "---\ntitle: Weekly\nposts:\n  - title: A\n    tags: [x]\n  - title: B\n---\n";
    assert_eq!(parse_front_matter(doc), parse_front_matter(doc));
}

#[test]
fn test_field_value_helpers() {
    assert_eq!(FieldValue::Scalar("x".into()).to_list(), vec!["x".to_string()]);
    assert!(FieldValue::Scalar(String::new()).to_list().is_empty());
    assert_eq!(FieldValue::ScalarList(vec!["a".into()]).as_scalar(), None);
}

#[test]
fn test_quoted_list_items_containing_separator() {
    let doc = "---\nauthors:\n  - \"Doe: John\"\n  - alice\n---\n";
    let metadata = parse_front_matter(doc);

    assert_eq!(
        metadata.get("authors"),
        Some(&MetadataValue::ScalarList(vec![
            "Doe: John".to_string(),
            "alice".to_string()
        ]))
    );
}
