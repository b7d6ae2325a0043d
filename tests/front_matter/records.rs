//! Record list decoding

use newsletter_rs::front_matter::parse_front_matter;
use newsletter_rs::{FieldValue, MetadataValue};

#[test]
fn test_two_records_do_not_share_fields() {
    let doc = "\
---
posts:
  - title: \"First\"
    url: https://example.com/1
    image: /img/1.png
  - title: \"Second\"
    date: 2024-10-01
---
";
    let metadata = parse_front_matter(doc);
    let posts = metadata.get_records("posts").unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].len(), 3);
    assert_eq!(posts[0].get_str("title"), Some("First"));
    assert_eq!(posts[0].get_str("url"), Some("https://example.com/1"));
    assert_eq!(posts[0].get("date"), None);

    assert_eq!(posts[1].len(), 2);
    assert_eq!(posts[1].get_str("title"), Some("Second"));
    assert_eq!(posts[1].get_str("date"), Some("2024-10-01"));
    assert_eq!(posts[1].get("url"), None);
}

#[test]
fn test_record_list_committed_by_next_top_level_key() {
    let doc = "---\nposts:\n  - title: A\n    tags: [x, y]\ntitle: Weekly\n---\n";
    let metadata = parse_front_matter(doc);

    let posts = metadata.get_records("posts").unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(
        posts[0].get("tags"),
        Some(&FieldValue::ScalarList(vec!["x".to_string(), "y".to_string()]))
    );
    assert_eq!(metadata.get_str("title"), Some("Weekly"));
}

#[test]
fn test_record_list_committed_at_end_of_block() {
    let metadata = parse_front_matter("---\nposts:\n  - title: Last\n---\n");
    assert_eq!(metadata.get_records("posts").unwrap().len(), 1);
}

#[test]
fn test_empty_container() {
    let metadata = parse_front_matter("---\nposts:\ntitle: Weekly\n---\n");
    assert_eq!(metadata.get("posts"), Some(&MetadataValue::RecordList(vec![])));
}

#[test]
fn test_bare_item_opens_an_empty_record() {
    let doc = "---\nposts:\n  -\n    title: Later\n  - title: Next\n---\n";
    let posts = parse_front_matter(doc).get_records("posts").unwrap().to_vec();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].get_str("title"), Some("Later"));
    assert_eq!(posts[1].get_str("title"), Some("Next"));
}

#[test]
fn test_partial_records_are_kept() {
    let doc = "---\nposts:\n  - image: /img/a.png\n  - title: Only title\n---\n";
    let posts = parse_front_matter(doc).get_records("posts").unwrap().to_vec();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].get("title"), None);
    assert_eq!(posts[0].get_str("image"), Some("/img/a.png"));
}

#[test]
fn test_nested_field_outside_list_is_ignored() {
    let doc = "---\n  stray: value\ntitle: Weekly\n---\n";
    let metadata = parse_front_matter(doc);

    assert_eq!(metadata.len(), 1);
    assert!(!metadata.contains_key("stray"));
}

#[test]
fn test_list_item_without_container_is_ignored() {
    let metadata = parse_front_matter("---\n- title: orphan\ntitle: Weekly\n---\n");
    assert_eq!(metadata.len(), 1);
    assert_eq!(metadata.get_str("title"), Some("Weekly"));
}

#[test]
fn test_record_field_values_are_unquoted() {
    let doc = "---\nposts:\n  - title: 'Single quoted'\n    description: \"Has: a colon\"\n---\n";
    let posts = parse_front_matter(doc).get_records("posts").unwrap().to_vec();

    assert_eq!(posts[0].get_str("title"), Some("Single quoted"));
    assert_eq!(posts[0].get_str("description"), Some("Has: a colon"));
}

#[test]
fn test_record_line_without_separator_is_ignored() {
    let doc = "---\nposts:\n  - title: A\n    garbage line\n    url: u\n---\n";
    let posts = parse_front_matter(doc).get_records("posts").unwrap().to_vec();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].len(), 2);
    assert_eq!(posts[0].get_str("title"), Some("A"));
    assert_eq!(posts[0].get_str("url"), Some("u"));
}

#[test]
fn test_bare_item_in_record_list_keeps_its_slot() {
    let doc = "---\nposts:\n  - title: A\n  - stray\n  - title: B\n---\n";
    let posts = parse_front_matter(doc).get_records("posts").unwrap().to_vec();

    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].get_str("title"), Some("A"));
    assert!(posts[1].is_empty());
    assert_eq!(posts[2].get_str("title"), Some("B"));
}

#[test]
fn test_scalar_items_before_first_record_keep_their_slots() {
    let doc = "---\nposts:\n  - intro\n  - title: A\n---\n";
    let posts = parse_front_matter(doc).get_records("posts").unwrap().to_vec();

    assert_eq!(posts.len(), 2);
    assert!(posts[0].is_empty());
    assert_eq!(posts[1].get_str("title"), Some("A"));
}
