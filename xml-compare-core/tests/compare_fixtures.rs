use std::path::PathBuf;

use pretty_assertions::assert_eq;
use xml_compare_core::{
    compare_with_options, format_json, format_summary, format_text, parse_file, CompareOptions,
    Reason,
};

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join(path)
}

fn load(name: &str) -> xml_compare_core::XmlNode {
    parse_file(&fixture(&format!("fixtures/{name}"))).expect("fixture should parse")
}

#[test]
fn reformatted_catalog_needs_whitespace_normalization() {
    let left = load("catalog_a.xml");
    let right = load("catalog_reformatted.xml");

    let result = compare_with_options(&left, &right, &CompareOptions::default()).expect("compare");
    assert_eq!(result.reason(), Reason::DifferentNodeContents);
    assert_eq!(result.lhs_node().map(|n| n.name.as_str()), Some("catalog"));

    let normalized = CompareOptions {
        normalize_whitespace: true,
        ..CompareOptions::default()
    };
    let result = compare_with_options(&left, &right, &normalized).expect("compare");
    assert!(result.succeeded());
    assert_eq!(format_text(&result), "equivalent");
}

#[test]
fn reordered_catalog_depends_on_element_order() {
    let left = load("catalog_a.xml");
    let right = load("catalog_reordered.xml");

    let result = compare_with_options(&left, &right, &CompareOptions::default()).expect("compare");
    assert_eq!(result.reason(), Reason::DifferentOrderingOfChildNodes);
    assert_eq!(
        format_summary(&result),
        "succeeded=false reason=different_ordering_of_child_nodes"
    );

    let unordered = CompareOptions {
        element_order: false,
        ..CompareOptions::default()
    };
    assert!(compare_with_options(&left, &right, &unordered)
        .expect("compare")
        .succeeded());
}

#[test]
fn price_change_is_reported_at_the_price_element() {
    let left = load("catalog_a.xml");
    let right = load("catalog_price_change.xml");

    let result = compare_with_options(&left, &right, &CompareOptions::default()).expect("compare");
    assert_eq!(result.reason(), Reason::DifferentNodeContents);
    assert_eq!(
        result.details(),
        "different node contents: lhs-node=<price>44.95</price>; rhs-node=<price>39.95</price>"
    );
    assert!(format_json(&result).contains("\"reason\": \"different_node_contents\""));
}

#[test]
fn spaced_text_matches_compact_text_when_normalized() {
    let left = load("spaced_text.xml");
    let right = load("compact_text.xml");

    let normalized = CompareOptions {
        normalize_whitespace: true,
        ..CompareOptions::default()
    };
    assert!(compare_with_options(&left, &right, &normalized)
        .expect("compare")
        .succeeded());
    assert!(!compare_with_options(&left, &right, &CompareOptions::default())
        .expect("compare")
        .succeeded());
}
