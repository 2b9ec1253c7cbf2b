//! Property-based tests for template rendering.

use femtologging_http::template::{escape_line_breaks, render};
use proptest::prelude::*;
use serde_json::{Value, json};

proptest! {
    #[test]
    fn rendered_values_never_contain_line_breaks(value in "[a-z \r\n]{0,40}") {
        let rendered = render("<{{v}}>", &json!({"v": value}));
        prop_assert!(!rendered.contains(['\r', '\n']));
    }

    #[test]
    fn json_templates_round_trip_multiline_text(value in "[a-zA-Z0-9 .,:;!?\n]{0,40}") {
        let rendered = render(r#"{"m":"{{v}}"}"#, &json!({"v": value}));
        let parsed: Value = serde_json::from_str(&rendered).expect("rendered template parses");
        prop_assert_eq!(parsed["m"].as_str(), Some(value.as_str()));
    }

    #[test]
    fn schemas_without_braces_are_copied(schema in "[^{}]{0,60}", key in "[a-z]{1,8}") {
        prop_assert_eq!(render(&schema, &json!({key: "value"})), schema);
    }

    #[test]
    fn escaping_is_stable_for_plain_text(text in "[^\r\n]{0,60}") {
        prop_assert_eq!(escape_line_breaks(&text), text.as_str());
    }
}
