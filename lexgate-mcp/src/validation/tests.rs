// lexgate-mcp/src/validation/tests.rs
// ============================================================================
// Module: Argument Validation Unit Tests
// Description: Unit tests for typed argument extraction.
// Purpose: Validate field naming, type checks, and date parsing.
// Dependencies: lexgate-mcp, lexgate-core
// ============================================================================

#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    reason = "Test-only assertions favor direct unwrap/expect for clarity."
)]

use lexgate_core::CitationStyle;
use lexgate_core::ToolErrorCode;
use serde_json::Value;
use serde_json::json;

use super::Arguments;

#[test]
fn required_string_trims_and_rejects_empty() {
    let value = json!({"country": "  de  ", "blank": "   "});
    let args = Arguments::new(&value).expect("arguments");
    assert_eq!(args.required_str("country").expect("country"), "de");

    let err = args.required_str("blank").expect_err("empty rejected");
    assert_eq!(err.code, ToolErrorCode::InvalidArguments);
    assert!(err.message.contains("blank"));

    let err = args.required_str("missing").expect_err("missing rejected");
    assert!(err.message.contains("missing"));
}

#[test]
fn wrong_types_name_the_offending_field() {
    let value = json!({"country": 7, "limit": "ten", "dryRun": "yes"});
    let args = Arguments::new(&value).expect("arguments");
    assert!(args.required_str("country").expect_err("type").message.contains("country"));
    assert!(args.optional_limit("limit").expect_err("type").message.contains("limit"));
    assert!(args.optional_bool("dryRun").expect_err("type").message.contains("dryRun"));
}

#[test]
fn optional_fields_absent_or_null_are_none() {
    let value = json!({"court": null});
    let args = Arguments::new(&value).expect("arguments");
    assert_eq!(args.optional_str("court").expect("court"), None);
    assert_eq!(args.optional_limit("limit").expect("limit"), None);
    assert_eq!(args.optional_bool("dryRun").expect("dryRun"), None);
    assert_eq!(args.optional_date("asOfDate").expect("date"), None);
}

#[test]
fn limits_must_be_non_negative_integers() {
    let value = json!({"limit": 20, "negative": -3, "fraction": 2.5});
    let args = Arguments::new(&value).expect("arguments");
    assert_eq!(args.optional_limit("limit").expect("limit"), Some(20));
    assert!(args.optional_limit("negative").is_err());
    assert!(args.optional_limit("fraction").is_err());
}

#[test]
fn dates_must_be_iso_calendar_dates() {
    let value = json!({"ok": "2024-02-29", "bad": "2023-02-29", "worse": "24-1-1"});
    let args = Arguments::new(&value).expect("arguments");
    assert_eq!(args.optional_date("ok").expect("ok"), Some("2024-02-29"));
    assert!(args.optional_date("bad").is_err());
    assert!(args.optional_date("worse").is_err());
}

#[test]
fn style_defaults_and_validates() {
    let value = json!({"style": "short"});
    let args = Arguments::new(&value).expect("arguments");
    assert_eq!(args.optional_style("style").expect("style"), CitationStyle::Short);

    let value = json!({});
    let args = Arguments::new(&value).expect("arguments");
    assert_eq!(args.optional_style("style").expect("style"), CitationStyle::Default);

    let value = json!({"style": "fancy"});
    let args = Arguments::new(&value).expect("arguments");
    assert!(args.optional_style("style").is_err());
}

#[test]
fn null_arguments_act_as_an_empty_object() {
    let args = Arguments::new(&Value::Null).expect("arguments");
    assert!(args.required_str("country").is_err());
}

#[test]
fn non_object_arguments_are_rejected() {
    assert!(Arguments::new(&json!([1, 2])).is_err());
    assert!(Arguments::new(&json!("de")).is_err());
}
