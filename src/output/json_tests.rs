use super::*;
use crate::output::{FarmSummary, ValidationReport};

#[test]
fn json_output_is_valid_and_complete() {
    let report = ValidationReport {
        farms: vec![FarmSummary {
            name: "publish".to_string(),
            file_name: "dispatcher.00-publish.inc.any".to_string(),
            renderers: 1,
            filters: 1,
            cache: true,
            secure: false,
        }],
    };
    let output = JsonFormatter.format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();

    assert_eq!(value["summary"]["total_farms"], 1);
    assert_eq!(value["farms"][0]["name"], "publish");
    assert_eq!(value["farms"][0]["file_name"], "dispatcher.00-publish.inc.any");
    assert_eq!(value["farms"][0]["cache"], true);
    assert_eq!(value["farms"][0]["secure"], false);
}

#[test]
fn json_output_for_empty_report() {
    let report = ValidationReport { farms: Vec::new() };
    let output = JsonFormatter.format(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(value["summary"]["total_farms"], 0);
    assert!(value["farms"].as_array().unwrap().is_empty());
}
