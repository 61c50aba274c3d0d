use super::*;
use crate::config::Farm;

#[test]
fn output_format_from_str() {
    assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
    assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
    assert!("yaml".parse::<OutputFormat>().is_err());
}

#[test]
fn output_format_default_is_text() {
    assert_eq!(OutputFormat::default(), OutputFormat::Text);
}

#[test]
fn farm_summary_reflects_farm() {
    let farm = Farm {
        priority: 50,
        secure: true,
        ..Farm::default()
    };
    let summary = FarmSummary::from_farm("publish", &farm);
    assert_eq!(summary.name, "publish");
    assert_eq!(summary.file_name, "dispatcher.50-publish.inc.any");
    assert_eq!(summary.renderers, 1);
    assert_eq!(summary.filters, 1);
    assert!(!summary.cache);
    assert!(summary.secure);
}

#[test]
fn report_covers_all_farms() {
    let mut config = crate::config::Config::default();
    config.farms.insert("author".to_string(), Farm::default());
    config.farms.insert("publish".to_string(), Farm::default());
    let report = ValidationReport::from_config(&config);
    assert_eq!(report.farms.len(), 2);
    assert_eq!(report.farms[0].name, "author");
    assert_eq!(report.farms[1].name, "publish");
}
