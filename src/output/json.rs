use serde::Serialize;

use crate::error::Result;

use super::{OutputFormatter, ValidationReport};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    #[serde(flatten)]
    report: &'a ValidationReport,
}

#[derive(Serialize)]
struct Summary {
    total_farms: usize,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ValidationReport) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                total_farms: report.farms.len(),
            },
            report,
        };
        Ok(serde_json::to_string_pretty(&output)?)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
