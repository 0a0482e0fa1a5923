use serde::Serialize;

use crate::assert::{Finding, Outcome};
use crate::checker::CheckResult;
use crate::error::Result;

use super::{OutputFormatter, Tally};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    results: Vec<FileResult<'a>>,
}

#[derive(Serialize)]
struct Summary {
    total_files: usize,
    passed: usize,
    failed: usize,
}

#[derive(Serialize)]
struct FileResult<'a> {
    path: String,
    status: &'static str,
    findings: Vec<JsonFinding<'a>>,
}

#[derive(Serialize)]
struct JsonFinding<'a> {
    kind: &'a str,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, results: &[CheckResult]) -> Result<String> {
        let tally = Tally::of(results);
        let output = JsonOutput {
            summary: Summary {
                total_files: tally.total,
                passed: tally.passed,
                failed: tally.failed,
            },
            results: results.iter().map(convert_result).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_result(result: &CheckResult) -> FileResult<'_> {
    FileResult {
        path: result.path().display().to_string(),
        status: if result.is_passed() { "passed" } else { "failed" },
        findings: result.findings().iter().map(convert_finding).collect(),
    }
}

fn convert_finding(finding: &Finding) -> JsonFinding<'_> {
    let message = match &finding.outcome {
        Outcome::Success => None,
        Outcome::Failure { message } => Some(message.clone()),
        composite @ Outcome::Composite { .. } => {
            Some(composite.describe()).filter(|m| !m.is_empty())
        }
    };
    JsonFinding {
        kind: &finding.kind,
        status: if finding.is_passing() {
            "success"
        } else {
            "failure"
        },
        message,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
