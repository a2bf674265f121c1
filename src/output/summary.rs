use crate::error::OutputError;
use crate::issue::Severity;
use crate::runner::{InputStatus, RunReport};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryReport {
    pub timestamp: String,
    pub duration_sec: f64,
    pub inputs: Vec<InputSummary>,
    pub totals: BTreeMap<Severity, usize>,
    pub failed: Vec<String>,
    pub exit_code: i32,
    pub report_dir: PathBuf,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct InputSummary {
    pub name: String,
    pub tool: String,
    pub status: String,
    pub duration_sec: f64,
    pub issues: BTreeMap<Severity, usize>,
    pub errors: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

pub fn write_summary(
    report_dir: &Path,
    run_report: &RunReport,
    fail_on: Option<Severity>,
) -> Result<SummaryReport, OutputError> {
    // Ensure report directory exists (needed when every input failed)
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let summary = build_summary(run_report, report_dir.to_path_buf(), fail_on);

    // Write JSON
    let json_path = report_dir.join("summary.json");
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    // Write Markdown
    let md_path = report_dir.join("summary.md");
    let md = build_summary_markdown(&summary);
    fs::write(&md_path, md).map_err(OutputError::WriteReport)?;

    Ok(summary)
}

fn build_summary(
    run_report: &RunReport,
    report_dir: PathBuf,
    fail_on: Option<Severity>,
) -> SummaryReport {
    let mut inputs = Vec::new();
    let mut failed = Vec::new();

    for result in &run_report.input_results {
        let (status, reason) = match &result.status {
            InputStatus::Completed => ("completed".to_string(), None),
            InputStatus::Failed { error } => {
                failed.push(result.name.clone());
                ("failed".to_string(), Some(error.clone()))
            }
        };

        inputs.push(InputSummary {
            name: result.name.clone(),
            tool: result.tool.clone(),
            status,
            duration_sec: result.duration.as_secs_f64(),
            issues: result.report.severity_counts(),
            errors: result.report.errors().len(),
            reason,
        });
    }

    let exit_code = match fail_on {
        Some(threshold) if run_report.count_at_least(threshold) > 0 => 1,
        _ => 0,
    };

    SummaryReport {
        timestamp: Utc::now().to_rfc3339(),
        duration_sec: run_report.total_duration.as_secs_f64(),
        inputs,
        totals: run_report.totals(),
        failed,
        exit_code,
        report_dir,
    }
}

fn build_summary_markdown(summary: &SummaryReport) -> String {
    let mut md = String::new();

    md.push_str("# diagnorm Summary\n\n");
    md.push_str(&format!("**Generated:** {}\n", summary.timestamp));
    md.push_str(&format!(
        "**Report Dir:** {}\n",
        summary.report_dir.display()
    ));
    md.push_str(&format!("**Duration:** {:.1}s\n\n", summary.duration_sec));

    // Totals, worst first
    md.push_str("## Totals\n\n");
    md.push_str("| Severity | Count |\n");
    md.push_str("|----------|-------|\n");
    for (severity, count) in summary.totals.iter().rev() {
        md.push_str(&format!("| {} | {} |\n", severity, count));
    }
    md.push('\n');

    md.push_str("## Inputs\n\n");
    md.push_str("| Input | Tool | Status | Issues | Errors |\n");
    md.push_str("|-------|------|--------|--------|--------|\n");

    for input in &summary.inputs {
        let status_icon = match input.status.as_str() {
            "completed" => "✅",
            "failed" => "❌",
            _ => "❓",
        };
        let status_str = if let Some(reason) = &input.reason {
            format!("{} {} ({})", status_icon, input.status, reason)
        } else {
            format!("{} {}", status_icon, input.status)
        };
        let issue_count: usize = input.issues.values().sum();

        md.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            input.name, input.tool, status_str, issue_count, input.errors
        ));
    }

    if summary.exit_code != 0 {
        md.push_str("\n## Threshold exceeded\n\n");
        md.push_str("See individual input reports for details.\n");
    }

    md
}
