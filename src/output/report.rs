use crate::config::is_plain_file_name;
use crate::error::OutputError;
use crate::issue::{Issue, Report, Severity};
use crate::runner::{InputResult, InputStatus};
use std::fs;
use std::path::Path;

/// Write a single input's report as JSON and Markdown
pub fn write_input_report(report_dir: &Path, result: &InputResult) -> Result<(), OutputError> {
    if !is_plain_file_name(&result.name) {
        return Err(OutputError::InvalidReportName(result.name.clone()));
    }

    // Ensure directory exists
    fs::create_dir_all(report_dir).map_err(OutputError::CreateDir)?;

    let json_path = report_dir.join(format!("{}.issues.json", result.name));
    let json = serde_json::to_string_pretty(&result.report)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let mut content = format!("# {} ({})\n\n", result.name, result.tool);
    content.push_str(&format!("- **Status:** {}\n", format_status(&result.status)));
    content.push_str(&format!(
        "- **Duration:** {:.2}s\n\n",
        result.duration.as_secs_f64()
    ));
    content.push_str(&render_markdown(&result.report));

    let md_path = report_dir.join(format!("{}.md", result.name));
    fs::write(&md_path, content).map_err(OutputError::WriteReport)?;

    Ok(())
}

/// Markdown listing of all issues and errors of a report
pub fn render_markdown(report: &Report) -> String {
    let mut content = String::new();

    // Severity counts
    content.push_str("| Severity | Count |\n");
    content.push_str("|----------|-------|\n");
    for (severity, count) in report.severity_counts().iter().rev() {
        content.push_str(&format!("| {} | {} |\n", severity, count));
    }
    content.push_str("\n---\n\n");

    if report.is_empty() {
        content.push_str("*No issues*\n");
    } else {
        content.push_str("## Issues\n\n");
        for issue in report {
            content.push_str(&format!(
                "### [{}] {}\n\n",
                issue.severity(),
                first_line(issue.message())
            ));
            content.push_str(&format!("- **Location:** `{}`\n", location(issue)));
            if issue.category() != "-" {
                content.push_str(&format!("- **Category:** `{}`\n", issue.category()));
            }
            if issue.issue_type() != "-" {
                content.push_str(&format!("- **Type:** `{}`\n", issue.issue_type()));
            }
            if issue.package_name() != "-" {
                content.push_str(&format!("- **Package:** `{}`\n", issue.package_name()));
            }
            if issue.has_fingerprint() {
                content.push_str(&format!("- **Fingerprint:** `{}`\n", issue.fingerprint()));
            }
            content.push('\n');

            if issue.message().contains('\n') {
                content.push_str(&format!("```\n{}\n```\n\n", issue.message()));
            }
            content.push_str("---\n\n");
        }
    }

    if report.has_errors() {
        content.push_str("## Errors\n\n");
        for error in report.errors() {
            content.push_str(&format!("- {}\n", error));
        }
    }

    content
}

/// Compiler-style one line per issue, errors last
pub fn render_text(report: &Report) -> String {
    let mut content = String::new();
    for issue in report {
        content.push_str(&format!(
            "{}: {}: [{}] {}\n",
            location(issue),
            severity_label(issue.severity()),
            issue.category(),
            issue.message().replace('\n', "\n    ")
        ));
    }
    for error in report.errors() {
        content.push_str(&format!("error: {}\n", error));
    }
    content.push_str(&format!(
        "{} issues, {} errors\n",
        report.len(),
        report.errors().len()
    ));
    content
}

fn location(issue: &Issue) -> String {
    match (issue.line_start(), issue.column_start()) {
        (0, _) => issue.file_name().to_string(),
        (line, 0) => format!("{}:{}", issue.file_name(), line),
        (line, column) => format!("{}:{}:{}", issue.file_name(), line, column),
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or(message)
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::WarningHigh => "warning (high)",
        Severity::WarningNormal => "warning",
        Severity::WarningLow => "warning (low)",
    }
}

fn format_status(status: &InputStatus) -> String {
    match status {
        InputStatus::Completed => "✅ Completed".to_string(),
        InputStatus::Failed { error } => format!("❌ Failed ({})", error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::IssueBuilder;
    use std::time::Duration;

    fn sample() -> Report {
        let mut report = Report::new();
        report.add(
            IssueBuilder::new()
                .set_file_name("a.c")
                .set_line_start(3)
                .set_column_start(7)
                .set_category("Warning")
                .set_severity(Severity::WarningNormal)
                .set_message("unused\n  detail")
                .build(),
        );
        report.add(
            IssueBuilder::new()
                .set_file_name("Dockerfile")
                .set_category("DL3006")
                .set_severity(Severity::Error)
                .set_message("pin version")
                .build(),
        );
        report.log_error("element 2 is not a JSON object");
        report
    }

    #[test]
    fn test_render_text() {
        let text = render_text(&sample());
        let lines: Vec<_> = text.lines().collect();

        assert_eq!(lines[0], "a.c:3:7: warning: [Warning] unused");
        assert_eq!(lines[1], "      detail");
        assert_eq!(lines[2], "Dockerfile: error: [DL3006] pin version");
        assert_eq!(lines[3], "error: element 2 is not a JSON object");
        assert_eq!(lines[4], "2 issues, 1 errors");
    }

    #[test]
    fn test_render_markdown() {
        let md = render_markdown(&sample());

        assert!(md.contains("| ERROR | 1 |"));
        assert!(md.contains("### [WARNING_NORMAL] unused"));
        assert!(md.contains("- **Location:** `a.c:3:7`"));
        assert!(md.contains("## Errors"));
        assert!(render_markdown(&Report::new()).contains("*No issues*"));
    }

    #[test]
    fn test_write_input_report() {
        let dir = tempfile::tempdir().unwrap();
        let result = InputResult {
            name: "build".to_string(),
            tool: "gcc4".to_string(),
            status: InputStatus::Completed,
            report: sample(),
            duration: Duration::from_millis(5),
        };

        write_input_report(dir.path(), &result).unwrap();

        let json = fs::read_to_string(dir.path().join("build.issues.json")).unwrap();
        let report: Report = serde_json::from_str(&json).unwrap();
        assert_eq!(report, result.report);
        assert!(dir.path().join("build.md").exists());
    }

    #[test]
    fn test_write_input_report_stays_in_report_dir() {
        let dir = tempfile::tempdir().unwrap();
        let report_dir = dir.path().join("reports");
        let result = InputResult {
            name: "../escaped".to_string(),
            tool: "gcc4".to_string(),
            status: InputStatus::Completed,
            report: sample(),
            duration: Duration::from_millis(5),
        };

        let err = write_input_report(&report_dir, &result).unwrap_err();
        assert!(matches!(err, OutputError::InvalidReportName(_)));
        assert!(!dir.path().join("escaped.issues.json").exists());
    }
}
