mod orchestrator;

pub use orchestrator::*;

use crate::config::Input;
use crate::error::DiagnormError;
use crate::issue::{Issue, Report};
use crate::parser::{registry, ParseOptions};
use std::fs;
use tracing::debug;

/// Reads one input and parses it with a fresh parser for its tool.
pub fn parse_input(
    input: &Input,
    options: ParseOptions,
    fingerprint: bool,
) -> Result<Report, DiagnormError> {
    let mut parser = registry::create(&input.tool, options)?;
    let content = fs::read_to_string(&input.path)?;
    debug!(
        "Parsing {:?} ({} bytes) with {}",
        input.path,
        content.len(),
        parser.name()
    );

    let report = parser.parse(&content)?;
    Ok(if fingerprint {
        with_fingerprints(report)
    } else {
        report
    })
}

/// Same report, with content fingerprints filled in where the tool gave none.
pub fn with_fingerprints(report: Report) -> Report {
    let mut fingerprinted = Report::new();
    for error in report.errors() {
        fingerprinted.log_error(error.clone());
    }
    for issue in report {
        fingerprinted.add(Issue::with_content_fingerprint(issue));
    }
    fingerprinted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn input(tool: &str, content: &str) -> (tempfile::NamedTempFile, Input) {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        let input = Input {
            tool: tool.to_string(),
            path: file.path().to_path_buf(),
            name: None,
        };
        (file, input)
    }

    #[test]
    fn test_parse_input_with_fingerprints() {
        let (_file, input) = input("gcc4", "a.c:1:2: warning: unused [-Wunused]\nbroken line\n");

        let report = parse_input(&input, ParseOptions::default(), true).unwrap();
        assert_eq!(report.len(), 1);
        assert!(report.issues()[0].has_fingerprint());

        let plain = parse_input(&input, ParseOptions::default(), false).unwrap();
        assert!(!plain.issues()[0].has_fingerprint());
    }

    #[test]
    fn test_parse_input_failures() {
        let (_file, invalid) = input("hadolint", "not json");
        assert!(matches!(
            parse_input(&invalid, ParseOptions::default(), false),
            Err(DiagnormError::Parse(_))
        ));

        let (_file, unknown) = input("msbuild", "");
        assert!(matches!(
            parse_input(&unknown, ParseOptions::default(), false),
            Err(DiagnormError::Registry(_))
        ));

        let missing = Input {
            tool: "gcc4".to_string(),
            path: "/nonexistent/build.log".into(),
            name: None,
        };
        assert!(matches!(
            parse_input(&missing, ParseOptions::default(), false),
            Err(DiagnormError::Io(_))
        ));
    }

    #[test]
    fn test_with_fingerprints_keeps_errors_and_order() {
        let mut report = Report::new();
        report.log_error("element 3 is not a JSON object");
        report.add(crate::issue::IssueBuilder::new().set_message("b").build());
        report.add(crate::issue::IssueBuilder::new().set_message("a").build());

        let fingerprinted = with_fingerprints(report);
        assert_eq!(fingerprinted.errors().len(), 1);
        let messages: Vec<_> = fingerprinted.iter().map(|i| i.message()).collect();
        assert_eq!(messages, vec!["b", "a"]);
    }
}
