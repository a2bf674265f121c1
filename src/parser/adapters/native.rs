//! diagnorm's own JSON, as written by `parse --format json` and `run`.
//!
//! Accepts a report object (`{"issues": [...], "errors": [...]}`) or a bare
//! array of issues. Every issue key is optional; the issue's own `origin`
//! wins over `native`.

use crate::error::{ParseError, RecordError};
use crate::issue::{Issue, IssueBuilder, IssueRecord};
use crate::parser::JsonAdapter;
use serde_json::{Map, Value};

#[derive(Debug, Default)]
pub struct NativeAdapter;

impl JsonAdapter for NativeAdapter {
    fn id(&self) -> &'static str {
        "native"
    }

    fn name(&self) -> &'static str {
        "diagnorm Native Format"
    }

    fn records<'v>(&self, document: &'v Value) -> Result<&'v [Value], ParseError> {
        let issues = match document {
            Value::Object(report) => report.get("issues"),
            other => Some(other),
        };
        issues
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .ok_or_else(|| ParseError::UnexpectedShape {
                expected: "a report object or a JSON array of issues".to_string(),
            })
    }

    fn extract(
        &self,
        object: &Map<String, Value>,
        builder: &mut IssueBuilder,
    ) -> Result<Issue, RecordError> {
        let record: IssueRecord = serde_json::from_value(Value::Object(object.clone()))
            .map_err(|e| RecordError::parsing(e.to_string()))?;
        record.apply(builder);
        Ok(builder.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::{Report, Severity};
    use crate::parser::adapters::Gcc4Adapter;
    use crate::parser::{IssueParser, JsonParser, ParseOptions, PatternParser};

    fn parse(input: &str) -> Report {
        JsonParser::new(NativeAdapter).parse(input).unwrap()
    }

    #[test]
    fn test_reads_back_written_report() {
        let original = PatternParser::new(Gcc4Adapter::new().unwrap(), ParseOptions::default())
            .parse("src/a.c:7:3: warning: unused variable 'x' [-Wunused-variable]\nsrc/b.c:1: error: boom\n")
            .unwrap();
        let written = serde_json::to_string_pretty(&original).unwrap();

        let report = parse(&written);
        assert_eq!(report.issues(), original.issues());
        assert_eq!(report.issues()[0].origin(), "gcc4");
    }

    #[test]
    fn test_bare_array_and_defaults() {
        let report = parse(
            r#"[{"file_name":"a.f90","line_start":3,"severity":"WARNING_HIGH"}, {}, 5]"#,
        );

        assert_eq!(report.len(), 2);
        let issue = &report.issues()[0];
        assert_eq!(issue.file_name(), "a.f90");
        assert_eq!(issue.line_end(), 3);
        assert_eq!(issue.severity(), Severity::WarningHigh);
        assert_eq!(issue.origin(), "native");
        assert_eq!(report.issues()[1].message(), "-");
        assert_eq!(report.errors(), &["element 2 is not a JSON object".to_string()]);
    }

    #[test]
    fn test_wrongly_typed_field_is_a_record_error() {
        let report = parse(r#"{"issues":[{"line_start":"twelve"},{"message":"ok"}],"errors":[]}"#);

        assert_eq!(report.len(), 1);
        assert_eq!(report.errors().len(), 1);
        assert!(report.errors()[0].starts_with("element 0: "));
    }

    #[test]
    fn test_rejects_object_without_issues() {
        let err = JsonParser::new(NativeAdapter)
            .parse(r#"{"errors":[]}"#)
            .unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedShape { .. }));
    }
}
