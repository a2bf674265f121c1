//! Robot Framework lint (`rflint`).
//!
//! Each file is announced once, the records below it omit the file name:
//!
//! ```text
//! + tests/login.robot
//! W: 12, 0: Too few steps (1) in test case (TooFewTestSteps)
//! E: 30, 4: No keyword documentation (RequireKeywordDocumentation)
//! ```

use crate::error::RecordError;
use crate::issue::{Issue, IssueBuilder, Severity, SeverityTable};
use crate::parser::{LineCursor, PatternAdapter};
use regex::{Captures, Regex};

const LINE_PATTERN: &str =
    r"^(?:\+\s+(\S.*?)|([EWI]):\s*(\d+),\s*(\d+):\s*(.*?)\s*\((\w+)\))\s*$";

pub const SEVERITIES: SeverityTable = SeverityTable::new(
    &[
        ("E", Severity::WarningHigh),
        ("W", Severity::WarningNormal),
        ("I", Severity::WarningLow),
    ],
    Severity::WarningLow,
);

pub struct RfLintAdapter {
    pattern: Regex,
    current_file: Option<String>,
}

impl RfLintAdapter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(LINE_PATTERN)?,
            current_file: None,
        })
    }
}

fn level_name(level: &str) -> &'static str {
    match level {
        "E" => "Error",
        "W" => "Warning",
        _ => "Ignore",
    }
}

impl PatternAdapter for RfLintAdapter {
    fn id(&self) -> &'static str {
        "rflint"
    }

    fn name(&self) -> &'static str {
        "Robot Framework Lint"
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn start(&mut self) {
        self.current_file = None;
    }

    fn extract(
        &mut self,
        captures: &Captures<'_>,
        _cursor: &mut LineCursor<'_>,
        builder: &mut IssueBuilder,
    ) -> Result<Option<Issue>, RecordError> {
        if let Some(file) = captures.get(1) {
            self.current_file = Some(file.as_str().to_string());
            return Ok(None);
        }

        let level = &captures[2];
        if let Some(file) = &self.current_file {
            builder.set_file_name(file);
        }

        Ok(builder
            .require_line_start()
            .set_line_start_text(&captures[3])
            .set_column_start_text(&captures[4])
            .set_message(&captures[5])
            .set_category(&captures[6])
            .set_type(level_name(level))
            .set_severity(SEVERITIES.resolve(level))
            .build_optional())
    }
}
