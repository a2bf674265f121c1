//! NAG Fortran compiler messages.
//!
//! ```text
//! Warning: shape.f90, line 12: Unused dummy variable N
//! Runtime Error: prog.f90, line 4: Reference to undefined variable X
//!         detected at MAIN@<end-of-statement>
//! ```

use crate::error::RecordError;
use crate::issue::{Issue, IssueBuilder, Severity, SeverityTable};
use crate::parser::{LineCursor, PatternAdapter};
use regex::{Captures, Regex};

const MESSAGE_PATTERN: &str = r"^(Info|Warning|Questionable|Extension|Obsolescent|Deleted feature used|Error|Runtime Error|Fatal Error|Panic|Non-standard\(Obsolete\)|Extension\(NAG\)|Extension\(F[0-9]+\)): (.+\.[^,:\n]+)(, line (\d+))?: (.+(\s+detected at .+)?)";

const CONTINUATION_PATTERN: &str = r"^\s+ .+";

pub const SEVERITIES: SeverityTable = SeverityTable::new(
    &[
        ("Error", Severity::WarningHigh),
        ("Runtime Error", Severity::WarningHigh),
        ("Fatal Error", Severity::WarningHigh),
        ("Panic", Severity::WarningHigh),
        ("Info", Severity::WarningLow),
    ],
    Severity::WarningNormal,
);

pub struct NagFortranAdapter {
    pattern: Regex,
    continuation: Regex,
}

impl NagFortranAdapter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(MESSAGE_PATTERN)?,
            continuation: Regex::new(CONTINUATION_PATTERN)?,
        })
    }
}

impl PatternAdapter for NagFortranAdapter {
    fn id(&self) -> &'static str {
        "nagfor"
    }

    fn name(&self) -> &'static str {
        "NAG Fortran Compiler (nagfor)"
    }

    fn pattern(&self) -> &Regex {
        &self.pattern
    }

    fn extract(
        &mut self,
        captures: &Captures<'_>,
        cursor: &mut LineCursor<'_>,
        builder: &mut IssueBuilder,
    ) -> Result<Option<Issue>, RecordError> {
        let category = &captures[1];
        let mut message = captures[5].to_string();
        for line in cursor.take_continuation(&self.continuation) {
            message.push('\n');
            message.push_str(line);
        }

        // a message without ", line N" is about the whole file
        if let Some(line) = captures.get(4) {
            builder.require_line_start().set_line_start_text(line.as_str());
        }

        Ok(builder
            .set_file_name(&captures[2])
            .set_category(category)
            .set_message(message)
            .set_severity(SEVERITIES.resolve(category))
            .build_optional())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{IssueParser, ParseOptions, PatternParser};

    fn parse(input: &str) -> crate::issue::Report {
        PatternParser::new(NagFortranAdapter::new().unwrap(), ParseOptions::default())
            .parse(input)
            .unwrap()
    }

    #[test]
    fn test_error_with_line() {
        let report = parse("Error: foo.f90, line 12: array bound mismatch\n");

        assert_eq!(report.len(), 1);
        let issue = &report.issues()[0];
        assert_eq!(issue.file_name(), "foo.f90");
        assert_eq!(issue.line_start(), 12);
        assert_eq!(issue.category(), "Error");
        assert_eq!(issue.severity(), Severity::WarningHigh);
        assert_eq!(issue.message(), "array bound mismatch");
        assert_eq!(issue.origin(), "nagfor");
    }

    #[test]
    fn test_message_without_line() {
        let report = parse("Info: mod.f90: Unused module variable X\n");

        let issue = &report.issues()[0];
        assert_eq!(issue.file_name(), "mod.f90");
        assert_eq!(issue.line_start(), 0);
        assert_eq!(issue.severity(), Severity::WarningLow);
    }

    #[test]
    fn test_continuation_lines() {
        let input = "\
Runtime Error: prog.f90, line 4: Reference to undefined variable X
        detected at MAIN@<end-of-statement>
Program terminated by fatal error
Warning: prog.f90, line 9: Unused local variable Y
";
        let report = parse(input);

        assert_eq!(report.len(), 2);
        assert_eq!(
            report.issues()[0].message(),
            "Reference to undefined variable X\n        detected at MAIN@<end-of-statement>"
        );
        assert_eq!(report.issues()[1].line_start(), 9);
        assert_eq!(report.issues()[1].severity(), Severity::WarningNormal);
    }

    #[test]
    fn test_unmapped_category_uses_default() {
        let report = parse(
            "Extension(F2008): ext.f90, line 3: Nonstandard intrinsic\nObsolescent: old.f90, line 5: Fixed source form\n",
        );

        assert_eq!(report.len(), 2);
        assert!(report
            .iter()
            .all(|issue| issue.severity() == Severity::WarningNormal));
        assert!(!report.has_errors());
    }

    #[test]
    fn test_unparseable_line_number_is_skipped() {
        let report = parse("Error: big.f90, line 99999999999: overflow\n");
        assert!(report.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_noise_is_ignored() {
        let report = parse("NAG Fortran Compiler Release 7.1\n[NAG Fortran Compiler normal termination]\n");
        assert!(report.is_empty());
        assert!(!report.has_errors());
    }
}
