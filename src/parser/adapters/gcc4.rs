//! GNU C compiler, version 4 and later.
//!
//! ```text
//! src/main.c:12:5: warning: unused variable 'x' [-Wunused-variable]
//!    12 |     int x;
//!       |         ^
//! ```

use crate::error::RecordError;
use crate::issue::{Issue, IssueBuilder, Severity, SeverityTable};
use crate::parser::{LineCursor, PatternAdapter};
use regex::{Captures, Regex};

const MESSAGE_PATTERN: &str = r"^\s*((?:[A-Za-z]:)?[^\s:][^:]*?):(\d+):(?:(\d+):)?\s*(warning|error|fatal error|note):\s*(.*?)(?:\s+\[(-W[^\]]+)\])?\s*$";

/// Source excerpt and caret lines printed below a diagnostic.
const SNIPPET_PATTERN: &str = r"^\s+(?:\d+\s+)?\|";

pub const SEVERITIES: SeverityTable = SeverityTable::new(
    &[
        ("fatal error", Severity::Error),
        ("error", Severity::Error),
        ("warning", Severity::WarningNormal),
        ("note", Severity::WarningLow),
    ],
    Severity::WarningNormal,
);

pub struct Gcc4Adapter {
    pattern: Regex,
    snippet: Regex,
}

impl Gcc4Adapter {
    pub fn new() -> Result<Self, regex::Error> {
        Ok(Self {
            pattern: Regex::new(MESSAGE_PATTERN)?,
            snippet: Regex::new(SNIPPET_PATTERN)?,
        })
    }
}

fn title_case(level: &str) -> String {
    level
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl PatternAdapter for Gcc4Adapter {
    fn id(&self) -> &'static str {
        "gcc4"
    }

    fn name(&self) -> &'static str {
        "GNU C Compiler (gcc)"
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
        let level = &captures[4];
        let snippet = cursor.take_continuation(&self.snippet);
        if !snippet.is_empty() {
            builder.set_description(snippet.join("\n"));
        }
        if let Some(column) = captures.get(3) {
            builder.set_column_start_text(column.as_str());
        }
        if let Some(flag) = captures.get(6) {
            builder.set_type(flag.as_str());
        }

        Ok(builder
            .set_file_name(&captures[1])
            .require_line_start()
            .set_line_start_text(&captures[2])
            .set_category(title_case(level))
            .set_severity(SEVERITIES.resolve(level))
            .set_message(&captures[5])
            .build_optional())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{IssueParser, ParseOptions, PatternParser};

    fn parse(input: &str) -> crate::issue::Report {
        PatternParser::new(Gcc4Adapter::new().unwrap(), ParseOptions::default())
            .parse(input)
            .unwrap()
    }

    #[test]
    fn test_warning_with_flag_and_snippet() {
        let input = "\
src/main.c: In function 'main':
src/main.c:12:9: warning: unused variable 'x' [-Wunused-variable]
   12 |     int x;
      |         ^
";
        let report = parse(input);

        assert_eq!(report.len(), 1);
        let issue = &report.issues()[0];
        assert_eq!(issue.file_name(), "src/main.c");
        assert_eq!(issue.line_start(), 12);
        assert_eq!(issue.column_start(), 9);
        assert_eq!(issue.category(), "Warning");
        assert_eq!(issue.issue_type(), "-Wunused-variable");
        assert_eq!(issue.message(), "unused variable 'x'");
        assert_eq!(issue.severity(), Severity::WarningNormal);
        assert_eq!(issue.description(), "   12 |     int x;\n      |         ^");
    }

    #[test]
    fn test_errors_and_notes() {
        let input = "\
lib/util.c:3: error: expected ';' before '}' token
lib/util.c:1:10: fatal error: missing.h: No such file or directory
lib/util.c:7:1: note: declared here
";
        let report = parse(input);

        assert_eq!(report.len(), 3);
        assert_eq!(report.issues()[0].severity(), Severity::Error);
        assert_eq!(report.issues()[0].column_start(), 0);
        assert_eq!(report.issues()[1].category(), "Fatal Error");
        assert_eq!(report.issues()[1].message(), "missing.h: No such file or directory");
        assert_eq!(report.issues()[2].severity(), Severity::WarningLow);
    }

    #[test]
    fn test_windows_path() {
        let report = parse("C:\\work\\a.c:5:2: warning: implicit declaration\n");
        assert_eq!(report.issues()[0].file_name(), "C:/work/a.c");
    }

    #[test]
    fn test_line_number_overflow_is_skipped() {
        let report = parse("a.c:99999999999: warning: too far\na.c:2: warning: fine\n");
        assert_eq!(report.len(), 1);
        assert_eq!(report.issues()[0].line_start(), 2);
    }

    #[test]
    fn test_build_noise_is_ignored() {
        let report = parse("gcc -Wall -c a.c\nmake: *** [all] Error 1\ncollect2: error: ld returned 1 exit status\n");
        assert!(report.is_empty());
        assert!(!report.has_errors());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("fatal error"), "Fatal Error");
        assert_eq!(title_case("note"), "Note");
    }
}
