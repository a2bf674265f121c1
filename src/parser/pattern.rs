use super::cursor::LineCursor;
use super::{BuilderScope, IssueParser, ParseOptions};
use crate::error::{ParseError, RecordError};
use crate::issue::{Issue, IssueBuilder, Report};
use regex::{Captures, Regex};
use tracing::{debug, warn};

/// A line-oriented report format.
///
/// Every line matching [`pattern`](PatternAdapter::pattern) is handed to
/// [`extract`](PatternAdapter::extract) together with the cursor positioned
/// after that line. Lines that do not match are not part of any record.
pub trait PatternAdapter: Send {
    /// Stable tool identifier, also stamped as the origin of every issue.
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    fn pattern(&self) -> &Regex;

    /// Called before the first line of every report.
    fn start(&mut self) {}

    /// Converts one matched line (plus any continuation lines it pulls from
    /// `cursor`) into an issue. `Ok(None)` skips the line silently.
    fn extract(
        &mut self,
        captures: &Captures<'_>,
        cursor: &mut LineCursor<'_>,
        builder: &mut IssueBuilder,
    ) -> Result<Option<Issue>, RecordError>;
}

/// Drives a [`PatternAdapter`] over a whole text report.
pub struct PatternParser<A> {
    adapter: A,
    options: ParseOptions,
}

impl<A: PatternAdapter> PatternParser<A> {
    pub fn new(adapter: A, options: ParseOptions) -> Self {
        Self { adapter, options }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Parses lines that were already split by the caller.
    pub fn parse_lines<'a, I>(&mut self, lines: I) -> Report
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        let mut cursor = LineCursor::new(lines, self.options.max_continuation_lines);
        let mut builder = IssueBuilder::new();
        let mut report = Report::new();
        self.adapter.start();

        while let Ok(line) = cursor.next_line() {
            let Some(captures) = self.adapter.pattern().captures(line) else {
                continue;
            };
            let line_number = cursor.line_number();

            let outcome = {
                let mut scope = BuilderScope::open(&mut builder, self.adapter.id());
                self.adapter.extract(&captures, &mut cursor, &mut scope)
            };

            match outcome {
                Ok(Some(issue)) => report.add(issue),
                Ok(None) => debug!("{}: skipped line {}", self.adapter.id(), line_number),
                Err(e) => {
                    warn!("{}: line {}: {}", self.adapter.id(), line_number, e);
                    report.log_error(format!("line {}: {}", line_number, e));
                }
            }
        }

        debug!(
            "{}: {} issues, {} errors from {} lines",
            self.adapter.id(),
            report.len(),
            report.errors().len(),
            cursor.line_number()
        );
        report
    }
}

impl<A: PatternAdapter> IssueParser for PatternParser<A> {
    fn id(&self) -> &'static str {
        self.adapter.id()
    }

    fn name(&self) -> &'static str {
        self.adapter.name()
    }

    fn parse(&mut self, input: &str) -> Result<Report, ParseError> {
        Ok(self.parse_lines(input.lines()))
    }
}
