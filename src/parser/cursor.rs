use crate::error::RecordError;
use regex::Regex;
use std::iter::Peekable;

/// Forward-only cursor over the lines of a text report.
///
/// Lets an adapter peek at the line after the one it matched and pull in
/// continuation lines that belong to the same record.
pub struct LineCursor<'a> {
    lines: Peekable<Box<dyn Iterator<Item = &'a str> + 'a>>,
    line_number: usize,
    max_continuation_lines: usize,
}

impl<'a> LineCursor<'a> {
    pub fn new<I>(lines: I, max_continuation_lines: usize) -> Self
    where
        I: IntoIterator<Item = &'a str>,
        I::IntoIter: 'a,
    {
        let lines: Box<dyn Iterator<Item = &'a str> + 'a> = Box::new(lines.into_iter());
        Self {
            lines: lines.peekable(),
            line_number: 0,
            max_continuation_lines,
        }
    }

    /// Consumes and returns the next line.
    pub fn next_line(&mut self) -> Result<&'a str, RecordError> {
        match self.lines.next() {
            Some(line) => {
                self.line_number += 1;
                Ok(line)
            }
            None => Err(RecordError::ExhaustedInput {
                line: self.line_number,
            }),
        }
    }

    pub fn has_more(&mut self) -> bool {
        self.lines.peek().is_some()
    }

    /// Whether the next, not yet consumed, line matches `pattern`.
    pub fn has_next(&mut self, pattern: &Regex) -> bool {
        self.has_next_matching(|line| pattern.is_match(line))
    }

    pub fn has_next_matching(&mut self, predicate: impl FnOnce(&str) -> bool) -> bool {
        self.lines.peek().is_some_and(|line| predicate(line))
    }

    /// 1-based number of the line consumed last, 0 before the first one.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// Consumes following lines while they match `pattern`, up to the
    /// configured continuation limit.
    pub fn take_continuation(&mut self, pattern: &Regex) -> Vec<&'a str> {
        let mut continuation = Vec::new();
        while self.has_next(pattern) {
            if continuation.len() >= self.max_continuation_lines {
                tracing::debug!(
                    "Continuation limit of {} lines reached after line {}",
                    self.max_continuation_lines,
                    self.line_number
                );
                break;
            }
            match self.next_line() {
                Ok(line) => continuation.push(line),
                Err(_) => break,
            }
        }
        continuation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "Error: a.f90, line 1: first\n    detail one\n    detail two\nnext record";

    #[test]
    fn test_next_and_exhaustion() {
        let mut cursor = LineCursor::new(vec!["one", "two"], 10);

        assert_eq!(cursor.next_line().unwrap(), "one");
        assert_eq!(cursor.next_line().unwrap(), "two");
        assert_eq!(cursor.line_number(), 2);
        assert!(!cursor.has_more());
        assert_eq!(
            cursor.next_line(),
            Err(RecordError::ExhaustedInput { line: 2 })
        );
    }

    #[test]
    fn test_has_next_does_not_consume() {
        let indented = Regex::new(r"^\s+.+").unwrap();
        let mut cursor = LineCursor::new(INPUT.lines(), 10);

        cursor.next_line().unwrap();
        assert!(cursor.has_next(&indented));
        assert!(cursor.has_next(&indented));
        assert_eq!(cursor.line_number(), 1);
        assert_eq!(cursor.next_line().unwrap(), "    detail one");
    }

    #[test]
    fn test_has_next_at_end() {
        let any = Regex::new(".*").unwrap();
        let mut cursor = LineCursor::new(std::iter::empty(), 10);
        assert!(!cursor.has_next(&any));
        assert!(!cursor.has_next_matching(|_| true));
    }

    #[test]
    fn test_take_continuation() {
        let indented = Regex::new(r"^\s+.+").unwrap();
        let mut cursor = LineCursor::new(INPUT.lines(), 10);

        cursor.next_line().unwrap();
        let continuation = cursor.take_continuation(&indented);
        assert_eq!(continuation, vec!["    detail one", "    detail two"]);
        assert_eq!(cursor.next_line().unwrap(), "next record");
    }

    #[test]
    fn test_take_continuation_is_bounded() {
        let indented = Regex::new(r"^\s+.+").unwrap();
        let mut cursor = LineCursor::new(INPUT.lines(), 1);

        cursor.next_line().unwrap();
        let continuation = cursor.take_continuation(&indented);
        assert_eq!(continuation, vec!["    detail one"]);
        assert_eq!(cursor.next_line().unwrap(), "    detail two");
    }
}
