pub mod adapters;
pub mod cursor;
pub mod json;
pub mod pattern;
pub mod registry;

pub use cursor::LineCursor;
pub use json::{JsonAdapter, JsonParser, NonObjectPolicy};
pub use pattern::{PatternAdapter, PatternParser};

use crate::config::defaults::default_max_continuation_lines;
use crate::error::ParseError;
use crate::issue::{IssueBuilder, Report};
use std::ops::{Deref, DerefMut};

/// A ready-to-use parser for one tool's output.
pub trait IssueParser: Send {
    fn id(&self) -> &'static str;

    /// Human-readable tool name for diagnostics.
    fn name(&self) -> &'static str;

    /// Parses a complete report. Only a report that is unusable as a whole
    /// fails; broken records end up in [`Report::errors`].
    fn parse(&mut self, input: &str) -> Result<Report, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub max_continuation_lines: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_continuation_lines: default_max_continuation_lines(),
        }
    }
}

/// Exclusive use of the builder for one record. The builder is reset when
/// the scope ends, whether the adapter built an issue, skipped the record
/// or failed halfway.
pub(crate) struct BuilderScope<'b> {
    builder: &'b mut IssueBuilder,
}

impl<'b> BuilderScope<'b> {
    pub(crate) fn open(builder: &'b mut IssueBuilder, origin: &str) -> Self {
        builder.reset();
        builder.set_origin(origin);
        Self { builder }
    }
}

impl Deref for BuilderScope<'_> {
    type Target = IssueBuilder;

    fn deref(&self) -> &IssueBuilder {
        self.builder
    }
}

impl DerefMut for BuilderScope<'_> {
    fn deref_mut(&mut self) -> &mut IssueBuilder {
        self.builder
    }
}

impl Drop for BuilderScope<'_> {
    fn drop(&mut self) {
        self.builder.reset();
    }
}
