use super::{BuilderScope, IssueParser};
use crate::error::{ParseError, RecordError};
use crate::issue::{Issue, IssueBuilder, Report};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// What to do with array elements that are not JSON objects.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NonObjectPolicy {
    /// Record `element N is not a JSON object` in the report.
    #[default]
    LogError,
    /// Ignore the element without a trace in the report.
    Skip,
}

/// A JSON report format whose records are the objects of one array.
pub trait JsonAdapter: Send {
    /// Stable tool identifier, also stamped as the origin of every issue.
    fn id(&self) -> &'static str;

    fn name(&self) -> &'static str;

    /// The array holding the records. Defaults to the document itself.
    fn records<'v>(&self, document: &'v Value) -> Result<&'v [Value], ParseError> {
        document
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| ParseError::UnexpectedShape {
                expected: "a JSON array".to_string(),
            })
    }

    fn non_object_policy(&self) -> NonObjectPolicy {
        NonObjectPolicy::LogError
    }

    fn extract(
        &self,
        object: &Map<String, Value>,
        builder: &mut IssueBuilder,
    ) -> Result<Issue, RecordError>;
}

/// Drives a [`JsonAdapter`] over a whole JSON report.
pub struct JsonParser<A> {
    adapter: A,
}

impl<A: JsonAdapter> JsonParser<A> {
    pub fn new(adapter: A) -> Self {
        Self { adapter }
    }

    pub fn adapter(&self) -> &A {
        &self.adapter
    }

    /// Parses an already decoded document.
    pub fn parse_value(&self, document: &Value) -> Result<Report, ParseError> {
        let records = self.adapter.records(document)?;
        let mut builder = IssueBuilder::new();
        let mut report = Report::new();

        for (index, element) in records.iter().enumerate() {
            let Some(object) = element.as_object() else {
                match self.adapter.non_object_policy() {
                    NonObjectPolicy::LogError => {
                        let e = RecordError::MalformedElement { index };
                        warn!("{}: {}", self.adapter.id(), e);
                        report.log_error(e.to_string());
                    }
                    NonObjectPolicy::Skip => {
                        debug!("{}: skipped non-object element {}", self.adapter.id(), index)
                    }
                }
                continue;
            };

            let outcome = {
                let mut scope = BuilderScope::open(&mut builder, self.adapter.id());
                self.adapter.extract(object, &mut scope)
            };

            match outcome {
                Ok(issue) => report.add(issue),
                Err(e) => {
                    warn!("{}: element {}: {}", self.adapter.id(), index, e);
                    report.log_error(format!("element {}: {}", index, e));
                }
            }
        }

        debug!(
            "{}: {} issues, {} errors from {} elements",
            self.adapter.id(),
            report.len(),
            report.errors().len(),
            records.len()
        );
        Ok(report)
    }
}

impl<A: JsonAdapter> IssueParser for JsonParser<A> {
    fn id(&self) -> &'static str {
        self.adapter.id()
    }

    fn name(&self) -> &'static str {
        self.adapter.name()
    }

    fn parse(&mut self, input: &str) -> Result<Report, ParseError> {
        let document: Value = serde_json::from_str(input)?;
        self.parse_value(&document)
    }
}

/// Field access that fails with the name of the missing field.
pub mod fields {
    use crate::error::RecordError;
    use serde_json::{Map, Value};

    pub fn required<'v>(object: &'v Map<String, Value>, key: &str) -> Result<&'v Value, RecordError> {
        object.get(key).ok_or_else(|| RecordError::missing(key))
    }

    pub fn required_str<'v>(object: &'v Map<String, Value>, key: &str) -> Result<&'v str, RecordError> {
        required(object, key)?
            .as_str()
            .ok_or_else(|| RecordError::parsing(format!("field '{}' is not a string", key)))
    }

    pub fn required_array<'v>(
        object: &'v Map<String, Value>,
        key: &str,
    ) -> Result<&'v [Value], RecordError> {
        required(object, key)?
            .as_array()
            .map(Vec::as_slice)
            .ok_or_else(|| RecordError::parsing(format!("field '{}' is not an array", key)))
    }

    /// Object at a fixed position of an array field, reported as `key[index]`.
    pub fn required_object_at<'v>(
        array: &'v [Value],
        key: &str,
        index: usize,
    ) -> Result<&'v Map<String, Value>, RecordError> {
        array
            .get(index)
            .and_then(Value::as_object)
            .ok_or_else(|| RecordError::missing(format!("{}[{}]", key, index)))
    }

    pub fn optional_str<'v>(object: &'v Map<String, Value>, key: &str) -> Option<&'v str> {
        object.get(key).and_then(Value::as_str)
    }

    /// Non-negative integer that fits a `u32`; anything else counts as absent.
    pub fn optional_u32(object: &Map<String, Value>, key: &str) -> Option<u32> {
        object
            .get(key)
            .and_then(Value::as_u64)
            .and_then(|value| u32::try_from(value).ok())
    }

    /// Text of a scalar field, `-` for null or a missing key.
    pub fn text_or_undefined(object: &Map<String, Value>, key: &str) -> String {
        match object.get(key) {
            None | Some(Value::Null) => crate::issue::UNDEFINED.to_string(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}
