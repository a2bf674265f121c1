mod builder;
mod report;
mod severity;

pub use builder::IssueBuilder;
pub use report::Report;
pub use severity::{Severity, SeverityTable};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Value used for every textual field the producing tool did not provide.
pub const UNDEFINED: &str = "-";

/// A normalized diagnostic record.
///
/// Issues are created through [`IssueBuilder`] and never change afterwards;
/// every field has a defined value, unknown text is `"-"` and unknown
/// positions are `0`. Deserialization goes through the builder as well, so
/// issues read back from a report are normalized the same way.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(from = "IssueRecord")]
pub struct Issue {
    pub(crate) file_name: String,
    pub(crate) line_start: u32,
    pub(crate) line_end: u32,
    pub(crate) column_start: u32,
    pub(crate) column_end: u32,
    pub(crate) category: String,
    #[serde(rename = "type")]
    pub(crate) issue_type: String,
    pub(crate) severity: Severity,
    pub(crate) message: String,
    pub(crate) description: String,
    pub(crate) package_name: String,
    pub(crate) module_name: String,
    pub(crate) origin: String,
    pub(crate) reference: String,
    pub(crate) fingerprint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) additional_properties: Option<serde_json::Value>,
}

impl Issue {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn line_start(&self) -> u32 {
        self.line_start
    }

    pub fn line_end(&self) -> u32 {
        self.line_end
    }

    pub fn column_start(&self) -> u32 {
        self.column_start
    }

    pub fn column_end(&self) -> u32 {
        self.column_end
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn issue_type(&self) -> &str {
        &self.issue_type
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn package_name(&self) -> &str {
        &self.package_name
    }

    pub fn module_name(&self) -> &str {
        &self.module_name
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    pub fn additional_properties(&self) -> Option<&serde_json::Value> {
        self.additional_properties.as_ref()
    }

    pub fn has_fingerprint(&self) -> bool {
        self.fingerprint != UNDEFINED
    }

    /// Deterministic hash of the identifying content of this issue.
    /// Uses: origin | file | line | category | type | normalized message
    pub fn content_fingerprint(&self) -> String {
        let normalized_message = self.message.split_whitespace().collect::<Vec<_>>().join(" ");
        let input = format!(
            "{}|{}|{}|{}|{}|{}",
            self.origin,
            self.file_name,
            self.line_start,
            self.category,
            self.issue_type,
            normalized_message,
        );
        let hash = Sha256::digest(input.as_bytes());
        format!("{:x}", hash)[..12].to_string()
    }

    /// Returns this issue with a content fingerprint, unless the producing
    /// tool already supplied one.
    pub fn with_content_fingerprint(self) -> Issue {
        if self.has_fingerprint() {
            return self;
        }
        let fingerprint = self.content_fingerprint();
        Issue {
            fingerprint,
            ..self
        }
    }
}

/// Serialized form of an [`Issue`] with every field optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct IssueRecord {
    file_name: Option<String>,
    line_start: Option<u32>,
    line_end: Option<u32>,
    column_start: Option<u32>,
    column_end: Option<u32>,
    category: Option<String>,
    #[serde(rename = "type")]
    issue_type: Option<String>,
    severity: Option<Severity>,
    message: Option<String>,
    description: Option<String>,
    package_name: Option<String>,
    module_name: Option<String>,
    origin: Option<String>,
    reference: Option<String>,
    fingerprint: Option<String>,
    additional_properties: Option<serde_json::Value>,
}

impl IssueRecord {
    /// Copies every present field into `builder`.
    pub(crate) fn apply(self, builder: &mut IssueBuilder) {
        if let Some(file_name) = self.file_name {
            builder.set_file_name(file_name);
        }
        if let Some(line) = self.line_start {
            builder.set_line_start(line);
        }
        if let Some(line) = self.line_end {
            builder.set_line_end(line);
        }
        if let Some(column) = self.column_start {
            builder.set_column_start(column);
        }
        if let Some(column) = self.column_end {
            builder.set_column_end(column);
        }
        if let Some(category) = self.category {
            builder.set_category(category);
        }
        if let Some(issue_type) = self.issue_type {
            builder.set_type(issue_type);
        }
        if let Some(severity) = self.severity {
            builder.set_severity(severity);
        }
        if let Some(message) = self.message {
            builder.set_message(message);
        }
        if let Some(description) = self.description {
            builder.set_description(description);
        }
        if let Some(package_name) = self.package_name {
            builder.set_package_name(package_name);
        }
        if let Some(module_name) = self.module_name {
            builder.set_module_name(module_name);
        }
        if let Some(origin) = self.origin {
            builder.set_origin(origin);
        }
        if let Some(reference) = self.reference {
            builder.set_reference(reference);
        }
        if let Some(fingerprint) = self.fingerprint {
            builder.set_fingerprint(fingerprint);
        }
        if let Some(properties) = self.additional_properties {
            builder.set_additional_properties(properties);
        }
    }
}

impl From<IssueRecord> for Issue {
    fn from(record: IssueRecord) -> Self {
        let mut builder = IssueBuilder::new();
        record.apply(&mut builder);
        builder.build()
    }
}

impl Default for Issue {
    fn default() -> Self {
        IssueBuilder::new().build()
    }
}
