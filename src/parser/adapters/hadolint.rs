//! hadolint JSON output (`hadolint -f json Dockerfile`).
//!
//! | key | issue field | required |
//! |---|---|---|
//! | `code` | category | no |
//! | `level` | severity | no |
//! | `line` | line start | no |
//! | `column` | column start | no |
//! | `message` | message | no |
//! | `file` | file name | no |

use crate::error::RecordError;
use crate::issue::{Issue, IssueBuilder, Severity, SeverityTable};
use crate::parser::json::fields;
use crate::parser::JsonAdapter;
use serde_json::{Map, Value};

pub const SEVERITIES: SeverityTable = SeverityTable::new(
    &[
        ("error", Severity::Error),
        ("warning", Severity::WarningHigh),
        ("info", Severity::WarningNormal),
    ],
    Severity::WarningLow,
);

#[derive(Debug, Default)]
pub struct HadoLintAdapter;

impl JsonAdapter for HadoLintAdapter {
    fn id(&self) -> &'static str {
        "hadolint"
    }

    fn name(&self) -> &'static str {
        "HadoLint"
    }

    fn extract(
        &self,
        object: &Map<String, Value>,
        builder: &mut IssueBuilder,
    ) -> Result<Issue, RecordError> {
        if let Some(code) = fields::optional_str(object, "code") {
            builder.set_category(code);
        }
        if let Some(level) = fields::optional_str(object, "level") {
            builder.set_severity(SEVERITIES.resolve(level));
        }
        if let Some(line) = fields::optional_u32(object, "line") {
            builder.set_line_start(line);
        }
        if let Some(column) = fields::optional_u32(object, "column") {
            builder.set_column_start(column);
        }
        if let Some(message) = fields::optional_str(object, "message") {
            builder.set_message(message);
        }
        if let Some(file) = fields::optional_str(object, "file") {
            builder.set_file_name(file);
        }
        Ok(builder.build())
    }
}
