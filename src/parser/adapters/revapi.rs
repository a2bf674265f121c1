//! Revapi JSON reports (`revapi.reporter.json`).
//!
//! Schema of one difference (version 1):
//!
//! | key | issue field | required |
//! |---|---|---|
//! | `code` | type, additional properties | yes |
//! | `name` | description | yes |
//! | `description` | message, description | yes |
//! | `classification[*]` `{compatibility, severity}` | severity (worst), description | yes |
//! | `attachments[0].value` (package) | package name | yes |
//! | `attachments[1].value` (class qualified name) | description | yes |
//! | `attachments[2].value` (class simple name) | file name | yes |
//! | `attachments[3].value` (element kind) | category | yes |
//! | `old`, `new` | additional properties | no |

use crate::error::RecordError;
use crate::issue::{Issue, IssueBuilder, Severity, SeverityTable};
use crate::parser::json::fields;
use crate::parser::JsonAdapter;
use serde_json::{json, Map, Value};

/// Positions inside the `attachments` array.
mod attachment {
    pub const PACKAGE: usize = 0;
    pub const CLASS_QUALIFIED_NAME: usize = 1;
    pub const CLASS_SIMPLE_NAME: usize = 2;
    pub const ELEMENT_KIND: usize = 3;
}

/// `EQUIVALENT` and `NON_BREAKING` fall through to the default. A difference
/// without any recognized classification is `WARNING_LOW` as well.
pub const SEVERITIES: SeverityTable = SeverityTable::new(
    &[
        ("BREAKING", Severity::WarningHigh),
        ("POTENTIALLY_BREAKING", Severity::WarningNormal),
    ],
    Severity::WarningLow,
);

struct Classification<'v> {
    compatibility: &'v str,
    severity: &'v str,
}

#[derive(Debug, Default)]
pub struct RevApiAdapter;

fn classifications(object: &Map<String, Value>) -> Result<Vec<Classification<'_>>, RecordError> {
    let mut result = Vec::new();
    for (index, entry) in fields::required_array(object, "classification")?
        .iter()
        .enumerate()
    {
        // entries that are not objects carry no classification
        let Some(entry) = entry.as_object() else {
            continue;
        };
        let field = |key: &str| {
            fields::optional_str(entry, key)
                .ok_or_else(|| RecordError::missing(format!("classification[{}].{}", index, key)))
        };
        result.push(Classification {
            compatibility: field("compatibility")?,
            severity: field("severity")?,
        });
    }
    Ok(result)
}

fn attachment_value<'v>(attachments: &'v [Value], index: usize) -> Result<&'v str, RecordError> {
    let entry = fields::required_object_at(attachments, "attachments", index)?;
    fields::optional_str(entry, "value")
        .ok_or_else(|| RecordError::missing(format!("attachments[{}].value", index)))
}

fn aggregate_severity(classifications: &[Classification<'_>]) -> Severity {
    Severity::worst_of(
        classifications
            .iter()
            .filter_map(|c| SEVERITIES.lookup(c.severity)),
        SEVERITIES.default_severity(),
    )
}

impl JsonAdapter for RevApiAdapter {
    fn id(&self) -> &'static str {
        "revapi"
    }

    fn name(&self) -> &'static str {
        "Revapi"
    }

    fn extract(
        &self,
        object: &Map<String, Value>,
        builder: &mut IssueBuilder,
    ) -> Result<Issue, RecordError> {
        let code = fields::required_str(object, "code")?;
        let name = fields::required_str(object, "name")?;
        let text = fields::required_str(object, "description")?;
        let classifications = classifications(object)?;

        let attachments = fields::required_array(object, "attachments")?;
        let package = attachment_value(attachments, attachment::PACKAGE)?;
        let qualified_name = attachment_value(attachments, attachment::CLASS_QUALIFIED_NAME)?;
        let simple_name = attachment_value(attachments, attachment::CLASS_SIMPLE_NAME)?;
        let element_kind = attachment_value(attachments, attachment::ELEMENT_KIND)?;

        let mut description = format!(
            "<p><div><b>File</b>: {}</div><div><b>Description:</b> {} {}</div><div><b>Change type:</b> {}</div></p>",
            qualified_name, text, name, code
        );
        for c in &classifications {
            description.push_str(&format!(
                "<p>Compatibility: {} Severity: {}</p>",
                c.compatibility, c.severity
            ));
        }

        let severities: Map<String, Value> = classifications
            .iter()
            .map(|c| (c.compatibility.to_string(), Value::from(c.severity)))
            .collect();

        Ok(builder
            .set_file_name(simple_name)
            .set_package_name(package)
            .set_category(element_kind)
            .set_type(code)
            .set_message(text)
            .set_description(description)
            .set_severity(aggregate_severity(&classifications))
            .set_additional_properties(json!({
                "code": code,
                "old": fields::text_or_undefined(object, "old"),
                "new": fields::text_or_undefined(object, "new"),
                "severities": severities,
            }))
            .build())
    }
}
