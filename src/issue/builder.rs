use super::{Issue, Severity, UNDEFINED};

/// Accumulates the fields of one record and turns them into an [`Issue`].
///
/// Both terminal operations reset the builder, so a single instance can be
/// reused for every record of a parse run without values leaking from one
/// record into the next.
#[derive(Debug, Default)]
pub struct IssueBuilder {
    file_name: Option<String>,
    line_start: Option<u32>,
    line_end: Option<u32>,
    column_start: Option<u32>,
    column_end: Option<u32>,
    category: Option<String>,
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
    line_start_required: bool,
}

/// Blank text means "not provided".
fn normalize_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Message text keeps inner line breaks but drops trailing whitespace.
fn normalize_message(value: &str) -> Option<String> {
    let trimmed = value.trim_end();
    if trimmed.trim_start().is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_position(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok()
}

/// Known start and end, ordered. A single known bound is used for both.
fn normalize_range(start: Option<u32>, end: Option<u32>) -> (u32, u32) {
    let start = start.unwrap_or(0);
    let end = end.unwrap_or(0);
    match (start, end) {
        (0, end) => (end, end),
        (start, 0) => (start, start),
        (start, end) => (start.min(end), start.max(end)),
    }
}

impl IssueBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_file_name(&mut self, file_name: impl AsRef<str>) -> &mut Self {
        self.file_name = normalize_text(&file_name.as_ref().replace('\\', "/"));
        self
    }

    pub fn set_line_start(&mut self, line: u32) -> &mut Self {
        self.line_start = Some(line);
        self
    }

    /// Sets the start line from text. Unparseable text leaves the line
    /// unset, which makes [`build_optional`](Self::build_optional) fail when
    /// the line is required.
    pub fn set_line_start_text(&mut self, line: &str) -> &mut Self {
        self.line_start = parse_position(line);
        self
    }

    pub fn set_line_end(&mut self, line: u32) -> &mut Self {
        self.line_end = Some(line);
        self
    }

    pub fn set_column_start(&mut self, column: u32) -> &mut Self {
        self.column_start = Some(column);
        self
    }

    pub fn set_column_start_text(&mut self, column: &str) -> &mut Self {
        self.column_start = parse_position(column);
        self
    }

    pub fn set_column_end(&mut self, column: u32) -> &mut Self {
        self.column_end = Some(column);
        self
    }

    pub fn set_category(&mut self, category: impl AsRef<str>) -> &mut Self {
        self.category = normalize_text(category.as_ref());
        self
    }

    pub fn set_type(&mut self, issue_type: impl AsRef<str>) -> &mut Self {
        self.issue_type = normalize_text(issue_type.as_ref());
        self
    }

    pub fn set_severity(&mut self, severity: Severity) -> &mut Self {
        self.severity = Some(severity);
        self
    }

    pub fn set_message(&mut self, message: impl AsRef<str>) -> &mut Self {
        self.message = normalize_message(message.as_ref());
        self
    }

    pub fn set_description(&mut self, description: impl AsRef<str>) -> &mut Self {
        self.description = normalize_message(description.as_ref());
        self
    }

    pub fn set_package_name(&mut self, package_name: impl AsRef<str>) -> &mut Self {
        self.package_name = normalize_text(package_name.as_ref());
        self
    }

    pub fn set_module_name(&mut self, module_name: impl AsRef<str>) -> &mut Self {
        self.module_name = normalize_text(module_name.as_ref());
        self
    }

    pub fn set_origin(&mut self, origin: impl AsRef<str>) -> &mut Self {
        self.origin = normalize_text(origin.as_ref());
        self
    }

    pub fn set_reference(&mut self, reference: impl AsRef<str>) -> &mut Self {
        self.reference = normalize_text(reference.as_ref());
        self
    }

    pub fn set_fingerprint(&mut self, fingerprint: impl AsRef<str>) -> &mut Self {
        self.fingerprint = normalize_text(fingerprint.as_ref());
        self
    }

    pub fn set_additional_properties(&mut self, properties: serde_json::Value) -> &mut Self {
        self.additional_properties = match properties {
            serde_json::Value::Null => None,
            properties => Some(properties),
        };
        self
    }

    /// Marks the start line as mandatory for the current record.
    pub fn require_line_start(&mut self) -> &mut Self {
        self.line_start_required = true;
        self
    }

    /// Builds the issue, substituting defaults for unset fields, and resets
    /// the builder.
    pub fn build(&mut self) -> Issue {
        let draft = std::mem::take(self);
        draft.into_issue()
    }

    /// Like [`build`](Self::build), but yields `None` when the start line was
    /// required and could not be set. Resets the builder either way.
    pub fn build_optional(&mut self) -> Option<Issue> {
        let draft = std::mem::take(self);
        if draft.line_start_required && draft.line_start.is_none() {
            return None;
        }
        Some(draft.into_issue())
    }

    /// Discards everything set since the last build.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn into_issue(self) -> Issue {
        let (line_start, line_end) = normalize_range(self.line_start, self.line_end);
        let (column_start, column_end) = normalize_range(self.column_start, self.column_end);
        let or_undefined = |value: Option<String>| value.unwrap_or_else(|| UNDEFINED.to_string());

        Issue {
            file_name: or_undefined(self.file_name),
            line_start,
            line_end,
            column_start,
            column_end,
            category: or_undefined(self.category),
            issue_type: or_undefined(self.issue_type),
            severity: self.severity.unwrap_or_default(),
            message: or_undefined(self.message),
            description: or_undefined(self.description),
            package_name: or_undefined(self.package_name),
            module_name: or_undefined(self.module_name),
            origin: or_undefined(self.origin),
            reference: or_undefined(self.reference),
            fingerprint: or_undefined(self.fingerprint),
            additional_properties: self.additional_properties,
        }
    }
}
