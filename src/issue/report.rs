use super::{Issue, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Issues of one parse run, in input order, plus the errors of records that
/// could not be converted.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct Report {
    issues: Vec<Issue>,
    errors: Vec<String>,
}

impl Report {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn log_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Number of issues.
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Issue count per severity; every level is present, possibly with 0.
    pub fn severity_counts(&self) -> BTreeMap<Severity, usize> {
        let mut counts: BTreeMap<Severity, usize> =
            Severity::ALL.iter().map(|severity| (*severity, 0)).collect();
        for issue in &self.issues {
            *counts.entry(issue.severity()).or_default() += 1;
        }
        counts
    }
}

impl IntoIterator for Report {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
