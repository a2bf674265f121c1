use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Normalized severity of an issue, ordered from least to most alarming.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize, JsonSchema,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    #[default]
    WarningLow,
    WarningNormal,
    WarningHigh,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::WarningLow,
        Severity::WarningNormal,
        Severity::WarningHigh,
        Severity::Error,
    ];

    /// Worst severity of a record with several classifications.
    /// Falls back to `default` when there is none.
    pub fn worst_of<I>(severities: I, default: Severity) -> Severity
    where
        I: IntoIterator<Item = Severity>,
    {
        severities.into_iter().max().unwrap_or(default)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::WarningLow => "WARNING_LOW",
            Severity::WarningNormal => "WARNING_NORMAL",
            Severity::WarningHigh => "WARNING_HIGH",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().replace('-', "_").as_str() {
            "WARNING_LOW" | "LOW" => Ok(Severity::WarningLow),
            "WARNING_NORMAL" | "NORMAL" => Ok(Severity::WarningNormal),
            "WARNING_HIGH" | "HIGH" => Ok(Severity::WarningHigh),
            "ERROR" => Ok(Severity::Error),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}

/// Finite mapping from a tool's level vocabulary onto [`Severity`].
///
/// Lookups are exact and case-sensitive. Anything not in the table resolves
/// to the table's default, so an unknown level never fails a parse.
#[derive(Debug, Clone, Copy)]
pub struct SeverityTable {
    entries: &'static [(&'static str, Severity)],
    default: Severity,
}

impl SeverityTable {
    pub const fn new(entries: &'static [(&'static str, Severity)], default: Severity) -> Self {
        Self { entries, default }
    }

    pub fn resolve(&self, level: &str) -> Severity {
        self.lookup(level).unwrap_or(self.default)
    }

    /// Like [`resolve`](Self::resolve) but tells mapped and unmapped apart.
    pub fn lookup(&self, level: &str) -> Option<Severity> {
        self.entries
            .iter()
            .find(|(name, _)| *name == level)
            .map(|(_, severity)| *severity)
    }

    pub fn default_severity(&self) -> Severity {
        self.default
    }
}
