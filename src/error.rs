use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DiagnormError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Unknown tool '{tool}' referenced by input '{path}'")]
    UnknownTool { tool: String, path: PathBuf },

    #[error("Invalid report name '{name}' for input '{path}': must be a plain file name")]
    InvalidReportName { name: String, path: PathBuf },

    #[error("Report name '{name}' is used by more than one input")]
    DuplicateReportName { name: String },

    #[error("No inputs configured")]
    NoInputs,

    #[error("Concurrency must be at least 1")]
    ZeroConcurrency,
}

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error("Failed to acquire semaphore: {0}")]
    Semaphore(#[from] tokio::sync::AcquireError),

    #[error("Parse task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("No parser registered for tool '{0}'")]
    UnknownTool(String),

    #[error("Invalid record pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Failure of a whole parse invocation. Raised before any report exists.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Unexpected document shape: expected {expected}")]
    UnexpectedShape { expected: String },
}

/// Failure of a single record. Always recovered by the parser driving the
/// adapter and turned into a report error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
    #[error("{reason}")]
    Parsing { reason: String },

    #[error("element {index} is not a JSON object")]
    MalformedElement { index: usize },

    #[error("missing field '{field}'")]
    MissingField { field: String },

    #[error("input exhausted after line {line}")]
    ExhaustedInput { line: usize },
}

impl RecordError {
    pub fn parsing(reason: impl Into<String>) -> Self {
        RecordError::Parsing {
            reason: reason.into(),
        }
    }

    pub fn missing(field: impl Into<String>) -> Self {
        RecordError::MissingField {
            field: field.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Report name '{0}' is not a plain file name")]
    InvalidReportName(String),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
