use crate::issue::Severity;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Maximum number of inputs parsed at the same time
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Upper bound for continuation lines absorbed into one text record
    #[serde(default = "default_max_continuation_lines")]
    pub max_continuation_lines: usize,

    /// Fill in content fingerprints for issues without one
    #[serde(default)]
    pub fingerprint: bool,

    /// Exit with an error when an issue of this severity or worse is found
    #[serde(default)]
    pub fail_on: Option<Severity>,

    #[serde(default)]
    pub inputs: Vec<Input>,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Input {
    /// Registry id of the producing tool, e.g. `gcc4` or `hadolint`
    pub tool: String,

    pub path: PathBuf,

    /// Report name, defaults to the file stem of `path`
    #[serde(default)]
    pub name: Option<String>,
}

/// Whether `name` can be joined onto the report directory without leaving it.
pub fn is_plain_file_name(name: &str) -> bool {
    Path::new(name).file_name() == Some(OsStr::new(name))
}

impl Input {
    pub fn report_name(&self) -> String {
        match &self.name {
            Some(name) => name.clone(),
            None => self
                .path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| self.tool.clone()),
        }
    }
}
