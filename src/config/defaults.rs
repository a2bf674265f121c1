use std::path::PathBuf;

pub fn default_version() -> u32 {
    1
}

pub fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn default_concurrency() -> usize {
    4
}

pub fn default_max_continuation_lines() -> usize {
    200
}
