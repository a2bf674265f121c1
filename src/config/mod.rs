pub(crate) mod defaults;
mod types;

pub use types::*;

use crate::error::ConfigError;
use crate::parser::{registry, ParseOptions};
use defaults::*;
use std::collections::HashSet;
use std::path::Path;

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            report_dir: default_report_dir(),
            concurrency: default_concurrency(),
            max_continuation_lines: default_max_continuation_lines(),
            fingerprint: false,
            fail_on: None,
            inputs: Vec::new(),
        }
    }
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Validate the config
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.inputs.is_empty() {
            return Err(ConfigError::NoInputs);
        }

        if self.concurrency == 0 {
            return Err(ConfigError::ZeroConcurrency);
        }

        // Every input must name a registered tool and get its own report files
        let mut names = HashSet::new();
        for input in &self.inputs {
            if registry::find(&input.tool).is_err() {
                return Err(ConfigError::UnknownTool {
                    tool: input.tool.clone(),
                    path: input.path.clone(),
                });
            }

            let name = input.report_name();
            if !is_plain_file_name(&name) {
                return Err(ConfigError::InvalidReportName {
                    name,
                    path: input.path.clone(),
                });
            }
            if !names.insert(name.clone()) {
                return Err(ConfigError::DuplicateReportName { name });
            }
        }

        Ok(())
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_continuation_lines: self.max_continuation_lines,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Severity;
    use std::io::Write;
    use std::path::PathBuf;

    const SAMPLE: &str = r#"
report_dir: out
concurrency: 2
fingerprint: true
fail_on: WARNING_HIGH
inputs:
  - tool: gcc4
    path: build/gcc.log
  - tool: hadolint
    path: lint/hadolint.json
    name: docker
"#;

    #[test]
    fn test_load_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.version, 1);
        assert_eq!(config.report_dir, PathBuf::from("out"));
        assert_eq!(config.concurrency, 2);
        assert_eq!(config.max_continuation_lines, 200);
        assert!(config.fingerprint);
        assert_eq!(config.fail_on, Some(Severity::WarningHigh));
        assert_eq!(config.inputs.len(), 2);
        assert_eq!(config.inputs[0].report_name(), "gcc");
        assert_eq!(config.inputs[1].report_name(), "docker");
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/diagnorm.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_validate_rejects_unknown_tool() {
        let config = Config {
            inputs: vec![Input {
                tool: "msbuild".to_string(),
                path: PathBuf::from("build.log"),
                name: None,
            }],
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownTool { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty_and_zero_concurrency() {
        assert!(matches!(
            Config::default().validate(),
            Err(ConfigError::NoInputs)
        ));

        let config = Config {
            concurrency: 0,
            inputs: vec![Input {
                tool: "gcc4".to_string(),
                path: PathBuf::from("build.log"),
                name: None,
            }],
            ..Config::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroConcurrency)
        ));
    }

    fn input(tool: &str, path: &str, name: Option<&str>) -> Input {
        Input {
            tool: tool.to_string(),
            path: PathBuf::from(path),
            name: name.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_rejects_colliding_report_names() {
        let config = Config {
            inputs: vec![
                input("gcc4", "a/build.log", None),
                input("nagfor", "b/build.log", None),
            ],
            ..Config::default()
        };
        match config.validate() {
            Err(ConfigError::DuplicateReportName { name }) => assert_eq!(name, "build"),
            other => panic!("expected duplicate report name, got {:?}", other),
        }

        let renamed = Config {
            inputs: vec![
                input("gcc4", "a/build.log", None),
                input("nagfor", "b/build.log", Some("fortran")),
            ],
            ..Config::default()
        };
        renamed.validate().unwrap();

        let explicit = Config {
            inputs: vec![
                input("gcc4", "gcc.log", Some("same")),
                input("hadolint", "lint.json", Some("same")),
            ],
            ..Config::default()
        };
        assert!(matches!(
            explicit.validate(),
            Err(ConfigError::DuplicateReportName { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_report_names_leaving_report_dir() {
        for name in ["../escaped", "nested/name", "/abs", "..", ".", ""] {
            let config = Config {
                inputs: vec![input("gcc4", "build.log", Some(name))],
                ..Config::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidReportName { .. })),
                "accepted {:?}",
                name
            );
        }
    }

    #[test]
    fn test_parse_options_follow_config() {
        let config = Config {
            max_continuation_lines: 5,
            ..Config::default()
        };
        assert_eq!(config.parse_options().max_continuation_lines, 5);
    }
}
