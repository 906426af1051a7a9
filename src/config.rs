//! Optional YAML configuration.
//!
//! ```yaml
//! format: json
//! allow_empty: false
//! allow_parse_errors: false
//! warn_unknown: true
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::ConfigError;

/// Config file names searched for in the working directory.
pub const DEFAULT_CONFIG_NAMES: &[&str] = &["cgoexport.yaml", ".cgoexport.yaml"];

/// Output format for extracted signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(ConfigError::InvalidFormat(other.to_string())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level configuration. Every key is optional.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// "text" (default) or "json"
    #[serde(default)]
    pub format: Option<String>,
    /// Treat zero exported functions as success (default: false)
    #[serde(default)]
    pub allow_empty: Option<bool>,
    /// Extract from files with syntax errors (default: false)
    #[serde(default)]
    pub allow_parse_errors: Option<bool>,
    /// Warn about parameters and results with unsupported types (default: true)
    #[serde(default)]
    pub warn_unknown: Option<bool>,
}

impl Config {
    /// Parse a config from a YAML file.
    pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Find a config file in `dir`, if any.
    pub fn discover(dir: &Path) -> Option<PathBuf> {
        DEFAULT_CONFIG_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Returns the output format (defaults to text).
    pub fn output_format(&self) -> Result<OutputFormat, ConfigError> {
        match self.format.as_deref() {
            Some(f) => f.parse(),
            None => Ok(OutputFormat::Text),
        }
    }

    pub fn should_allow_empty(&self) -> bool {
        self.allow_empty.unwrap_or(false)
    }

    pub fn should_allow_parse_errors(&self) -> bool {
        self.allow_parse_errors.unwrap_or(false)
    }

    pub fn should_warn_unknown(&self) -> bool {
        self.warn_unknown.unwrap_or(true)
    }

    /// Validate values that serde cannot check.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.output_format().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.output_format().unwrap(), OutputFormat::Text);
        assert!(!config.should_allow_empty());
        assert!(!config.should_allow_parse_errors());
        assert!(config.should_warn_unknown());
    }

    #[test]
    fn test_parse_yaml() {
        let config: Config = serde_yaml::from_str(
            r#"
format: json
allow_empty: true
warn_unknown: false
"#,
        )
        .unwrap();

        assert_eq!(config.output_format().unwrap(), OutputFormat::Json);
        assert!(config.should_allow_empty());
        assert!(!config.should_allow_parse_errors());
        assert!(!config.should_warn_unknown());
    }

    #[test]
    fn test_invalid_format() {
        let config = Config {
            format: Some("xml".to_string()),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat(ref f) if f == "xml"));
    }

    #[test]
    fn test_discover_and_parse_file() {
        let temp = TempDir::new().unwrap();
        assert!(Config::discover(temp.path()).is_none());

        let path = temp.path().join(".cgoexport.yaml");
        std::fs::write(&path, "format: json\n").unwrap();

        let found = Config::discover(temp.path()).expect("config should be found");
        assert_eq!(found, path);

        let config = Config::parse_file(&found).unwrap();
        assert_eq!(config.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_parse_file_errors() {
        let temp = TempDir::new().unwrap();

        let missing = Config::parse_file(temp.path().join("nope.yaml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Read { .. }));

        let bad = temp.path().join("bad.yaml");
        std::fs::write(&bad, "allow_empty: [not, a, bool]\n").unwrap();
        let err = Config::parse_file(&bad).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
