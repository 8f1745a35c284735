use crate::diagnostics::DiagnosticLevel;
use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Target language version; gates which rewrites are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum LanguageVersion {
    #[serde(rename = "7.3")]
    V7_3,
    #[serde(rename = "8")]
    V8,
    #[serde(rename = "9")]
    V9,
    #[serde(rename = "10")]
    V10,
    #[serde(rename = "11")]
    V11,
    #[serde(rename = "12")]
    V12,
    #[default]
    #[serde(rename = "latest")]
    Latest,
}

impl LanguageVersion {
    /// `??=`
    pub fn supports_coalesce_assignment(self) -> bool {
        self >= LanguageVersion::V8
    }

    /// `>>>` and `>>>=`
    pub fn supports_unsigned_right_shift(self) -> bool {
        self >= LanguageVersion::V11
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LanguageVersion::V7_3 => "7.3",
            LanguageVersion::V8 => "8",
            LanguageVersion::V9 => "9",
            LanguageVersion::V10 => "10",
            LanguageVersion::V11 => "11",
            LanguageVersion::V12 => "12",
            LanguageVersion::Latest => "latest",
        }
    }
}

impl fmt::Display for LanguageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageVersion {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "7.3" => Ok(LanguageVersion::V7_3),
            "8" | "8.0" => Ok(LanguageVersion::V8),
            "9" | "9.0" => Ok(LanguageVersion::V9),
            "10" | "10.0" => Ok(LanguageVersion::V10),
            "11" | "11.0" => Ok(LanguageVersion::V11),
            "12" | "12.0" => Ok(LanguageVersion::V12),
            "latest" | "preview" => Ok(LanguageVersion::Latest),
            other => Err(ConfigError::UnknownLanguageVersion(other.to_string())),
        }
    }
}

/// How loudly a code-style preference reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Fixes apply but nothing is reported
    Silent,
    #[default]
    Suggestion,
    Warning,
    Error,
}

impl Severity {
    pub fn level(self) -> Option<DiagnosticLevel> {
        match self {
            Severity::Silent => None,
            Severity::Suggestion => Some(DiagnosticLevel::Info),
            Severity::Warning => Some(DiagnosticLevel::Warning),
            Severity::Error => Some(DiagnosticLevel::Error),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeStyleOption {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub severity: Severity,
}

impl Default for CodeStyleOption {
    fn default() -> Self {
        Self {
            enabled: true,
            severity: Severity::Suggestion,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Main configuration
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpgenConfig {
    /// Language version of the code being rewritten (default: latest)
    #[serde(default)]
    pub language_version: LanguageVersion,

    /// `x = x + y` -> `x += y`, `x++`, `x--` (IDE0054)
    #[serde(default)]
    pub prefer_compound_assignment: CodeStyleOption,

    /// `x ?? (x = y)` -> `x ??= y` (IDE0074)
    #[serde(default)]
    pub prefer_coalesce_assignment: CodeStyleOption,
}

/// Values given on the command line, applied over the file configuration
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub language_version: Option<LanguageVersion>,
    pub severity: Option<Severity>,
}

impl OpgenConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Pick the loader from the file extension, JSON otherwise
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml_file(path),
            _ => Self::from_file(path),
        }
    }

    /// Create a default configuration and write it to a file
    pub fn init_file(path: &Path) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(&OpgenConfig::default())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    pub fn merge_with_cli(&mut self, overrides: &CliOverrides) {
        if let Some(version) = overrides.language_version {
            self.language_version = version;
        }
        if let Some(severity) = overrides.severity {
            self.prefer_compound_assignment.severity = severity;
            self.prefer_coalesce_assignment.severity = severity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = OpgenConfig::default();
        assert_eq!(config.language_version, LanguageVersion::Latest);
        assert!(config.prefer_compound_assignment.enabled);
        assert!(config.prefer_coalesce_assignment.enabled);
        assert_eq!(
            config.prefer_compound_assignment.severity,
            Severity::Suggestion
        );
    }

    #[test]
    fn test_version_gates() {
        assert!(!LanguageVersion::V7_3.supports_coalesce_assignment());
        assert!(LanguageVersion::V8.supports_coalesce_assignment());
        assert!(!LanguageVersion::V10.supports_unsigned_right_shift());
        assert!(LanguageVersion::V11.supports_unsigned_right_shift());
        assert!(LanguageVersion::Latest.supports_unsigned_right_shift());
    }

    #[test]
    fn test_parse_language_version() {
        assert_eq!("7.3".parse::<LanguageVersion>().unwrap(), LanguageVersion::V7_3);
        assert_eq!("9.0".parse::<LanguageVersion>().unwrap(), LanguageVersion::V9);
        assert!(matches!(
            "6".parse::<LanguageVersion>(),
            Err(ConfigError::UnknownLanguageVersion(v)) if v == "6"
        ));
    }

    #[test]
    fn test_deserialize_config() {
        let json = r#"{
            "languageVersion": "7.3",
            "preferCoalesceAssignment": { "enabled": false }
        }"#;
        let config: OpgenConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.language_version, LanguageVersion::V7_3);
        assert!(!config.prefer_coalesce_assignment.enabled);
        assert_eq!(
            config.prefer_coalesce_assignment.severity,
            Severity::Suggestion
        );
        assert!(config.prefer_compound_assignment.enabled);
    }

    #[test]
    fn test_yaml_and_json_files() {
        let dir = TempDir::new().unwrap();

        let yaml = dir.path().join("opgen.yaml");
        std::fs::write(
            &yaml,
            "languageVersion: \"11\"\npreferCompoundAssignment:\n  severity: warning\n",
        )
        .unwrap();
        let config = OpgenConfig::load(&yaml).unwrap();
        assert_eq!(config.language_version, LanguageVersion::V11);
        assert_eq!(config.prefer_compound_assignment.severity, Severity::Warning);

        let json = dir.path().join("opgen.json");
        OpgenConfig::init_file(&json).unwrap();
        assert_eq!(OpgenConfig::load(&json).unwrap(), OpgenConfig::default());
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = OpgenConfig::default();
        config.merge_with_cli(&CliOverrides {
            language_version: Some(LanguageVersion::V8),
            severity: Some(Severity::Error),
        });
        assert_eq!(config.language_version, LanguageVersion::V8);
        assert_eq!(config.prefer_coalesce_assignment.severity, Severity::Error);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(
            OpgenConfig::from_file(&path),
            Err(ConfigError::Json(_))
        ));
    }
}
