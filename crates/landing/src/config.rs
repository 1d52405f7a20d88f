//! Configuration for Landing
//!
//! ```toml
//! control_pattern = '(?i)\.(ctl|done|ready)$'
//!
//! [[uploads]]
//! name = "sales"
//! table = "sales"
//! pattern = "{table}_{?*}_{yyyyMMdd}.csv"
//! source_dir = "/data/inbound/sales"
//! destination = "/data/landing/sales"
//! ```

use crate::control::{ControlFileFilter, DEFAULT_CONTROL_PATTERN};
use crate::error::{LandingError, Result};
use landing_pattern::CompiledMatcher;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingConfig {
    /// Regex for control files that are never routed
    #[serde(default = "default_control_pattern")]
    pub control_pattern: String,

    /// Upload configurations, one pattern each
    #[serde(default)]
    pub uploads: Vec<UploadConfig>,
}

/// One inbound directory routed by one pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Unique name, used in logs and plans
    pub name: String,

    /// Value substituted for `{table}` in the pattern
    pub table: String,

    /// File name pattern
    pub pattern: String,

    /// Directory files are dropped into
    pub source_dir: PathBuf,

    /// Root that rendered date directories are joined onto
    pub destination: PathBuf,

    /// Descend into subdirectories of `source_dir`
    #[serde(default)]
    pub recursive: bool,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_control_pattern() -> String {
    DEFAULT_CONTROL_PATTERN.to_string()
}

fn default_enabled() -> bool {
    true
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            control_pattern: default_control_pattern(),
            uploads: Vec::new(),
        }
    }
}

impl LandingConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: LandingConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn enabled_uploads(&self) -> impl Iterator<Item = &UploadConfig> {
        self.uploads.iter().filter(|u| u.enabled)
    }

    /// Check names, tables, the control regex, and that every enabled
    /// pattern compiles.
    pub fn validate(&self) -> Result<()> {
        ControlFileFilter::new(&self.control_pattern)?;

        let mut seen = HashSet::new();
        for upload in &self.uploads {
            if upload.name.trim().is_empty() {
                return Err(LandingError::Config("Upload name must not be empty".to_string()));
            }
            if !seen.insert(upload.name.as_str()) {
                return Err(LandingError::Config(format!(
                    "Duplicate upload name '{}'",
                    upload.name
                )));
            }
            if upload.table.trim().is_empty() {
                return Err(LandingError::Config(format!(
                    "Upload '{}' has an empty table name",
                    upload.name
                )));
            }
            if upload.enabled {
                upload.compile()?;
            }
        }
        Ok(())
    }
}

impl UploadConfig {
    /// Compile this upload's pattern
    pub fn compile(&self) -> Result<CompiledMatcher> {
        CompiledMatcher::compile(&self.pattern, &self.table).map_err(|source| {
            LandingError::Compile {
                upload: self.name.clone(),
                source,
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use landing_pattern::CompileError;

    fn upload(name: &str, pattern: &str) -> UploadConfig {
        UploadConfig {
            name: name.to_string(),
            table: "sales".to_string(),
            pattern: pattern.to_string(),
            source_dir: PathBuf::from("/data/inbound"),
            destination: PathBuf::from("/data/landing"),
            recursive: false,
            enabled: true,
        }
    }

    #[test]
    fn test_default_config() {
        let config = LandingConfig::default();
        assert_eq!(config.control_pattern, DEFAULT_CONTROL_PATTERN);
        assert!(config.uploads.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = LandingConfig {
            control_pattern: r"\.ctl$".to_string(),
            uploads: vec![upload("sales", "{table}_{yyyyMMdd}.csv")],
        };

        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: LandingConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.control_pattern, config.control_pattern);
        assert_eq!(parsed.uploads, config.uploads);
    }

    #[test]
    fn test_defaults_when_omitted() {
        let parsed: LandingConfig = toml::from_str(
            r#"
            [[uploads]]
            name = "sales"
            table = "sales"
            pattern = "{table}_{yyyyMMdd}.csv"
            source_dir = "/in"
            destination = "/out"
            "#,
        )
        .unwrap();
        assert_eq!(parsed.control_pattern, DEFAULT_CONTROL_PATTERN);
        assert!(parsed.uploads[0].enabled);
        assert!(!parsed.uploads[0].recursive);
    }

    #[test]
    fn test_validate_rejects_duplicates() {
        let config = LandingConfig {
            uploads: vec![
                upload("sales", "{table}_{yyyy}.csv"),
                upload("sales", "{table}_{yyyyMM}.csv"),
            ],
            ..LandingConfig::default()
        };
        assert!(matches!(config.validate(), Err(LandingError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_empty_table() {
        let mut bad = upload("sales", "{table}_{yyyy}.csv");
        bad.table = " ".to_string();
        let config = LandingConfig {
            uploads: vec![bad],
            ..LandingConfig::default()
        };
        assert!(matches!(config.validate(), Err(LandingError::Config(_))));
    }

    #[test]
    fn test_validate_reports_pattern_errors() {
        let config = LandingConfig {
            uploads: vec![upload("hourly", "{table}_{HH}.csv")],
            ..LandingConfig::default()
        };
        match config.validate() {
            Err(LandingError::Compile { upload, source }) => {
                assert_eq!(upload, "hourly");
                assert!(matches!(source, CompileError::MissingFields { .. }));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_validate_skips_disabled_uploads() {
        let mut disabled = upload("old", "{table}_{HH}.csv");
        disabled.enabled = false;
        let config = LandingConfig {
            uploads: vec![disabled],
            ..LandingConfig::default()
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.enabled_uploads().count(), 0);
    }

    #[test]
    fn test_validate_rejects_bad_control_regex() {
        let config = LandingConfig {
            control_pattern: "[".to_string(),
            uploads: Vec::new(),
        };
        assert!(matches!(config.validate(), Err(LandingError::Regex(_))));
    }

    #[test]
    fn test_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("landing.toml");
        let config = LandingConfig {
            uploads: vec![upload("sales", "{table}_{?*}_{yyyyMMdd}.csv")],
            ..LandingConfig::default()
        };
        config.save(&path).unwrap();

        let loaded = LandingConfig::load(&path).unwrap();
        assert_eq!(loaded.uploads, config.uploads);
        assert!(matches!(
            LandingConfig::load(&dir.path().join("missing.toml")),
            Err(LandingError::Io(_))
        ));
    }
}
