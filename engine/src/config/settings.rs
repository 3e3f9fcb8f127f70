// Analysis settings, loaded from an optional JSON file and overridden by command line flags
use crate::error::AnalysisError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct AnalysisSettings {
    pub csv_path: PathBuf,
    /// `None` sniffs the delimiter from the header line.
    pub delimiter: Option<char>,
    pub excluded_entity_keyword: String,
    pub export_dir: Option<PathBuf>,
    pub log_level: String,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        AnalysisSettings {
            csv_path: PathBuf::from("PNATE - REPASSES.csv"),
            delimiter: None,
            excluded_entity_keyword: "SECRETARIA".to_string(),
            export_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl AnalysisSettings {
    pub fn from_json_file(path: &Path) -> Result<Self, AnalysisError> {
        if !path.exists() {
            return Err(AnalysisError::ConfigError(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        let raw = std::fs::read_to_string(path)?;
        let settings: AnalysisSettings = serde_json::from_str(&raw).map_err(|e| {
            AnalysisError::ConfigError(format!("invalid config file '{}': {}", path.display(), e))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AnalysisError> {
        if let Some(delimiter) = self.delimiter {
            if !delimiter.is_ascii() {
                return Err(AnalysisError::ConfigError(format!(
                    "delimiter '{}' must be a single ASCII character",
                    delimiter
                )));
            }
        }
        self.tracing_level()?;
        Ok(())
    }

    pub fn tracing_level(&self) -> Result<tracing::Level, AnalysisError> {
        tracing::Level::from_str(self.log_level.trim()).map_err(|_| {
            AnalysisError::ConfigError(format!("unknown log level '{}'", self.log_level))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults() {
        let settings = AnalysisSettings::default();
        assert_eq!(settings.excluded_entity_keyword, "SECRETARIA");
        assert_eq!(settings.delimiter, None);
        assert_eq!(settings.tracing_level().unwrap(), tracing::Level::WARN);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "csv_path": "dados.csv", "delimiter": ";", "log_level": "debug" }}"#).unwrap();
        let settings = AnalysisSettings::from_json_file(file.path()).unwrap();
        assert_eq!(settings.csv_path, PathBuf::from("dados.csv"));
        assert_eq!(settings.delimiter, Some(';'));
        assert_eq!(settings.excluded_entity_keyword, "SECRETARIA");
        assert_eq!(settings.tracing_level().unwrap(), tracing::Level::DEBUG);
    }

    #[test]
    fn test_invalid_log_level_is_config_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "log_level": "loud" }}"#).unwrap();
        let err = AnalysisSettings::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigError(_)));
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = AnalysisSettings::from_json_file(Path::new("/nonexistent/pnate.json")).unwrap_err();
        assert!(matches!(err, AnalysisError::ConfigError(_)));
    }
}
