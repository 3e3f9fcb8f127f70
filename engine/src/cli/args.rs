use crate::config::AnalysisSettings;
use crate::error::AnalysisError;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pnate")]
#[command(about = "Descriptive statistics and chart data for PNATE education transfers")]
#[command(version)]
pub struct Cli {
    /// Path to the transfers CSV (overrides the config file)
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory where chart data is written as JSON after each analysis
    #[arg(long)]
    pub export_dir: Option<PathBuf>,

    /// Field delimiter; sniffed from the header line when omitted
    #[arg(long)]
    pub delimiter: Option<char>,

    /// Enable debug logging
    #[arg(long, short)]
    pub verbose: bool,
}

impl Cli {
    /// Config file values (or defaults), with flags taking precedence.
    pub fn settings(&self) -> Result<AnalysisSettings, AnalysisError> {
        let mut settings = match &self.config {
            Some(path) => AnalysisSettings::from_json_file(path)?,
            None => AnalysisSettings::default(),
        };
        if let Some(csv) = &self.csv {
            settings.csv_path = csv.clone();
        }
        if let Some(dir) = &self.export_dir {
            settings.export_dir = Some(dir.clone());
        }
        if self.delimiter.is_some() {
            settings.delimiter = self.delimiter;
        }
        if self.verbose {
            settings.log_level = "debug".to_string();
        }
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from(["pnate", "--csv", "repasses.csv", "--export-dir", "out", "--delimiter", ";", "-v"]);
        let settings = cli.settings().unwrap();
        assert_eq!(settings.csv_path, PathBuf::from("repasses.csv"));
        assert_eq!(settings.export_dir, Some(PathBuf::from("out")));
        assert_eq!(settings.delimiter, Some(';'));
        assert_eq!(settings.log_level, "debug");
    }

    #[test]
    fn test_no_flags_keeps_defaults() {
        let cli = Cli::parse_from(["pnate"]);
        assert_eq!(cli.settings().unwrap(), AnalysisSettings::default());
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let cli = Cli::parse_from(["pnate", "--delimiter", "§"]);
        assert!(cli.settings().is_err());
    }
}
