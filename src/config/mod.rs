pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "asset-intake")]
#[command(about = "Turn creative asset-request CSV exports into structured records")]
pub struct CliConfig {
    #[arg(short, long, help = "CSV file to ingest")]
    pub input: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, value_delimiter = ',', default_value = "json")]
    pub formats: Vec<String>,

    #[arg(long, help = "Log the parsed table before mapping")]
    pub preview: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn preview(&self) -> bool {
        self.preview
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("input", &self.input)?;
        validation::validate_file_extension(
            "input",
            &self.input,
            validation::SUPPORTED_INPUT_EXTENSIONS,
        )?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_output_formats("formats", &self.formats)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let config = CliConfig::parse_from(["asset-intake", "--input", "requests.csv"]);
        assert_eq!(config.output_path, "./output");
        assert_eq!(config.formats, vec!["json"]);
        assert!(!config.preview);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cli_format_list() {
        let config = CliConfig::parse_from([
            "asset-intake",
            "-i",
            "requests.csv",
            "--formats",
            "json,csv",
            "--preview",
        ]);
        assert_eq!(config.output_formats(), ["json".to_string(), "csv".to_string()]);
        assert!(config.preview());
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        let config = CliConfig::parse_from([
            "asset-intake",
            "--input",
            "requests.csv",
            "--formats",
            "xml",
        ]);
        assert!(config.validate().is_err());
    }
}
