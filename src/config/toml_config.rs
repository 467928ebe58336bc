use crate::core::ConfigProvider;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub intake: IntakeConfig,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    pub name: String,
    pub description: Option<String>,
    pub preview: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub json: Option<String>,
    pub csv: Option<String>,
    pub summary: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(IntakeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| IntakeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${INTAKE_DIR})，未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").unwrap());

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("intake.name", &self.intake.name)?;
        validation::validate_path("source.path", &self.source.path)?;
        validation::validate_file_extension(
            "source.path",
            &self.source.path,
            validation::SUPPORTED_INPUT_EXTENSIONS,
        )?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if let Some(format) = self.log_format() {
            if format != "compact" && format != "json" {
                return Err(IntakeError::ConfigValidationError {
                    field: "logging.format".to_string(),
                    message: format!("Unknown log format '{}'. Valid formats: compact, json", format),
                });
            }
        }

        Ok(())
    }

    pub fn log_level(&self) -> &str {
        self.logging
            .as_ref()
            .and_then(|l| l.level.as_deref())
            .unwrap_or("info")
    }

    pub fn log_format(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.format.as_deref())
    }

    fn filenames(&self) -> Option<&FilenameConfig> {
        self.load.filenames.as_ref()
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.source.path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn preview(&self) -> bool {
        self.intake.preview.unwrap_or(false)
    }

    fn json_filename(&self) -> &str {
        self.filenames()
            .and_then(|f| f.json.as_deref())
            .unwrap_or("asset_requests.json")
    }

    fn csv_filename(&self) -> &str {
        self.filenames()
            .and_then(|f| f.csv.as_deref())
            .unwrap_or("asset_requests.csv")
    }

    fn summary_filename(&self) -> &str {
        self.filenames()
            .and_then(|f| f.summary.as_deref())
            .unwrap_or("intake_summary.json")
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
