use crate::utils::error::{IntakeError, Result};
use std::collections::HashSet;

pub const SUPPORTED_INPUT_EXTENSIONS: &[&str] = &["csv", "txt"];
pub const SUPPORTED_OUTPUT_FORMATS: &[&str] = &["json", "csv"];

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    let allowed_set: HashSet<&str> = allowed_extensions.iter().copied().collect();

    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_set.contains(extension.to_ascii_lowercase().as_str()) => {
            Ok(())
        }
        Some(extension) => Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_output_formats(field_name: &str, formats: &[String]) -> Result<()> {
    if formats.is_empty() {
        return Err(IntakeError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    for format in formats {
        if !SUPPORTED_OUTPUT_FORMATS.contains(&format.as_str()) {
            return Err(IntakeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: format.clone(),
                reason: format!(
                    "Unsupported format. Valid formats: {}",
                    SUPPORTED_OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(IntakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output_path", "./output").is_ok());
        assert!(validate_path("output_path", "").is_err());
        assert!(validate_path("output_path", "out\0put").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input", "requests.csv", SUPPORTED_INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "REQUESTS.CSV", SUPPORTED_INPUT_EXTENSIONS).is_ok());
        assert!(validate_file_extension("input", "requests.xlsx", SUPPORTED_INPUT_EXTENSIONS).is_err());
        assert!(validate_file_extension("input", "requests", SUPPORTED_INPUT_EXTENSIONS).is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        let formats = vec!["json".to_string(), "csv".to_string()];
        assert!(validate_output_formats("formats", &formats).is_ok());

        let invalid = vec!["parquet".to_string()];
        assert!(validate_output_formats("formats", &invalid).is_err());
        assert!(validate_output_formats("formats", &[]).is_err());
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("input", "data.csv").is_ok());
        assert!(validate_non_empty_string("input", "   ").is_err());
    }
}
