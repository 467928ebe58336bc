use crate::core::csv_parser::parse_csv;
use crate::domain::model::{ParsedTable, ValidationResult};
use crate::utils::error::{IntakeError, Result};
use std::panic::{self, AssertUnwindSafe};

/// Pre-flight check run before the full parse.
///
/// Content with no comma is only rejected when it is a single line; multi-line
/// content without commas passes and is left to the header/row checks.
pub fn check_csv_content(content: &str) -> Result<ParsedTable> {
    // BOM 視同空白
    let trimmed = content.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}');
    if trimmed.is_empty() {
        return Err(IntakeError::EmptyContent);
    }

    if !content.contains(',') && trimmed.lines().count() == 1 {
        return Err(IntakeError::NotCsvFormat);
    }

    let table = panic::catch_unwind(AssertUnwindSafe(|| parse_csv(content))).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "unknown parser failure".to_string());
        IntakeError::ParseFailure { message }
    })?;

    if table.headers.is_empty() {
        return Err(IntakeError::NoHeaders);
    }

    if table.rows.is_empty() {
        return Err(IntakeError::NoDataRows);
    }

    Ok(table)
}

pub fn validate_csv_content(content: &str) -> ValidationResult {
    match check_csv_content(content) {
        Ok(_) => ValidationResult::ok(),
        Err(e) => {
            tracing::debug!("CSV content rejected: {}", e);
            ValidationResult::invalid(e.to_string())
        }
    }
}
