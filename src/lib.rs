pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use self::core::asset_mapper::{classify_header, map_table, parse_asset_request_csv};
pub use self::core::content_validator::{check_csv_content, validate_csv_content};
pub use self::core::csv_parser::{format_csv_as_table, parse_csv, tokenize_line};
pub use self::core::{engine::IntakeEngine, pipeline::CsvIntakePipeline};
pub use domain::model::{
    AssetRequestRecord, HeaderClass, ParsedTable, SemanticField, ValidationResult,
};
pub use utils::error::{IntakeError, Result};
