pub mod asset_mapper;
pub mod content_validator;
pub mod csv_parser;
pub mod engine;
pub mod pipeline;

pub use crate::domain::model::{AssetRequestRecord, ParsedTable, SourceDocument, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
