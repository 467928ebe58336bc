use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

/// Tokenized CSV document: header line plus data lines, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub raw_content: String,
}

impl ParsedTable {
    pub fn empty(raw_content: &str) -> Self {
        Self {
            headers: Vec::new(),
            rows: Vec::new(),
            raw_content: raw_content.to_string(),
        }
    }
}

/// The six canonical asset-request attributes a header can map onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SemanticField {
    Platform,
    CreativeType,
    Size,
    Duration,
    Count,
    Notes,
}

impl SemanticField {
    pub const ALL: [SemanticField; 6] = [
        SemanticField::Platform,
        SemanticField::CreativeType,
        SemanticField::Size,
        SemanticField::Duration,
        SemanticField::Count,
        SemanticField::Notes,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            SemanticField::Platform => "platform",
            SemanticField::CreativeType => "creativeType",
            SemanticField::Size => "size",
            SemanticField::Duration => "duration",
            SemanticField::Count => "count",
            SemanticField::Notes => "notes",
        }
    }
}

/// 欄位分類結果：語意欄位或原樣保留的欄位名稱
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderClass {
    Semantic(SemanticField),
    Passthrough(String),
}

impl HeaderClass {
    pub fn key(&self) -> &str {
        match self {
            HeaderClass::Semantic(field) => field.key(),
            HeaderClass::Passthrough(header) => header,
        }
    }
}

/// One asset request read from a CSV data row.
///
/// `None` on any field means the row never set it (no such column, or the
/// row was too short). `duration` keeps a second level so a present column
/// without digits serializes as `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRequestRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creative_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<Option<u64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

impl AssetRequestRecord {
    /// Cell text for a semantic field, as written to CSV output.
    pub fn field_text(&self, field: SemanticField) -> String {
        match field {
            SemanticField::Platform => self.platform.clone().unwrap_or_default(),
            SemanticField::CreativeType => self.creative_type.clone().unwrap_or_default(),
            SemanticField::Size => self.size.clone().unwrap_or_default(),
            SemanticField::Duration => self
                .duration
                .flatten()
                .map(|d| d.to_string())
                .unwrap_or_default(),
            SemanticField::Count => self.count.map(|c| c.to_string()).unwrap_or_default(),
            SemanticField::Notes => self.notes.clone().unwrap_or_default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SourceDocument {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderMapping {
    pub header: String,
    pub key: String,
    pub semantic: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct IntakeSummary {
    pub source: String,
    pub header_count: usize,
    pub row_count: usize,
    pub record_count: usize,
    pub header_mapping: Vec<HeaderMapping>,
    pub ingested_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub records: Vec<AssetRequestRecord>,
    pub summary: IntakeSummary,
    pub json_output: String,
    pub csv_output: String,
}
