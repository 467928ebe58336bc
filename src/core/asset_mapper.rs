use crate::core::csv_parser::parse_csv;
use crate::domain::model::{AssetRequestRecord, HeaderClass, ParsedTable, SemanticField};
use regex::Regex;
use std::sync::OnceLock;

enum KeywordMatch {
    AnyOf(&'static [&'static str]),
    AllOf(&'static [&'static str]),
}

impl KeywordMatch {
    fn matches(&self, header: &str) -> bool {
        match self {
            KeywordMatch::AnyOf(words) => words.iter().any(|w| header.contains(w)),
            KeywordMatch::AllOf(words) => words.iter().all(|w| header.contains(w)),
        }
    }
}

struct HeaderRule {
    keywords: KeywordMatch,
    field: SemanticField,
}

// 順序即優先權，第一個符合的規則勝出
const HEADER_RULES: &[HeaderRule] = &[
    HeaderRule {
        keywords: KeywordMatch::AnyOf(&["platform", "channel"]),
        field: SemanticField::Platform,
    },
    HeaderRule {
        keywords: KeywordMatch::AllOf(&["creative", "type"]),
        field: SemanticField::CreativeType,
    },
    HeaderRule {
        keywords: KeywordMatch::AnyOf(&["size", "dimension", "aspect"]),
        field: SemanticField::Size,
    },
    HeaderRule {
        keywords: KeywordMatch::AnyOf(&["duration", "length"]),
        field: SemanticField::Duration,
    },
    HeaderRule {
        keywords: KeywordMatch::AnyOf(&["count", "quantity", "number"]),
        field: SemanticField::Count,
    },
    HeaderRule {
        keywords: KeywordMatch::AnyOf(&["note", "comment", "description"]),
        field: SemanticField::Notes,
    },
];

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// First run of ASCII digits in the cell, parsed as an integer.
/// A run too long for `u64` saturates.
fn extract_number(cell: &str) -> Option<u64> {
    digit_run()
        .find(cell)
        .map(|m| m.as_str().parse().unwrap_or(u64::MAX))
}

pub fn classify_header(header: &str) -> HeaderClass {
    let normalized = header.to_lowercase();
    HEADER_RULES
        .iter()
        .find(|rule| rule.keywords.matches(&normalized))
        .map(|rule| HeaderClass::Semantic(rule.field))
        .unwrap_or_else(|| HeaderClass::Passthrough(header.to_string()))
}

fn apply_cell(record: &mut AssetRequestRecord, class: &HeaderClass, cell: &str) {
    let value = cell.trim();
    match class {
        HeaderClass::Semantic(SemanticField::Platform) => record.platform = Some(value.to_string()),
        HeaderClass::Semantic(SemanticField::CreativeType) => {
            record.creative_type = Some(value.to_string())
        }
        HeaderClass::Semantic(SemanticField::Size) => record.size = Some(value.to_string()),
        HeaderClass::Semantic(SemanticField::Duration) => {
            record.duration = Some(extract_number(value))
        }
        HeaderClass::Semantic(SemanticField::Count) => {
            record.count = Some(extract_number(value).unwrap_or(0))
        }
        HeaderClass::Semantic(SemanticField::Notes) => record.notes = Some(value.to_string()),
        HeaderClass::Passthrough(header) => {
            record.extra.insert(header.clone(), value.to_string());
        }
    }
}

/// Map a parsed table onto asset-request records, one per data row.
pub fn map_table(table: &ParsedTable) -> Vec<AssetRequestRecord> {
    if table.headers.is_empty() || table.rows.is_empty() {
        return Vec::new();
    }

    let classes: Vec<HeaderClass> = table.headers.iter().map(|h| classify_header(h)).collect();
    for (header, class) in table.headers.iter().zip(&classes) {
        tracing::debug!("Header '{}' mapped to '{}'", header, class.key());
    }

    table
        .rows
        .iter()
        .map(|row| {
            let mut record = AssetRequestRecord::default();
            // 超出欄位數的儲存格忽略，缺少的儲存格不設定
            for (class, cell) in classes.iter().zip(row) {
                apply_cell(&mut record, class, cell);
            }
            record
        })
        .collect()
}

pub fn parse_asset_request_csv(content: &str) -> Vec<AssetRequestRecord> {
    map_table(&parse_csv(content))
}
