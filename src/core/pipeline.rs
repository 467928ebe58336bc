use crate::core::asset_mapper::{classify_header, map_table};
use crate::core::content_validator::check_csv_content;
use crate::core::csv_parser::format_csv_as_table;
use crate::core::{ConfigProvider, Pipeline, Storage};
use crate::domain::model::{
    AssetRequestRecord, HeaderClass, HeaderMapping, IntakeSummary, SemanticField,
    SourceDocument, TransformResult,
};
use crate::utils::error::{IntakeError, Result};
use std::collections::BTreeSet;

pub struct CsvIntakePipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> CsvIntakePipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn output_file(&self, filename: &str) -> String {
        format!("{}/{}", self.config.output_path().trim_end_matches('/'), filename)
    }
}

/// 將紀錄輸出成 CSV：語意欄位在前，其餘欄位依名稱排序
pub fn render_records_csv(records: &[AssetRequestRecord]) -> Result<String> {
    let extra_columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|r| r.extra.keys().map(String::as_str))
        .collect();

    let mut writer = csv::Writer::from_writer(Vec::new());

    let header: Vec<&str> = SemanticField::ALL
        .iter()
        .map(|f| f.key())
        .chain(extra_columns.iter().copied())
        .collect();
    writer.write_record(&header)?;

    for record in records {
        let row: Vec<String> = SemanticField::ALL
            .iter()
            .map(|f| record.field_text(*f))
            .chain(
                extra_columns
                    .iter()
                    .map(|c| record.extra.get(*c).cloned().unwrap_or_default()),
            )
            .collect();
        writer.write_record(&row)?;
    }

    let data = writer
        .into_inner()
        .map_err(|e| IntakeError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(IntakeError::InvalidEncoding)
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for CsvIntakePipeline<S, C> {
    async fn extract(&self) -> Result<SourceDocument> {
        let path = self.config.input_path();
        tracing::debug!("Reading CSV input from: {}", path);

        let bytes = self.storage.read_file(path).await?;
        tracing::debug!("Read {} bytes", bytes.len());

        let content = String::from_utf8(bytes)?;
        Ok(SourceDocument {
            name: path.to_string(),
            content,
        })
    }

    async fn transform(&self, source: SourceDocument) -> Result<TransformResult> {
        let table = check_csv_content(&source.content)?;

        if self.config.preview() {
            tracing::info!("📋 Preview of {}:\n{}", source.name, format_csv_as_table(&table));
        }

        let records = map_table(&table);
        if records.is_empty() {
            return Err(IntakeError::NoValidData);
        }

        let header_mapping = table
            .headers
            .iter()
            .map(|header| {
                let class = classify_header(header);
                HeaderMapping {
                    header: header.clone(),
                    key: class.key().to_string(),
                    semantic: matches!(class, HeaderClass::Semantic(_)),
                }
            })
            .collect();

        let unmapped = records.iter().filter(|r| !r.extra.is_empty()).count();
        if unmapped > 0 {
            tracing::warn!(
                "{} records carry columns that did not match any asset field",
                unmapped
            );
        }

        let summary = IntakeSummary {
            source: source.name,
            header_count: table.headers.len(),
            row_count: table.rows.len(),
            record_count: records.len(),
            header_mapping,
            ingested_at: chrono::Utc::now(),
        };

        Ok(TransformResult {
            json_output: serde_json::to_string_pretty(&records)?,
            csv_output: render_records_csv(&records)?,
            records,
            summary,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        for format in self.config.output_formats() {
            let (filename, data) = match format.as_str() {
                "json" => (self.config.json_filename(), result.json_output.as_bytes()),
                "csv" => (self.config.csv_filename(), result.csv_output.as_bytes()),
                other => {
                    return Err(IntakeError::InvalidConfigValueError {
                        field: "output_formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            };

            let path = self.output_file(filename);
            tracing::debug!("Writing {} output ({} bytes) to {}", format, data.len(), path);
            self.storage.write_file(&path, data).await?;
        }

        let summary = serde_json::to_string_pretty(&result.summary)?;
        let summary_path = self.output_file(self.config.summary_filename());
        self.storage
            .write_file(&summary_path, summary.as_bytes())
            .await?;

        tracing::debug!("Intake outputs saved successfully");
        Ok(self.config.output_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn with_file(path: &str, content: &[u8]) -> Self {
            let mut files = HashMap::new();
            files.insert(path.to_string(), content.to_vec());
            Self {
                files: Arc::new(Mutex::new(files)),
            }
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                IntakeError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input_path: String,
        output_path: String,
        output_formats: Vec<String>,
    }

    impl MockConfig {
        fn new(formats: &[&str]) -> Self {
            Self {
                input_path: "requests.csv".to_string(),
                output_path: "test_output".to_string(),
                output_formats: formats.iter().map(|f| f.to_string()).collect(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input_path
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn output_formats(&self) -> &[String] {
            &self.output_formats
        }

        fn preview(&self) -> bool {
            true
        }
    }

    const SAMPLE: &str = "Platform,Creative Type,Size,Duration,Count,Due Date\n\
                          Meta,Video,9x16,15s,3,2024-05-01\n\
                          TikTok,Static,1x1,,,\n";

    #[tokio::test]
    async fn test_extract_reads_input() {
        let storage = MockStorage::with_file("requests.csv", SAMPLE.as_bytes());
        let pipeline = CsvIntakePipeline::new(storage, MockConfig::new(&["json"]));

        let source = pipeline.extract().await.unwrap();
        assert_eq!(source.name, "requests.csv");
        assert_eq!(source.content, SAMPLE);
    }

    #[tokio::test]
    async fn test_extract_rejects_invalid_utf8() {
        let storage = MockStorage::with_file("requests.csv", &[0xff, 0xfe, 0x00]);
        let pipeline = CsvIntakePipeline::new(storage, MockConfig::new(&["json"]));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, IntakeError::InvalidEncoding(_)));
    }

    #[tokio::test]
    async fn test_extract_missing_file() {
        let storage = MockStorage::with_file("other.csv", b"a,b\n1,2");
        let pipeline = CsvIntakePipeline::new(storage, MockConfig::new(&["json"]));

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, IntakeError::IoError(_)));
    }

    #[tokio::test]
    async fn test_transform_builds_outputs() {
        let storage = MockStorage::with_file("requests.csv", b"");
        let pipeline = CsvIntakePipeline::new(storage, MockConfig::new(&["json", "csv"]));

        let result = pipeline
            .transform(SourceDocument {
                name: "requests.csv".to_string(),
                content: SAMPLE.to_string(),
            })
            .await
            .unwrap();

        assert_eq!(result.records.len(), 2);
        assert_eq!(result.summary.record_count, 2);
        assert_eq!(result.summary.header_count, 6);
        assert!(!result.summary.header_mapping[5].semantic);
        assert_eq!(result.summary.header_mapping[1].key, "creativeType");

        let csv_lines: Vec<&str> = result.csv_output.lines().collect();
        assert_eq!(
            csv_lines[0],
            "platform,creativeType,size,duration,count,notes,Due Date"
        );
        assert_eq!(csv_lines[1], "Meta,Video,9x16,15,3,,2024-05-01");
        assert_eq!(csv_lines[2], "TikTok,Static,1x1,,0,,");

        let json: serde_json::Value = serde_json::from_str(&result.json_output).unwrap();
        assert_eq!(json[1]["duration"], serde_json::Value::Null);
        assert_eq!(json[0]["Due Date"], "2024-05-01");
    }

    #[tokio::test]
    async fn test_transform_rejects_header_only() {
        let storage = MockStorage::with_file("requests.csv", b"");
        let pipeline = CsvIntakePipeline::new(storage, MockConfig::new(&["json"]));

        let err = pipeline
            .transform(SourceDocument {
                name: "requests.csv".to_string(),
                content: "Platform,Count\n".to_string(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, IntakeError::NoDataRows));
    }

    #[tokio::test]
    async fn test_load_writes_requested_formats() {
        let storage = MockStorage::with_file("requests.csv", SAMPLE.as_bytes());
        let pipeline = CsvIntakePipeline::new(storage.clone(), MockConfig::new(&["csv"]));

        let source = pipeline.extract().await.unwrap();
        let result = pipeline.transform(source).await.unwrap();
        let output_path = pipeline.load(result).await.unwrap();

        assert_eq!(output_path, "test_output");
        assert!(storage.get_file("test_output/asset_requests.csv").await.is_some());
        assert!(storage.get_file("test_output/asset_requests.json").await.is_none());

        let summary = storage
            .get_file("test_output/intake_summary.json")
            .await
            .unwrap();
        let summary: serde_json::Value = serde_json::from_slice(&summary).unwrap();
        assert_eq!(summary["record_count"], 2);
        assert_eq!(summary["source"], "requests.csv");
    }
}
