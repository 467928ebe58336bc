use crate::domain::model::{SourceDocument, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn preview(&self) -> bool;

    fn json_filename(&self) -> &str {
        "asset_requests.json"
    }

    fn csv_filename(&self) -> &str {
        "asset_requests.csv"
    }

    fn summary_filename(&self) -> &str {
        "intake_summary.json"
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<SourceDocument>;
    async fn transform(&self, source: SourceDocument) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
