use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct IntakeEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> IntakeEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting CSV intake...");

        // Extract
        let source = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} ({} bytes)", source.name, source.content.len());

        // Transform
        let result = self.pipeline.transform(source).await?;
        tracing::info!(
            "🔄 Mapped {} asset requests from {} rows",
            result.summary.record_count,
            result.summary.row_count
        );

        // Load
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("📁 Output saved to: {}", output_path);

        Ok(output_path)
    }
}
