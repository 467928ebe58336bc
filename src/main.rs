use asset_intake::utils::error::ErrorSeverity;
use asset_intake::utils::{logger, validation::Validate};
use asset_intake::{CliConfig, CsvIntakePipeline, IntakeEngine, LocalStorage};
use clap::Parser;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting asset-intake CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let storage = LocalStorage::new(".");
    let pipeline = CsvIntakePipeline::new(storage, config);
    let engine = IntakeEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Intake completed successfully!");
            println!("✅ Intake completed successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Intake failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2, // 內容問題，修正檔案後重試
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
