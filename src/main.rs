use clap::Parser;
use skill_matrix::config::toml_config::TomlConfig;
use skill_matrix::utils::error::ErrorSeverity;
use skill_matrix::utils::{logger, validation::Validate};
use skill_matrix::{CliConfig, DataSource, LocalStorage, ReportFormat, ReportJob};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json_logs {
        logger::init_service_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting skill-matrix report generator");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // 載入 TOML 配置（可選）
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            let loaded = TomlConfig::from_file(path).and_then(|c| c.validate().map(|_| c));
            match loaded {
                Ok(file_config) => file_config,
                Err(e) => {
                    eprintln!("❌ Failed to load config file '{}': {}", path, e);
                    eprintln!("💡 {}", e.recovery_suggestion());
                    std::process::exit(1);
                }
            }
        }
        None => TomlConfig::default(),
    };

    let source = match DataSource::resolve(
        config.dataset.as_deref(),
        config.source_url.as_deref(),
        &file_config,
    ) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let formats = config
        .format
        .map(|format| format.formats())
        .or_else(|| file_config.formats().map(<[ReportFormat]>::to_vec))
        .unwrap_or_else(|| ReportFormat::ALL.to_vec());

    let output_path = config
        .output_path
        .clone()
        .or_else(|| file_config.output_path().map(String::from))
        .unwrap_or_else(|| "./output".to_string());

    let job = ReportJob {
        source,
        query: config.query(),
        formats,
        bundle: config.bundle || file_config.bundle_enabled(),
        settings: file_config.to_settings(),
    };

    let storage = LocalStorage::new(output_path.clone());

    match job.run(&storage).await {
        Ok(files) => {
            tracing::info!("✅ Report generation completed successfully!");
            for file in &files {
                let path = storage.full_path(file);
                tracing::info!("📁 Output saved to: {}", path.display());
                println!("📁 {}", path.display());
            }
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Report generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
