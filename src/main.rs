use anyhow::Context;
use clap::Parser;
use label_enrich::utils::error::ErrorSeverity;
use label_enrich::utils::logger;
use label_enrich::{CliConfig, EnrichContext, EnrichRunner, InMemoryStore, LocalStorage};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 解析並驗證配置 (日誌尚未初始化)
    let settings = match cli.resolve() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("❌ Configuration error: {}", e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if settings.log_json {
        logger::init_json_logger(cli.verbose, settings.log_level.as_deref());
    } else {
        logger::init_cli_logger(cli.verbose, settings.log_level.as_deref());
    }
    tracing::debug!("Settings: {:?}", settings);

    let store = InMemoryStore::from_file(&settings.dataset)
        .with_context(|| format!("failed to load dataset '{}'", settings.dataset))?;
    tracing::info!("Loaded {} labels from {}", store.labels().len(), settings.dataset);

    let cancel_token = CancellationToken::new();
    let deadline = settings.timeout.map(|timeout| std::time::Instant::now() + timeout);
    let ctx = EnrichContext::new(cancel_token.clone(), deadline);

    // Ctrl-C 取消整批
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            cancel_token.cancel();
        }
    });

    let runner = EnrichRunner::new(store, settings.format);
    let result = match &settings.output_path {
        Some(output_path) => {
            let storage = LocalStorage::new(output_path.as_str());
            runner
                .write_to(&ctx, &settings.labels, &storage)
                .await
                .map(|file_name| {
                    let full_path = storage.full_path(&file_name);
                    tracing::info!("📁 Output saved to: {}", full_path.display());
                })
        }
        None => runner
            .render(&ctx, &settings.labels)
            .await
            .map(|rendered| println!("{}", rendered)),
    };

    if let Err(e) = result {
        tracing::error!(
            request_id = %ctx.request_id,
            "❌ Enrichment failed: {} (Severity: {:?}, retryable: {})",
            e,
            e.severity(),
            e.is_retryable()
        );
        eprintln!("❌ {}", e);
        eprintln!("💡 {}", e.recovery_suggestion());

        // 根據錯誤嚴重程度決定退出碼
        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}
