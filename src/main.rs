use clap::Parser;
use domain_directory::adapters::prompt::TerminalPrompter;
use domain_directory::core::pipeline::AddRequest;
use domain_directory::core::{ConfigProvider, Prompter};
use domain_directory::utils::error::ErrorSeverity;
use domain_directory::utils::{logger, validation::Validate};
use domain_directory::{
    CliConfig, DirectoryEngine, DirectoryPipeline, DomainStore, LinePrompter, LocalStorage,
    Result, TcpWhoisTransport, TomlConfig, WhoisResolver,
};
use std::io::IsTerminal;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting domain-directory");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config).await {
        if e.is_fatal() {
            tracing::error!(
                "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
        } else {
            tracing::warn!(
                "⚠️ Run stopped: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
        }
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

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
}

async fn run(config: CliConfig) -> Result<()> {
    // 驗證配置：不支援的檔案類型必須在讀取目錄或連線前中止
    config.validate()?;
    let settings = config.resolve_settings()?;

    let mut store = DomainStore::open(LocalStorage::default(), settings.data_file()).await?;
    tracing::info!("📁 Using {} ({} records)", store.path(), store.records().len());

    let request = config.add_request();
    if !request.is_empty() {
        store = if std::io::stdin().is_terminal() {
            add_domains(request, &settings, TerminalPrompter, store).await?
        } else {
            add_domains(request, &settings, LinePrompter::stdio(), store).await?
        };
    }

    if config.list {
        for record in store.records() {
            println!("{}", serde_json::to_string(record)?);
        }
    }

    Ok(())
}

async fn add_domains<P: Prompter>(
    request: AddRequest,
    settings: &TomlConfig,
    prompter: P,
    store: DomainStore<LocalStorage>,
) -> Result<DomainStore<LocalStorage>> {
    let resolver = WhoisResolver::from_config(TcpWhoisTransport::from_config(settings), settings);
    let pipeline = DirectoryPipeline::new(request, resolver, prompter, store);

    let mut engine = DirectoryEngine::new(pipeline);
    let summary = engine.run().await?;
    tracing::info!(
        "✅ Stored {} of {} domains",
        summary.stored,
        summary.requested
    );

    Ok(engine.into_pipeline().into_store())
}
