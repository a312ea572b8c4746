use clap::Parser;
use site_scanner::core::ConfigProvider;
use site_scanner::utils::error::{ErrorSeverity, ScanError};
use site_scanner::utils::{logger, validation::Validate};
use site_scanner::{CliConfig, Command, Detection, LocalStorage, ScanEngine, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入 TOML 配置 (若有指定)
    let toml_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    // 初始化日誌
    let json_logs = cli.json_logs || toml_config.as_ref().is_some_and(TomlConfig::json_logs);
    let verbose = cli.verbose || toml_config.as_ref().is_some_and(TomlConfig::verbose_logs);
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    let command = cli.command.clone();
    let outcome = match toml_config {
        Some(config) => run(config, command).await,
        None => run(cli, command).await,
    };

    match outcome {
        Ok(output) => {
            println!("{}", output);
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            std::process::exit(exit_code);
        }
    }
}

async fn run<C>(config: C, command: Command) -> Result<String, ScanError>
where
    C: ConfigProvider + Validate,
{
    config.validate()?;

    let storage = LocalStorage::new(config.data_dir());
    let mut engine = ScanEngine::load(storage, config).await?;

    let output = match command {
        Command::Scan { url, scan_type } => {
            let record = engine.scan_url(&url, scan_type).await?;
            let mut lines = vec![format!("✅ {} scan of {}", record.scan_type, record.url)];
            lines.extend(record.sections.iter().map(|section| format!("  • {}", section)));
            lines.join("\n")
        }
        Command::Barcode { code } => {
            let record = engine.scan_barcode(&code).await?;
            serde_json::to_string_pretty(&record)?
        }
        Command::Detect { text, mode } => {
            let detection = engine.detect(&text, mode).await?;
            if let Detection::Url { url } = &detection {
                tracing::info!("Run `site-scanner scan {}` to scan it", url);
            }
            serde_json::to_string_pretty(&detection)?
        }
        Command::History { clear: true } => {
            engine.clear_history().await?;
            "Scan history cleared successfully".to_string()
        }
        Command::History { clear: false } => render_history(&engine),
    };

    Ok(output)
}

fn render_history<S, C>(engine: &ScanEngine<S, C>) -> String
where
    S: site_scanner::core::Storage,
    C: ConfigProvider,
{
    let scans = engine.scan_history();
    let barcodes = engine.barcode_history();
    if scans.is_empty() && barcodes.is_empty() {
        return "No scan history available".to_string();
    }

    let mut lines = Vec::new();
    if !scans.is_empty() {
        lines.push(format!("Websites ({}/{}):", scans.len(), scans.capacity()));
        for record in scans.entries() {
            lines.push(format!(
                "  {}  {:<13}  {}",
                record.scanned_at.format("%Y-%m-%d %H:%M"),
                record.scan_type.as_str().to_uppercase(),
                record.url
            ));
        }
    }
    if !barcodes.is_empty() {
        lines.push(format!("Barcodes ({}/{}):", barcodes.len(), barcodes.capacity()));
        for entry in barcodes.entries() {
            let record = &entry.record;
            lines.push(format!(
                "  {}  {:<8}  {}  {}",
                entry.scanned_at.format("%Y-%m-%d %H:%M"),
                record.symbology,
                record.code,
                if record.is_valid { "valid" } else { "invalid" }
            ));
        }
    }
    lines.join("\n")
}

