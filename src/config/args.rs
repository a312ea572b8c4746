use crate::domain::model::{ScanMode, ScanType};
use crate::domain::ports::ConfigProvider;
use crate::domain::services::history::DEFAULT_HISTORY_LIMIT;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_range, Validate};
use clap::{Parser, Subcommand};

#[derive(Debug, Clone, Parser)]
#[command(name = "site-scanner")]
#[command(about = "Website scanner with QR code and barcode support")]
pub struct CliConfig {
    #[arg(long, global = true, default_value = "./.site-scanner")]
    pub data_dir: String,

    #[arg(long, global = true, default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// TOML configuration file; replaces the storage and history flags
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Validate a website address and record a scan
    Scan {
        url: String,

        #[arg(long = "type", value_enum)]
        scan_type: Option<ScanType>,
    },
    /// Identify and validate a barcode
    Barcode { code: String },
    /// Interpret text decoded from a QR code, barcode or OCR capture
    Detect {
        text: String,

        #[arg(long, value_enum, default_value = "qr")]
        mode: ScanMode,
    },
    /// Show or clear the scan history
    History {
        #[arg(long)]
        clear: bool,
    },
}

impl ConfigProvider for CliConfig {
    fn data_dir(&self) -> &str {
        &self.data_dir
    }

    fn scan_history_limit(&self) -> usize {
        self.history_limit
    }

    fn barcode_history_limit(&self) -> usize {
        self.history_limit
    }

    fn default_scan_type(&self) -> ScanType {
        ScanType::default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("data_dir", &self.data_dir)?;
        validate_range("history_limit", self.history_limit, 1, 1000)?;
        Ok(())
    }
}
