pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::{cli::LocalStorage, toml_config::TomlConfig};
pub use crate::core::engine::ScanEngine;
pub use domain::model::{
    BarcodeParts, BarcodeRecord, Detection, ScanMode, ScanRecord, ScanType, StatusClass, Symbology,
};
pub use domain::services::barcode::{analyze, classify, validate_ean13, validate_ean8};
pub use domain::services::gs1::lookup_country;
pub use domain::services::status::classify_status;
pub use utils::error::{Result, ScanError};
