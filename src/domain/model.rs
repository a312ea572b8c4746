use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Barcode format family, derived from the decoded payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbology {
    #[serde(rename = "EAN-13")]
    Ean13,
    #[serde(rename = "UPC-A")]
    UpcA,
    #[serde(rename = "EAN-8")]
    Ean8,
    #[serde(rename = "UPC-E")]
    UpcE,
    #[serde(rename = "Code 39")]
    Code39,
    #[serde(rename = "Code 128")]
    Code128,
}

impl Symbology {
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbology::Ean13 => "EAN-13",
            Symbology::UpcA => "UPC-A",
            Symbology::Ean8 => "EAN-8",
            Symbology::UpcE => "UPC-E",
            Symbology::Code39 => "Code 39",
            Symbology::Code128 => "Code 128",
        }
    }

    /// Whether a valid code of this family splits into prefix/product fields.
    pub fn is_decomposable(&self) -> bool {
        matches!(self, Symbology::Ean13 | Symbology::UpcA | Symbology::Ean8)
    }
}

impl fmt::Display for Symbology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Structural fields of a valid EAN/UPC code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeParts {
    pub country_or_issuer_prefix: String,
    /// Absent for EAN-8, which has no manufacturer segment.
    pub manufacturer_code: Option<String>,
    pub product_code: String,
    pub check_digit: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeRecord {
    pub code: String,
    pub symbology: Symbology,
    pub is_valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parts: Option<BarcodeParts>,
}

impl BarcodeRecord {
    pub fn country_or_issuer_prefix(&self) -> Option<&str> {
        self.parts
            .as_ref()
            .map(|p| p.country_or_issuer_prefix.as_str())
    }

    pub fn manufacturer_code(&self) -> Option<&str> {
        self.parts
            .as_ref()
            .and_then(|p| p.manufacturer_code.as_deref())
    }

    pub fn product_code(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.product_code.as_str())
    }

    pub fn check_digit(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.check_digit.as_str())
    }

    pub fn country(&self) -> Option<&str> {
        self.parts.as_ref().map(|p| p.country.as_str())
    }
}

/// Depth of a website scan; decides which report sections are produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ScanType {
    Basic,
    Security,
    Performance,
    Seo,
    #[default]
    Comprehensive,
}

impl ScanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScanType::Basic => "basic",
            ScanType::Security => "security",
            ScanType::Performance => "performance",
            ScanType::Seo => "seo",
            ScanType::Comprehensive => "comprehensive",
        }
    }
}

impl fmt::Display for ScanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ScanType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(ScanType::Basic),
            "security" => Ok(ScanType::Security),
            "performance" => Ok(ScanType::Performance),
            "seo" => Ok(ScanType::Seo),
            "comprehensive" => Ok(ScanType::Comprehensive),
            other => Err(format!("unknown scan type: {}", other)),
        }
    }
}

/// Camera mode the decoded text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum ScanMode {
    #[default]
    Qr,
    Text,
    Barcode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusClass {
    Good,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub url: Url,
    pub scan_type: ScanType,
    pub scanned_at: DateTime<Utc>,
    pub sections: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeEntry {
    #[serde(flatten)]
    pub record: BarcodeRecord,
    pub scanned_at: DateTime<Utc>,
}

/// Outcome of interpreting text decoded by the camera.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Detection {
    Url { url: Url },
    Barcode { record: BarcodeRecord, search_url: Url },
    Text { text: String },
}
