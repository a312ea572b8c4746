use crate::domain::model::{ScanType, StatusClass};

pub const BASIC_INFORMATION: &str = "Basic Information";
pub const SECURITY_ANALYSIS: &str = "Security Analysis";
pub const PERFORMANCE_METRICS: &str = "Performance Metrics";
pub const SEO_ANALYSIS: &str = "SEO Analysis";
pub const ADDITIONAL_INSIGHTS: &str = "Additional Insights";

const GOOD_TERMS: &[&str] = &[
    "Online",
    "Valid",
    "Enabled",
    "Good",
    "Clean",
    "Present",
    "Optimized",
    "Yes",
    "Fast",
    "Excellent",
    "Complete",
    "Protected",
    "A+",
    "A",
];

const WARNING_TERMS: &[&str] = &[
    "Partial",
    "Low Risk",
    "Medium Risk",
    "Too Long",
    "Too Short",
    "Missing",
    "Multiple",
    "Average",
    "Basic",
    "Partially",
    "B",
];

const ERROR_TERMS: &[&str] = &[
    "Offline",
    "Invalid",
    "Expired",
    "Disabled",
    "High Risk",
    "No",
    "Slow",
    "None",
    "Suspicious",
    "Unprotected",
];

impl ScanType {
    /// Report sections produced for this scan depth, in display order.
    pub fn sections(&self) -> Vec<&'static str> {
        let mut sections = vec![BASIC_INFORMATION];
        if matches!(self, ScanType::Security | ScanType::Comprehensive) {
            sections.push(SECURITY_ANALYSIS);
        }
        if matches!(self, ScanType::Performance | ScanType::Comprehensive) {
            sections.push(PERFORMANCE_METRICS);
        }
        if matches!(self, ScanType::Seo | ScanType::Comprehensive) {
            sections.push(SEO_ANALYSIS);
        }
        if *self == ScanType::Comprehensive {
            sections.push(ADDITIONAL_INSIGHTS);
        }
        sections
    }
}

/// Grades a report value for display.
///
/// Term lists are matched as case-sensitive substrings: good terms first,
/// then error terms, then warning terms. Scores such as `72/100` are graded
/// by their leading number. Anything unrecognised counts as good.
pub fn classify_status(value: &str) -> StatusClass {
    let contains_any = |terms: &[&str]| terms.iter().any(|term| value.contains(term));

    if contains_any(GOOD_TERMS) {
        return StatusClass::Good;
    }
    if contains_any(ERROR_TERMS) {
        return StatusClass::Error;
    }
    if contains_any(WARNING_TERMS) {
        return StatusClass::Warning;
    }

    if value.contains("/100") {
        return match leading_integer(value) {
            Some(score) if score >= 80 => StatusClass::Good,
            Some(score) if score >= 60 => StatusClass::Warning,
            _ => StatusClass::Error,
        };
    }

    StatusClass::Good
}

fn leading_integer(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+'))))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    trimmed[..end].parse().ok()
}
