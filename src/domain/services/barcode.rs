//! Barcode symbology detection, EAN/UPC check digits, and field decomposition.
//!
//! Everything here is a pure function of the decoded string. Every input maps
//! to exactly one symbology and a definite validity flag; nothing fails.

use crate::domain::model::{BarcodeParts, BarcodeRecord, Symbology};
use crate::domain::services::gs1::lookup_country;
use regex::Regex;
use std::sync::LazyLock;

static CODE39_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Z0-9\-. $/+%]+$").expect("Code 39 character class is a valid pattern")
});

/// Returns the digit values when `code` is exactly `N` ASCII digits.
fn ascii_digits<const N: usize>(code: &str) -> Option<[u32; N]> {
    let bytes = code.as_bytes();
    if bytes.len() != N || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut digits = [0u32; N];
    for (slot, b) in digits.iter_mut().zip(bytes) {
        *slot = u32::from(b - b'0');
    }
    Some(digits)
}

pub fn classify(code: &str) -> Symbology {
    if ascii_digits::<13>(code).is_some() {
        Symbology::Ean13
    } else if ascii_digits::<12>(code).is_some() {
        Symbology::UpcA
    } else if ascii_digits::<8>(code).is_some() {
        Symbology::Ean8
    } else if ascii_digits::<6>(code).is_some() {
        Symbology::UpcE
    } else if CODE39_PATTERN.is_match(code) {
        Symbology::Code39
    } else {
        Symbology::Code128
    }
}

/// Weights the payload digits, starting with `first_weight` and alternating
/// with the other of {1, 3}, and returns the modulo-10 check digit.
fn mod10_check_digit(payload: &[u32], first_weight: u32) -> u32 {
    let second_weight = 4 - first_weight;
    let sum: u32 = payload
        .iter()
        .enumerate()
        .map(|(i, d)| if i % 2 == 0 { d * first_weight } else { d * second_weight })
        .sum();
    (10 - sum % 10) % 10
}

pub fn validate_ean13(code: &str) -> bool {
    match ascii_digits::<13>(code) {
        Some(digits) => mod10_check_digit(&digits[..12], 1) == digits[12],
        None => false,
    }
}

pub fn validate_ean8(code: &str) -> bool {
    match ascii_digits::<8>(code) {
        Some(digits) => mod10_check_digit(&digits[..7], 3) == digits[7],
        None => false,
    }
}

/// UPC-A is EAN-13 with a leading zero number-system digit.
///
/// A 12 digit UPC-A is never run through the 13 digit algorithm as-is, which
/// would reject every UPC-A. It is padded to its GTIN-13 form first, and that
/// form is both validated and decomposed.
fn upca_as_gtin13(code: &str) -> String {
    format!("0{}", code)
}

/// Splits a 13 digit code. Callers guarantee ASCII digits.
///
/// The manufacturer field starts inside the prefix and the product field
/// stops one digit short of the check digit: `4006381333931` gives
/// manufacturer `06381` and product `3339`. Stored histories and search
/// links depend on these exact values.
fn split_gtin13(code: &str) -> BarcodeParts {
    let prefix = &code[0..3];
    BarcodeParts {
        country_or_issuer_prefix: prefix.to_string(),
        manufacturer_code: Some(code[2..7].to_string()),
        product_code: code[7..11].to_string(),
        check_digit: code[12..13].to_string(),
        country: lookup_country(prefix).to_string(),
    }
}

fn split_ean8(code: &str) -> BarcodeParts {
    let prefix = &code[0..3];
    BarcodeParts {
        country_or_issuer_prefix: prefix.to_string(),
        manufacturer_code: None,
        product_code: code[3..7].to_string(),
        check_digit: code[7..8].to_string(),
        country: lookup_country(prefix).to_string(),
    }
}

/// Classifies, validates, and (when valid) decomposes a decoded barcode.
pub fn analyze(code: &str) -> BarcodeRecord {
    let symbology = classify(code);

    let (is_valid, parts) = match symbology {
        Symbology::Ean13 => {
            let valid = validate_ean13(code);
            (valid, valid.then(|| split_gtin13(code)))
        }
        Symbology::UpcA => {
            let gtin = upca_as_gtin13(code);
            let valid = validate_ean13(&gtin);
            (valid, valid.then(|| split_gtin13(&gtin)))
        }
        Symbology::Ean8 => {
            let valid = validate_ean8(code);
            (valid, valid.then(|| split_ean8(code)))
        }
        // Six digit UPC-E payloads carry no check digit; Code 39 and Code 128
        // have no universal checksum. All are reported valid.
        Symbology::UpcE | Symbology::Code39 | Symbology::Code128 => (true, None),
    };

    tracing::debug!(
        code,
        symbology = %symbology,
        is_valid,
        "Analyzed barcode"
    );

    BarcodeRecord {
        code: code.to_string(),
        symbology,
        is_valid,
        parts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_by_digit_count() {
        assert_eq!(classify("4006381333931"), Symbology::Ean13);
        assert_eq!(classify("036000291452"), Symbology::UpcA);
        assert_eq!(classify("40170725"), Symbology::Ean8);
        assert_eq!(classify("123456"), Symbology::UpcE);
    }

    #[test]
    fn test_classify_other_digit_counts_fall_to_code39() {
        assert_eq!(classify("1234567"), Symbology::Code39);
        assert_eq!(classify("12345678901234"), Symbology::Code39);
    }

    #[test]
    fn test_classify_code39_charset() {
        assert_eq!(classify("ABC-123"), Symbology::Code39);
        assert_eq!(classify("PART $/+% 9.5"), Symbology::Code39);
    }

    #[test]
    fn test_classify_code128_catch_all() {
        assert_eq!(classify(""), Symbology::Code128);
        assert_eq!(classify("abc123"), Symbology::Code128);
        assert_eq!(classify("ITEM#42"), Symbology::Code128);
        assert_eq!(classify("٤٠٠٦٣٨١٣٣٣٩٣١"), Symbology::Code128);
    }

    #[test]
    fn test_validate_ean13() {
        assert!(validate_ean13("4006381333931"));
        assert!(!validate_ean13("4006381333932"));
        assert!(validate_ean13("5901234123457"));
        assert!(!validate_ean13("400638133393"));
        assert!(!validate_ean13("400638133393A"));
    }

    #[test]
    fn test_validate_ean8() {
        assert!(validate_ean8("40170725"));
        assert!(!validate_ean8("40170726"));
        assert!(validate_ean8("96385074"));
        assert!(!validate_ean8("4017072"));
    }

    #[test]
    fn test_zero_check_digit() {
        // digits sum to a multiple of ten, so the check digit wraps to 0
        assert!(validate_ean13("0000000000000"));
        assert!(validate_ean8("00000000"));
    }

    #[test]
    fn test_analyze_upca_uses_leading_zero() {
        let record = analyze("036000291452");
        assert_eq!(record.symbology, Symbology::UpcA);
        assert!(record.is_valid);
        assert_eq!(record.country_or_issuer_prefix(), Some("003"));
        assert_eq!(record.manufacturer_code(), Some("36000"));
        assert_eq!(record.product_code(), Some("2914"));
        assert_eq!(record.check_digit(), Some("2"));
        assert_eq!(record.country(), Some("USA & Canada"));

        let bad = analyze("036000291453");
        assert!(!bad.is_valid);
        assert!(bad.parts.is_none());
    }

    #[test]
    fn test_analyze_ean13_field_offsets() {
        let record = analyze("4006381333931");
        assert_eq!(record.country_or_issuer_prefix(), Some("400"));
        assert_eq!(record.manufacturer_code(), Some("06381"));
        assert_eq!(record.product_code(), Some("3339"));
        assert_eq!(record.check_digit(), Some("1"));

        let record = analyze("5901234123457");
        assert_eq!(record.manufacturer_code(), Some("01234"));
        assert_eq!(record.product_code(), Some("1234"));
        assert_eq!(record.check_digit(), Some("7"));
        assert_eq!(record.country(), Some("Poland"));
    }

    #[test]
    fn test_validate_rejects_surrounding_whitespace() {
        assert!(!validate_ean13("4006381333931\n"));
        assert!(!validate_ean13(" 4006381333931"));
        assert!(!validate_ean8(" 40170725"));
        assert!(!validate_ean8("40170725 "));
    }

    #[test]
    fn test_analyze_upce_has_no_parts() {
        let record = analyze("123456");
        assert_eq!(record.symbology, Symbology::UpcE);
        assert!(record.is_valid);
        assert!(record.parts.is_none());
    }
}
