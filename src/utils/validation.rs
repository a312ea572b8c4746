use crate::utils::error::{Result, ScanError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Normalizes a user supplied scan target into an absolute http(s) URL.
///
/// Full URLs are accepted as-is. Bare domains (`example.com/path`) are
/// accepted when they contain a dot and no whitespace, and get an `https://`
/// scheme.
pub fn normalize_target(input: &str) -> Result<Url> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(invalid_target(input, "URL cannot be empty"));
    }

    if let Ok(url) = Url::parse(trimmed) {
        if matches!(url.scheme(), "http" | "https") {
            return match url.host_str() {
                Some(_) => Ok(url),
                None => Err(invalid_target(input, "URL has no host")),
            };
        }
        // `example.com:8080` parses with `example.com` as its scheme
        if trimmed.contains("://") {
            return Err(invalid_target(
                input,
                &format!("Unsupported URL scheme: {}", url.scheme()),
            ));
        }
    }

    if !trimmed.contains('.') || trimmed.chars().any(char::is_whitespace) {
        return Err(invalid_target(
            input,
            "Expected a URL such as https://example.com",
        ));
    }

    match Url::parse(&format!("https://{}", trimmed)) {
        Ok(url) if url.host_str().is_some_and(|host| !host.is_empty()) => Ok(url),
        Ok(_) => Err(invalid_target(input, "URL has no host")),
        Err(e) => Err(invalid_target(input, &format!("Invalid URL format: {}", e))),
    }
}

pub fn is_valid_target(input: &str) -> bool {
    normalize_target(input).is_ok()
}

fn invalid_target(input: &str, reason: &str) -> ScanError {
    ScanError::InvalidTargetError {
        input: input.to_string(),
        reason: reason.to_string(),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ScanError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
