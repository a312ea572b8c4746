use crate::domain::model::{Detection, ScanMode};
use crate::domain::services::barcode::analyze;
use crate::utils::validation::normalize_target;
use url::{form_urlencoded, Url};

const PRODUCT_SEARCH_ENDPOINT: &str = "https://www.google.com/search";

/// Web search URL for looking up a scanned product code.
///
/// The query is percent-encoded with spaces as `%20` rather than the
/// form-encoded `+`.
pub fn product_search_url(code: &str) -> Url {
    let query: String = form_urlencoded::byte_serialize(format!("{} product", code).as_bytes())
        .collect::<String>()
        .replace('+', "%20");
    let mut url = Url::parse(PRODUCT_SEARCH_ENDPOINT).expect("search endpoint is a valid URL");
    url.set_query(Some(&format!("q={}", query)));
    url
}

/// Decides what a piece of decoded camera text is.
///
/// Anything that looks like a URL becomes a scan target regardless of mode.
/// Non-URL text is treated as a barcode only in barcode mode.
pub fn interpret(text: &str, mode: ScanMode) -> Detection {
    if let Ok(url) = normalize_target(text) {
        return Detection::Url { url };
    }

    match mode {
        ScanMode::Barcode => {
            let code = text.trim();
            Detection::Barcode {
                record: analyze(code),
                search_url: product_search_url(code),
            }
        }
        ScanMode::Qr | ScanMode::Text => Detection::Text {
            text: text.to_string(),
        },
    }
}
