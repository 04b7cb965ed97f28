use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};

/// Product token sent in the `User-Agent` header.
pub const PRODUCT: &str = "neorest";

/// Crate version baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Returns the identification string sent with every request.
///
/// Format: `neorest/{version} ({os})`, e.g. `neorest/0.1.0 (linux)`.
pub fn user_agent() -> String {
    format!("{PRODUCT}/{VERSION} ({})", std::env::consts::OS)
}

/// Builds the header map every session starts from.
///
/// Contains exactly one entry, `User-Agent`.
pub fn default_headers() -> HeaderMap {
    let mut headers = HeaderMap::with_capacity(1);
    // Package versions and OS identifiers are plain ASCII.
    if let Ok(value) = HeaderValue::from_str(&user_agent()) {
        headers.insert(USER_AGENT, value);
    }
    headers
}
