//! URL syntax checks shared by endpoint configuration and URL conversion.

use reqwest::Url;

/// Schemes accepted for both the service endpoint and conversion targets.
const KNOWN_SCHEMES: &[&str] = &["http", "https", "ftp", "file"];

/// Parse `input` as an absolute URL with a known scheme.
///
/// Relative references, unknown schemes (`htps://`) and special-scheme URLs
/// without a host are rejected. No network activity takes place.
pub fn parse_absolute_url(input: &str) -> Option<Url> {
    let url = Url::parse(input.trim()).ok()?;
    if !KNOWN_SCHEMES.contains(&url.scheme()) {
        return None;
    }
    if url.scheme() != "file" && url.host_str().map_or(true, str::is_empty) {
        return None;
    }
    Some(url)
}

/// True if [`parse_absolute_url`] accepts `input`.
pub fn is_valid_url(input: &str) -> bool {
    parse_absolute_url(input).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_absolute_urls() {
        assert!(is_valid_url("https://www.google.com"));
        assert!(is_valid_url("http://localhost:3000"));
        assert!(is_valid_url("http://127.0.0.1:3000/"));
        assert!(is_valid_url("ftp://files.example.com/doc.pdf"));
        assert!(is_valid_url("file:///tmp/index.html"));
    }

    #[test]
    fn rejects_unknown_scheme() {
        assert!(!is_valid_url("htps://www.google.com"));
        assert!(!is_valid_url("mailto:someone@example.com"));
    }

    #[test]
    fn rejects_relative_and_garbage() {
        assert!(!is_valid_url(""));
        assert!(!is_valid_url("localhost:3000"));
        assert!(!is_valid_url("/forms/chromium"));
        assert!(!is_valid_url("not a url"));
        assert!(!is_valid_url("http://"));
    }
}
