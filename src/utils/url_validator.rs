//! Long URL validation.
//!
//! A long URL must be an absolute `http` or `https` URI with a host. The input
//! is stored exactly as submitted; validation does not rewrite it.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,
}

/// Checks that `input` is an absolute http(s) URL.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for relative or malformed URLs,
/// and for input with control characters or surrounding whitespace, which
/// `Url::parse` would otherwise strip silently.
/// Returns [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes
/// such as `javascript:`, `data:` or `file:`.
/// Returns [`UrlValidationError::MissingHost`] when the authority is empty.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_long_url("https://example.com/a").is_ok());
/// assert!(validate_long_url("example.com").is_err());
/// ```
pub fn validate_long_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim() != input {
        return Err(UrlValidationError::InvalidFormat(
            "leading or trailing whitespace".to_string(),
        ));
    }
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::InvalidFormat(
            "control character in URL".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_simple_https() {
        let url = validate_long_url("https://example.com/a").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
        assert_eq!(url.path(), "/a");
    }

    #[test]
    fn test_validate_with_query_and_port() {
        assert!(validate_long_url("http://localhost:3000/search?q=rust&lang=en").is_ok());
    }

    #[test]
    fn test_validate_ip_address() {
        assert!(validate_long_url("http://192.168.1.1:8080/api").is_ok());
    }

    #[test]
    fn test_validate_relative_url() {
        let result = validate_long_url("/just/a/path");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_no_protocol() {
        let result = validate_long_url("example.com");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_empty_string() {
        let result = validate_long_url("");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_not_a_url() {
        let result = validate_long_url("not a valid url");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_ftp_protocol() {
        assert_eq!(
            validate_long_url("ftp://example.com/file.txt"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_validate_javascript_protocol() {
        assert_eq!(
            validate_long_url("javascript:alert('xss')"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_validate_mailto_protocol() {
        assert_eq!(
            validate_long_url("mailto:test@example.com"),
            Err(UrlValidationError::UnsupportedProtocol)
        );
    }

    #[test]
    fn test_validate_rejects_embedded_newline() {
        let result = validate_long_url("https://example.com/a\nb");
        assert!(matches!(result, Err(UrlValidationError::InvalidFormat(_))));
    }

    #[test]
    fn test_validate_rejects_tab_and_nul() {
        assert!(matches!(
            validate_long_url("https://exa\tmple.com/"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_long_url("https://example.com/\0"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_rejects_surrounding_whitespace() {
        assert!(matches!(
            validate_long_url(" https://example.com/a"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
        assert!(matches!(
            validate_long_url("https://example.com/a\r\n"),
            Err(UrlValidationError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_validate_missing_host() {
        let result = validate_long_url("http://");
        assert!(result.is_err());
    }
}
