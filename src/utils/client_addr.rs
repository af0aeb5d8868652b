//! Client address extraction from HTTP request headers.

use axum::http::HeaderMap;
use std::net::{IpAddr, SocketAddr};

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REAL_IP: &str = "x-real-ip";

/// Resolves the address recorded for a click.
///
/// When `behind_proxy` is set, the left-most valid IP of `X-Forwarded-For` wins,
/// then `X-Real-IP`. Otherwise, and whenever those headers are missing or
/// malformed, the peer socket address is used. Proxy headers are only trusted
/// when the service is deployed behind a reverse proxy that sets them.
///
/// # Examples
///
/// ```ignore
/// let mut headers = HeaderMap::new();
/// headers.insert("x-forwarded-for", "203.0.113.7, 10.0.0.1".parse().unwrap());
///
/// let peer: SocketAddr = "10.0.0.1:5000".parse().unwrap();
/// assert_eq!(client_address(&headers, peer, true), "203.0.113.7");
/// assert_eq!(client_address(&headers, peer, false), "10.0.0.1");
/// ```
pub fn client_address(headers: &HeaderMap, peer: SocketAddr, behind_proxy: bool) -> String {
    if behind_proxy
        && let Some(ip) = forwarded_ip(headers).or_else(|| real_ip(headers))
    {
        return ip.to_string();
    }

    peer.ip().to_string()
}

fn forwarded_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(X_FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .next()
        .and_then(|first| first.trim().parse().ok())
}

fn real_ip(headers: &HeaderMap) -> Option<IpAddr> {
    headers.get(X_REAL_IP)?.to_str().ok()?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn peer() -> SocketAddr {
        "127.0.0.1:12345".parse().unwrap()
    }

    #[test]
    fn test_peer_address_without_headers() {
        let headers = HeaderMap::new();
        assert_eq!(client_address(&headers, peer(), true), "127.0.0.1");
    }

    #[test]
    fn test_forwarded_for_ignored_when_not_behind_proxy() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("203.0.113.7"));

        assert_eq!(client_address(&headers, peer(), false), "127.0.0.1");
    }

    #[test]
    fn test_forwarded_for_first_entry() {
        let mut headers = HeaderMap::new();
        headers.insert(
            X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.7, 10.0.0.1, 10.0.0.2"),
        );

        assert_eq!(client_address(&headers, peer(), true), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let mut headers = HeaderMap::new();
        headers.insert(X_REAL_IP, HeaderValue::from_static("198.51.100.4"));

        assert_eq!(client_address(&headers, peer(), true), "198.51.100.4");
    }

    #[test]
    fn test_malformed_forwarded_for_falls_back_to_peer() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("not-an-ip"));

        assert_eq!(client_address(&headers, peer(), true), "127.0.0.1");
    }

    #[test]
    fn test_ipv6_forwarded_for() {
        let mut headers = HeaderMap::new();
        headers.insert(X_FORWARDED_FOR, HeaderValue::from_static("2001:db8::1"));

        assert_eq!(client_address(&headers, peer(), true), "2001:db8::1");
    }
}
