//! Client identification utilities

use std::net::IpAddr;

use axum::http::HeaderMap;

/// Extract the originating client IP address
///
/// Checks the X-Forwarded-For header first (for reverse proxy setups),
/// then falls back to the direct connection IP.
pub fn extract_client_ip(headers: &HeaderMap, direct_ip: Option<IpAddr>) -> Option<IpAddr> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|xff| xff.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok())
        .or(direct_ip)
}
