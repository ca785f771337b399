use axum::http::{HeaderMap, header};

pub const UNKNOWN_IP: &str = "unknown";

/// Client address as reported by the reverse proxy: first entry of
/// `x-forwarded-for`, then `x-real-ip`.
pub fn client_ip(headers: &HeaderMap, trust_proxy_headers: bool) -> String {
    if !trust_proxy_headers {
        return UNKNOWN_IP.to_string();
    }

    let header_value = |name: &str| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
    };

    header_value("x-forwarded-for")
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .or_else(|| header_value("x-real-ip"))
        .unwrap_or(UNKNOWN_IP)
        .to_string()
}

pub fn user_agent(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::USER_AGENT)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
        .map(str::to_string)
}
