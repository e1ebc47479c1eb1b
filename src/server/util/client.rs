use axum::{
    extract::{ConnectInfo, FromRequestParts},
    http::{header, request::Parts, Extensions, HeaderMap},
};
use std::{convert::Infallible, net::SocketAddr};

/// Where a request came from, as far as the server can tell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientInfo {
    /// First `X-Forwarded-For` entry, else the peer address
    pub ip: Option<String>,
    pub agent: Option<String>,
    pub host: Option<String>,
}

impl ClientInfo {
    /// Reads client details from request headers and connection info.
    pub fn from_request(headers: &HeaderMap, extensions: &Extensions) -> Self {
        let forwarded_ip = headers
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(|ip| ip.trim().to_string())
            .filter(|ip| !ip.is_empty());

        let peer_ip = extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip().to_string());

        Self {
            ip: forwarded_ip.or(peer_ip),
            agent: header_string(headers, header::USER_AGENT.as_str()),
            host: header_string(headers, header::HOST.as_str()),
        }
    }
}

fn header_string(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

impl<S> FromRequestParts<S> for ClientInfo
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_request(&parts.headers, &parts.extensions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn prefers_forwarded_for_over_peer_address() {
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        headers.insert(header::USER_AGENT, HeaderValue::from_static("curl/8.0"));

        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 4000))));

        let client = ClientInfo::from_request(&headers, &extensions);

        assert_eq!(client.ip.as_deref(), Some("203.0.113.7"));
        assert_eq!(client.agent.as_deref(), Some("curl/8.0"));
        assert_eq!(client.host, None);
    }

    #[test]
    fn falls_back_to_peer_address() {
        let mut extensions = Extensions::new();
        extensions.insert(ConnectInfo(SocketAddr::from(([192, 168, 1, 2], 4000))));

        let client = ClientInfo::from_request(&HeaderMap::new(), &extensions);

        assert_eq!(client.ip.as_deref(), Some("192.168.1.2"));
    }
}
