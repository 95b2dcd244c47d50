//! Request-signing policy and HTTP client assembly.
//!
//! The signing policy is a pure function from configuration to a header map.
//! It is installed as the reqwest client's default headers, so every request
//! the MCP transport issues carries it, the initial handshake included.

use reqwest::header::{
    ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, ORIGIN, USER_AGENT,
};

use super::error::{Error, Result};
use crate::config::{RunnerConfig, TransportKind};

/// Build the header set applied to every outgoing request.
pub fn request_headers(config: &RunnerConfig, credential: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut authorization =
        HeaderValue::from_str(&format!("{} {credential}", config.auth_scheme))
            .map_err(|e| Error::Connect(format!("invalid Authorization header value: {e}")))?;
    authorization.set_sensitive(true);
    headers.insert(AUTHORIZATION, authorization);

    headers.insert(
        ACCEPT,
        HeaderValue::from_static("application/json, text/event-stream"),
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent)
            .map_err(|e| Error::Connect(format!("invalid User-Agent header value: {e}")))?,
    );

    // Transport-specific extras carried over from the per-variant runners.
    match config.transport {
        TransportKind::StreamableHttp => {
            headers.insert(ORIGIN, HeaderValue::from_static("https://github.com"));
        }
        TransportKind::Sse => {
            headers.insert(
                HeaderName::from_static("x-github-api-version"),
                HeaderValue::from_static("2023-07-07"),
            );
        }
    }

    Ok(headers)
}

/// Build the reqwest client backing the MCP transport.
///
/// Only the connection timeout is set on the client itself; a whole-request
/// timeout would tear down the long-lived event stream. Per-operation
/// timeouts are enforced by the runner.
pub fn http_client(config: &RunnerConfig, headers: HeaderMap) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .default_headers(headers)
        .connect_timeout(config.transport.connect_timeout())
        .build()
        .map_err(|e| Error::Connect(format!("failed to build HTTP client: {e}")))
}
