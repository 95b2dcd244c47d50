//! Configuration for a probe run.
//!
//! All environment lookups happen here, once, against a snapshot of the
//! process environment. The rest of the crate receives an immutable
//! [`RunnerConfig`] and never touches ambient state.

use std::collections::HashMap;
use std::time::Duration;

use clap::ValueEnum;

/// Credential variables, most specific first. The first non-blank value wins.
pub const CREDENTIAL_VARS: [&str; 3] = ["GITHUB_MCP_PAT", "GITHUB_PAT", "GITHUB_TOKEN"];

const SERVER_URL_VAR: &str = "GITHUB_MCP_SERVER_URL";
const AUTH_SCHEME_VAR: &str = "GITHUB_MCP_AUTH_SCHEME";
const USER_AGENT_VAR: &str = "GITHUB_MCP_USER_AGENT";

const DEFAULT_AUTH_SCHEME: &str = "Bearer";
const DEFAULT_USER_AGENT: &str = concat!("mcp-probe/", env!("CARGO_PKG_VERSION"));

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP-based transport used to reach the MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TransportKind {
    /// Streamable HTTP (single endpoint, POST with optional event stream).
    StreamableHttp,
    /// Server-Sent Events (persistent event stream plus message endpoint).
    Sse,
}

impl TransportKind {
    const fn default_server_url(self) -> &'static str {
        match self {
            Self::StreamableHttp => "https://api.githubcopilot.com",
            Self::Sse => "https://api.github.com/copilot/mcp",
        }
    }

    const fn default_endpoint(self) -> &'static str {
        match self {
            Self::StreamableHttp => "/mcp",
            Self::Sse => "/server/sse",
        }
    }

    const fn endpoint_var(self) -> &'static str {
        match self {
            Self::StreamableHttp => "GITHUB_MCP_ENDPOINT",
            Self::Sse => "GITHUB_MCP_SSE_ENDPOINT",
        }
    }

    /// Connection timeout, matching the per-transport values the tool has
    /// always used.
    #[must_use]
    pub const fn connect_timeout(self) -> Duration {
        match self {
            Self::StreamableHttp => Duration::from_secs(30),
            Self::Sse => Duration::from_secs(20),
        }
    }
}

impl std::fmt::Display for TransportKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StreamableHttp => f.write_str("streamable-http"),
            Self::Sse => f.write_str("sse"),
        }
    }
}

/// Resolved configuration for one run. Immutable once built.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Transport used to reach the server.
    pub transport: TransportKind,
    /// Base address of the MCP server, no trailing slash.
    pub server_url: String,
    /// Path suffix appended to the base address.
    pub endpoint: String,
    /// Bearer credential; `None` when no candidate variable was set.
    pub credential: Option<String>,
    /// Authorization header prefix.
    pub auth_scheme: String,
    /// User-Agent header value.
    pub user_agent: String,
    /// Tool to invoke after listing; the call step is skipped when absent.
    pub tool: Option<String>,
    /// Raw JSON object with arguments for the tool call.
    pub tool_args: Option<String>,
    /// Per-operation timeout for initialize, tools/list, and tools/call.
    pub request_timeout: Duration,
}

impl RunnerConfig {
    /// Resolve configuration from the current process environment.
    #[must_use]
    pub fn from_env(
        transport: TransportKind,
        tool: Option<String>,
        tool_args: Option<String>,
    ) -> Self {
        let env: HashMap<String, String> = std::env::vars().collect();
        Self::resolve(transport, tool, tool_args, &env)
    }

    /// Resolve configuration from an environment snapshot.
    #[must_use]
    pub fn resolve(
        transport: TransportKind,
        tool: Option<String>,
        tool_args: Option<String>,
        env: &HashMap<String, String>,
    ) -> Self {
        let server_url = env
            .get(SERVER_URL_VAR)
            .map_or(transport.default_server_url(), String::as_str)
            .trim_end_matches('/')
            .to_owned();

        let endpoint = env
            .get(transport.endpoint_var())
            .cloned()
            .unwrap_or_else(|| transport.default_endpoint().to_owned());

        Self {
            transport,
            server_url,
            endpoint,
            credential: resolve_credential(env),
            auth_scheme: env
                .get(AUTH_SCHEME_VAR)
                .cloned()
                .unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_owned()),
            user_agent: env
                .get(USER_AGENT_VAR)
                .cloned()
                .unwrap_or_else(|| DEFAULT_USER_AGENT.to_owned()),
            tool: tool.filter(|t| !t.trim().is_empty()),
            tool_args,
            request_timeout: REQUEST_TIMEOUT,
        }
    }

    /// Full URL of the MCP endpoint.
    #[must_use]
    pub fn target_url(&self) -> String {
        format!("{}{}", self.server_url, self.endpoint)
    }
}

fn resolve_credential(env: &HashMap<String, String>) -> Option<String> {
    CREDENTIAL_VARS.iter().find_map(|var| {
        env.get(*var)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
            .map(str::to_owned)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn credential_absent_when_no_variable_is_set() {
        let config = RunnerConfig::resolve(TransportKind::StreamableHttp, None, None, &env(&[]));
        assert_eq!(config.credential, None);
    }

    #[test]
    fn most_specific_credential_variable_wins() {
        let config = RunnerConfig::resolve(
            TransportKind::StreamableHttp,
            None,
            None,
            &env(&[
                ("GITHUB_TOKEN", "generic"),
                ("GITHUB_PAT", "pat"),
                ("GITHUB_MCP_PAT", "specific"),
            ]),
        );
        assert_eq!(config.credential.as_deref(), Some("specific"));
    }

    #[test]
    fn least_specific_credential_is_used_and_trimmed() {
        let config = RunnerConfig::resolve(
            TransportKind::Sse,
            None,
            None,
            &env(&[("GITHUB_TOKEN", "  tok-123  ")]),
        );
        assert_eq!(config.credential.as_deref(), Some("tok-123"));
    }

    #[test]
    fn blank_credential_falls_through_to_next_variable() {
        let config = RunnerConfig::resolve(
            TransportKind::StreamableHttp,
            None,
            None,
            &env(&[("GITHUB_MCP_PAT", "   "), ("GITHUB_TOKEN", "fallback")]),
        );
        assert_eq!(config.credential.as_deref(), Some("fallback"));
    }

    #[test]
    fn defaults_differ_per_transport() {
        let http = RunnerConfig::resolve(TransportKind::StreamableHttp, None, None, &env(&[]));
        assert_eq!(http.target_url(), "https://api.githubcopilot.com/mcp");

        let sse = RunnerConfig::resolve(TransportKind::Sse, None, None, &env(&[]));
        assert_eq!(
            sse.target_url(),
            "https://api.github.com/copilot/mcp/server/sse"
        );
    }

    #[test]
    fn server_url_override_drops_trailing_slash() {
        let config = RunnerConfig::resolve(
            TransportKind::StreamableHttp,
            None,
            None,
            &env(&[("GITHUB_MCP_SERVER_URL", "http://127.0.0.1:3000/")]),
        );
        assert_eq!(config.target_url(), "http://127.0.0.1:3000/mcp");
    }

    #[test]
    fn sse_endpoint_override_uses_sse_variable() {
        let config = RunnerConfig::resolve(
            TransportKind::Sse,
            None,
            None,
            &env(&[
                ("GITHUB_MCP_ENDPOINT", "/wrong"),
                ("GITHUB_MCP_SSE_ENDPOINT", "/events"),
            ]),
        );
        assert_eq!(config.endpoint, "/events");
    }

    #[test]
    fn blank_tool_name_is_treated_as_absent() {
        let config = RunnerConfig::resolve(
            TransportKind::StreamableHttp,
            Some("  ".to_owned()),
            None,
            &env(&[]),
        );
        assert_eq!(config.tool, None);
    }
}
