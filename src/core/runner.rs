//! The probe pipeline: open one session, initialize, list tools, optionally
//! call one tool, close.
//!
//! Calls are sequential and blocking from the pipeline's point of view; each
//! operation is bounded by the configured request timeout. There is no retry
//! anywhere; a single transport failure aborts the run.

use std::future::Future;
use std::time::Duration;

use rmcp::{
    ServiceExt,
    model::{
        CallToolRequestParam, ClientCapabilities, ClientInfo, Implementation, ProtocolVersion,
    },
    service::{RoleClient, RunningService},
    transport::{
        SseClientTransport, StreamableHttpClientTransport,
        sse_client::SseClientConfig,
        streamable_http_client::StreamableHttpClientTransportConfig,
    },
};

use super::error::{Error, Result};
use super::{render, transport};
use crate::config::{CREDENTIAL_VARS, RunnerConfig, TransportKind};

/// One live MCP session, exclusively owned for the duration of a run.
type Session = RunningService<RoleClient, ClientInfo>;

/// How a run ended without a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The full sequence completed.
    Completed,
    /// No credential variable was set; nothing was attempted.
    MissingCredential,
    /// The tool-argument string did not parse; the call was skipped.
    InvalidToolArguments,
}

/// Execute one probe run against the configured server.
///
/// Missing credentials and malformed tool arguments are clean outcomes with
/// a diagnostic on stderr. Transport failures are returned as errors after
/// the session, if one was opened, has been released.
pub async fn run(config: &RunnerConfig) -> Result<RunOutcome> {
    let Some(credential) = config.credential.as_deref() else {
        eprintln!(
            "A credential is required. Set one of: {}.",
            CREDENTIAL_VARS.join(", ")
        );
        return Ok(RunOutcome::MissingCredential);
    };

    let headers = transport::request_headers(config, credential)?;
    let http = transport::http_client(config, headers)?;

    println!(
        "Connecting to MCP server at {} ({} transport)",
        config.target_url(),
        config.transport
    );
    tracing::debug!(url = %config.target_url(), transport = %config.transport, "opening session");

    let session = open_session(config, http).await?;

    let outcome = converse(&session, config).await;

    // Release the session on every path before surfacing the outcome.
    if let Err(e) = session.cancel().await {
        tracing::warn!(error = %e, "MCP session did not shut down cleanly");
    }

    outcome
}

async fn open_session(config: &RunnerConfig, http: reqwest::Client) -> Result<Session> {
    let info = client_info();

    match config.transport {
        TransportKind::StreamableHttp => {
            let transport = StreamableHttpClientTransport::with_client(
                http,
                StreamableHttpClientTransportConfig::with_uri(config.target_url()),
            );
            handshake(config.request_timeout, info.serve(transport)).await
        }
        TransportKind::Sse => {
            let connecting = SseClientTransport::start_with_client(
                http,
                SseClientConfig {
                    sse_endpoint: config.target_url().into(),
                    ..SseClientConfig::default()
                },
            );
            let transport = match tokio::time::timeout(config.request_timeout, connecting).await {
                Ok(Ok(transport)) => transport,
                Ok(Err(e)) => {
                    return Err(Error::Connect(format!("failed to open SSE stream: {e}")));
                }
                Err(_) => {
                    return Err(Error::Connect(format!(
                        "SSE connection timed out after {:?}",
                        config.request_timeout
                    )));
                }
            };
            handshake(config.request_timeout, info.serve(transport)).await
        }
    }
}

async fn handshake<F, E>(limit: Duration, serving: F) -> Result<Session>
where
    F: Future<Output = std::result::Result<Session, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(limit, serving).await {
        Ok(Ok(session)) => Ok(session),
        Ok(Err(e)) => Err(Error::Connect(format!("initialize failed: {e}"))),
        Err(_) => Err(Error::Connect(format!(
            "initialize timed out after {limit:?}"
        ))),
    }
}

async fn converse(session: &Session, config: &RunnerConfig) -> Result<RunOutcome> {
    for line in render::initialize_lines(session.peer_info()) {
        println!("{line}");
    }

    let tools = bounded(
        config.request_timeout,
        "tools/list",
        session.list_tools(None),
    )
    .await?;
    tracing::debug!(count = tools.tools.len(), "listed tools");

    println!("== Available Tools ==");
    for line in render::tool_lines(&tools.tools) {
        println!("{line}");
    }

    let Some(tool) = config.tool.as_deref() else {
        return Ok(RunOutcome::Completed);
    };

    let arguments = match render::parse_tool_arguments(config.tool_args.as_deref()) {
        Ok(arguments) => arguments,
        Err(e) => {
            eprintln!("{}", invalid_arguments_diagnostic(&e));
            return Ok(RunOutcome::InvalidToolArguments);
        }
    };

    tracing::debug!(tool = %tool, "calling tool");
    let result = bounded(
        config.request_timeout,
        "tools/call",
        session.call_tool(CallToolRequestParam {
            name: tool.to_owned().into(),
            arguments: Some(arguments),
        }),
    )
    .await?;

    println!("== Call Result ==");
    for line in render::call_result_lines(&result) {
        println!("{line}");
    }

    Ok(RunOutcome::Completed)
}

async fn bounded<T, E, F>(limit: Duration, what: &str, operation: F) -> Result<T>
where
    F: Future<Output = std::result::Result<T, E>>,
    E: std::fmt::Display,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(Error::Request(format!("{what} failed: {e}"))),
        Err(_) => Err(Error::Request(format!("{what} timed out after {limit:?}"))),
    }
}

// Arguments arrive via the --tool-args flag or its MCP_TOOL_ARGS_JSON env
// fallback; clap has already merged them, so the diagnostic names both.
fn invalid_arguments_diagnostic(e: &serde_json::Error) -> String {
    format!("Invalid JSON in tool arguments (--tool-args / MCP_TOOL_ARGS_JSON): {e}")
}

fn client_info() -> ClientInfo {
    ClientInfo {
        protocol_version: ProtocolVersion::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: env!("CARGO_PKG_NAME").to_owned(),
            title: None,
            version: env!("CARGO_PKG_VERSION").to_owned(),
            website_url: None,
            icons: None,
        },
    }
}
