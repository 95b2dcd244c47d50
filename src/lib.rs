//! mcp-probe - command-line probe for remote MCP servers.
//!
//! Connects to an MCP server over streamable HTTP or SSE, authenticates with
//! a bearer token from the environment, prints the server identity and its
//! tool list, and optionally invokes one tool with JSON arguments. Protocol
//! framing, JSON-RPC, and transport mechanics are delegated to `rmcp`; this
//! crate only orchestrates one session and formats output.

pub mod cli;
pub mod config;
pub mod core;

pub use config::{RunnerConfig, TransportKind};
pub use core::{Error, RunOutcome};
