//! CLI argument parsing.

use clap::Parser;

use crate::config::TransportKind;

/// Probe a remote MCP server: list its tools and optionally call one.
#[derive(Parser)]
#[command(name = "mcp-probe")]
#[command(about = "Probe a remote MCP server: list its tools and optionally call one")]
#[command(version)]
pub struct Cli {
    /// Transport used to reach the server.
    #[arg(short, long, value_enum, default_value_t = TransportKind::StreamableHttp)]
    pub transport: TransportKind,

    /// Tool to invoke after listing; skipped when absent.
    #[arg(long, env = "MCP_TOOL")]
    pub tool: Option<String>,

    /// JSON object with arguments for --tool.
    #[arg(long = "tool-args", env = "MCP_TOOL_ARGS_JSON")]
    pub tool_args: Option<String>,

    /// Increase logging verbosity.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
