//! Output formatting for the probe.
//!
//! Pure functions from protocol types to display lines, kept separate from
//! the runner so the exact output contract is testable without a server.

use rmcp::model::{CallToolResult, JsonObject, ServerInfo, Tool};

/// Placeholder printed when the server exposes no tools.
pub const NO_TOOLS_PLACEHOLDER: &str = "(no tools exposed)";

/// Placeholder printed when a call returns neither structured content nor
/// content items.
pub const EMPTY_RESULT_PLACEHOLDER: &str = "(empty response)";

/// Lines describing the initialize result and the server identity.
#[must_use]
pub fn initialize_lines(info: Option<&ServerInfo>) -> Vec<String> {
    let Some(info) = info else {
        return vec!["Initialize response: (none)".to_owned()];
    };

    // Prefer the machine-readable rendering; fall back to Debug.
    let rendered = serde_json::to_string(info).map_or_else(
        |_| format!("Initialize response (debug): {info:?}"),
        |json| format!("Initialize response: {json}"),
    );

    vec![
        rendered,
        format!(
            "Connected to MCP server: {} {}",
            info.server_info.name, info.server_info.version
        ),
    ]
}

/// One line per tool, or the no-tools placeholder.
#[must_use]
pub fn tool_lines(tools: &[Tool]) -> Vec<String> {
    if tools.is_empty() {
        return vec![NO_TOOLS_PLACEHOLDER.to_owned()];
    }

    tools
        .iter()
        .map(|tool| {
            format!(
                "- {} : {}",
                tool.name,
                tool.description.as_deref().unwrap_or("(no description)")
            )
        })
        .collect()
}

/// Render a tool-call result.
///
/// Structured content takes priority over content items; an empty result
/// renders as a placeholder, never as an error.
#[must_use]
pub fn call_result_lines(result: &CallToolResult) -> Vec<String> {
    if let Some(structured) = &result.structured_content {
        return vec![structured.to_string()];
    }

    if result.content.is_empty() {
        return vec![EMPTY_RESULT_PLACEHOLDER.to_owned()];
    }

    result
        .content
        .iter()
        .map(|item| {
            item.as_text().map_or_else(
                || serde_json::to_string(item).unwrap_or_else(|_| format!("{item:?}")),
                |text| text.text.clone(),
            )
        })
        .collect()
}

/// Parse the raw tool-argument string into a JSON object.
///
/// Unset or blank input yields an empty argument mapping. Anything else must
/// parse as a JSON object; arrays and scalars are rejected like malformed
/// input.
pub fn parse_tool_arguments(raw: Option<&str>) -> Result<JsonObject, serde_json::Error> {
    match raw {
        None => Ok(JsonObject::new()),
        Some(raw) if raw.trim().is_empty() => Ok(JsonObject::new()),
        Some(raw) => serde_json::from_str(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool(name: &str, description: Option<&str>) -> Tool {
        serde_json::from_value(json!({
            "name": name,
            "description": description,
            "inputSchema": { "type": "object" },
        }))
        .unwrap()
    }

    fn call_result(value: serde_json::Value) -> CallToolResult {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn empty_tool_list_renders_placeholder_only() {
        let lines = tool_lines(&[]);
        assert_eq!(lines, vec![NO_TOOLS_PLACEHOLDER.to_owned()]);
        assert!(!lines.iter().any(|line| line.starts_with("- ")));
    }

    #[test]
    fn tools_render_one_line_each() {
        let tools = vec![
            tool("search", Some("Search the index")),
            tool("echo", None),
        ];
        assert_eq!(
            tool_lines(&tools),
            vec![
                "- search : Search the index".to_owned(),
                "- echo : (no description)".to_owned(),
            ]
        );
    }

    #[test]
    fn structured_content_takes_priority_over_content_items() {
        let result = call_result(json!({
            "structuredContent": { "a": 1 },
            "content": [{ "type": "text", "text": "ignored" }],
        }));
        assert_eq!(call_result_lines(&result), vec![r#"{"a":1}"#.to_owned()]);
    }

    #[test]
    fn text_content_items_render_per_line() {
        let result = call_result(json!({
            "content": [
                { "type": "text", "text": "first" },
                { "type": "text", "text": "second" },
            ],
        }));
        assert_eq!(
            call_result_lines(&result),
            vec!["first".to_owned(), "second".to_owned()]
        );
    }

    #[test]
    fn empty_result_renders_placeholder() {
        // Built directly: the wire deserializer requires content or
        // structured content, but a drained result can still reach us.
        let result = CallToolResult {
            content: vec![],
            structured_content: None,
            is_error: None,
            meta: None,
        };
        assert_eq!(
            call_result_lines(&result),
            vec![EMPTY_RESULT_PLACEHOLDER.to_owned()]
        );
    }

    #[test]
    fn unset_arguments_yield_empty_mapping() {
        assert!(parse_tool_arguments(None).unwrap().is_empty());
        assert!(parse_tool_arguments(Some("   ")).unwrap().is_empty());
    }

    #[test]
    fn arguments_parse_as_object() {
        let args = parse_tool_arguments(Some(r#"{"query": "rust", "limit": 3}"#)).unwrap();
        assert_eq!(args.get("query"), Some(&json!("rust")));
        assert_eq!(args.get("limit"), Some(&json!(3)));
    }

    #[test]
    fn malformed_arguments_are_rejected() {
        assert!(parse_tool_arguments(Some("{not valid json")).is_err());
    }

    #[test]
    fn non_object_arguments_are_rejected() {
        assert!(parse_tool_arguments(Some("[1, 2]")).is_err());
        assert!(parse_tool_arguments(Some("42")).is_err());
    }
}
