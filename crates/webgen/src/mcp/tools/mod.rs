mod webgen;

use crate::pipeline::Pipeline;
use serde::{Deserialize, Serialize};

// Re-export types needed by tool handlers
pub use super::{JsonRpcError, Tool};

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Deserialize)]
pub struct CallToolParams {
    pub name: String,
    pub arguments: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// Wrap serializable tool output as a pretty-printed text result.
pub fn text_result<T: Serialize>(data: &T) -> Result<serde_json::Value, JsonRpcError> {
    let json_string = serde_json::to_string_pretty(data)
        .map_err(|e| JsonRpcError::internal(format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: None,
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "webgen".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "webgen_generate".to_string(),
            description: "Generate a complete, runnable web application from a natural-language description. Calls the Gemini model, parses its reply into a project file map, synthesizes any missing required files (package.json, entry component, bootstrap module, stylesheet, index.html) and infers the npm dependencies. Returns the files, dependencies, preview entry and whether the fallback project was used. Requires the GEMINI_API_KEY environment variable.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "prompt": {
                        "type": "string",
                        "description": "Description of the web application to build"
                    },
                    "framework": {
                        "type": "string",
                        "description": "Target framework (default: react)",
                        "enum": ["react", "react-ts", "next", "vite"]
                    },
                    "contract": {
                        "type": "string",
                        "description": "Reply format requested from the model (default: delimiter)",
                        "enum": ["delimiter", "json"]
                    },
                    "temperature": {
                        "type": "number",
                        "description": "Sampling temperature (default: 0.7)"
                    },
                    "max_tokens": {
                        "type": "number",
                        "description": "Maximum number of output tokens (default: 8192)"
                    },
                    "top_k": {
                        "type": "number",
                        "description": "Top-k sampling (default: 40)"
                    },
                    "top_p": {
                        "type": "number",
                        "description": "Nucleus sampling probability (default: 0.95)"
                    },
                    "model": {
                        "type": "string",
                        "description": "Gemini model name (default: GEMINI_MODEL or gemini-1.5-flash)"
                    }
                },
                "required": ["prompt"]
            }),
        },
        Tool {
            name: "webgen_materialize".to_string(),
            description: "Turn a raw model reply (delimiter envelope or JSON) into a complete project file map without calling the model. Unparseable replies yield the fallback project. Returns the files, inferred dependencies, preview entry and the fallback flag.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "raw": {
                        "type": "string",
                        "description": "Raw model reply text"
                    }
                },
                "required": ["raw"]
            }),
        },
        Tool {
            name: "webgen_infer_dependencies".to_string(),
            description: "Infer the npm dependencies of a React project from its file contents. Accepts either a file map (path to content) or a local project directory. Returns a map of package name to version range.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "files": {
                        "type": "object",
                        "description": "Map of file path to file content",
                        "additionalProperties": { "type": "string" }
                    },
                    "dir": {
                        "type": "string",
                        "description": "Project directory to scan (used when files is not given)"
                    }
                },
                "required": []
            }),
        },
    ];

    let result = ToolsList { tools };

    serde_json::to_value(result)
        .map_err(|e| JsonRpcError::internal(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
    pipeline: &Pipeline,
) -> Result<serde_json::Value, JsonRpcError> {
    let params: CallToolParams = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {e}")))?;

    match params.name.as_str() {
        "webgen_generate" => webgen::handle_generate(params.arguments, global, pipeline).await,
        "webgen_materialize" => webgen::handle_materialize(params.arguments, global),
        "webgen_infer_dependencies" => webgen::handle_infer_dependencies(params.arguments, global),
        _ => Err(JsonRpcError::invalid_params(format!(
            "Unknown tool: {}",
            params.name
        ))),
    }
}
