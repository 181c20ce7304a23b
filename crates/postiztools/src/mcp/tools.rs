use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{JsonRpcError, ServerContext, Tool};
use crate::postiz::PostizClient;
use crate::prelude::eprintln;
use crate::tools;

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
    pub arguments: Option<Value>,
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

fn internal_error(message: String) -> JsonRpcError {
    JsonRpcError {
        code: -32603,
        message,
        data: None,
    }
}

pub fn handle_initialize() -> Result<Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "postiztools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(|e| internal_error(format!("Internal error: {e}")))
}

/// Advertise every registered tool; the input schema comes straight from
/// the shared descriptor set.
pub fn handle_tools_list() -> Result<Value, JsonRpcError> {
    let result = ToolsList {
        tools: tools::TOOLS
            .iter()
            .map(|tool| Tool {
                name: tool.spec.name.to_string(),
                description: tool.spec.description.to_string(),
                input_schema: tool.spec.input_schema(),
            })
            .collect(),
    };

    serde_json::to_value(result).map_err(|e| internal_error(format!("Internal error: {e}")))
}

pub async fn handle_tools_call(
    params: Option<Value>,
    context: &ServerContext,
) -> Result<Value, JsonRpcError> {
    let params: CallToolParams =
        serde_json::from_value(params.unwrap_or(Value::Null)).map_err(|e| JsonRpcError {
            code: -32602,
            message: format!("Invalid params: {e}"),
            data: None,
        })?;

    let tool = tools::find(&params.name).ok_or_else(|| JsonRpcError {
        code: -32602,
        message: format!("Unknown tool: {}", params.name),
        data: None,
    })?;

    if context.verbose {
        eprintln!("Calling {}", tool.spec.name);
    }

    let client = PostizClient::new(&context.config)
        .map_err(|e| internal_error(format!("Internal error: {e}")))?;

    let arguments = params
        .arguments
        .unwrap_or_else(|| Value::Object(Map::new()));
    let output = (tool.run)(client, arguments).await;

    let json_string = serde_json::to_string_pretty(&output.payload)
        .map_err(|e| internal_error(format!("Serialization error: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text: json_string }],
        is_error: output.is_error.then_some(true),
    };

    serde_json::to_value(result).map_err(|e| internal_error(format!("Internal error: {e}")))
}
