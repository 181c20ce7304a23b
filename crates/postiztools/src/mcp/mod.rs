mod sse;
mod stdio;
mod tools;

use clap::ArgMatches;
use serde::{Deserialize, Serialize};

use crate::cli::GlobalOptions;
use crate::postiz::PostizConfig;
use crate::prelude::*;

// JSON-RPC 2.0 types
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    method: String,
    params: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcResponse {
    jsonrpc: String,
    id: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

#[derive(Debug, Serialize)]
pub struct JsonRpcError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

// MCP Protocol types
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Read-only state every request handler sees: the configuration is
/// resolved once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct ServerContext {
    pub config: PostizConfig,
    pub verbose: bool,
}

pub async fn run(matches: &ArgMatches, global: &GlobalOptions) -> Result<()> {
    // A missing API key aborts here, before any transport starts serving.
    let config = PostizConfig::resolve(global.api_key.clone(), global.base_url.clone())?;
    let context = ServerContext {
        config,
        verbose: global.verbose,
    };

    match matches.subcommand() {
        Some(("stdio", _)) => stdio::run_stdio(context).await,
        Some(("sse", sse_matches)) => {
            let options = sse::SseOptions {
                port: sse_matches.get_one::<u16>("port").copied().unwrap_or(3000),
                host: sse_matches
                    .get_one::<String>("host")
                    .cloned()
                    .unwrap_or_else(|| "127.0.0.1".to_string()),
            };
            sse::run_sse(options, context).await
        }
        _ => Err(eyre!("An MCP transport is required (stdio or sse)")),
    }
}

pub async fn handle_request(request_str: &str, context: &ServerContext) -> JsonRpcResponse {
    let request: JsonRpcRequest = match serde_json::from_str(request_str) {
        Ok(req) => req,
        Err(e) => {
            return JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id: None,
                result: None,
                error: Some(JsonRpcError {
                    code: -32700,
                    message: format!("Parse error: {e}"),
                    data: None,
                }),
            };
        }
    };

    let result = match request.method.as_str() {
        "initialize" => tools::handle_initialize(),
        "tools/list" => tools::handle_tools_list(),
        "tools/call" => tools::handle_tools_call(request.params, context).await,
        method => Err(JsonRpcError {
            code: -32601,
            message: format!("Method not found: {method}"),
            data: None,
        }),
    };

    match result {
        Ok(value) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: Some(value),
            error: None,
        },
        Err(error) => JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id,
            result: None,
            error: Some(error),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_context() -> ServerContext {
        ServerContext {
            config: PostizConfig {
                api_key: "test-key".to_string(),
                base_url: "http://127.0.0.1:9".to_string(),
            },
            verbose: false,
        }
    }

    #[tokio::test]
    async fn test_malformed_request_is_a_parse_error() {
        let response = handle_request("{not json", &test_context()).await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32700);
        assert!(response.result.is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let response = handle_request(
            r#"{"jsonrpc": "2.0", "id": 1, "method": "resources/list"}"#,
            &test_context(),
        )
        .await;
        let error = response.error.unwrap();
        assert_eq!(error.code, -32601);
        assert!(error.message.contains("resources/list"));
    }

    #[tokio::test]
    async fn test_initialize_round_trip() {
        let response = handle_request(
            r#"{"jsonrpc": "2.0", "id": 7, "method": "initialize"}"#,
            &test_context(),
        )
        .await;
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "postiztools");
        assert_eq!(response.id, Some(serde_json::json!(7)));
    }
}
