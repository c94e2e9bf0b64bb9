//! MCP Server implementation
//!
//! Line-delimited JSON-RPC 2.0 over any async reader/writer pair; `run`
//! binds it to stdin/stdout. Tool calls are only accepted once the client
//! has sent `initialize`.

use super::handlers::ToolHandler;
use super::protocol::*;
use super::tools::all_tools;
use crate::tracker::{Collections, EpicTracker};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tracing::{debug, error, info, warn};

const PROTOCOL_VERSION: &str = "2024-11-05";
const SERVER_NAME: &str = "notion-epic-tracker";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const INSTRUCTIONS: &str = "Tracks Epics and their Tasks in Notion. \
Epic and Task names are matched exactly and case-sensitively.";

/// MCP Server exposing the tracker tools
pub struct McpServer {
    tool_handler: ToolHandler,
    collections: Collections,
    initialized: bool,
}

impl McpServer {
    pub fn new(tracker: EpicTracker) -> Self {
        Self {
            collections: tracker.collections().clone(),
            tool_handler: ToolHandler::new(tracker),
            initialized: false,
        }
    }

    /// Serve stdin/stdout until the client closes its end
    pub async fn run(&mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.serve(stdin, stdout).await
    }

    /// Answer one response line per request line. Notifications and blank
    /// lines produce no output.
    pub async fn serve<R, W>(&mut self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        info!(
            epic_data_source = %self.collections.epic_data_source_id,
            task_data_source = %self.collections.task_data_source_id,
            "Epic tracker MCP server listening"
        );

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            debug!(request = line, "<-");

            if let Some(response) = self.handle_message(line).await {
                let mut out = serde_json::to_string(&response)?;
                debug!(response = %out, "->");
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }

        info!("Client closed the stream");
        Ok(())
    }

    async fn handle_message(&mut self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(request) => request,
            Err(e) => {
                warn!("Unparsable message: {}", e);
                return Some(JsonRpcResponse::error(
                    Value::Null,
                    JsonRpcError::parse_error(e.to_string()),
                ));
            }
        };

        let Some(id) = request.id.clone() else {
            self.on_notification(&request);
            return None;
        };

        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                id,
                JsonRpcError::invalid_request(format!(
                    "unsupported jsonrpc version '{}'",
                    request.jsonrpc
                )),
            ));
        }

        Some(match self.dispatch(&request).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        })
    }

    fn on_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" if !self.initialized => {
                warn!("Client sent 'initialized' before 'initialize'")
            }
            "notifications/initialized" => debug!("Client ready"),
            "notifications/cancelled" => {
                // Operations run to completion; a cancel only gets logged.
                let request_id = request.params.as_ref().and_then(|p| p.get("requestId"));
                debug!(?request_id, "Cancel ignored")
            }
            other => debug!(method = other, "Notification ignored"),
        }
    }

    async fn dispatch(&mut self, request: &JsonRpcRequest) -> Result<Value, JsonRpcError> {
        match request.method.as_str() {
            "initialize" => self.initialize(&request.params),
            "ping" => Ok(json!({})),
            "tools/list" => {
                self.require_initialized()?;
                to_result(ToolsListResult { tools: all_tools() })
            }
            "tools/call" => {
                self.require_initialized()?;
                let params: ToolCallParams = parse_params(&request.params)?
                    .ok_or_else(|| JsonRpcError::invalid_params("tool name is required"))?;
                self.call_tool(params).await
            }
            method => Err(JsonRpcError::method_not_found(method)),
        }
    }

    fn require_initialized(&self) -> Result<(), JsonRpcError> {
        if self.initialized {
            Ok(())
        } else {
            Err(JsonRpcError::invalid_request(
                "initialize must be called first",
            ))
        }
    }

    fn initialize(&mut self, params: &Option<Value>) -> Result<Value, JsonRpcError> {
        let params: Option<InitializeParams> = parse_params(params)?;
        let client = params
            .as_ref()
            .and_then(|p| p.client_info.as_ref())
            .map(|c| c.name.as_str())
            .unwrap_or("unknown");
        let requested = params
            .as_ref()
            .map(|p| p.protocol_version.as_str())
            .unwrap_or(PROTOCOL_VERSION);

        if requested != PROTOCOL_VERSION {
            warn!(requested, "Client protocol differs, answering with {}", PROTOCOL_VERSION);
        }
        info!(
            client,
            epic_data_source = %self.collections.epic_data_source_id,
            task_data_source = %self.collections.task_data_source_id,
            task_database = %self.collections.task_database_id,
            "Session initialized"
        );
        self.initialized = true;

        to_result(InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        })
    }

    async fn call_tool(&self, params: ToolCallParams) -> Result<Value, JsonRpcError> {
        info!(tool = %params.name, "Tool call");

        let result = match self
            .tool_handler
            .handle(&params.name, params.arguments)
            .await
        {
            Ok(text) => ToolCallResult::success(text),
            Err(e) => {
                error!(tool = %params.name, "Tool failed: {:#}", e);
                ToolCallResult::error(format!("{:#}", e))
            }
        };
        to_result(result)
    }
}

/// Decode optional request params; malformed params are -32602.
fn parse_params<T: DeserializeOwned>(params: &Option<Value>) -> Result<Option<T>, JsonRpcError> {
    params
        .as_ref()
        .map(|p| serde_json::from_value(p.clone()))
        .transpose()
        .map_err(|e| JsonRpcError::invalid_params(e.to_string()))
}

fn to_result<T: serde::Serialize>(value: T) -> Result<Value, JsonRpcError> {
    serde_json::to_value(value).map_err(|e| JsonRpcError::internal_error(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::mock_workspace;
    use std::sync::Arc;

    async fn server() -> McpServer {
        let store = Arc::new(mock_workspace().await);
        McpServer::new(EpicTracker::new(store, Collections::default()))
    }

    const INITIALIZE: &str = r#"{"jsonrpc":"2.0","method":"initialize","params":{"protocolVersion":"2024-11-05","capabilities":{},"clientInfo":{"name":"test-client"}},"id":0}"#;

    async fn send(server: &mut McpServer, message: &str) -> Value {
        let response = server.handle_message(message).await.unwrap();
        serde_json::to_value(response).unwrap()
    }

    #[tokio::test]
    async fn test_initialize_handshake() {
        let mut server = server().await;
        let resp = send(&mut server, INITIALIZE).await;
        assert_eq!(resp["id"], 0);
        assert_eq!(resp["result"]["protocolVersion"], PROTOCOL_VERSION);
        assert_eq!(resp["result"]["serverInfo"]["name"], SERVER_NAME);
        assert_eq!(resp["result"]["capabilities"]["tools"]["listChanged"], false);
        assert!(server.initialized);
    }

    #[tokio::test]
    async fn test_initialize_without_params() {
        let mut server = server().await;
        let resp = send(&mut server, r#"{"jsonrpc":"2.0","method":"initialize","id":"a"}"#).await;
        assert_eq!(resp["id"], "a");
        assert_eq!(resp["result"]["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn test_tool_call_before_initialize_is_rejected() {
        let mut server = server().await;
        let resp = send(
            &mut server,
            r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"list_epics"},"id":1}"#,
        )
        .await;
        assert_eq!(resp["error"]["code"], -32600);
        assert!(resp.get("result").is_none());
    }

    #[tokio::test]
    async fn test_ping_works_before_initialize() {
        let mut server = server().await;
        let resp = send(&mut server, r#"{"jsonrpc":"2.0","method":"ping","id":9}"#).await;
        assert_eq!(resp["result"], json!({}));
    }

    #[tokio::test]
    async fn test_notifications_get_no_response() {
        let mut server = server().await;
        for message in [
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"notifications/cancelled","params":{"requestId":3}}"#,
        ] {
            assert!(server.handle_message(message).await.is_none());
        }
    }

    #[tokio::test]
    async fn test_parse_error_has_null_id() {
        let mut server = server().await;
        let resp = send(&mut server, "{not json").await;
        assert_eq!(resp["error"]["code"], -32700);
        assert!(resp["id"].is_null());
    }

    #[tokio::test]
    async fn test_wrong_jsonrpc_version() {
        let mut server = server().await;
        let resp = send(&mut server, r#"{"jsonrpc":"1.0","method":"ping","id":5}"#).await;
        assert_eq!(resp["error"]["code"], -32600);
    }

    #[tokio::test]
    async fn test_tools_call_without_params() {
        let mut server = server().await;
        send(&mut server, INITIALIZE).await;
        let resp = send(&mut server, r#"{"jsonrpc":"2.0","method":"tools/call","id":6}"#).await;
        assert_eq!(resp["error"]["code"], -32602);
    }

    #[tokio::test]
    async fn test_tools_call_returns_text_content() {
        let mut server = server().await;
        send(&mut server, INITIALIZE).await;
        let resp = send(
            &mut server,
            r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"list_epics","arguments":{"status_filter":"Done"}},"id":2}"#,
        )
        .await;
        let content = &resp["result"]["content"][0];
        assert_eq!(content["type"], "text");
        assert!(content["text"].as_str().unwrap().contains("E3"));
        assert!(resp["result"].get("isError").is_none());
    }

    #[tokio::test]
    async fn test_tool_failure_is_an_error_result() {
        let mut server = server().await;
        send(&mut server, INITIALIZE).await;
        let resp = send(
            &mut server,
            r#"{"jsonrpc":"2.0","method":"tools/call","params":{"name":"no_such_tool"},"id":3}"#,
        )
        .await;
        assert_eq!(resp["result"]["isError"], true);
        assert!(resp.get("error").is_none());
    }

    #[tokio::test]
    async fn test_unknown_method() {
        let mut server = server().await;
        let resp = send(&mut server, r#"{"jsonrpc":"2.0","method":"resources/list","id":4}"#).await;
        assert_eq!(resp["error"]["code"], -32601);
    }

    #[tokio::test]
    async fn test_serve_answers_line_by_line() {
        let mut server = server().await;
        let input = format!(
            "{}\n\n{}\n{}\n",
            INITIALIZE,
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            r#"{"jsonrpc":"2.0","method":"tools/list","id":1}"#,
        );
        let mut output = Vec::new();
        server.serve(input.as_bytes(), &mut output).await.unwrap();

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["id"], 0);
        assert_eq!(lines[1]["result"]["tools"].as_array().unwrap().len(), 6);
    }
}
