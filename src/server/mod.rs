// MCP server loop over stdin/stdout
//
// Design Decision: Newline-delimited JSON-RPC 2.0 on the process's own
// stdin/stdout, one request handled at a time
//
// Rationale: MCP hosts spawn this server as a child process and speak
// line-oriented JSON-RPC over its pipes. Requests are independent (the only
// shared state is the immutable tool registry and the HTTP client), and the
// hosts that drive this server send one request and wait, so a sequential
// loop is the whole story.
//
// Trade-offs:
// - Sequential handling: No concurrency machinery, at the cost of
//   head-of-line blocking if a host ever pipelines (none do today)
// - stdout is reserved for protocol frames; all logging goes to stderr
//
// Alternatives Considered:
// 1. Spawning a task per request: Rejected - responses could interleave
//    mid-line without an output mutex, and no client pipelines
// 2. HTTP/SSE transport: Rejected - the hosts in use connect over stdio

pub mod protocol;

use serde_json::Value;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::error::Result;
use crate::http::DevRevClient;
use crate::tools::ToolRegistry;
use protocol::{
    InitializeParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse,
    McpToolDefinition, ServerCapabilities, ServerInfo, ToolCallParams, ToolCallResult,
    ToolCapability, ToolListResult, PROTOCOL_VERSION,
};

/// The MCP server: a fixed tool registry plus the API client the tools
/// are fulfilled through.
///
/// The client is behind `dyn DevRevClient` so tests can drive the full
/// request loop against scripted responses without a network.
pub struct McpServer {
    registry: ToolRegistry,
    client: Box<dyn DevRevClient>,
}

impl McpServer {
    pub fn new(client: Box<dyn DevRevClient>) -> Self {
        Self {
            registry: ToolRegistry::new(),
            client,
        }
    }

    /// Serve requests from stdin until EOF, writing response frames to
    /// stdout.
    pub async fn run(&self) -> Result<()> {
        let stdin = BufReader::new(io::stdin());
        let stdout = io::stdout();
        self.serve(stdin, stdout).await
    }

    /// The request loop over arbitrary line streams.
    ///
    /// Blank lines are skipped. Every non-notification frame produces
    /// exactly one response line, flushed immediately so the host never
    /// waits on a buffer.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut line = String::new();
        loop {
            line.clear();
            if reader.read_line(&mut line).await? == 0 {
                tracing::info!("input closed, shutting down");
                return Ok(());
            }

            let message = line.trim();
            if message.is_empty() {
                continue;
            }

            if let Some(response) = self.handle_message(message).await {
                let frame = serde_json::to_string(&response)?;
                writer.write_all(frame.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
        }
    }

    /// Process one raw frame. `None` means the frame was a notification
    /// and no response line is written.
    pub async fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let request = match serde_json::from_str::<JsonRpcRequest>(message) {
            Ok(request) => request,
            Err(e) => {
                tracing::warn!("unparseable frame: {}", e);
                return Some(JsonRpcResponse::error(
                    None,
                    JsonRpcError::PARSE_ERROR,
                    format!("Parse error: {}", e),
                ));
            }
        };

        self.handle_request(request).await
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::INVALID_REQUEST,
                format!("Invalid request: unsupported jsonrpc version '{}'", request.jsonrpc),
            ));
        }

        // Notifications (no id, or an explicit notifications/* method)
        // never get a response frame.
        if request.method.starts_with("notifications/") || request.id.is_none() {
            tracing::debug!(method = %request.method, "notification received");
            return None;
        }

        let JsonRpcRequest {
            id, method, params, ..
        } = request;

        let outcome = match method.as_str() {
            "initialize" => self.handle_initialize(params),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => {
                let call = match parse_call_params(params) {
                    Ok(call) => call,
                    Err(message) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            JsonRpcError::INVALID_PARAMS,
                            message,
                        ))
                    }
                };
                self.handle_tools_call(call).await
            }
            other => {
                return Some(JsonRpcResponse::error(
                    id,
                    JsonRpcError::METHOD_NOT_FOUND,
                    format!("Method not found: {}", other),
                ))
            }
        };

        Some(match outcome {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(err) => {
                // Caller mistakes surface as invalid-params with the exact
                // validation message; everything else is internal.
                let code = if err.is_validation() {
                    JsonRpcError::INVALID_PARAMS
                } else {
                    tracing::error!("request failed: {}", err);
                    JsonRpcError::INTERNAL_ERROR
                };
                JsonRpcResponse::error(id, code, err.to_string())
            }
        })
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value> {
        if let Some(params) = params {
            match serde_json::from_value::<InitializeParams>(params) {
                Ok(init) => {
                    if let Some(client) = init.client_info {
                        tracing::info!(
                            client = %client.name,
                            version = %client.version,
                            "client connected"
                        );
                    }
                    if init.protocol_version != PROTOCOL_VERSION {
                        tracing::debug!(
                            requested = %init.protocol_version,
                            offered = PROTOCOL_VERSION,
                            "client asked for a different protocol revision"
                        );
                    }
                }
                // Clients are not turned away over unreadable initialize
                // params; the reply advertises our revision either way.
                Err(e) => tracing::debug!("unreadable initialize params: {}", e),
            }
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolCapability::default()),
            },
            server_info: ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };
        Ok(serde_json::to_value(result)?)
    }

    fn handle_tools_list(&self) -> Result<Value> {
        let tools = self
            .registry
            .specs()
            .iter()
            .map(|spec| McpToolDefinition {
                name: spec.name.to_string(),
                description: Some(spec.description.to_string()),
                input_schema: spec.input_schema.clone(),
            })
            .collect();

        Ok(serde_json::to_value(ToolListResult { tools })?)
    }

    async fn handle_tools_call(&self, call: ToolCallParams) -> Result<Value> {
        let arguments = call.arguments.as_ref().and_then(Value::as_object);
        let text = self
            .registry
            .dispatch(&call.name, arguments, self.client.as_ref())
            .await?;

        Ok(serde_json::to_value(ToolCallResult::text(text))?)
    }
}

/// Decode tools/call params, turning structural failures into the
/// invalid-params message (they never reach dispatch).
fn parse_call_params(params: Option<Value>) -> std::result::Result<ToolCallParams, String> {
    let params = params.ok_or_else(|| "Invalid params: missing params object".to_string())?;
    serde_json::from_value(params).map_err(|e| format!("Invalid params: {}", e))
}
