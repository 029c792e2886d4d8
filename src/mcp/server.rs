//! MCP JSON-RPC Server over stdio
//!
//! Implements the Model Context Protocol using JSON-RPC 2.0 over stdin/stdout.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::{json, Value};
use std::io::{BufRead, Write};
use tracing::{debug, error, info};

use super::handlers::{self, HandlerState};
use super::tools::{self, get_available_tools};

const PROTOCOL_VERSION: &str = "2024-11-05";
const METHOD_NOT_FOUND: i64 = -32601;
const INTERNAL_ERROR: i64 = -32603;

/// MCP Server implementation
pub struct McpServer {
    state: HandlerState,
}

impl McpServer {
    pub fn new(state: HandlerState) -> Self {
        Self { state }
    }

    /// Run the server, reading JSON-RPC messages from stdin
    pub fn run(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Serve line-delimited JSON-RPC messages until `reader` is exhausted
    pub fn serve<R: BufRead, W: Write>(&self, reader: R, mut writer: W) -> Result<()> {
        info!(
            "tfadvisor MCP server started ({} rules, {} patterns, {} documents)",
            self.state.engine.rule_names().len(),
            self.state.patterns.len(),
            self.state.knowledge.len()
        );

        for line in reader.lines() {
            let line = line.context("Failed to read from stdin")?;
            if line.trim().is_empty() {
                continue;
            }

            debug!("Received: {}", line);

            match self.handle_message(&line) {
                Ok(Some(response)) => {
                    let response_str = serde_json::to_string(&response)?;
                    debug!("Sending: {}", response_str);
                    writeln!(writer, "{}", response_str)?;
                    writer.flush()?;
                }
                Ok(None) => {}
                Err(e) => {
                    error!("Error handling message: {}", e);
                    let error_response = error_response(Value::Null, INTERNAL_ERROR, &e.to_string());
                    writeln!(writer, "{}", serde_json::to_string(&error_response)?)?;
                    writer.flush()?;
                }
            }
        }

        Ok(())
    }

    fn handle_message(&self, message: &str) -> Result<Option<Value>> {
        let request: JsonRpcRequest =
            serde_json::from_str(message).context("Invalid JSON-RPC request")?;
        let id = request.id.unwrap_or(Value::Null);

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => return Ok(None),
            "tools/list" => self.handle_list_tools(&request.params),
            "tools/call" => self.handle_call_tool(&request.params),
            "resources/list" => self.handle_list_resources(&request.params),
            "resources/read" => self.handle_read_resource(&request.params),
            "shutdown" => {
                info!("Shutdown requested");
                Ok(json!(null))
            }
            other => {
                let message = format!("Unknown method: {}", other);
                return Ok(Some(error_response(id, METHOD_NOT_FOUND, &message)));
            }
        };

        Ok(Some(match result {
            Ok(value) => json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": value
            }),
            Err(e) => error_response(id, INTERNAL_ERROR, &e.to_string()),
        }))
    }

    fn handle_initialize(&self, _params: &Option<Value>) -> Result<Value> {
        Ok(json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": "tfadvisor",
                "version": env!("CARGO_PKG_VERSION")
            }
        }))
    }

    fn handle_list_tools(&self, _params: &Option<Value>) -> Result<Value> {
        Ok(json!({
            "tools": get_available_tools()
        }))
    }

    fn handle_call_tool(&self, params: &Option<Value>) -> Result<Value> {
        let params = params.as_ref().context("Missing params for tools/call")?;

        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .context("Missing tool name")?;

        let arguments = params.get("arguments").cloned().unwrap_or(json!({}));

        debug!("Calling tool: {} with args: {}", name, arguments);

        let result = match name {
            tools::VALIDATE_CONFIGURATION => handlers::handle_validate(&self.state, &arguments),
            tools::SUGGEST_IMPROVEMENTS => handlers::handle_suggest(&self.state, &arguments),
            tools::GET_PATTERN_TEMPLATE => {
                handlers::handle_get_pattern_template(&self.state, &arguments)
            }
            tools::GET_BEST_PRACTICES => {
                handlers::handle_get_best_practices(&self.state, &arguments)
            }
            tools::GET_MODULE_STRUCTURE => {
                handlers::handle_get_module_structure(&self.state, &arguments)
            }
            _ => return Err(anyhow::anyhow!("Unknown tool: {}", name)),
        };

        match result {
            Ok(value) => Ok(json!({
                "content": [{
                    "type": "text",
                    "text": serde_json::to_string_pretty(&value)?
                }]
            })),
            Err(e) => Ok(json!({
                "content": [{
                    "type": "text",
                    "text": json!({"error": e.to_string()}).to_string()
                }],
                "isError": true
            })),
        }
    }

    fn handle_list_resources(&self, params: &Option<Value>) -> Result<Value> {
        let prefix = params
            .as_ref()
            .and_then(|p| p.get("prefix"))
            .and_then(|v| v.as_str())
            .unwrap_or("");

        let resources: Vec<Value> = self
            .state
            .knowledge
            .list_resources(prefix)
            .into_iter()
            .map(|uri| json!({ "uri": uri, "name": uri, "mimeType": "application/json" }))
            .collect();

        Ok(json!({ "resources": resources }))
    }

    fn handle_read_resource(&self, params: &Option<Value>) -> Result<Value> {
        let uri = params
            .as_ref()
            .and_then(|p| p.get("uri"))
            .and_then(|v| v.as_str())
            .context("Missing resource uri")?;

        let document = self.state.knowledge.get_resource(uri)?;
        Ok(json!({
            "contents": [{
                "uri": uri,
                "mimeType": "application/json",
                "text": serde_json::to_string_pretty(&document)?
            }]
        }))
    }
}

fn error_response(id: Value, code: i64, message: &str) -> Value {
    json!({
        "jsonrpc": "2.0",
        "id": id,
        "error": {
            "code": code,
            "message": message
        }
    })
}

/// JSON-RPC 2.0 Request
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    params: Option<Value>,
}

/// Run the MCP server on stdio
pub fn run_server(state: HandlerState) -> Result<()> {
    let server = McpServer::new(state);
    server.run()
}
