//! Servidor JSON-RPC do calcore.
//!
//! Lê requests linha a linha, despacha para o [`ToolHandler`] e responde
//! no mesmo formato. Termina no fim da entrada.

use std::io::{BufRead, Write};
use std::sync::Arc;

use serde_json::json;

use crate::engine::CalculatorEngine;
use crate::types::config::Config;
use crate::CalcoreResult;

use super::protocol::{CallToolParams, InitializeResult, JsonRpcError, JsonRpcRequest, JsonRpcResponse, ListToolsResult};
use super::tools::ToolHandler;
use super::transport::{Incoming, LineTransport, StdioTransport};

/// Servidor do calcore.
pub struct McpServer<R, W> {
    transport: LineTransport<R, W>,
    tools: ToolHandler,
    initialized: bool,
}

impl McpServer<std::io::BufReader<std::io::Stdin>, std::io::Stdout> {
    /// Servidor sobre stdin/stdout com um motor novo.
    pub fn stdio(config: &Config) -> Self {
        Self::with_transport(StdioTransport::stdio(), Arc::new(CalculatorEngine::new(config)))
    }
}

impl<R: BufRead, W: Write> McpServer<R, W> {
    pub fn with_transport(transport: LineTransport<R, W>, engine: Arc<CalculatorEngine>) -> Self {
        Self {
            transport,
            tools: ToolHandler::new(engine),
            initialized: false,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Loop principal; retorna no fim da entrada.
    pub async fn run(&mut self) -> CalcoreResult<()> {
        tracing::info!("calcore server starting");

        loop {
            let request = match self.transport.read_message()? {
                Incoming::Request(request) => request,
                Incoming::Malformed(detail) => {
                    tracing::warn!(error = %detail, "Malformed message");
                    let response = JsonRpcResponse::error(None, JsonRpcError::parse_error(detail));
                    self.transport.write_response(&response)?;
                    continue;
                }
                Incoming::Eof => {
                    tracing::info!("Client disconnected");
                    break;
                }
            };

            // Notificações não recebem resposta.
            let is_notification = request.is_notification();
            let response = self.handle_request(request).await;

            if !is_notification {
                self.transport.write_response(&response)?;
            }
        }

        tracing::info!("calcore server stopped");
        Ok(())
    }

    /// Devolve o transporte (usado para inspecionar a saída).
    pub fn into_transport(self) -> LineTransport<R, W> {
        self.transport
    }

    /// Processa uma requisição JSON-RPC.
    pub async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        tracing::debug!(method = %request.method, "Handling request");

        if request.jsonrpc != "2.0" {
            return JsonRpcResponse::error(
                request.id,
                JsonRpcError::invalid_request(format!("Unsupported jsonrpc version: {}", request.jsonrpc)),
            );
        }

        match request.method.as_str() {
            "initialize" => {
                tracing::info!("Client initializing connection");
                self.initialized = true;
                JsonRpcResponse::success(
                    request.id,
                    serde_json::to_value(InitializeResult::default()).unwrap_or(json!({})),
                )
            }
            "initialized" | "notifications/initialized" => JsonRpcResponse::success(request.id, json!({})),
            "shutdown" => {
                tracing::info!("Client requested shutdown");
                self.initialized = false;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => {
                let result = ListToolsResult {
                    tools: ToolHandler::list_tools(),
                };
                JsonRpcResponse::success(
                    request.id,
                    serde_json::to_value(result).unwrap_or(json!({"tools": []})),
                )
            }
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(request.id, JsonRpcError::method_not_found(&request.method)),
        }
    }

    async fn handle_tools_call(&self, request: JsonRpcRequest) -> JsonRpcResponse {
        let params: CallToolParams = match request.params.map(serde_json::from_value) {
            Some(Ok(params)) => params,
            Some(Err(e)) => {
                return JsonRpcResponse::error(
                    request.id,
                    JsonRpcError::invalid_params(format!("Invalid params: {}", e)),
                )
            }
            None => return JsonRpcResponse::error(request.id, JsonRpcError::invalid_params("Missing params")),
        };

        tracing::info!(tool = %params.name, "Calling tool");

        match self.tools.handle_tool_call(&params.name, params.arguments).await {
            Ok(result) => match serde_json::to_value(&result) {
                Ok(value) => JsonRpcResponse::success(request.id, value),
                Err(e) => JsonRpcResponse::error(request.id, JsonRpcError::internal_error(e.to_string())),
            },
            Err(error) => JsonRpcResponse::error(request.id, error),
        }
    }
}
