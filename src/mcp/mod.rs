//! Serviço JSON-RPC 2.0 do calcore sobre stdio.
//!
//! ## Ferramentas Expostas
//!
//! - `calc_evaluate` - Avalia uma expressão
//! - `calc_validate` - Valida uma expressão
//! - `calc_format` - Formata um número
//! - `calc_functions` / `calc_categories` - Catálogo de funções
//! - `calc_clear_cache` - Esvazia o cache do motor
//! - `calc_status` - Versão, backend e cache
//!
//! ## Exemplo de Uso
//!
//! ```ignore
//! use calcore::mcp::McpServer;
//! use calcore::types::config::Config;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::load_or_default();
//!     let mut server = McpServer::stdio(&config);
//!     server.run().await.unwrap();
//! }
//! ```

mod protocol;
mod server;
mod tools;
mod transport;

pub use protocol::{
    CallToolParams, InitializeResult, JsonRpcError, JsonRpcId, JsonRpcRequest, JsonRpcResponse, ListToolsResult,
    ServerCapabilities, ServerInfo, ToolContent, ToolDescription, ToolResult, ToolsCapability, INTERNAL_ERROR,
    INVALID_PARAMS, INVALID_REQUEST, METHOD_NOT_FOUND, PARSE_ERROR, PROTOCOL_VERSION,
};

pub use server::McpServer;
pub use tools::ToolHandler;
pub use transport::{Incoming, LineTransport, StdioTransport};
