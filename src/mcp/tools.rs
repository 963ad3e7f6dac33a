//! Handlers das ferramentas do serviço.
//!
//! 1. `calc_evaluate` - Avalia uma expressão
//! 2. `calc_validate` - Valida sem avaliar
//! 3. `calc_format` - Formata um número
//! 4. `calc_functions` - Lista funções (filtro por categoria)
//! 5. `calc_categories` - Lista categorias de funções
//! 6. `calc_clear_cache` - Esvazia o cache
//! 7. `calc_status` - Versão, backend e estatísticas do cache

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::backend::catalog;
use crate::engine::CalculatorEngine;
use crate::types::{AngleMode, CalculateRequest};

use super::protocol::{JsonRpcError, ToolDescription, ToolResult};

// ═══════════════════════════════════════════════════════════════════════════
// Parâmetros das ferramentas
// ═══════════════════════════════════════════════════════════════════════════

/// Parâmetros para calc_evaluate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateParams {
    pub expression: String,

    /// Ausente: modo padrão da configuração.
    #[serde(default)]
    pub angle_mode: Option<AngleMode>,

    #[serde(default)]
    pub precision: Option<usize>,
}

/// Parâmetros para calc_validate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateParams {
    pub expression: String,
}

/// Parâmetros para calc_format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormatParams {
    pub value: f64,

    #[serde(default)]
    pub precision: Option<usize>,
}

/// Parâmetros para calc_functions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FunctionsParams {
    #[serde(default)]
    pub category: Option<String>,
}

// ═══════════════════════════════════════════════════════════════════════════
// Handler de ferramentas
// ═══════════════════════════════════════════════════════════════════════════

/// Handler das ferramentas, sobre um motor compartilhado.
pub struct ToolHandler {
    engine: Arc<CalculatorEngine>,
}

impl ToolHandler {
    pub fn new(engine: Arc<CalculatorEngine>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &Arc<CalculatorEngine> {
        &self.engine
    }

    /// Lista todas as ferramentas disponíveis.
    pub fn list_tools() -> Vec<ToolDescription> {
        vec![
            ToolDescription::new(
                "calc_evaluate",
                "Evaluates a calculator expression (×, ÷, π, ^ accepted) and returns the formatted result.",
                json!({
                    "type": "object",
                    "properties": {
                        "expression": {
                            "type": "string",
                            "description": "Expression to evaluate, e.g. \"sin(30) + 2^3\""
                        },
                        "angle_mode": {
                            "type": "string",
                            "enum": ["deg", "rad"],
                            "description": "Angle mode for trigonometric functions"
                        },
                        "precision": {
                            "type": "integer",
                            "minimum": 1,
                            "maximum": 15,
                            "description": "Significant digits of the formatted result"
                        }
                    },
                    "required": ["expression"]
                }),
            ),
            ToolDescription::new(
                "calc_validate",
                "Checks an expression for emptiness, length, parentheses and forbidden content without evaluating it.",
                json!({
                    "type": "object",
                    "properties": {
                        "expression": { "type": "string" }
                    },
                    "required": ["expression"]
                }),
            ),
            ToolDescription::new(
                "calc_format",
                "Formats a number the way the calculator displays it.",
                json!({
                    "type": "object",
                    "properties": {
                        "value": { "type": "number" },
                        "precision": { "type": "integer", "minimum": 1, "maximum": 15 }
                    },
                    "required": ["value"]
                }),
            ),
            ToolDescription::new(
                "calc_functions",
                "Lists supported functions, optionally filtered by category.",
                json!({
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "trigonometric, logarithmic, root, rounding, ..."
                        }
                    },
                    "required": []
                }),
            ),
            ToolDescription::new(
                "calc_categories",
                "Lists function categories.",
                json!({ "type": "object", "properties": {}, "required": [] }),
            ),
            ToolDescription::new(
                "calc_clear_cache",
                "Empties the evaluation cache.",
                json!({ "type": "object", "properties": {}, "required": [] }),
            ),
            ToolDescription::new(
                "calc_status",
                "Shows version, backend and cache statistics.",
                json!({ "type": "object", "properties": {}, "required": [] }),
            ),
        ]
    }

    /// Processa uma chamada de ferramenta.
    ///
    /// Ferramenta desconhecida ou argumentos inválidos viram erro JSON-RPC;
    /// falhas de cálculo voltam como `ToolResult` com `isError`.
    pub async fn handle_tool_call(&self, name: &str, arguments: Value) -> Result<ToolResult, JsonRpcError> {
        tracing::debug!(tool = name, "Processing tool call");

        match name {
            "calc_evaluate" => Ok(self.handle_evaluate(parse_args(arguments)?).await),
            "calc_validate" => Ok(self.handle_validate(parse_args(arguments)?)),
            "calc_format" => Ok(self.handle_format(parse_args(arguments)?)),
            "calc_functions" => Ok(Self::handle_functions(parse_optional_args(arguments)?)),
            "calc_categories" => Ok(Self::handle_categories()),
            "calc_clear_cache" => Ok(self.handle_clear_cache().await),
            "calc_status" => Ok(self.handle_status().await),
            _ => Err(JsonRpcError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Handlers individuais
    // ═══════════════════════════════════════════════════════════════════════

    async fn handle_evaluate(&self, params: EvaluateParams) -> ToolResult {
        let mode = params
            .angle_mode
            .unwrap_or(self.engine.settings().default_angle_mode);
        let mut request = CalculateRequest::new(params.expression).with_mode(mode);
        if let Some(precision) = params.precision {
            request = request.with_precision(precision);
        }

        let response = self.engine.calculate(&request).await;
        let body = serde_json::to_value(&response).unwrap_or_else(|_| json!({"success": false}));

        if response.success {
            ToolResult::json(&body)
        } else {
            ToolResult::json_error(&body)
        }
    }

    fn handle_validate(&self, params: ValidateParams) -> ToolResult {
        let result = self.engine.validate(&params.expression);
        ToolResult::json(&json!(result))
    }

    fn handle_format(&self, params: FormatParams) -> ToolResult {
        let result = self.engine.format(params.value, params.precision);
        ToolResult::json(&json!({ "result": result }))
    }

    fn handle_functions(params: FunctionsParams) -> ToolResult {
        let functions = catalog::functions(params.category.as_deref());
        ToolResult::json(&json!({
            "total": functions.len(),
            "functions": functions,
        }))
    }

    fn handle_categories() -> ToolResult {
        let categories = catalog::categories();
        ToolResult::json(&json!({
            "total": categories.len(),
            "categories": categories,
        }))
    }

    async fn handle_clear_cache(&self) -> ToolResult {
        let before = self.engine.cache_stats().await.size;
        self.engine.clear_cache().await;
        tracing::info!(entries = before, "Cache cleared");
        ToolResult::json(&json!({ "cleared": before }))
    }

    async fn handle_status(&self) -> ToolResult {
        let stats = self.engine.cache_stats().await;
        let settings = self.engine.settings();

        ToolResult::json(&json!({
            "version": env!("CARGO_PKG_VERSION"),
            "backend": self.engine.backend_name(),
            "default_angle_mode": settings.default_angle_mode,
            "quick_path": settings.quick_path,
            "cache": {
                "size": stats.size,
                "capacity": stats.capacity,
                "hits": stats.hits,
                "misses": stats.misses,
                "hit_rate": format!("{:.1}%", stats.hit_rate() * 100.0)
            },
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }
}

fn parse_args<T: DeserializeOwned>(arguments: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(arguments).map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {}", e)))
}

/// Como [`parse_args`], mas `null` vale como objeto vazio.
fn parse_optional_args<T: DeserializeOwned + Default>(arguments: Value) -> Result<T, JsonRpcError> {
    if arguments.is_null() {
        return Ok(T::default());
    }
    parse_args(arguments)
}
