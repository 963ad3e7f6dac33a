//! Tipos de resposta do calcore.

use serde::{Deserialize, Serialize};

/// Resultado da validação de uma expressão.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationResult {
    /// Se a expressão pode seguir para avaliação.
    pub valid: bool,

    /// Motivo da rejeição.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidationResult {
    /// Expressão aceita.
    pub fn valid() -> Self {
        Self {
            valid: true,
            error: None,
        }
    }

    /// Expressão rejeitada.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            error: Some(reason.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Resposta de um cálculo completo (valor + exibição).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateResponse {
    /// Se o cálculo terminou com um número finito.
    pub success: bool,

    /// Resultado formatado para exibição.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,

    /// Valor numérico bruto.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<f64>,

    /// Expressão original.
    pub expression: String,

    /// Expressão com símbolos de calculadora (×, ÷, π, ^).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formatted_expression: Option<String>,

    /// Mensagem de erro para o usuário.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Categoria do erro.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,

    /// Tempo de cálculo em milissegundos.
    pub computation_time_ms: f64,

    /// Momento do cálculo.
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

impl CalculateResponse {
    /// Cria uma resposta de sucesso.
    pub fn success(
        expression: impl Into<String>,
        value: f64,
        result: impl Into<String>,
        formatted_expression: impl Into<String>,
        computation_time_ms: f64,
    ) -> Self {
        Self {
            success: true,
            result: Some(result.into()),
            value: Some(value),
            expression: expression.into(),
            formatted_expression: Some(formatted_expression.into()),
            error: None,
            error_kind: None,
            computation_time_ms,
            timestamp: chrono::Utc::now(),
        }
    }

    /// Cria uma resposta de falha.
    pub fn failure(expression: impl Into<String>, error: &crate::types::errors::EvalError) -> Self {
        Self {
            success: false,
            result: None,
            value: None,
            expression: expression.into(),
            formatted_expression: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind().to_string()),
            computation_time_ms: 0.0,
            timestamp: chrono::Utc::now(),
        }
    }
}

/// Descrição de uma função suportada.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FunctionInfo {
    pub name: String,
    pub description: String,
    pub syntax: String,
    pub example: String,
    pub category: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::errors::EvalError;

    #[test]
    fn test_validation_result_serialization() {
        let ok = serde_json::to_value(ValidationResult::valid()).unwrap();
        assert_eq!(ok, serde_json::json!({"valid": true}));

        let bad = serde_json::to_value(ValidationResult::invalid("Unmatched parentheses")).unwrap();
        assert_eq!(bad["valid"], false);
        assert_eq!(bad["error"], "Unmatched parentheses");
    }

    #[test]
    fn test_calculate_response_failure() {
        let response = CalculateResponse::failure("1 ÷ 0", &EvalError::DivisionByZero);

        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Error: Division by zero"));
        assert_eq!(response.error_kind.as_deref(), Some("division_by_zero"));

        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("result").is_none());
    }
}
