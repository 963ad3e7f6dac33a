//! Trait base para backends de avaliação numérica.

use async_trait::async_trait;
use thiserror::Error;

use super::number::Number;

/// Falha bruta de um backend.
///
/// A mensagem é interna: o motor a passa pelo classificador antes de
/// mostrar qualquer coisa ao usuário.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn syntax(detail: impl std::fmt::Display) -> Self {
        Self::new(format!("Syntax error: {}", detail))
    }

    pub fn division_by_zero() -> Self {
        Self::new("Division by zero")
    }

    pub fn undefined_symbol(name: &str) -> Self {
        Self::new(format!("Undefined symbol: {}", name))
    }

    pub fn wrong_arity(name: &str, expected: &str, got: usize) -> Self {
        Self::new(format!(
            "Wrong number of arguments for {}: expected {}, got {}",
            name, expected, got
        ))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Trait para avaliadores de expressões infixas.
///
/// Recebe o texto já normalizado (`*`, `/`, `**`, `pi`) e devolve um
/// [`Number`], exato ou aproximado.
#[async_trait]
pub trait ExpressionBackend: Send + Sync {
    /// Retorna o nome do backend.
    fn name(&self) -> &str;

    /// Avalia a expressão.
    async fn evaluate(&self, expression: &str) -> Result<Number, BackendError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend(f64);

    #[async_trait]
    impl ExpressionBackend for FixedBackend {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn evaluate(&self, _expression: &str) -> Result<Number, BackendError> {
            Ok(Number::Approx(self.0))
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let backend: Box<dyn ExpressionBackend> = Box::new(FixedBackend(2.5));

        assert_eq!(backend.name(), "fixed");
        assert_eq!(backend.evaluate("anything").await.unwrap().to_f64(), 2.5);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(BackendError::division_by_zero().to_string(), "Division by zero");
        assert_eq!(BackendError::undefined_symbol("foo").message(), "Undefined symbol: foo");
        assert!(BackendError::syntax("unexpected end of expression")
            .message()
            .starts_with("Syntax error"));
    }
}
