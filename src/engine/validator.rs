//! Validação de expressões antes da avaliação.

use crate::types::errors::messages;
use crate::types::ValidationResult;

/// Tamanho máximo padrão (em caracteres).
pub const DEFAULT_MAX_LENGTH: usize = 500;

/// Substrings recusadas (comparação sem diferenciar maiúsculas).
const DENYLIST: [&str; 4] = ["__", "import", "eval", "exec"];

/// Validador com tamanho máximo configurável.
#[derive(Debug, Clone, Copy)]
pub struct Validator {
    max_length: usize,
}

impl Validator {
    pub fn new(max_length: usize) -> Self {
        Self { max_length }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    /// Aplica as regras em ordem; a primeira falha vence.
    pub fn validate(&self, expression: &str) -> ValidationResult {
        if expression.trim().is_empty() {
            return ValidationResult::invalid(messages::EMPTY);
        }

        if expression.chars().count() > self.max_length {
            return ValidationResult::invalid(messages::TOO_LONG);
        }

        let mut open = 0i64;
        for c in expression.chars() {
            match c {
                '(' => open += 1,
                ')' => open -= 1,
                _ => {}
            }
            if open < 0 {
                return ValidationResult::invalid(messages::UNMATCHED_PARENTHESES);
            }
        }
        if open != 0 {
            return ValidationResult::invalid(messages::UNMATCHED_PARENTHESES);
        }

        let lowered = expression.to_lowercase();
        if DENYLIST.iter().any(|pattern| lowered.contains(pattern)) {
            return ValidationResult::invalid(messages::INVALID_CHARACTERS);
        }

        ValidationResult::valid()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LENGTH)
    }
}

/// Valida com o tamanho máximo padrão.
pub fn validate_expression(expression: &str) -> ValidationResult {
    Validator::default().validate(expression)
}
