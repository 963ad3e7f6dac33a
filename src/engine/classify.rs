//! Classificação de falhas do backend.

use crate::types::EvalError;

/// Converte a mensagem bruta do backend na taxonomia fixa.
///
/// Contém-substring, sensível a maiúsculas, primeira regra que casar vence.
pub fn classify(raw: &str) -> EvalError {
    if raw.contains("Division by zero") || raw.contains("divide by zero") {
        EvalError::DivisionByZero
    } else if raw.contains("Undefined symbol") || raw.contains("undefined") {
        EvalError::UndefinedFunction
    } else if raw.contains("Syntax error") || raw.contains("syntax") {
        EvalError::Syntax
    } else if raw.contains("out of range") || raw.contains("Infinity") {
        EvalError::OutOfRange
    } else {
        EvalError::InvalidExpression
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_category() {
        assert_eq!(classify("Division by zero"), EvalError::DivisionByZero);
        assert_eq!(classify("cannot divide by zero"), EvalError::DivisionByZero);
        assert_eq!(classify("Undefined symbol: foo"), EvalError::UndefinedFunction);
        assert_eq!(classify("value is undefined"), EvalError::UndefinedFunction);
        assert_eq!(classify("Syntax error: unexpected end"), EvalError::Syntax);
        assert_eq!(classify("bad syntax"), EvalError::Syntax);
        assert_eq!(classify("Index out of range"), EvalError::OutOfRange);
        assert_eq!(classify("Infinity"), EvalError::OutOfRange);
        assert_eq!(classify("Wrong number of arguments for sqrt"), EvalError::InvalidExpression);
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(
            classify("Syntax error near Division by zero"),
            EvalError::DivisionByZero
        );
        assert_eq!(classify("undefined syntax"), EvalError::UndefinedFunction);
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(classify("DIVISION BY ZERO"), EvalError::InvalidExpression);
        assert_eq!(classify("SYNTAX"), EvalError::InvalidExpression);
    }
}
