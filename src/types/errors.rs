//! Tipos de erro do calcore.

use thiserror::Error;

/// Tipo de resultado padrão do calcore.
pub type CalcoreResult<T> = Result<T, CalcoreError>;

/// Mensagens exibidas ao usuário.
pub mod messages {
    pub const DIVISION_BY_ZERO: &str = "Error: Division by zero";
    pub const INVALID_EXPRESSION: &str = "Error: Invalid expression";
    pub const OUT_OF_RANGE: &str = "Error: Out of range";
    pub const UNDEFINED_FUNCTION: &str = "Error: Undefined function";
    pub const SYNTAX_ERROR: &str = "Error: Syntax error";
    pub const TOO_LONG: &str = "Error: Expression too long";
    pub const EMPTY: &str = "Expression is empty";
    pub const UNMATCHED_PARENTHESES: &str = "Unmatched parentheses";
    pub const INVALID_CHARACTERS: &str = "Invalid characters in expression";
}

/// Falhas de uma avaliação.
///
/// O `Display` de cada variante é a mensagem final mostrada ao usuário;
/// o texto bruto do backend nunca aparece aqui.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// Rejeitada pelo validador antes de chegar ao backend.
    #[error("{0}")]
    Validation(String),

    #[error("{}", messages::SYNTAX_ERROR)]
    Syntax,

    #[error("{}", messages::DIVISION_BY_ZERO)]
    DivisionByZero,

    #[error("{}", messages::UNDEFINED_FUNCTION)]
    UndefinedFunction,

    #[error("{}", messages::OUT_OF_RANGE)]
    OutOfRange,

    #[error("{}", messages::INVALID_EXPRESSION)]
    InvalidExpression,
}

impl EvalError {
    /// Cria um erro de validação.
    pub fn validation<S: Into<String>>(reason: S) -> Self {
        Self::Validation(reason.into())
    }

    /// Nome estável da categoria (usado em logs e respostas JSON).
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Syntax => "syntax",
            Self::DivisionByZero => "division_by_zero",
            Self::UndefinedFunction => "undefined_function",
            Self::OutOfRange => "out_of_range",
            Self::InvalidExpression => "invalid_expression",
        }
    }
}

/// Erros possíveis no calcore.
#[derive(Error, Debug)]
pub enum CalcoreError {
    #[error("Erro de IO: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro ao parsear TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Erro ao serializar TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Erro de JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[cfg(feature = "cli")]
    #[error("Erro no prompt: {0}")]
    Prompt(#[from] dialoguer::Error),
}
