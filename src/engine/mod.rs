//! Motor de avaliação de expressões.
//!
//! Fluxo: texto bruto -> cache -> validação -> normalização de símbolos ->
//! modo angular -> backend -> `f64` finito -> cache -> formatação.

pub mod angle;
pub mod classify;
pub mod format;
pub mod pipeline;
pub mod quick;
pub mod symbols;
pub mod validator;

pub use angle::apply_angle_mode;
pub use classify::classify;
pub use format::{format_result, to_operand, DEFAULT_PRECISION, MAX_PRECISION};
pub use pipeline::CalculatorEngine;
pub use quick::quick_evaluate;
pub use symbols::{display_symbols, normalize_symbols};
pub use validator::{validate_expression, Validator};
