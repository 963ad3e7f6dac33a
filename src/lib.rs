//! # calcore
//!
//! Motor de calculadora científica.
//!
//! Recebe expressões como o usuário as digita (`2 × (3 + 4)`, `sin(30)`,
//! `5!`), valida, normaliza símbolos, aplica o modo angular e avalia com
//! aritmética racional exata sempre que possível. O resultado é formatado
//! para exibição e as avaliações ficam em um cache FIFO.
//!
//! ## Módulos
//!
//! - [`backend`] - Lexer, parser e avaliador de expressões
//! - [`engine`] - Pipeline de avaliação (validação, símbolos, modo angular, formatação)
//! - [`cache`] - Cache FIFO de avaliações
//! - [`session`] - Estado da calculadora (memória, Ans, edição)
//! - [`mcp`] - Servidor JSON-RPC 2.0 via stdio
//! - [`cli`] - Interface de linha de comando
//! - [`types`] - Tipos compartilhados

pub mod backend;
pub mod cache;
#[cfg(feature = "cli")]
pub mod cli;
pub mod engine;
pub mod mcp;
pub mod session;
pub mod types;

pub use backend::{BackendError, ExpressionBackend, Number, RationalBackend};
pub use engine::CalculatorEngine;
pub use session::{CalculatorSession, CalculatorState};
pub use types::config::Config;
pub use types::errors::{CalcoreError, CalcoreResult, EvalError};
pub use types::{AngleMode, CalculateRequest, CalculateResponse};
