//! Backends de avaliação numérica.

pub mod base;
pub mod catalog;
pub mod lexer;
pub mod number;
pub mod parser;
pub mod rational;

pub use base::{BackendError, ExpressionBackend};
pub use number::Number;
pub use rational::RationalBackend;
