//! Sessão de calculadora com memória e Ans.

mod calculator;
mod state;

pub use calculator::CalculatorSession;
pub use state::{CalculatorState, LastAction};
