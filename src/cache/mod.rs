//! Cache de resultados de avaliação.
//!
//! Guarda o valor numérico de expressões já avaliadas, indexado pelo texto
//! digitado e pelo modo angular. Despejo por ordem de inserção.

mod fifo;

pub use fifo::{CacheStats, EvaluationCache, DEFAULT_CAPACITY};
