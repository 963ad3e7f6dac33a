//! Tipos compartilhados do calcore.

pub mod config;
pub mod errors;
pub mod requests;
pub mod responses;

pub use config::Config;
pub use errors::{CalcoreError, CalcoreResult, EvalError};
pub use requests::{AngleMode, CalculateRequest};
pub use responses::{CalculateResponse, FunctionInfo, ValidationResult};
