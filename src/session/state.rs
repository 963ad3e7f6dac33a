//! Estado de uma sessão de calculadora.

use serde::{Deserialize, Serialize};

use crate::types::AngleMode;

/// Última ação executada na sessão.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LastAction {
    Insert,
    Evaluate,
    Error,
    Clear,
    Backspace,
    MPlus,
    MMinus,
    Mr,
    Mc,
    Ans,
    ModeChange,
}

/// Estado completo exibido pela calculadora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatorState {
    /// Expressão em construção (ex.: `"2 + 3 × 4"`).
    pub expression: String,

    /// Resultado formatado ou valor atual do visor.
    pub result: String,

    /// Mensagem de erro do último cálculo.
    pub error: Option<String>,

    pub angle_mode: AngleMode,

    /// Valor da memória (M+, M-, MR, MC).
    pub memory: f64,

    /// Último resultado numérico.
    pub ans: f64,

    pub is_evaluating: bool,

    pub last_action: Option<LastAction>,
}

impl CalculatorState {
    pub fn new(angle_mode: AngleMode) -> Self {
        Self {
            expression: String::new(),
            result: "0".to_string(),
            error: None,
            angle_mode,
            memory: 0.0,
            ans: 0.0,
            is_evaluating: false,
            last_action: None,
        }
    }

    /// Valor numérico do visor; texto não numérico conta como zero.
    pub fn result_value(&self) -> f64 {
        self.result.trim().parse::<f64>().unwrap_or(0.0)
    }
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new(AngleMode::default())
    }
}
