//! Sessão interativa: edição da expressão, Ans, memória e modo angular.

use std::sync::Arc;

use tracing::debug;

use super::state::{CalculatorState, LastAction};
use crate::engine::{to_operand, CalculatorEngine};
use crate::types::AngleMode;

/// Operadores que substituem um operador anterior.
const BASIC_OPERATORS: [char; 6] = ['+', '×', '÷', '^', '*', '/'];

fn is_basic_operator(text: &str) -> bool {
    let mut chars = text.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if BASIC_OPERATORS.contains(&c))
}

/// Sessão de calculadora ligada a um motor compartilhado.
pub struct CalculatorSession {
    engine: Arc<CalculatorEngine>,
    state: CalculatorState,
}

impl CalculatorSession {
    /// Cria uma sessão no modo angular padrão do motor.
    pub fn new(engine: Arc<CalculatorEngine>) -> Self {
        let mode = engine.settings().default_angle_mode;
        Self {
            engine,
            state: CalculatorState::new(mode),
        }
    }

    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    pub fn engine(&self) -> &Arc<CalculatorEngine> {
        &self.engine
    }

    /// Acrescenta um valor à expressão.
    ///
    /// - operador básico depois de qualquer operador: substitui
    /// - `-` depois de `-`: substitui
    /// - `-` depois de operador básico: acrescenta (número negativo)
    pub fn insert(&mut self, value: &str) {
        let trimmed = self.state.expression.trim_end();
        let last = trimmed.chars().last();

        let last_is_basic = last.is_some_and(|c| BASIC_OPERATORS.contains(&c));
        let last_is_minus = last == Some('-');
        let replaces = if is_basic_operator(value) {
            last_is_basic || last_is_minus
        } else {
            value == "-" && last_is_minus
        };

        let expression = if trimmed.is_empty() {
            value.to_string()
        } else if replaces {
            let mut base = trimmed.to_string();
            base.pop();
            base + value
        } else {
            format!("{}{}", self.state.expression, value)
        };

        self.state.expression = expression;
        self.state.error = None;
        self.state.last_action = Some(LastAction::Insert);
    }

    /// Remove o último caractere.
    pub fn backspace(&mut self) {
        self.state.expression.pop();
        self.state.error = None;
        self.state.last_action = Some(LastAction::Backspace);
    }

    /// Zera expressão, resultado e erro. Memória, Ans e modo ficam.
    pub fn clear_all(&mut self) {
        self.state.expression.clear();
        self.state.result = "0".to_string();
        self.state.error = None;
        self.state.last_action = Some(LastAction::Clear);
    }

    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.state.angle_mode = mode;
        self.state.last_action = Some(LastAction::ModeChange);
    }

    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        let mode = self.state.angle_mode.toggled();
        self.set_angle_mode(mode);
        mode
    }

    /// M+: soma o resultado atual à memória.
    pub fn memory_add(&mut self) {
        self.state.memory += self.state.result_value();
        self.state.last_action = Some(LastAction::MPlus);
    }

    /// M-: subtrai o resultado atual da memória.
    pub fn memory_subtract(&mut self) {
        self.state.memory -= self.state.result_value();
        self.state.last_action = Some(LastAction::MMinus);
    }

    /// MR: acrescenta a memória à expressão.
    pub fn memory_recall(&mut self) {
        let memory = to_operand(self.state.memory);
        self.state.expression.push_str(&memory);
        self.state.last_action = Some(LastAction::Mr);
    }

    /// MC: zera a memória.
    pub fn memory_clear(&mut self) {
        self.state.memory = 0.0;
        self.state.last_action = Some(LastAction::Mc);
    }

    /// Acrescenta o último resultado à expressão.
    pub fn insert_ans(&mut self) {
        let ans = to_operand(self.state.ans);
        self.state.expression.push_str(&ans);
        self.state.last_action = Some(LastAction::Ans);
    }

    /// Avalia a expressão atual. Expressão vazia não faz nada.
    pub async fn evaluate(&mut self) -> &CalculatorState {
        if self.state.expression.trim().is_empty() {
            return &self.state;
        }

        self.state.is_evaluating = true;
        let outcome = self
            .engine
            .evaluate_fast(&self.state.expression, self.state.angle_mode)
            .await;
        self.state.is_evaluating = false;

        match outcome {
            Ok(value) => {
                self.state.result = self.engine.format(value, None);
                self.state.ans = value;
                self.state.error = None;
                self.state.last_action = Some(LastAction::Evaluate);
            }
            Err(e) => {
                debug!(expression = %self.state.expression, kind = e.kind(), "evaluation failed");
                self.state.error = Some(e.to_string());
                self.state.last_action = Some(LastAction::Error);
            }
        }

        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> CalculatorSession {
        CalculatorSession::new(Arc::new(CalculatorEngine::default()))
    }

    fn typed(inputs: &[&str]) -> String {
        let mut s = session();
        for input in inputs {
            s.insert(input);
        }
        s.state().expression.clone()
    }

    #[test]
    fn test_operator_replacement() {
        assert_eq!(typed(&["5", "+", "×"]), "5×");
        assert_eq!(typed(&["5", "-", "+"]), "5+");
        assert_eq!(typed(&["5", "-", "-"]), "5-");
        assert_eq!(typed(&["5", "×", "-"]), "5×-");
        assert_eq!(typed(&["5", "×", "-", "3"]), "5×-3");
    }

    #[test]
    fn test_insert_into_empty_and_functions() {
        assert_eq!(typed(&["+"]), "+");
        assert_eq!(typed(&["sin(", "30", ")"]), "sin(30)");
    }

    #[test]
    fn test_backspace_and_clear() {
        let mut s = session();
        s.insert("12");
        s.backspace();
        assert_eq!(s.state().expression, "1");

        s.state.memory = 4.0;
        s.clear_all();
        assert_eq!(s.state().expression, "");
        assert_eq!(s.state().result, "0");
        assert_eq!(s.state().memory, 4.0);
        assert_eq!(s.state().last_action, Some(LastAction::Clear));
    }

    #[test]
    fn test_toggle_angle_mode() {
        let mut s = session();
        assert_eq!(s.toggle_angle_mode(), AngleMode::Radians);
        assert_eq!(s.state().last_action, Some(LastAction::ModeChange));
        assert_eq!(s.toggle_angle_mode(), AngleMode::Degrees);
    }

    #[tokio::test]
    async fn test_evaluate_sets_result_and_ans() {
        let mut s = session();
        s.insert("2");
        s.insert("×");
        s.insert("3");

        let state = s.evaluate().await;
        assert_eq!(state.result, "6");
        assert_eq!(state.ans, 6.0);
        assert!(state.error.is_none());
        assert!(!state.is_evaluating);
    }

    #[tokio::test]
    async fn test_evaluate_error_keeps_result() {
        let mut s = session();
        s.insert("1÷0");

        let state = s.evaluate().await;
        assert_eq!(state.error.as_deref(), Some("Error: Division by zero"));
        assert_eq!(state.result, "0");
        assert_eq!(state.last_action, Some(LastAction::Error));
    }

    #[tokio::test]
    async fn test_empty_expression_is_noop() {
        let mut s = session();
        s.evaluate().await;
        assert!(s.state().last_action.is_none());
    }

    #[tokio::test]
    async fn test_memory_flow() {
        let mut s = session();
        s.insert("5");
        s.evaluate().await;

        s.memory_add();
        s.memory_add();
        s.memory_subtract();
        assert_eq!(s.state().memory, 5.0);

        s.clear_all();
        s.memory_recall();
        assert_eq!(s.state().expression, "5");

        s.memory_clear();
        assert_eq!(s.state().memory, 0.0);
    }

    #[tokio::test]
    async fn test_large_ans_is_inserted_in_exponent_form() {
        let mut s = session();
        s.insert("10^300");
        s.evaluate().await;
        assert_eq!(s.state().result, "1.000000e+300");

        s.clear_all();
        s.insert_ans();
        s.insert("+");
        s.insert_ans();
        assert_eq!(s.state().expression, "1e+300+1e+300");

        let state = s.evaluate().await;
        assert!(state.error.is_none());
        assert_eq!(state.result, "2.000000e+300");
    }

    #[tokio::test]
    async fn test_small_memory_recall_round_trips() {
        let mut s = session();
        s.insert("1/8000000");
        s.evaluate().await;
        assert_eq!(s.state().result, "1.250000e-7");

        s.memory_add();
        s.clear_all();
        s.memory_recall();
        assert_eq!(s.state().expression, "1.25e-7");
        assert_eq!(s.evaluate().await.result, "1.250000e-7");
    }

    #[tokio::test]
    async fn test_overlong_expression_fails_on_quick_path() {
        let mut s = session();
        s.insert(&format!("{}+1", "9".repeat(500)));

        let state = s.evaluate().await;
        assert_eq!(state.error.as_deref(), Some("Error: Expression too long"));
        assert_eq!(state.last_action, Some(LastAction::Error));
    }
}
