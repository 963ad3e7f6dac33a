//! Testes de integração do motor de avaliação.

use std::sync::Arc;

use async_trait::async_trait;
use calcore::backend::BackendError;
use calcore::types::config::Config;
use calcore::{AngleMode, CalculateRequest, CalculatorEngine, EvalError, ExpressionBackend, Number};

async fn eval(expression: &str, mode: AngleMode) -> Result<String, EvalError> {
    let engine = CalculatorEngine::default();
    let value = engine.evaluate_fast(expression, mode).await?;
    Ok(engine.format(value, None))
}

#[tokio::test]
async fn test_calculator_symbols_are_accepted() {
    assert_eq!(eval("2 × (3 + 4)", AngleMode::Degrees).await.unwrap(), "14");
    assert_eq!(eval("9 ÷ 4", AngleMode::Degrees).await.unwrap(), "2.25");
    assert_eq!(eval("2^10", AngleMode::Degrees).await.unwrap(), "1024");
    assert_eq!(eval("5!", AngleMode::Degrees).await.unwrap(), "120");
    assert_eq!(eval("10 mod 3", AngleMode::Degrees).await.unwrap(), "1");
}

#[tokio::test]
async fn test_decimal_sums_are_exact() {
    let engine = CalculatorEngine::default();
    let value = engine.evaluate("0.1 + 0.2", AngleMode::Degrees).await.unwrap();
    assert_eq!(value, 0.3);
}

#[tokio::test]
async fn test_angle_modes() {
    assert_eq!(eval("sin(30)", AngleMode::Degrees).await.unwrap(), "0.5");
    assert_eq!(eval("cos(0)", AngleMode::Degrees).await.unwrap(), "1");
    assert_eq!(eval("asin(1)", AngleMode::Degrees).await.unwrap(), "90");
    assert_eq!(eval("sin(pi / 2)", AngleMode::Radians).await.unwrap(), "1");
}

#[tokio::test]
async fn test_errors_are_classified() {
    let cases = [
        ("1/0", EvalError::DivisionByZero),
        ("foo(2)", EvalError::UndefinedFunction),
        ("2 +", EvalError::Syntax),
        ("sqrt(-1)", EvalError::OutOfRange),
        ("10 ** 400", EvalError::OutOfRange),
    ];

    let engine = CalculatorEngine::default();
    for (expression, expected) in cases {
        let err = engine.evaluate(expression, AngleMode::Degrees).await.unwrap_err();
        assert_eq!(err, expected, "expression: {}", expression);
    }
}

#[tokio::test]
async fn test_validation_runs_before_backend() {
    let engine = CalculatorEngine::default();

    let err = engine.evaluate("(1 + 2", AngleMode::Degrees).await.unwrap_err();
    assert_eq!(err.to_string(), "Unmatched parentheses");

    let err = engine.evaluate("   ", AngleMode::Degrees).await.unwrap_err();
    assert_eq!(err.to_string(), "Expression is empty");

    let long = "1+".repeat(300) + "1";
    let err = engine.evaluate(&long, AngleMode::Degrees).await.unwrap_err();
    assert_eq!(err.to_string(), "Error: Expression too long");
}

#[tokio::test]
async fn test_cache_is_keyed_by_mode() {
    let engine = CalculatorEngine::default();

    engine.evaluate("sin(90)", AngleMode::Degrees).await.unwrap();
    engine.evaluate("sin(90)", AngleMode::Degrees).await.unwrap();
    engine.evaluate("sin(90)", AngleMode::Radians).await.unwrap();

    let stats = engine.cache_stats().await;
    assert_eq!(stats.size, 2);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);

    engine.clear_cache().await;
    assert_eq!(engine.cache_stats().await.size, 0);
}

#[tokio::test]
async fn test_failures_are_not_cached() {
    let engine = CalculatorEngine::default();
    assert!(engine.evaluate("1/0", AngleMode::Degrees).await.is_err());
    assert_eq!(engine.cache_stats().await.size, 0);
}

#[tokio::test]
async fn test_cache_disabled_by_config() {
    let mut config = Config::default();
    config.cache.enabled = false;
    let engine = CalculatorEngine::new(&config);

    engine.evaluate("1 + 1", AngleMode::Degrees).await.unwrap();
    engine.evaluate("1 + 1", AngleMode::Degrees).await.unwrap();

    let stats = engine.cache_stats().await;
    assert_eq!(stats.size, 0);
    assert_eq!(stats.hits, 0);
}

#[tokio::test]
async fn test_calculate_response() {
    let engine = CalculatorEngine::default();

    let ok = engine
        .calculate(&CalculateRequest::new("2 * pi").with_mode(AngleMode::Radians).with_precision(4))
        .await;
    assert!(ok.success);
    assert_eq!(ok.result.as_deref(), Some("6.283"));
    assert_eq!(ok.formatted_expression.as_deref(), Some("2 × π"));
    assert!(ok.error.is_none());

    let failed = engine.calculate(&CalculateRequest::new("1/0")).await;
    assert!(!failed.success);
    assert_eq!(failed.error.as_deref(), Some("Error: Division by zero"));
    assert_eq!(failed.error_kind.as_deref(), Some("division_by_zero"));
    assert!(failed.result.is_none());
}

#[tokio::test]
async fn test_precision_is_clamped() {
    let engine = CalculatorEngine::default();
    assert_eq!(engine.format(1.0 / 3.0, Some(3)), "0.333");
    assert_eq!(engine.format(1.0 / 3.0, Some(40)), engine.format(1.0 / 3.0, Some(15)));
    assert_eq!(engine.format(1e12, None), "1.000000e+12");
}

/// Backend que sempre falha com uma mensagem fixa.
#[tokio::test]
async fn test_implicit_multiplication_and_exponent_literals() {
    assert_eq!(eval("2π", AngleMode::Radians).await.unwrap(), "6.283185307");
    assert_eq!(eval("2sin(30)", AngleMode::Degrees).await.unwrap(), "1");
    assert_eq!(eval("6 ÷ 2(1 + 2)", AngleMode::Degrees).await.unwrap(), "1");
    assert_eq!(eval("2e3", AngleMode::Degrees).await.unwrap(), "2000");
    assert_eq!(eval("1.000000e+12 ÷ 4", AngleMode::Degrees).await.unwrap(), "2.500000e+11");
    assert_eq!(eval("2 3", AngleMode::Degrees).await, Err(EvalError::Syntax));
}

#[tokio::test]
async fn test_fast_path_still_validates_length() {
    let long = format!("{}+1", "9".repeat(600));
    let err = eval(&long, AngleMode::Degrees).await.unwrap_err();
    assert_eq!(err.to_string(), "Error: Expression too long");
}

struct FailingBackend(&'static str);

#[async_trait]
impl ExpressionBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn evaluate(&self, _expression: &str) -> Result<Number, BackendError> {
        Err(BackendError::new(self.0))
    }
}

#[tokio::test]
async fn test_custom_backend_messages_are_classified() {
    let engine = CalculatorEngine::with_backend(&Config::default(), Arc::new(FailingBackend("Infinity reached")));
    assert_eq!(engine.backend_name(), "failing");

    let err = engine.evaluate("1 + 1", AngleMode::Degrees).await.unwrap_err();
    assert_eq!(err, EvalError::OutOfRange);

    let engine = CalculatorEngine::with_backend(&Config::default(), Arc::new(FailingBackend("weird")));
    let err = engine.evaluate("1 + 1", AngleMode::Degrees).await.unwrap_err();
    assert_eq!(err, EvalError::InvalidExpression);
}
