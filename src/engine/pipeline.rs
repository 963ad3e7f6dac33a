//! Pipeline de avaliação: cache, validação, normalização, modo angular,
//! backend, verificação de finitude.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::debug;

use super::angle::apply_angle_mode;
use super::classify::classify;
use super::format::format_result;
use super::quick::quick_evaluate;
use super::symbols::{display_symbols, normalize_symbols};
use super::validator::Validator;
use crate::backend::{ExpressionBackend, RationalBackend};
use crate::cache::{CacheStats, EvaluationCache};
use crate::types::config::{CacheConfig, EngineConfig};
use crate::types::{AngleMode, CalculateRequest, CalculateResponse, Config, EvalError, ValidationResult};

/// Motor de avaliação.
///
/// Cada instância tem seu próprio cache; compartilhe via `Arc`.
pub struct CalculatorEngine {
    backend: Arc<dyn ExpressionBackend>,
    cache: Mutex<EvaluationCache>,
    cache_enabled: bool,
    validator: Validator,
    settings: EngineConfig,
}

impl CalculatorEngine {
    /// Cria um motor com o backend racional.
    pub fn new(config: &Config) -> Self {
        Self::with_backend(config, Arc::new(RationalBackend::new()))
    }

    /// Cria um motor com um backend específico.
    pub fn with_backend(config: &Config, backend: Arc<dyn ExpressionBackend>) -> Self {
        let CacheConfig { enabled, capacity } = config.cache;
        Self {
            backend,
            cache: Mutex::new(EvaluationCache::new(capacity)),
            cache_enabled: enabled,
            validator: Validator::new(config.engine.max_expression_length),
            settings: config.engine.clone(),
        }
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    pub fn settings(&self) -> &EngineConfig {
        &self.settings
    }

    /// Avalia a expressão no modo angular dado.
    pub async fn evaluate(&self, expression: &str, mode: AngleMode) -> Result<f64, EvalError> {
        if self.cache_enabled {
            if let Some(value) = self.cache.lock().await.get(expression, mode) {
                debug!(expression, %mode, "cache hit");
                return Ok(value);
            }
            debug!(expression, %mode, "cache miss");
        }

        let validation = self.validator.validate(expression);
        if let Some(reason) = validation.error {
            return Err(EvalError::validation(reason));
        }

        let prepared = apply_angle_mode(&normalize_symbols(expression), mode);

        let number = self.backend.evaluate(&prepared).await.map_err(|e| {
            debug!(backend = self.backend.name(), prepared = %prepared, error = %e, "backend failure");
            classify(e.message())
        })?;

        let value = number.to_f64();
        if !value.is_finite() {
            return Err(EvalError::OutOfRange);
        }

        if self.cache_enabled {
            self.cache.lock().await.put(expression, mode, value);
        }

        Ok(value)
    }

    /// Avalia tentando antes o atalho `a op b`, se habilitado.
    ///
    /// O atalho só roda para expressões que passam na validação; as demais
    /// seguem para [`evaluate`](Self::evaluate), que devolve o erro.
    pub async fn evaluate_fast(&self, expression: &str, mode: AngleMode) -> Result<f64, EvalError> {
        if self.settings.quick_path && self.validator.validate(expression).is_valid() {
            if let Some(value) = quick_evaluate(expression) {
                return Ok(value);
            }
        }
        self.evaluate(expression, mode).await
    }

    /// Avalia e monta a resposta completa (resultado formatado e tempo).
    pub async fn calculate(&self, request: &CalculateRequest) -> CalculateResponse {
        let start = Instant::now();
        match self.evaluate(&request.expression, request.angle_mode).await {
            Ok(value) => {
                let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
                CalculateResponse::success(
                    &request.expression,
                    value,
                    self.format(value, request.precision),
                    display_symbols(&request.expression),
                    elapsed_ms,
                )
            }
            Err(e) => CalculateResponse::failure(&request.expression, &e),
        }
    }

    /// Valida com o tamanho máximo configurado.
    pub fn validate(&self, expression: &str) -> ValidationResult {
        self.validator.validate(expression)
    }

    /// Formata com a precisão pedida (ou a padrão), limitada à máxima.
    pub fn format(&self, value: f64, precision: Option<usize>) -> String {
        format_result(value, self.settings.clamp_precision(precision))
    }

    pub fn quick_evaluate(&self, expression: &str) -> Option<f64> {
        quick_evaluate(expression)
    }

    /// Esvazia o cache.
    pub async fn clear_cache(&self) {
        self.cache.lock().await.clear();
    }

    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.lock().await.stats()
    }
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}
