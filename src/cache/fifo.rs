//! Cache FIFO de resultados de avaliação.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};

use lru::LruCache;
use serde::Serialize;

use crate::types::AngleMode;

/// Capacidade usada quando a configurada é zero.
pub const DEFAULT_CAPACITY: usize = 100;

/// Estatísticas do cache.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CacheStats {
    /// Número atual de entradas.
    pub size: usize,

    /// Capacidade máxima.
    pub capacity: usize,

    /// Número de acertos (cache hits).
    pub hits: u64,

    /// Número de erros (cache misses).
    pub misses: u64,
}

impl CacheStats {
    /// Calcula a taxa de acerto.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Cache (expressão bruta, modo angular) -> valor.
///
/// Ordem de inserção: leituras usam `peek` e não mexem na ordem de despejo;
/// regravar uma chave existente troca o valor sem movê-la. Cheio, uma chave
/// nova despeja a inserida há mais tempo.
pub struct EvaluationCache {
    cache: LruCache<String, f64>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl EvaluationCache {
    /// Cria um novo cache. Capacidade zero vira [`DEFAULT_CAPACITY`].
    pub fn new(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity)
            .or_else(|| NonZeroUsize::new(DEFAULT_CAPACITY))
            .unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(cap),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Chave `"{expressão}|{modo}"`.
    pub fn cache_key(expression: &str, mode: AngleMode) -> String {
        format!("{}|{}", expression, mode)
    }

    pub fn get(&self, expression: &str, mode: AngleMode) -> Option<f64> {
        let key = Self::cache_key(expression, mode);
        match self.cache.peek(&key) {
            Some(value) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                Some(*value)
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
        }
    }

    /// Consulta sem contar acerto/erro.
    pub fn contains(&self, expression: &str, mode: AngleMode) -> bool {
        self.cache.contains(&Self::cache_key(expression, mode))
    }

    pub fn put(&mut self, expression: &str, mode: AngleMode, value: f64) {
        let key = Self::cache_key(expression, mode);
        if let Some(slot) = self.cache.peek_mut(&key) {
            *slot = value;
            return;
        }
        self.cache.push(key, value);
    }

    /// Limpa todo o cache.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Retorna estatísticas do cache.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            size: self.cache.len(),
            capacity: self.cache.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

impl Default for EvaluationCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
