//! Implementação dos comandos CLI do calcore.

use std::path::PathBuf;
use std::sync::Arc;

use crate::backend::catalog;
use crate::engine::CalculatorEngine;
use crate::types::config::{Config, CONFIG_FILE_NAME};
use crate::types::{AngleMode, EvalError};
use crate::CalcoreResult;

/// Avalia uma expressão e imprime o resultado formatado.
///
/// Falhas voltam como [`EvalError`] (o chamador imprime e sai com código 1).
pub async fn eval(
    expression: &str,
    mode: Option<AngleMode>,
    precision: Option<usize>,
    config: &Config,
) -> CalcoreResult<()> {
    let engine = CalculatorEngine::new(config);
    let mode = mode.unwrap_or(config.engine.default_angle_mode);

    tracing::debug!(expression, %mode, "Evaluating");

    let value = engine.evaluate_fast(expression, mode).await?;
    println!("{}", engine.format(value, precision));
    Ok(())
}

/// Valida uma expressão. Inválida vira erro de validação.
pub fn validate(expression: &str, config: &Config) -> CalcoreResult<()> {
    let engine = CalculatorEngine::new(config);
    match engine.validate(expression).error {
        Some(reason) => Err(EvalError::validation(reason).into()),
        None => {
            println!("valid");
            Ok(())
        }
    }
}

/// Formata um número.
pub fn format(value: f64, precision: Option<usize>, config: &Config) -> CalcoreResult<()> {
    let engine = CalculatorEngine::new(config);
    println!("{}", engine.format(value, precision));
    Ok(())
}

/// Lista as funções do catálogo.
pub fn functions(category: Option<&str>) -> CalcoreResult<()> {
    let list = catalog::functions(category);

    if list.is_empty() {
        println!("Nenhuma função na categoria '{}'.", category.unwrap_or_default());
        println!("Categorias: {}", catalog::categories().join(", "));
        return Ok(());
    }

    let mut current = "";
    for info in &list {
        if info.category != current {
            current = &info.category;
            println!("\n[{}]", current);
        }
        println!("  {:<22} {:<45} {}", info.syntax, info.description, info.example);
    }
    println!("\nTotal: {}", list.len());

    Ok(())
}

/// Sessão interativa.
pub async fn repl(config: &Config) -> CalcoreResult<()> {
    let engine = Arc::new(CalculatorEngine::new(config));
    super::interactive::run_repl(engine).await
}

/// Inicia o servidor via stdio.
pub async fn serve(config: &Config) -> CalcoreResult<()> {
    use crate::mcp::McpServer;

    tracing::debug!(
        backend = "rational",
        cache_capacity = config.cache.capacity,
        "Configuração carregada"
    );
    tracing::info!("Iniciando servidor calcore via stdio...");

    let mut server = McpServer::stdio(config);
    server.run().await
}

/// Cria `calcore.toml` com valores padrão no diretório indicado.
pub fn init(path: Option<PathBuf>) -> CalcoreResult<()> {
    let target_dir = path.unwrap_or_else(|| PathBuf::from("."));

    if !target_dir.exists() {
        std::fs::create_dir_all(&target_dir)?;
        tracing::info!("Directory created: {}", target_dir.display());
    }

    let config_path = target_dir.join(CONFIG_FILE_NAME);

    if config_path.exists() {
        println!("Configuration already exists at: {}", config_path.display());
        return Ok(());
    }

    Config::default_config().save(&config_path)?;

    println!("calcore initialized successfully!");
    println!("Configuration created at: {}", config_path.display());
    println!();
    println!("Next steps:");
    println!("  1. Evaluate something: calcore eval \"sin(30) + 2^3\"");
    println!("  2. Start a session: calcore repl");

    Ok(())
}

/// Mostra versão.
pub fn version() {
    println!("calcore {}", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Scientific calculator engine");
}
