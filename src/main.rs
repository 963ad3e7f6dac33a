use calcore::cli::{Cli, Commands};
use calcore::types::config::Config;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let mut config_warning = None;
    let config = match Config::resolve_path(&cli.config) {
        Some(path) => Config::load(&path).unwrap_or_else(|e| {
            config_warning = Some(format!("Invalid config at {}: {}", path.display(), e));
            Config::default_config()
        }),
        None => Config::default_config(),
    };

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("calcore={}", log_level)
            .parse()
            .unwrap_or_else(|_| "calcore=info".parse().expect("fallback directive is valid")),
    );

    // Logs sempre em stderr: stdout é do resultado (e do JSON-RPC no `serve`).
    if config.general.log_format == "json" {
        tracing_subscriber::registry()
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr))
            .with(filter)
            .init();
    }

    if let Some(warning) = config_warning {
        tracing::warn!("{}, using defaults", warning);
    }
    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    let result = match cli.command {
        Commands::Eval {
            expression,
            mode,
            precision,
        } => calcore::cli::commands::eval(&expression, mode, precision, &config).await,
        Commands::Validate { expression } => calcore::cli::commands::validate(&expression, &config),
        Commands::Format { value, precision } => calcore::cli::commands::format(value, precision, &config),
        Commands::Functions { category } => calcore::cli::commands::functions(category.as_deref()),
        Commands::Repl => calcore::cli::commands::repl(&config).await,
        Commands::Serve => calcore::cli::commands::serve(&config).await,
        Commands::Init { path } => calcore::cli::commands::init(path),
        Commands::Version => {
            calcore::cli::commands::version();
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}
