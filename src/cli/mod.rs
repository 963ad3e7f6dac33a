//! Interface de linha de comando do calcore.

pub mod commands;
pub mod interactive;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::types::AngleMode;

/// calcore - calculadora científica de linha de comando.
#[derive(Parser, Debug)]
#[command(name = "calcore")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Arquivo de configuração.
    #[arg(short, long, default_value = "calcore.toml")]
    pub config: PathBuf,

    /// Modo verbose.
    #[arg(short, long)]
    pub verbose: bool,

    /// Modo silencioso.
    #[arg(short, long)]
    pub quiet: bool,

    /// Comando a executar.
    #[command(subcommand)]
    pub command: Commands,
}

/// Comandos disponíveis.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Avalia uma expressão e imprime o resultado formatado.
    Eval {
        /// Expressão (ex.: "2 × (3 + 4)", "sin(30)").
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Modo angular (deg ou rad). Padrão: o da configuração.
        #[arg(short, long)]
        mode: Option<AngleMode>,

        /// Dígitos significativos (1-15).
        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Valida uma expressão sem avaliar.
    Validate {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },

    /// Formata um número como a calculadora exibe.
    Format {
        #[arg(allow_negative_numbers = true)]
        value: f64,

        #[arg(short, long)]
        precision: Option<usize>,
    },

    /// Lista as funções suportadas.
    Functions {
        /// Filtra por categoria.
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Sessão interativa com memória e Ans.
    Repl,

    /// Inicia o servidor JSON-RPC via stdio.
    Serve,

    /// Cria um calcore.toml com os valores padrão.
    Init {
        /// Diretório de destino (padrão: diretório atual).
        #[arg(short, long)]
        path: Option<PathBuf>,
    },

    /// Mostra versão.
    Version,
}
