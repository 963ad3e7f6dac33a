//! Sessão interativa (REPL) do calcore.
//!
//! Usa dialoguer para o prompt. Cada linha é uma expressão ou um comando:
//!
//! | entrada          | efeito                                  |
//! |------------------|-----------------------------------------|
//! | `2 × (3 + 4)`    | avalia e mostra o resultado             |
//! | `+ 1`            | continua a partir do resultado anterior |
//! | `ans`            | avalia o último resultado               |
//! | `m+` `m-` `mr` `mc` | memória                              |
//! | `:mode [deg/rad]`| troca (ou alterna) o modo angular       |
//! | `:clear`         | zera expressão e resultado              |
//! | `:functions`     | lista funções                           |
//! | `:quit`          | sai                                     |

use std::sync::Arc;

use dialoguer::{theme::ColorfulTheme, Input};

use crate::backend::catalog;
use crate::engine::CalculatorEngine;
use crate::session::CalculatorSession;
use crate::types::AngleMode;
use crate::CalcoreResult;

/// Entrada interpretada do REPL.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Nova expressão (substitui a anterior).
    Evaluate(String),
    /// Operador seguido de operando, aplicado ao último resultado.
    Continue(String, String),
    Ans,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
    /// `None` alterna.
    Mode(Option<AngleMode>),
    Clear,
    Functions,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

/// Interpreta uma linha digitada.
pub fn parse_line(line: &str) -> ReplCommand {
    let line = line.trim();
    if line.is_empty() {
        return ReplCommand::Empty;
    }

    match line.to_lowercase().as_str() {
        "ans" => return ReplCommand::Ans,
        "m+" => return ReplCommand::MemoryAdd,
        "m-" => return ReplCommand::MemorySubtract,
        "mr" => return ReplCommand::MemoryRecall,
        "mc" => return ReplCommand::MemoryClear,
        _ => {}
    }

    if let Some(command) = line.strip_prefix(':') {
        let mut parts = command.split_whitespace();
        return match (parts.next(), parts.next()) {
            (Some("q" | "quit" | "exit"), _) => ReplCommand::Quit,
            (Some("clear" | "ac"), _) => ReplCommand::Clear,
            (Some("functions" | "f"), _) => ReplCommand::Functions,
            (Some("help" | "h"), _) => ReplCommand::Help,
            (Some("mode"), None) => ReplCommand::Mode(None),
            (Some("mode"), Some(arg)) => match arg.parse() {
                Ok(mode) => ReplCommand::Mode(Some(mode)),
                Err(e) => ReplCommand::Unknown(e),
            },
            _ => ReplCommand::Unknown(format!("comando desconhecido: {}", line)),
        };
    }

    let mut chars = line.chars();
    if let Some(op @ ('+' | '×' | '÷' | '^' | '*' | '/')) = chars.next() {
        return ReplCommand::Continue(op.to_string(), chars.as_str().trim().to_string());
    }

    ReplCommand::Evaluate(line.to_string())
}

/// Executa o REPL até `:quit` ou fim da entrada.
pub async fn run_repl(engine: Arc<CalculatorEngine>) -> CalcoreResult<()> {
    let theme = ColorfulTheme::default();
    let mut session = CalculatorSession::new(engine);

    println!("calcore {} - digite :help para ajuda", env!("CARGO_PKG_VERSION"));

    loop {
        let prompt = format!("[{}]", session.state().angle_mode);
        let line: String = Input::with_theme(&theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;

        match parse_line(&line) {
            ReplCommand::Quit => break,
            ReplCommand::Empty => continue,
            ReplCommand::Help => print_help(),
            ReplCommand::Functions => {
                for info in catalog::functions(None) {
                    println!("  {:<22} {}", info.syntax, info.description);
                }
            }
            ReplCommand::Clear => {
                session.clear_all();
                println!("0");
            }
            ReplCommand::Mode(mode) => {
                let mode = match mode {
                    Some(mode) => {
                        session.set_angle_mode(mode);
                        mode
                    }
                    None => session.toggle_angle_mode(),
                };
                println!("modo: {}", mode);
            }
            ReplCommand::MemoryAdd => {
                session.memory_add();
                println!("M = {}", session.state().memory);
            }
            ReplCommand::MemorySubtract => {
                session.memory_subtract();
                println!("M = {}", session.state().memory);
            }
            ReplCommand::MemoryClear => {
                session.memory_clear();
                println!("M = 0");
            }
            ReplCommand::MemoryRecall => {
                session.clear_all();
                session.memory_recall();
                session.evaluate().await;
                show(&session);
            }
            ReplCommand::Ans => {
                session.clear_all();
                session.insert_ans();
                session.evaluate().await;
                show(&session);
            }
            ReplCommand::Continue(op, rest) => {
                session.clear_all();
                session.insert_ans();
                session.insert(&op);
                session.insert(&rest);
                session.evaluate().await;
                show(&session);
            }
            ReplCommand::Evaluate(expression) => {
                session.clear_all();
                session.insert(&expression);
                session.evaluate().await;
                show(&session);
            }
            ReplCommand::Unknown(message) => eprintln!("{}", message),
        }
    }

    Ok(())
}

fn show(session: &CalculatorSession) {
    let state = session.state();
    match &state.error {
        Some(error) => eprintln!("{}", error),
        None => println!("= {}", state.result),
    }
}

fn print_help() {
    println!("  <expressão>        avalia (ex.: 2 × (3 + 4), sin(30), 5!)");
    println!("  + 1, × 2, ...      continua a partir do último resultado");
    println!("  ans                último resultado");
    println!("  m+ m- mr mc        memória");
    println!("  :mode [deg/rad]    modo angular");
    println!("  :clear             zera o visor");
    println!("  :functions         lista funções");
    println!("  :quit              sai");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_expressions() {
        assert_eq!(parse_line("  2 + 3 "), ReplCommand::Evaluate("2 + 3".into()));
        assert_eq!(parse_line("-5 + 1"), ReplCommand::Evaluate("-5 + 1".into()));
        assert_eq!(parse_line(""), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_continuation() {
        assert_eq!(parse_line("× 2"), ReplCommand::Continue("×".into(), "2".into()));
        assert_eq!(parse_line("+1"), ReplCommand::Continue("+".into(), "1".into()));
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_line("M+"), ReplCommand::MemoryAdd);
        assert_eq!(parse_line("ans"), ReplCommand::Ans);
        assert_eq!(parse_line(":q"), ReplCommand::Quit);
        assert_eq!(parse_line(":mode"), ReplCommand::Mode(None));
        assert_eq!(parse_line(":mode rad"), ReplCommand::Mode(Some(AngleMode::Radians)));
        assert!(matches!(parse_line(":mode grad"), ReplCommand::Unknown(_)));
        assert!(matches!(parse_line(":bogus"), ReplCommand::Unknown(_)));
    }
}
