//! Reescrita de chamadas trigonométricas no modo graus.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

use crate::types::AngleMode;

lazy_static! {
    /// `sin|cos|tan` com argumento sem parênteses. O grupo 1 pega letras
    /// coladas antes do nome (`asin`, `xsin`); número antes (`2sin`) não conta.
    static ref FORWARD_TRIG: Regex = Regex::new(r"([A-Za-z_]*)(sin|cos|tan)\s*\(([^()]+)\)").unwrap();
    /// `asin|acos|atan` com argumento sem parênteses.
    static ref INVERSE_TRIG: Regex = Regex::new(r"([A-Za-z_]*)(asin|acos|atan)\s*\(([^()]+)\)").unwrap();
}

/// Converte argumentos de graus para radianos (e resultados inversos de volta).
///
/// Só chamadas cujo argumento não contém parênteses são reescritas; em
/// `sin(cos(0))` apenas o `cos` interno muda. Em radianos a expressão volta
/// inalterada.
pub fn apply_angle_mode(expression: &str, mode: AngleMode) -> String {
    if mode == AngleMode::Radians {
        return expression.to_string();
    }

    let forward = FORWARD_TRIG.replace_all(expression, |caps: &Captures| {
        if !caps[1].is_empty() {
            return caps[0].to_string();
        }
        format!("{}(({}) * pi / 180)", &caps[2], &caps[3])
    });

    INVERSE_TRIG
        .replace_all(&forward, |caps: &Captures| {
            if !caps[1].is_empty() {
                return caps[0].to_string();
            }
            format!("({}({}) * 180 / pi)", &caps[2], &caps[3])
        })
        .into_owned()
}
