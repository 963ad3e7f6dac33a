//! Atalho para expressões `<número> <op> <número>`.

use lazy_static::lazy_static;
use regex::Regex;

use crate::backend::Number;

lazy_static! {
    static ref SIMPLE_BINARY: Regex =
        Regex::new(r"^([0-9]+\.?[0-9]*)\s*([-+*/])\s*([0-9]+\.?[0-9]*)$").unwrap();
}

/// Avalia `a op b` sem passar pelo pipeline completo.
///
/// Retorna `None` quando o texto não tem essa forma, quando o divisor é zero
/// ou quando o resultado não é finito. A aritmética é a mesma do backend
/// racional, então o valor bate com o do pipeline.
pub fn quick_evaluate(expression: &str) -> Option<f64> {
    let caps = SIMPLE_BINARY.captures(expression)?;
    let a = Number::parse_literal(&caps[1])?;
    let b = Number::parse_literal(&caps[3])?;

    let result = match &caps[2] {
        "+" => a.add(b),
        "-" => a.sub(b),
        "*" => a.mul(b),
        "/" => a.div(b).ok()?,
        _ => return None,
    };

    Some(result.to_f64()).filter(|v| v.is_finite())
}
