//! Formatação de resultados para exibição.
//!
//! O arredondamento é decidido sobre o valor exato do `f64` e empates vão
//! para longe do zero (`2.5` com 1 dígito vira `3`).

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::types::errors::messages;

/// Precisão padrão (dígitos significativos).
pub const DEFAULT_PRECISION: usize = 10;

/// Maior precisão aceita.
pub const MAX_PRECISION: usize = 15;

/// Dígitos significativos na notação exponencial.
const EXPONENTIAL_DIGITS: usize = 7;

/// Formata um valor.
///
/// - não finito: `"Error: Out of range"`
/// - `|v| < 1e-10`: `"0"`
/// - `|v| > 1e10` ou `|v| < 1e-6`: exponencial com 6 casas (`1.000000e+12`)
/// - resto: arredonda em `precision` dígitos significativos, sem zeros à direita
pub fn format_result(value: f64, precision: usize) -> String {
    if !value.is_finite() {
        return messages::OUT_OF_RANGE.to_string();
    }

    let magnitude = value.abs();
    if magnitude < 1e-10 {
        return "0".to_string();
    }

    if magnitude > 1e10 || magnitude < 1e-6 {
        return to_exponential(value);
    }

    let precision = precision.clamp(1, MAX_PRECISION);
    let Some((digits, exponent)) = significant_digits(magnitude, precision) else {
        return value.to_string();
    };

    let text = format!("{}{}e{}", sign(value), digits, exponent - precision as i32 + 1);
    match text.parse::<f64>() {
        Ok(v) => v.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Texto de um valor para reinserir em uma expressão (Ans, MR).
///
/// Fora de `[1e-6, 1e21)` usa notação exponencial curta (`1e+300`,
/// `-2.5e-7`), que o lexer aceita de volta.
pub fn to_operand(value: f64) -> String {
    let magnitude = value.abs();
    if value != 0.0 && value.is_finite() && !(1e-6..1e21).contains(&magnitude) {
        let text = format!("{:e}", value);
        return match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        };
    }
    value.to_string()
}

/// Notação exponencial com 6 casas e expoente sempre sinalizado.
fn to_exponential(value: f64) -> String {
    let Some((digits, exponent)) = significant_digits(value.abs(), EXPONENTIAL_DIGITS) else {
        return value.to_string();
    };

    let (head, tail) = digits.split_at(1);
    let exponent_sign = if exponent < 0 { "-" } else { "+" };
    format!(
        "{}{}.{}e{}{}",
        sign(value),
        head,
        tail,
        exponent_sign,
        exponent.unsigned_abs()
    )
}

fn sign(value: f64) -> &'static str {
    if value < 0.0 {
        "-"
    } else {
        ""
    }
}

/// Arredonda `magnitude` (> 0) em `precision` dígitos significativos.
///
/// Devolve os dígitos e o expoente decimal do primeiro deles:
/// `("1235", 5)` para `123456.789` com 4 dígitos.
fn significant_digits(magnitude: f64, precision: usize) -> Option<(String, i32)> {
    let exact = BigRational::from_float(magnitude)?;
    if exact.is_zero() || precision == 0 {
        return None;
    }

    // 10^k <= exact < 10^(k+1); log10 é só o chute inicial.
    let mut k = magnitude.log10().floor() as i32;
    while exact < pow10(k) {
        k -= 1;
    }
    while exact >= pow10(k + 1) {
        k += 1;
    }

    let scaled = &exact / pow10(k - precision as i32 + 1);
    let half = BigRational::new(BigInt::one(), BigInt::from(2));
    let mut digits = (scaled + half).floor().to_integer().to_string();

    // 9.99.. arredondou para 10.0..
    if digits.len() > precision {
        digits.truncate(precision);
        k += 1;
    }

    Some((digits, k))
}

fn pow10(exponent: i32) -> BigRational {
    let power = BigRational::from_integer(BigInt::from(10u32).pow(exponent.unsigned_abs()));
    if exponent < 0 {
        power.recip()
    } else {
        power
    }
}
