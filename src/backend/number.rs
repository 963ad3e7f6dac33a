//! Valor numérico devolvido pelo backend.
//!
//! Literais e aritmética racional ficam exatos (`BigRational`); funções
//! transcendentes e potências fracionárias caem para `f64`. O motor converte
//! tudo para `f64` logo depois da chamada ao backend.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::base::BackendError;

/// Limite de tamanho (em bits) para resultados exatos de potência/fatorial.
/// Acima disso o cálculo segue em `f64`.
const MAX_EXACT_BITS: u64 = 1 << 16;

/// Maior expoente decimal aceito de forma exata em um literal (`1e1000`).
const MAX_LITERAL_EXPONENT: u64 = 1000;

/// Maior n cujo fatorial é calculado de forma exata.
const MAX_EXACT_FACTORIAL: u64 = 1000;

/// `[+-]dígitos`.
fn valid_exponent(text: &str) -> bool {
    let digits = text.strip_prefix(['+', '-']).unwrap_or(text);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Resultado numérico do backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    /// Racional exato.
    Exact(BigRational),
    /// Ponto flutuante.
    Approx(f64),
}

impl Number {
    /// Interpreta um literal decimal (`12`, `3.25`, `.5`, `5.`, `2e3`, `1.5E-7`).
    ///
    /// Expoentes muito grandes viram `f64` direto (e depois ±inf ou 0).
    pub fn parse_literal(text: &str) -> Option<Self> {
        let (mantissa, exponent) = match text.split_once(['e', 'E']) {
            Some((m, e)) => (m, Some(e)),
            None => (text, None),
        };

        let (int_part, frac_part) = match mantissa.split_once('.') {
            Some((i, f)) => (i, f),
            None => (mantissa, ""),
        };

        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }
        if !int_part.chars().chain(frac_part.chars()).all(|c| c.is_ascii_digit()) {
            return None;
        }

        let exponent = match exponent {
            None => 0,
            Some(e) => match e.parse::<i64>() {
                Ok(e) if e.unsigned_abs() <= MAX_LITERAL_EXPONENT => e,
                Ok(_) | Err(_) if valid_exponent(e) => {
                    return text.parse::<f64>().ok().map(Number::Approx);
                }
                _ => return None,
            },
        };

        let digits = format!("{}{}", int_part, frac_part);
        let numer = BigInt::parse_bytes(digits.as_bytes(), 10)?;
        let scale = exponent - frac_part.len() as i64;
        let power = BigInt::from(10u32).pow(scale.unsigned_abs() as u32);

        let value = if scale >= 0 {
            BigRational::from_integer(numer * power)
        } else {
            BigRational::new(numer, power)
        };
        Some(Number::Exact(value))
    }

    pub fn from_integer(n: i64) -> Self {
        Number::Exact(BigRational::from_integer(BigInt::from(n)))
    }

    /// Converte para `f64` (pode resultar em ±inf ou NaN).
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Approx(v) => *v,
            Number::Exact(r) => r.to_f64().unwrap_or_else(|| {
                if r.is_negative() {
                    f64::NEG_INFINITY
                } else {
                    f64::INFINITY
                }
            }),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, Number::Exact(_))
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Exact(r) => r.is_zero(),
            Number::Approx(v) => *v == 0.0,
        }
    }

    pub fn neg(self) -> Self {
        match self {
            Number::Exact(r) => Number::Exact(-r),
            Number::Approx(v) => Number::Approx(-v),
        }
    }

    pub fn add(self, rhs: Number) -> Self {
        match (self, rhs) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a + b),
            (a, b) => Number::Approx(a.to_f64() + b.to_f64()),
        }
    }

    pub fn sub(self, rhs: Number) -> Self {
        match (self, rhs) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a - b),
            (a, b) => Number::Approx(a.to_f64() - b.to_f64()),
        }
    }

    pub fn mul(self, rhs: Number) -> Self {
        match (self, rhs) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a * b),
            (a, b) => Number::Approx(a.to_f64() * b.to_f64()),
        }
    }

    /// Divisão; divisor zero é erro.
    pub fn div(self, rhs: Number) -> Result<Self, BackendError> {
        if rhs.is_zero() {
            return Err(BackendError::division_by_zero());
        }
        Ok(match (self, rhs) {
            (Number::Exact(a), Number::Exact(b)) => Number::Exact(a / b),
            (a, b) => Number::Approx(a.to_f64() / b.to_f64()),
        })
    }

    /// Módulo com sinal do divisor (`x - y * floor(x / y)`).
    pub fn modulo(self, rhs: Number) -> Result<Self, BackendError> {
        if rhs.is_zero() {
            return Err(BackendError::division_by_zero());
        }
        Ok(match (self, rhs) {
            (Number::Exact(a), Number::Exact(b)) => {
                let q = (&a / &b).floor();
                Number::Exact(a - b * q)
            }
            (a, b) => {
                let (a, b) = (a.to_f64(), b.to_f64());
                Number::Approx(a - b * (a / b).floor())
            }
        })
    }

    /// Potência. Base e expoente inteiro exatos dão resultado exato enquanto
    /// couberem no limite de bits.
    pub fn pow(self, exponent: Number) -> Result<Self, BackendError> {
        if let (Number::Exact(base), Number::Exact(exp)) = (&self, &exponent) {
            if exp.is_integer() {
                if let Some(result) = exact_pow(base, exp.numer())? {
                    return Ok(Number::Exact(result));
                }
            }
        }
        Ok(Number::Approx(self.to_f64().powf(exponent.to_f64())))
    }

    /// Fatorial de inteiro não negativo.
    pub fn factorial(self) -> Result<Self, BackendError> {
        let n = match &self {
            Number::Exact(r) if r.is_integer() && !r.is_negative() => r.numer().to_u64(),
            Number::Approx(v) if v.fract() == 0.0 && *v >= 0.0 => {
                if *v > MAX_EXACT_FACTORIAL as f64 {
                    None
                } else {
                    Some(*v as u64)
                }
            }
            _ => {
                return Err(BackendError::new(
                    "Invalid argument for factorial: expected a non-negative integer",
                ))
            }
        };

        match n {
            Some(n) if n <= MAX_EXACT_FACTORIAL => {
                let mut acc = BigInt::one();
                for k in 2..=n {
                    acc *= k;
                }
                Ok(Number::Exact(BigRational::from_integer(acc)))
            }
            _ => Ok(Number::Approx(f64::INFINITY)),
        }
    }

    pub fn abs(self) -> Self {
        match self {
            Number::Exact(r) => Number::Exact(r.abs()),
            Number::Approx(v) => Number::Approx(v.abs()),
        }
    }

    pub fn floor(self) -> Self {
        match self {
            Number::Exact(r) => Number::Exact(r.floor()),
            Number::Approx(v) => Number::Approx(v.floor()),
        }
    }

    pub fn ceil(self) -> Self {
        match self {
            Number::Exact(r) => Number::Exact(r.ceil()),
            Number::Approx(v) => Number::Approx(v.ceil()),
        }
    }

    /// Arredonda metades para longe do zero.
    pub fn round(self) -> Self {
        match self {
            Number::Exact(r) => Number::Exact(r.round()),
            Number::Approx(v) => Number::Approx(v.round()),
        }
    }

    /// Aplica uma função `f64 -> f64`.
    pub fn map_f64(self, f: impl FnOnce(f64) -> f64) -> Self {
        Number::Approx(f(self.to_f64()))
    }
}

/// `base^exp` exato, ou `None` se o resultado passaria do limite de bits.
fn exact_pow(base: &BigRational, exp: &BigInt) -> Result<Option<BigRational>, BackendError> {
    if exp.is_zero() {
        return Ok(Some(BigRational::one()));
    }
    if base.is_zero() {
        if exp.is_negative() {
            return Err(BackendError::division_by_zero());
        }
        return Ok(Some(BigRational::zero()));
    }

    let n = match exp.abs().to_u32() {
        Some(n) => n,
        None => return Ok(None),
    };

    let bits = (base.numer().bits() + base.denom().bits()).saturating_mul(u64::from(n));
    if bits > MAX_EXACT_BITS {
        return Ok(None);
    }

    let numer = base.numer().pow(n);
    let denom = base.denom().pow(n);

    Ok(Some(if exp.is_negative() {
        BigRational::new(denom, numer)
    } else {
        BigRational::new(numer, denom)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(text: &str) -> Number {
        Number::parse_literal(text).unwrap()
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(lit("12").to_f64(), 12.0);
        assert_eq!(lit("3.25").to_f64(), 3.25);
        assert_eq!(lit(".5").to_f64(), 0.5);
        assert_eq!(lit("5.").to_f64(), 5.0);
        assert!(Number::parse_literal(".").is_none());
        assert!(Number::parse_literal("1a").is_none());
    }

    #[test]
    fn test_parse_scientific_literal() {
        assert_eq!(lit("2e3"), Number::from_integer(2000));
        assert_eq!(lit("1.5E+2"), Number::from_integer(150));
        assert_eq!(lit("1e-7").to_f64(), 1e-7);
        assert!(lit("1.000000e+12").is_exact());
        assert_eq!(lit("1.000000e+12").to_f64(), 1e12);

        // Expoente fora do limite exato.
        assert!(lit("1e5000").to_f64().is_infinite());
        assert_eq!(lit("1e-5000").to_f64(), 0.0);
        assert!(Number::parse_literal("1e").is_none());
    }

    #[test]
    fn test_exact_decimal_sum() {
        let sum = lit("0.1").add(lit("0.2"));
        assert!(sum.is_exact());
        assert_eq!(sum.to_f64(), 0.3);
    }

    #[test]
    fn test_division_by_zero() {
        let err = lit("1").div(lit("0")).unwrap_err();
        assert_eq!(err.message(), "Division by zero");

        let err = Number::Approx(2.5).div(Number::Approx(0.0)).unwrap_err();
        assert_eq!(err.message(), "Division by zero");
    }

    #[test]
    fn test_modulo_follows_divisor_sign() {
        assert_eq!(lit("7").modulo(lit("3")).unwrap().to_f64(), 1.0);
        assert_eq!(lit("7").neg().modulo(lit("3")).unwrap().to_f64(), 2.0);
        assert!(lit("7").modulo(lit("0")).is_err());
    }

    #[test]
    fn test_pow() {
        assert_eq!(lit("2").pow(lit("10")).unwrap().to_f64(), 1024.0);
        assert_eq!(lit("2").pow(Number::from_integer(-2)).unwrap().to_f64(), 0.25);
        assert_eq!(lit("0").pow(lit("0")).unwrap().to_f64(), 1.0);
        assert!(lit("0").pow(Number::from_integer(-1)).is_err());

        let root = lit("16").pow(lit("0.5")).unwrap();
        assert!(!root.is_exact());
        assert_eq!(root.to_f64(), 4.0);
    }

    #[test]
    fn test_huge_pow_falls_back_to_float() {
        let big = lit("10").pow(lit("100000")).unwrap();
        assert!(!big.is_exact());
        assert!(big.to_f64().is_infinite());
    }

    #[test]
    fn test_factorial() {
        assert_eq!(lit("5").factorial().unwrap().to_f64(), 120.0);
        assert_eq!(lit("0").factorial().unwrap().to_f64(), 1.0);
        assert!(lit("2.5").factorial().is_err());
        assert!(lit("171").factorial().unwrap().to_f64().is_infinite());
    }

    #[test]
    fn test_rounding_helpers() {
        assert_eq!(lit("3.7").floor().to_f64(), 3.0);
        assert_eq!(lit("3.2").ceil().to_f64(), 4.0);
        assert_eq!(lit("2.5").round().to_f64(), 3.0);
        assert_eq!(lit("2.5").neg().abs().to_f64(), 2.5);
    }
}
