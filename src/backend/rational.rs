//! Backend padrão: aritmética racional exata com queda para `f64`.

use async_trait::async_trait;

use super::base::{BackendError, ExpressionBackend};
use super::number::Number;
use super::parser::{parse, BinaryOp, Expr};

/// Avaliador de precisão arbitrária.
///
/// `+ - * / mod`, potências inteiras e fatorial ficam exatos; funções
/// transcendentes e potências fracionárias usam `f64`.
#[derive(Debug, Default, Clone)]
pub struct RationalBackend;

impl RationalBackend {
    pub fn new() -> Self {
        Self
    }

    /// Versão síncrona de [`ExpressionBackend::evaluate`].
    pub fn evaluate_sync(&self, expression: &str) -> Result<Number, BackendError> {
        let ast = parse(expression)?;
        eval(&ast)
    }
}

#[async_trait]
impl ExpressionBackend for RationalBackend {
    fn name(&self) -> &str {
        "rational"
    }

    async fn evaluate(&self, expression: &str) -> Result<Number, BackendError> {
        self.evaluate_sync(expression)
    }
}

fn eval(expr: &Expr) -> Result<Number, BackendError> {
    match expr {
        Expr::Literal(n) => Ok(n.clone()),
        Expr::Variable(name) => constant(name),
        Expr::Negate(inner) => Ok(eval(inner)?.neg()),
        Expr::Factorial(inner) => eval(inner)?.factorial(),
        Expr::Binary(op, lhs, rhs) => {
            let a = eval(lhs)?;
            let b = eval(rhs)?;
            match op {
                BinaryOp::Add => Ok(a.add(b)),
                BinaryOp::Sub => Ok(a.sub(b)),
                BinaryOp::Mul => Ok(a.mul(b)),
                BinaryOp::Div => a.div(b),
                BinaryOp::Mod => a.modulo(b),
                BinaryOp::Pow => a.pow(b),
            }
        }
        Expr::Call(name, args) => {
            let values = args.iter().map(eval).collect::<Result<Vec<_>, _>>()?;
            call(name, values)
        }
    }
}

fn constant(name: &str) -> Result<Number, BackendError> {
    let value = match name {
        "pi" => std::f64::consts::PI,
        "e" => std::f64::consts::E,
        "tau" => std::f64::consts::TAU,
        "phi" => (1.0 + 5f64.sqrt()) / 2.0,
        _ => return Err(BackendError::undefined_symbol(name)),
    };
    Ok(Number::Approx(value))
}

fn call(name: &str, mut args: Vec<Number>) -> Result<Number, BackendError> {
    // log aceita base opcional
    if name == "log" {
        return match args.len() {
            1 => Ok(args.remove(0).map_f64(f64::log10)),
            2 => {
                let base = args.remove(1).to_f64();
                let x = args.remove(0).to_f64();
                Ok(Number::Approx(x.ln() / base.ln()))
            }
            n => Err(BackendError::wrong_arity(name, "1 or 2", n)),
        };
    }

    let unary: fn(Number) -> Number = match name {
        "sin" => |x| x.map_f64(f64::sin),
        "cos" => |x| x.map_f64(f64::cos),
        "tan" => |x| x.map_f64(f64::tan),
        "asin" => |x| x.map_f64(f64::asin),
        "acos" => |x| x.map_f64(f64::acos),
        "atan" => |x| x.map_f64(f64::atan),
        "sinh" => |x| x.map_f64(f64::sinh),
        "cosh" => |x| x.map_f64(f64::cosh),
        "tanh" => |x| x.map_f64(f64::tanh),
        "sqrt" => |x| x.map_f64(f64::sqrt),
        "cbrt" => |x| x.map_f64(f64::cbrt),
        "ln" => |x| x.map_f64(f64::ln),
        "exp" => |x| x.map_f64(f64::exp),
        "abs" => Number::abs,
        "round" => Number::round,
        "floor" => Number::floor,
        "ceil" => Number::ceil,
        _ => return Err(BackendError::undefined_symbol(name)),
    };

    if args.len() != 1 {
        return Err(BackendError::wrong_arity(name, "1", args.len()));
    }
    Ok(unary(args.remove(0)))
}
