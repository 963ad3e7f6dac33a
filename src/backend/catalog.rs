//! Catálogo das funções suportadas pelo backend padrão.

use std::collections::BTreeSet;

use crate::types::FunctionInfo;

/// (nome, descrição, sintaxe, exemplo, categoria)
const FUNCTIONS: &[(&str, &str, &str, &str, &str)] = &[
    ("sin", "Sine", "sin(x)", "sin(30) = 0.5 (deg mode)", "trigonometric"),
    ("cos", "Cosine", "cos(x)", "cos(0) = 1", "trigonometric"),
    ("tan", "Tangent", "tan(x)", "tan(45) = 1 (deg mode)", "trigonometric"),
    ("asin", "Inverse sine", "asin(x)", "asin(1) = 90 (deg mode)", "trigonometric"),
    ("acos", "Inverse cosine", "acos(x)", "acos(1) = 0", "trigonometric"),
    ("atan", "Inverse tangent", "atan(x)", "atan(1) = 45 (deg mode)", "trigonometric"),
    ("sinh", "Hyperbolic sine", "sinh(x)", "sinh(0) = 0", "hyperbolic"),
    ("cosh", "Hyperbolic cosine", "cosh(x)", "cosh(0) = 1", "hyperbolic"),
    ("tanh", "Hyperbolic tangent", "tanh(x)", "tanh(0) = 0", "hyperbolic"),
    ("log", "Common logarithm (base 10), or log(x, base)", "log(x) | log(x, base)", "log(100) = 2", "logarithmic"),
    ("ln", "Natural logarithm (base e)", "ln(x)", "ln(e) = 1", "logarithmic"),
    ("exp", "Exponential (e to the power of x)", "exp(x)", "exp(1) = 2.718...", "exponential"),
    ("sqrt", "Square root", "sqrt(x)", "sqrt(16) = 4", "root"),
    ("cbrt", "Cube root", "cbrt(x)", "cbrt(27) = 3", "root"),
    ("round", "Round half away from zero", "round(x)", "round(3.7) = 4", "rounding"),
    ("floor", "Round down", "floor(x)", "floor(3.7) = 3", "rounding"),
    ("ceil", "Round up", "ceil(x)", "ceil(3.2) = 4", "rounding"),
    ("abs", "Absolute value", "abs(x)", "abs(-5) = 5", "basic"),
];

/// Lista as funções, opcionalmente filtradas por categoria (comparação exata).
pub fn functions(category: Option<&str>) -> Vec<FunctionInfo> {
    FUNCTIONS
        .iter()
        .filter(|(_, _, _, _, cat)| category.map_or(true, |c| c == *cat))
        .map(|(name, description, syntax, example, cat)| FunctionInfo {
            name: name.to_string(),
            description: description.to_string(),
            syntax: syntax.to_string(),
            example: example.to_string(),
            category: cat.to_string(),
        })
        .collect()
}

/// Categorias distintas, em ordem alfabética.
pub fn categories() -> Vec<String> {
    FUNCTIONS
        .iter()
        .map(|(_, _, _, _, cat)| *cat)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(String::from)
        .collect()
}
