//! Conversão entre símbolos de calculadora e sintaxe do avaliador.

/// `×→*`, `÷→/`, `π→pi`, `^→**`, em uma única passada.
///
/// A saída nunca é reprocessada: o `*` vindo de `×` não vira outra coisa.
pub fn normalize_symbols(expression: &str) -> String {
    let mut out = String::with_capacity(expression.len() + 8);
    for c in expression.chars() {
        match c {
            '×' => out.push('*'),
            '÷' => out.push('/'),
            'π' => out.push_str("pi"),
            '^' => out.push_str("**"),
            other => out.push(other),
        }
    }
    out
}

/// Inverso de [`normalize_symbols`] para exibição: `**→^`, `*→×`, `/→÷`,
/// `pi→π` (só como identificador isolado).
pub fn display_symbols(expression: &str) -> String {
    let chars: Vec<char> = expression.chars().collect();
    let mut out = String::with_capacity(expression.len());
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '*' if chars.get(i + 1) == Some(&'*') => {
                out.push('^');
                i += 2;
            }
            '*' => {
                out.push('×');
                i += 1;
            }
            '/' => {
                out.push('÷');
                i += 1;
            }
            'p' if is_standalone_pi(&chars, i) => {
                out.push('π');
                i += 2;
            }
            other => {
                out.push(other);
                i += 1;
            }
        }
    }
    out
}

fn is_standalone_pi(chars: &[char], i: usize) -> bool {
    let is_ident = |c: &char| c.is_alphanumeric() || *c == '_';
    chars.get(i + 1) == Some(&'i')
        && (i == 0 || !is_ident(&chars[i - 1]))
        && !chars.get(i + 2).is_some_and(is_ident)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_symbols("2 × 3 ÷ 4"), "2 * 3 / 4");
        assert_eq!(normalize_symbols("2π"), "2pi");
        assert_eq!(normalize_symbols("2^3"), "2**3");
    }

    #[test]
    fn test_normalize_is_single_pass() {
        assert_eq!(normalize_symbols("×^"), "***");
        assert_eq!(normalize_symbols("2 * 3"), "2 * 3");
    }

    #[test]
    fn test_display() {
        assert_eq!(display_symbols("2**3 * pi / 4"), "2^3 × π ÷ 4");
        assert_eq!(display_symbols("pipe + api"), "pipe + api");
        assert_eq!(display_symbols("sin(pi)"), "sin(π)");
    }

    #[test]
    fn test_display_inverts_normalize() {
        let original = "2 × π ÷ 4 ^ 2";
        assert_eq!(display_symbols(&normalize_symbols(original)), original);
    }
}
