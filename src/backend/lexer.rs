//! Tokenização de expressões normalizadas.

use super::base::BackendError;

/// Token da expressão.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Literal numérico, ainda em texto.
    Number(String),
    /// Nome de função, constante ou a palavra-chave `mod`.
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `**` ou `^`.
    Power,
    /// `!` (fatorial).
    Bang,
    LParen,
    RParen,
    Comma,
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Number(n) => write!(f, "number {}", n),
            Token::Ident(_) => write!(f, "identifier"),
            Token::Plus => write!(f, "'+'"),
            Token::Minus => write!(f, "'-'"),
            Token::Star => write!(f, "'*'"),
            Token::Slash => write!(f, "'/'"),
            Token::Percent => write!(f, "'%'"),
            Token::Power => write!(f, "'**'"),
            Token::Bang => write!(f, "'!'"),
            Token::LParen => write!(f, "'('"),
            Token::RParen => write!(f, "')'"),
            Token::Comma => write!(f, "','"),
        }
    }
}

/// Jeton com a posição (em caracteres) onde começa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spanned {
    pub token: Token,
    pub position: usize,
}

/// Quebra a expressão em jetons.
///
/// Aceita:
/// - números `12`, `3.25`, `.5`, `5.`
/// - identificadores `[a-zA-Z_][a-zA-Z0-9_]*`
/// - operadores `+ - * / % ** ^ !`, parênteses e vírgula
pub fn tokenize(input: &str) -> Result<Vec<Spanned>, BackendError> {
    let chars: Vec<char> = input.chars().collect();
    let mut out = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let start = i;

        if c.is_whitespace() {
            i += 1;
            continue;
        }

        let token = match c {
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' if chars.get(i + 1) == Some(&'*') => {
                i += 1;
                Token::Power
            }
            '*' => Token::Star,
            '/' => Token::Slash,
            '%' => Token::Percent,
            '^' => Token::Power,
            '!' => Token::Bang,
            '(' => Token::LParen,
            ')' => Token::RParen,
            ',' => Token::Comma,
            c if c.is_ascii_digit() || (c == '.' && next_is_digit(&chars, i)) => {
                let mut seen_dot = false;
                while i < chars.len() && (chars[i].is_ascii_digit() || (chars[i] == '.' && !seen_dot)) {
                    seen_dot |= chars[i] == '.';
                    i += 1;
                }
                if let Some(end) = exponent_end(&chars, i) {
                    i = end;
                }
                out.push(Spanned {
                    token: Token::Number(chars[start..i].iter().collect()),
                    position: start,
                });
                continue;
            }
            c if c.is_ascii_alphabetic() || c == '_' => {
                while i < chars.len() && (chars[i].is_ascii_alphanumeric() || chars[i] == '_') {
                    i += 1;
                }
                out.push(Spanned {
                    token: Token::Ident(chars[start..i].iter().collect()),
                    position: start,
                });
                continue;
            }
            other => {
                return Err(BackendError::syntax(format!(
                    "unexpected character '{}' at position {}",
                    other, start
                )))
            }
        };

        out.push(Spanned {
            token,
            position: start,
        });
        i += 1;
    }

    Ok(out)
}

fn next_is_digit(chars: &[char], i: usize) -> bool {
    chars.get(i + 1).is_some_and(|c| c.is_ascii_digit())
}

/// Fim de um expoente (`e3`, `E-7`, `e+12`) começando em `i`.
///
/// `2e` e `2exp(1)` não têm dígito depois do `e`: o `e` vira identificador.
fn exponent_end(chars: &[char], i: usize) -> Option<usize> {
    if !matches!(chars.get(i), Some('e' | 'E')) {
        return None;
    }
    let mut j = i + 1;
    if matches!(chars.get(j), Some('+' | '-')) {
        j += 1;
    }
    if !chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    while chars.get(j).is_some_and(|c| c.is_ascii_digit()) {
        j += 1;
    }
    Some(j)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(input: &str) -> Vec<Token> {
        tokenize(input).unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn test_basic_tokens() {
        assert_eq!(
            tokens("2 + 3.5*x"),
            vec![
                Token::Number("2".into()),
                Token::Plus,
                Token::Number("3.5".into()),
                Token::Star,
                Token::Ident("x".into()),
            ]
        );
    }

    #[test]
    fn test_power_spellings() {
        assert_eq!(tokens("2**3"), tokens("2^3"));
        assert_eq!(tokens("2**3")[1], Token::Power);
    }

    #[test]
    fn test_leading_dot_number() {
        assert_eq!(tokens(".5"), vec![Token::Number(".5".into())]);
    }

    #[test]
    fn test_second_dot_starts_new_number() {
        assert_eq!(
            tokens("1.2.3"),
            vec![Token::Number("1.2".into()), Token::Number(".3".into())]
        );
    }

    #[test]
    fn test_scientific_notation() {
        assert_eq!(tokens("2e3"), vec![Token::Number("2e3".into())]);
        assert_eq!(tokens("1.000000e+12"), vec![Token::Number("1.000000e+12".into())]);
        assert_eq!(tokens("1E-7"), vec![Token::Number("1E-7".into())]);
    }

    #[test]
    fn test_e_without_digits_is_identifier() {
        assert_eq!(tokens("2e"), vec![Token::Number("2".into()), Token::Ident("e".into())]);
        assert_eq!(
            tokens("2e+x"),
            vec![
                Token::Number("2".into()),
                Token::Ident("e".into()),
                Token::Plus,
                Token::Ident("x".into()),
            ]
        );
        assert_eq!(tokens("2exp(1)")[1], Token::Ident("exp".into()));
    }

    #[test]
    fn test_positions() {
        let spanned = tokenize("sin( 30 )").unwrap();
        assert_eq!(spanned[0].position, 0);
        assert_eq!(spanned[2].position, 5);
    }

    #[test]
    fn test_unexpected_character() {
        let err = tokenize("2 # 3").unwrap_err();
        assert!(err.message().starts_with("Syntax error"));
        assert!(err.message().contains("position 2"));

        assert!(tokenize("2 + .").is_err());
    }
}
