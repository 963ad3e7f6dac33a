//! Parser descendente recursivo.
//!
//! Precedência, da mais fraca para a mais forte:
//! soma/subtração, multiplicação (`* / % mod`), multiplicação implícita
//! (`2pi`, `2(3 + 4)`, `2sin(30)`), sinal unário, potência (associativa à
//! direita), fatorial pós-fixo, primário.
//!
//! A multiplicação implícita liga mais forte que `/`: `6/2pi` é `6/(2pi)`.

use super::base::BackendError;
use super::lexer::{tokenize, Spanned, Token};
use super::number::Number;

/// Profundidade máxima de aninhamento.
pub const MAX_DEPTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

/// Árvore da expressão.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal(Number),
    Variable(String),
    Negate(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Factorial(Box<Expr>),
    Call(String, Vec<Expr>),
}

/// Analisa o texto completo.
pub fn parse(input: &str) -> Result<Expr, BackendError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        pos: 0,
        depth: 0,
    };

    let expr = parser.expression()?;
    match parser.peek() {
        None => Ok(expr),
        Some(tok) => Err(BackendError::syntax(format!(
            "unexpected {} at position {}",
            tok.token, tok.position
        ))),
    }
}

struct Parser {
    tokens: Vec<Spanned>,
    pos: usize,
    depth: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Spanned> {
        self.tokens.get(self.pos)
    }

    fn peek_token(&self) -> Option<&Token> {
        self.peek().map(|s| &s.token)
    }

    fn advance(&mut self) -> Option<Spanned> {
        let tok = self.tokens.get(self.pos).cloned();
        if tok.is_some() {
            self.pos += 1;
        }
        tok
    }

    fn eat(&mut self, expected: &Token) -> bool {
        if self.peek_token() == Some(expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: Token) -> Result<(), BackendError> {
        match self.advance() {
            Some(tok) if tok.token == expected => Ok(()),
            Some(tok) => Err(BackendError::syntax(format!(
                "expected {} but found {} at position {}",
                expected, tok.token, tok.position
            ))),
            None => Err(BackendError::syntax(format!(
                "expected {} but reached end of expression",
                expected
            ))),
        }
    }

    fn enter(&mut self) -> Result<(), BackendError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(BackendError::syntax("expression nested too deeply"));
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    fn expression(&mut self) -> Result<Expr, BackendError> {
        self.enter()?;
        let result = self.additive();
        self.leave();
        result
    }

    fn additive(&mut self) -> Result<Expr, BackendError> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Plus) => BinaryOp::Add,
                Some(Token::Minus) => BinaryOp::Sub,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.multiplicative()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn multiplicative(&mut self) -> Result<Expr, BackendError> {
        let mut lhs = self.implicit()?;
        loop {
            let op = match self.peek_token() {
                Some(Token::Star) => BinaryOp::Mul,
                Some(Token::Slash) => BinaryOp::Div,
                Some(Token::Percent) => BinaryOp::Mod,
                Some(Token::Ident(name)) if name == "mod" => BinaryOp::Mod,
                _ => break,
            };
            self.pos += 1;
            let rhs = self.implicit()?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    /// Fator seguido de identificador ou `(` sem operador entre eles.
    ///
    /// Dois números seguidos (`1 2`) continuam sendo erro.
    fn implicit(&mut self) -> Result<Expr, BackendError> {
        let mut lhs = self.unary()?;
        while self.starts_implicit_factor() {
            let rhs = self.power()?;
            lhs = Expr::Binary(BinaryOp::Mul, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn starts_implicit_factor(&self) -> bool {
        match self.peek_token() {
            Some(Token::LParen) => true,
            Some(Token::Ident(name)) => name != "mod",
            _ => false,
        }
    }

    fn unary(&mut self) -> Result<Expr, BackendError> {
        if self.eat(&Token::Minus) {
            self.enter()?;
            let operand = self.unary();
            self.leave();
            return Ok(Expr::Negate(Box::new(operand?)));
        }
        if self.eat(&Token::Plus) {
            self.enter()?;
            let operand = self.unary();
            self.leave();
            return operand;
        }
        self.power()
    }

    fn power(&mut self) -> Result<Expr, BackendError> {
        let base = self.postfix()?;
        if self.eat(&Token::Power) {
            // 2 ** -1 é válido: o expoente volta para o nível unário.
            self.enter()?;
            let exponent = self.unary();
            self.leave();
            return Ok(Expr::Binary(BinaryOp::Pow, Box::new(base), Box::new(exponent?)));
        }
        Ok(base)
    }

    fn postfix(&mut self) -> Result<Expr, BackendError> {
        let mut expr = self.primary()?;
        while self.eat(&Token::Bang) {
            expr = Expr::Factorial(Box::new(expr));
        }
        Ok(expr)
    }

    fn primary(&mut self) -> Result<Expr, BackendError> {
        let tok = match self.advance() {
            Some(tok) => tok,
            None => return Err(BackendError::syntax("unexpected end of expression")),
        };

        match tok.token {
            Token::Number(text) => Number::parse_literal(&text)
                .map(Expr::Literal)
                .ok_or_else(|| BackendError::syntax(format!("invalid number at position {}", tok.position))),
            Token::LParen => {
                let inner = self.expression()?;
                self.expect(Token::RParen)?;
                Ok(inner)
            }
            Token::Ident(name) if name == "mod" => Err(BackendError::syntax(format!(
                "unexpected operator mod at position {}",
                tok.position
            ))),
            Token::Ident(name) => {
                if self.eat(&Token::LParen) {
                    let args = self.arguments()?;
                    Ok(Expr::Call(name, args))
                } else {
                    Ok(Expr::Variable(name))
                }
            }
            other => Err(BackendError::syntax(format!(
                "unexpected {} at position {}",
                other, tok.position
            ))),
        }
    }

    /// Lista de argumentos depois de `(`, consumindo o `)` final.
    fn arguments(&mut self) -> Result<Vec<Expr>, BackendError> {
        let mut args = Vec::new();
        if self.eat(&Token::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            if self.eat(&Token::Comma) {
                continue;
            }
            self.expect(Token::RParen)?;
            return Ok(args);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lit(n: i64) -> Expr {
        Expr::Literal(Number::from_integer(n))
    }

    fn bin(op: BinaryOp, l: Expr, r: Expr) -> Expr {
        Expr::Binary(op, Box::new(l), Box::new(r))
    }

    #[test]
    fn test_precedence() {
        assert_eq!(
            parse("1 + 2 * 3").unwrap(),
            bin(BinaryOp::Add, lit(1), bin(BinaryOp::Mul, lit(2), lit(3)))
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(
            parse("2 ** 3 ** 2").unwrap(),
            bin(BinaryOp::Pow, lit(2), bin(BinaryOp::Pow, lit(3), lit(2)))
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(
            parse("-2 ** 2").unwrap(),
            Expr::Negate(Box::new(bin(BinaryOp::Pow, lit(2), lit(2))))
        );
    }

    #[test]
    fn test_mod_keyword() {
        assert_eq!(parse("7 mod 3").unwrap(), bin(BinaryOp::Mod, lit(7), lit(3)));
        assert!(parse("mod 3").is_err());
    }

    #[test]
    fn test_calls_and_factorial() {
        assert_eq!(
            parse("log(8, 2)").unwrap(),
            Expr::Call("log".into(), vec![lit(8), lit(2)])
        );
        assert_eq!(parse("3!").unwrap(), Expr::Factorial(Box::new(lit(3))));
        assert_eq!(parse("pi").unwrap(), Expr::Variable("pi".into()));
    }

    #[test]
    fn test_implicit_multiplication() {
        let pi = Expr::Variable("pi".into());
        assert_eq!(parse("2pi").unwrap(), bin(BinaryOp::Mul, lit(2), pi.clone()));
        assert_eq!(
            parse("2(3 + 4)").unwrap(),
            bin(BinaryOp::Mul, lit(2), bin(BinaryOp::Add, lit(3), lit(4)))
        );
        assert_eq!(
            parse("2sin(30)").unwrap(),
            bin(BinaryOp::Mul, lit(2), Expr::Call("sin".into(), vec![lit(30)]))
        );
        assert_eq!(
            parse("6/2pi").unwrap(),
            bin(BinaryOp::Div, lit(6), bin(BinaryOp::Mul, lit(2), pi))
        );
        assert_eq!(
            parse("(1)(2)").unwrap(),
            bin(BinaryOp::Mul, lit(1), lit(2))
        );
    }

    #[test]
    fn test_implicit_multiplication_keeps_mod_and_power() {
        assert_eq!(parse("7 mod 3").unwrap(), bin(BinaryOp::Mod, lit(7), lit(3)));
        assert_eq!(
            parse("2pi^2").unwrap(),
            bin(
                BinaryOp::Mul,
                lit(2),
                bin(BinaryOp::Pow, Expr::Variable("pi".into()), lit(2))
            )
        );
    }

    #[test]
    fn test_syntax_errors() {
        for input in ["", "2 +", "(1 + 2", "1 2", "2 * * 3", "sin(1,", ")"] {
            let err = parse(input).unwrap_err();
            assert!(
                err.message().starts_with("Syntax error"),
                "{:?} -> {}",
                input,
                err
            );
        }
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}1{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert!(parse(&deep).is_err());

        let ok = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(parse(&ok).is_ok());
    }
}
