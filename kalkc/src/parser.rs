use kalkspan::{Span, Spand};
use log::debug;
use thiserror::Error;

use crate::ast::{Expr, ExprKind, InfixOp, Operator, PrefixOp};
use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("unexpected end of input")]
    UnexpectedEnd,
    #[error("unexpected token")]
    UnexpectedToken,
    #[error("expected \"{0}\"")]
    Expected(TokenKind<'static>),
}

pub type ParseError = Spand<ParseErrorKind>;
pub type ParseResult<T> = Result<T, ParseError>;

/// Recursive descent parser over one line of tokens.
///
/// The token list always ends with [`TokenKind::EndOfInput`] and the cursor
/// never moves past it, so there is always a current token to look at.
pub struct Parser<'a> {
    tokens:  Vec<Token<'a>>,
    current: usize,
}

impl<'a> Parser<'a> {
    #[must_use]
    pub fn new(mut tokens: Vec<Token<'a>>) -> Self {
        if !tokens.last().is_some_and(|tk| tk.kind.is_end()) {
            let hi = tokens.last().map_or(0, |tk| tk.span.hi());
            tokens.push(Token::new(TokenKind::EndOfInput, Span::new(hi, hi)));
        }
        Self { tokens, current: 0 }
    }

    fn peek_n(&self, n: usize) -> Token<'a> {
        let last = self.tokens.len() - 1;
        self.tokens[(self.current + n).min(last)]
    }

    fn peek(&self) -> Token<'a> {
        self.peek_n(0)
    }

    fn eat(&mut self) {
        if !self.peek().kind.is_end() {
            self.current += 1;
        }
    }

    fn next(&mut self) -> Token<'a> {
        let tk = self.peek();
        self.eat();
        tk
    }

    fn expect(&mut self, expect: TokenKind<'static>) -> ParseResult<Span> {
        let Token { kind, span } = self.peek();
        if kind == expect {
            self.eat();
            Ok(span)
        } else {
            Err(ParseError::new(ParseErrorKind::Expected(expect), span))
        }
    }

    fn unexpected(tk: Token<'a>) -> ParseError {
        let kind = if tk.kind.is_end() {
            ParseErrorKind::UnexpectedEnd
        } else {
            ParseErrorKind::UnexpectedToken
        };
        ParseError::new(kind, tk.span)
    }

    /// Parses the whole token list as one expression.
    pub fn parse(&mut self) -> ParseResult<Expr<'a>> {
        self.current = 0;
        let expr = self.parse_expr()?;

        let tk = self.peek();
        if !tk.kind.is_end() {
            return Err(Self::unexpected(tk));
        }

        debug!("parsed {expr}");
        Ok(expr)
    }

    pub fn parse_expr(&mut self) -> ParseResult<Expr<'a>> {
        match (self.peek(), self.peek_n(1).kind) {
            (
                Token {
                    kind: TokenKind::Ident(name),
                    span,
                },
                TokenKind::Eq,
            ) => {
                self.eat();
                self.eat();
                let value = self.parse_expr()?;
                let span = span.join(value.span);
                let kind = ExprKind::Assign {
                    name,
                    value: Box::new(value),
                };
                Ok(Expr::new(kind, span))
            }
            _ => self.parse_addition_or_subtraction(),
        }
    }

    fn parse_addition_or_subtraction(&mut self) -> ParseResult<Expr<'a>> {
        let lhs = self.parse_multiplication_or_division()?;
        self.parse_infix(lhs, true, Self::parse_multiplication_or_division)
    }

    fn parse_multiplication_or_division(&mut self) -> ParseResult<Expr<'a>> {
        let lhs = self.parse_prefix()?;
        self.parse_infix(lhs, false, Self::parse_prefix)
    }

    /// Folds `lhs (op operand)*` to the left for operators of one level.
    fn parse_infix(
        &mut self,
        mut lhs: Expr<'a>,
        additive: bool,
        operand: impl Fn(&mut Self) -> ParseResult<Expr<'a>>,
    ) -> ParseResult<Expr<'a>> {
        while let Some(op) =
            InfixOp::from_token(self.peek().kind).filter(|op| op.is_additive() == additive)
        {
            self.eat();
            let rhs = operand(self)?;
            let span = lhs.span.join(rhs.span);
            let kind = ExprKind::Infix {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
            lhs = Expr::new(kind, span);
        }

        Ok(lhs)
    }

    fn parse_prefix(&mut self) -> ParseResult<Expr<'a>> {
        let Token { kind, span } = self.peek();
        match PrefixOp::from_token(kind) {
            Some(op) => {
                self.eat();
                let expr = self.parse_prefix()?;
                let span = span.join(expr.span);
                let kind = ExprKind::Prefix {
                    op,
                    expr: Box::new(expr),
                };
                Ok(Expr::new(kind, span))
            }
            None => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> ParseResult<Expr<'a>> {
        let tk = self.next();
        let Token { kind, span } = tk;

        match kind {
            TokenKind::Integer(value) => Ok(Expr::new(ExprKind::Integer(value), span)),
            TokenKind::Ident(name) => Ok(Expr::new(ExprKind::Var(name), span)),
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                let closing = self.expect(TokenKind::RParen)?;
                Ok(Expr::new(inner.kind, span.join(closing)))
            }

            _ => Err(Self::unexpected(tk)),
        }
    }
}

/// Parses a token list produced by [`crate::lexer::Lexer::lex_all`].
pub fn parse(tokens: Vec<Token<'_>>) -> ParseResult<Expr<'_>> {
    Parser::new(tokens).parse()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Dialect;
    use crate::lexer::Lexer;

    fn parse_str(input: &str) -> ParseResult<Expr<'_>> {
        parse(Lexer::new(input).lex_all().unwrap())
    }

    fn parse_vars(input: &str) -> ParseResult<Expr<'_>> {
        parse(
            Lexer::with_dialect(input, Dialect::Variables)
                .lex_all()
                .unwrap(),
        )
    }

    fn render(input: &str) -> String {
        parse_str(input).unwrap().to_string()
    }

    #[test]
    fn precedence() {
        assert_eq!(render("1 + 2 * 3"), "(1 + (2 * 3))");
        assert_eq!(render("(1 + 2) * 3"), "((1 + 2) * 3)");
        assert_eq!(render("1 * 2 + 3 / 4"), "((1 * 2) + (3 / 4))");
    }

    #[test]
    fn left_associative() {
        assert_eq!(render("1 - 2 - 3"), "((1 - 2) - 3)");
        assert_eq!(render("8 / 4 / 2"), "((8 / 4) / 2)");
        assert_eq!(render("1 + 2 - 3 + 4"), "(((1 + 2) - 3) + 4)");
    }

    #[test]
    fn unary_chains() {
        assert_eq!(render("- - 3"), "(-(-3))");
        assert_eq!(render("+-3"), "(+(-3))");
        assert_eq!(render("-2 * -3"), "((-2) * (-3))");
        assert_eq!(render("-(1 + 2)"), "(-(1 + 2))");

        let expr = parse_str("- - 3").unwrap();
        let ExprKind::Prefix { op, expr } = expr.kind else {
            panic!("expected prefix");
        };
        assert_eq!(op, PrefixOp::Neg);
        assert!(matches!(
            expr.kind,
            ExprKind::Prefix {
                op: PrefixOp::Neg,
                ..
            }
        ));
    }

    #[test]
    fn redundant_parens() {
        assert_eq!(render("((3))"), "3");
        assert_eq!(render("1 * (3 + 4) * (2)"), "((1 * (3 + 4)) * 2)");
    }

    #[test]
    fn spans_cover_source() {
        let input = "12 + (3 * 4)";
        let expr = parse_str(input).unwrap();
        assert_eq!(expr.span, Span::new(0, 12));
        let ExprKind::Infix { lhs, rhs, .. } = expr.kind else {
            panic!("expected infix");
        };
        assert_eq!(lhs.lexeme(input), "12");
        assert_eq!(rhs.lexeme(input), "(3 * 4)");
    }

    #[test]
    fn missing_closing_paren() {
        let err = parse_str("(1 + 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Expected(TokenKind::RParen));
        assert_eq!(err.span, Span::new(6, 6));
        assert_eq!(err.to_string(), "expected \")\"");

        let err = parse_str("(1 2)").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::Expected(TokenKind::RParen));
        assert_eq!(err.span, Span::new(3, 4));
    }

    #[test]
    fn unexpected_end() {
        let err = parse_str("").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert!(err.span.is_empty());
        assert_eq!(err.to_string(), "unexpected end of input");

        let err = parse_str("1 +").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
        assert_eq!(err.span, Span::new(3, 3));
    }

    #[test]
    fn unexpected_token() {
        let err = parse_str("1 + * 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.span, Span::new(4, 5));
        assert_eq!(err.to_string(), "unexpected token");

        let err = parse_str(")").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    }

    #[test]
    fn trailing_tokens() {
        let err = parse_str("1 + 2 )").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.span, Span::new(6, 7));

        let err = parse_str("1 2").unwrap_err();
        assert_eq!(err.span, Span::new(2, 3));
    }

    #[test]
    fn missing_sentinel_is_added() {
        let tokens = vec![Token::new(TokenKind::Integer(4), Span::new(0, 1))];
        let expr = Parser::new(tokens).parse().unwrap();
        assert_eq!(expr.kind, ExprKind::Integer(4));

        let err = Parser::new(Vec::new()).parse().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedEnd);
    }

    #[test]
    fn assignment() {
        let input = "x = y = 1 + 2";
        let expr = parse_vars(input).unwrap();
        assert_eq!(expr.span, Span::new(0, 13));
        assert_eq!(expr.to_string(), "x");
        let ExprKind::Assign { name, value } = expr.kind else {
            panic!("expected assignment");
        };
        assert_eq!(name, "x");
        assert!(matches!(value.kind, ExprKind::Assign { name: "y", .. }));
    }

    #[test]
    fn variables_in_expressions() {
        assert_eq!(parse_vars("(a + b) * c").unwrap().to_string(), "((a + b) * c)");

        let err = parse_vars("1 + x = 2").unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
        assert_eq!(err.span, Span::new(6, 7));
    }
}
