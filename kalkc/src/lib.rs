use crate::ast::Expr;
use crate::lexer::{LexError, Lexer};
use crate::parser::{ParseError, Parser};
use crate::token::Token;

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;

/// Which grammar the front end accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Dialect {
    /// Integers, parentheses and `+ - * /`.
    #[default]
    Arithmetic,
    /// Arithmetic plus identifiers and `name = expr` assignments.
    Variables,
}

impl Dialect {
    #[must_use]
    pub const fn has_variables(self) -> bool {
        matches!(self, Self::Variables)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    Lex(LexError),
    Parse(ParseError),
}

impl From<LexError> for CompileError {
    fn from(value: LexError) -> Self {
        Self::Lex(value)
    }
}

impl From<ParseError> for CompileError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

pub fn tokenize(input: &str, dialect: Dialect) -> Result<Vec<Token<'_>>, LexError> {
    Lexer::with_dialect(input, dialect).lex_all()
}

/// Tokenizes and parses one line.
pub fn compile(input: &str, dialect: Dialect) -> Result<Expr<'_>, CompileError> {
    let tokens = tokenize(input, dialect)?;
    let expr = Parser::new(tokens).parse()?;
    Ok(expr)
}
