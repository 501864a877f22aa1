use std::str::Chars;

use kalkspan::{Span, Spand};
use log::debug;
use thiserror::Error;

use crate::Dialect;
use crate::token::{Token, TokenKind};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexErrorKind {
    #[error("unexpected input")]
    UnexpectedInput,
    #[error("integer literal out of bounds")]
    IntegerOutOfBounds,
}

pub struct Lexer<'a> {
    input:   &'a str,
    chars:   Chars<'a>,
    dialect: Dialect,

    /// start byte position of current token
    byte_start: u32,

    /// byte position of cursor
    byte: u32,

    /// `EndOfInput` was emitted or lexing failed
    done: bool,
}

const EOF: char = '\0';

pub type LexError = Spand<LexErrorKind>;
pub type LexResult<T> = Result<T, LexError>;

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self::with_dialect(input, Dialect::default())
    }

    #[must_use]
    pub fn with_dialect(input: &'a str, dialect: Dialect) -> Self {
        assert!(u32::try_from(input.len()).is_ok());

        Self {
            input,
            chars: input.chars(),
            dialect,
            byte_start: 0,
            byte: 0,
            done: false,
        }
    }

    /// Lexes the whole input, stopping at the first error.
    ///
    /// On success the last token is always [`TokenKind::EndOfInput`].
    pub fn lex_all(self) -> LexResult<Vec<Token<'a>>> {
        let tokens: Vec<_> = self.collect::<LexResult<_>>()?;
        debug!("lexed {} tokens", tokens.len());
        Ok(tokens)
    }

    fn first(&self) -> char {
        self.chars.clone().next().unwrap_or(EOF)
    }

    fn is_eof(&self) -> bool {
        self.chars.as_str().is_empty()
    }

    fn bump(&mut self) -> Option<char> {
        #[allow(clippy::cast_possible_truncation)]
        self.chars
            .next()
            .inspect(|c| self.byte += c.len_utf8() as u32)
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while !self.is_eof() && pred(self.first()) {
            self.bump();
        }
    }

    const fn make_span(&self) -> Span {
        Span::new(self.byte_start, self.byte)
    }

    fn skip_whitespace(&mut self) {
        self.eat_while(char::is_whitespace);
    }

    fn view(&self) -> &'a str {
        &self.input[self.byte_start as usize..self.byte as usize]
    }

    fn number(&mut self) -> LexResult<Token<'a>> {
        self.eat_while(|c| c.is_ascii_digit());

        let span = self.make_span();
        // only digits were eaten, so parsing can only fail on overflow
        let value = self
            .view()
            .parse()
            .map_err(|_| LexError::new(LexErrorKind::IntegerOutOfBounds, span))?;

        Ok(Token::new(TokenKind::Integer(value), span))
    }

    fn ident(&mut self) -> Token<'a> {
        self.eat_while(|c| c.is_ascii_alphanumeric() || c == '_');
        Token::new(TokenKind::Ident(self.view()), self.make_span())
    }

    fn end_of_input(&mut self) -> Token<'a> {
        self.done = true;
        self.byte_start = self.byte;
        Token::new(TokenKind::EndOfInput, self.make_span())
    }

    pub fn next_token(&mut self) -> Option<LexResult<Token<'a>>> {
        macro_rules! token {
            ($name:ident) => {
                Some(Ok(Token::new(TokenKind::$name, self.make_span())))
            };
        }

        if self.done {
            return None;
        }

        self.skip_whitespace();

        self.byte_start = self.byte;
        let Some(c) = self.bump() else {
            return Some(Ok(self.end_of_input()));
        };

        let variables = self.dialect.has_variables();

        match c {
            '(' => token!(LParen),
            ')' => token!(RParen),
            '+' => token!(Plus),
            '-' => token!(Minus),
            '*' => token!(Star),
            '/' => token!(Slash),
            '=' if variables => token!(Eq),

            '0'..='9' => {
                let result = self.number();
                self.done = result.is_err();
                Some(result)
            }
            'a'..='z' | 'A'..='Z' | '_' if variables => Some(Ok(self.ident())),

            _ => {
                self.done = true;
                Some(Err(LexError::new(
                    LexErrorKind::UnexpectedInput,
                    self.make_span(),
                )))
            }
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = LexResult<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_token()
    }
}
