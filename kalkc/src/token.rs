use std::fmt::Display;

use kalkspan::Spand;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind<'a> {
    Integer(u32),
    Ident(&'a str),

    Plus,
    Minus,
    Star,
    Slash,

    Eq,

    LParen,
    RParen,

    /// Synthetic, always last, with an empty span.
    EndOfInput,
}

pub type Token<'a> = Spand<TokenKind<'a>>;

impl TokenKind<'_> {
    #[must_use]
    pub const fn is_end(&self) -> bool {
        matches!(self, Self::EndOfInput)
    }
}

impl Display for TokenKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(x) => write!(f, "{x}"),
            Self::Ident(x) => write!(f, "{x}"),

            Self::Plus => write!(f, "+"),
            Self::Minus => write!(f, "-"),
            Self::Star => write!(f, "*"),
            Self::Slash => write!(f, "/"),
            Self::Eq => write!(f, "="),
            Self::LParen => write!(f, "("),
            Self::RParen => write!(f, ")"),

            Self::EndOfInput => write!(f, "end of input"),
        }
    }
}
