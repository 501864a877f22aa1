use std::fmt::Display;

use kalkspan::Spand;

use crate::token::TokenKind;

pub trait Operator: Copy + Display {
    fn from_token(kind: TokenKind<'_>) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixOp {
    Pos,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InfixOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl InfixOp {
    /// `+` and `-` bind looser than `*` and `/`.
    #[must_use]
    pub const fn is_additive(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}

impl Operator for PrefixOp {
    fn from_token(kind: TokenKind<'_>) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Pos),
            TokenKind::Minus => Some(Self::Neg),
            _ => None,
        }
    }
}

impl Operator for InfixOp {
    fn from_token(kind: TokenKind<'_>) -> Option<Self> {
        match kind {
            TokenKind::Plus => Some(Self::Add),
            TokenKind::Minus => Some(Self::Sub),
            TokenKind::Star => Some(Self::Mul),
            TokenKind::Slash => Some(Self::Div),
            _ => None,
        }
    }
}

impl Display for PrefixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pos => write!(f, "+"),
            Self::Neg => write!(f, "-"),
        }
    }
}

impl Display for InfixOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Add => write!(f, "+"),
            Self::Sub => write!(f, "-"),
            Self::Mul => write!(f, "*"),
            Self::Div => write!(f, "/"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExprKind<'a> {
    Integer(u32),

    Prefix {
        op:   PrefixOp,
        expr: Box<Expr<'a>>,
    },

    Infix {
        op:  InfixOp,
        lhs: Box<Expr<'a>>,
        rhs: Box<Expr<'a>>,
    },

    Assign {
        name:  &'a str,
        value: Box<Expr<'a>>,
    },

    Var(&'a str),
}

pub type Expr<'a> = Spand<ExprKind<'a>>;

/// Fully parenthesized, so the text re-parses to the same tree shape.
/// Assignments and variables print as the bare name.
impl Display for ExprKind<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Integer(x) => write!(f, "{x}"),
            Self::Prefix { op, expr } => write!(f, "({op}{expr})"),
            Self::Infix { op, lhs, rhs } => write!(f, "({lhs} {op} {rhs})"),
            Self::Assign { name, .. } | Self::Var(name) => write!(f, "{name}"),
        }
    }
}
