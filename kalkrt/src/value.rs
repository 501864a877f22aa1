use std::fmt::Display;

/// Result of evaluating an expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Value(i64);

impl Value {
    #[must_use]
    #[inline]
    pub const fn new(int: i64) -> Self {
        Self(int)
    }

    #[must_use]
    #[inline]
    pub const fn as_int(self) -> i64 {
        self.0
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self(i64::from(value))
    }
}

impl From<Value> for i64 {
    fn from(value: Value) -> Self {
        value.0
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
