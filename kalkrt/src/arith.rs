//! Integer arithmetic on [`Value`].
//!
//! All operations wrap on overflow like native two's-complement integers.
//! Division is the only fallible one.
use std::ops::{Add, Div, Mul, Neg, Sub};

use crate::value::Value;
use crate::{RuntimeError, RuntimeResult};

macro_rules! infix_impl {
    ($trayt:ident::$op:ident => $wrapping:ident) => {
        impl $trayt for Value {
            type Output = RuntimeResult<Self>;

            #[inline]
            fn $op(self, rhs: Self) -> Self::Output {
                Ok(Self::new(self.as_int().$wrapping(rhs.as_int())))
            }
        }
    };
}

infix_impl!(Add::add => wrapping_add);
infix_impl!(Sub::sub => wrapping_sub);
infix_impl!(Mul::mul => wrapping_mul);

impl Div for Value {
    type Output = RuntimeResult<Self>;

    fn div(self, rhs: Self) -> Self::Output {
        match rhs.as_int() {
            0 => Err(RuntimeError::DivisionByZero),
            rhs => Ok(Self::new(self.as_int().wrapping_div(rhs))),
        }
    }
}

impl Neg for Value {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(self.as_int().wrapping_neg())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn v(int: i64) -> Value {
        Value::new(int)
    }

    #[test]
    fn basic_ops() {
        assert_eq!(v(2) + v(3), Ok(v(5)));
        assert_eq!(v(2) - v(3), Ok(v(-1)));
        assert_eq!(v(-4) * v(3), Ok(v(-12)));
        assert_eq!(v(7) / v(2), Ok(v(3)));
        assert_eq!(v(-7) / v(2), Ok(v(-3)));
        assert_eq!(-v(9), v(-9));
    }

    #[test]
    fn division_by_zero() {
        assert_eq!(v(1) / v(0), Err(RuntimeError::DivisionByZero));
        assert_eq!(v(0) / v(0), Err(RuntimeError::DivisionByZero));
    }

    #[test]
    fn overflow_wraps() {
        assert_eq!(v(i64::MAX) + v(1), Ok(v(i64::MIN)));
        assert_eq!(v(i64::MIN) - v(1), Ok(v(i64::MAX)));
        assert_eq!(v(i64::MIN) / v(-1), Ok(v(i64::MIN)));
        assert_eq!(-v(i64::MIN), v(i64::MIN));
    }
}
