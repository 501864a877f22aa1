use std::hash::BuildHasher;

use kalkrt::{Env, RuntimeError, RuntimeResult, Value};
use kalkspan::{Span, Spand};
use log::trace;

use crate::ast::{Expr, ExprKind, InfixOp, PrefixOp};

pub type EvalError = Spand<RuntimeError>;
pub type EvalResult<T> = Result<T, EvalError>;

trait Locate<T> {
    fn at(self, span: Span) -> EvalResult<T>;
}

impl<T> Locate<T> for RuntimeResult<T> {
    fn at(self, span: Span) -> EvalResult<T> {
        self.map_err(|err| EvalError::new(err, span))
    }
}

/// Evaluates `expr` bottom-up.
///
/// Division by zero is reported at the divisor, an unknown variable at its
/// use. Assignments write into `env` even when a later part of the line fails.
pub fn evaluate<S: BuildHasher>(expr: &Expr<'_>, env: &mut Env<S>) -> EvalResult<Value> {
    let value = match &expr.kind {
        ExprKind::Integer(int) => Value::from(*int),
        ExprKind::Prefix { op, expr } => {
            let value = evaluate(expr, env)?;
            match op {
                PrefixOp::Pos => value,
                PrefixOp::Neg => -value,
            }
        }
        ExprKind::Infix { op, lhs, rhs } => {
            let lhs = evaluate(lhs, env)?;
            let rhs_value = evaluate(rhs, env)?;
            let result = match op {
                InfixOp::Add => lhs + rhs_value,
                InfixOp::Sub => lhs - rhs_value,
                InfixOp::Mul => lhs * rhs_value,
                InfixOp::Div => lhs / rhs_value,
            };
            result.at(rhs.span)?
        }
        ExprKind::Assign { name, value } => {
            let value = evaluate(value, env)?;
            env.assign(name, value);
            value
        }
        ExprKind::Var(name) => env.try_get(name).at(expr.span)?,
    };

    trace!("{expr} => {value}");
    Ok(value)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Dialect;
    use crate::lexer::Lexer;
    use crate::parser::parse;

    fn eval_in(input: &str, dialect: Dialect, env: &mut Env) -> EvalResult<i64> {
        let tokens = Lexer::with_dialect(input, dialect).lex_all().unwrap();
        let expr = parse(tokens).unwrap();
        evaluate(&expr, env).map(i64::from)
    }

    fn eval(input: &str) -> EvalResult<i64> {
        eval_in(input, Dialect::Arithmetic, &mut Env::new())
    }

    #[test]
    fn arithmetic() {
        assert_eq!(eval("1 + 2 * 3"), Ok(7));
        assert_eq!(eval("(1 + 2) * 3"), Ok(9));
        assert_eq!(eval("10 - 4 - 3"), Ok(3));
        assert_eq!(eval("100 / 10 / 5"), Ok(2));
        assert_eq!(eval("7 / 2"), Ok(3));
        assert_eq!(eval("-7 / 2"), Ok(-3));
        assert_eq!(eval("4294967295 * 2"), Ok(8_589_934_590));
    }

    #[test]
    fn unary() {
        assert_eq!(eval("- - 5"), Ok(5));
        assert_eq!(eval("- - - 5"), Ok(-5));
        assert_eq!(eval("+5"), Ok(5));
        assert_eq!(eval("-(2 - 7)"), Ok(5));
    }

    #[test]
    fn divide_by_zero() {
        let err = eval("1 / 0").unwrap_err();
        assert_eq!(err.kind, RuntimeError::DivisionByZero);
        assert_eq!(err.to_string(), "divide by zero error");
        assert_eq!(err.span, Span::new(4, 5));

        let err = eval("6 / (3 - 3)").unwrap_err();
        assert_eq!(err.span, Span::new(4, 11));
    }

    #[test]
    fn wraps_on_overflow() {
        let big = "4294967295 * 4294967295 * 4294967295";
        let expected = 4_294_967_295_i64
            .wrapping_mul(4_294_967_295)
            .wrapping_mul(4_294_967_295);
        assert_eq!(eval(big), Ok(expected));
    }

    #[test]
    fn rendering_round_trips() {
        for input in [
            "1 + 2 * 3",
            "(1 + 2) * 3",
            "10 - 4 - 3",
            "100 / 10 / 5",
            "- - - 5",
            "-2 * -(3 + +4) / 2",
            "((7))",
        ] {
            let expr = parse(Lexer::new(input).lex_all().unwrap()).unwrap();
            let rendered = expr.to_string();
            assert_eq!(eval(&rendered), eval(input), "{input} -> {rendered}");
        }
    }

    #[test]
    fn assignment_persists_in_env() {
        let mut env = Env::new();
        let vars = Dialect::Variables;
        assert_eq!(eval_in("x = 6", vars, &mut env), Ok(6));
        assert_eq!(eval_in("y = x * 7", vars, &mut env), Ok(42));
        assert_eq!(eval_in("x = y - x", vars, &mut env), Ok(36));
        assert_eq!(eval_in("a = b = 2", vars, &mut env), Ok(2));
        assert_eq!(env.try_get("b"), Ok(Value::new(2)));
        assert_eq!(env.try_get("x"), Ok(Value::new(36)));
    }

    #[test]
    fn undefined_variable() {
        let mut env = Env::new();
        let err = eval_in("1 + nope", Dialect::Variables, &mut env).unwrap_err();
        assert_eq!(
            err.kind,
            RuntimeError::UndefinedVariable("nope".to_string())
        );
        assert_eq!(err.span, Span::new(4, 8));
        assert_eq!(err.to_string(), "use of undefined variable \"nope\"");
    }
}
