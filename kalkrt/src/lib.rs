pub mod arith;
pub mod env;
pub mod value;

pub use env::Env;
pub use value::Value;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("divide by zero error")]
    DivisionByZero,
    #[error("use of undefined variable \"{0}\"")]
    UndefinedVariable(String),
}

pub type RuntimeResult<T> = Result<T, RuntimeError>;
