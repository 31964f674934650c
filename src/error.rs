use thiserror::Error;

/// The string returned at the user-facing boundary for every failure.
pub const ERROR_SENTINEL: &str = "Error";

/// Error type for the engine.
///
/// Every stage (lexing, parsing, evaluating, formatting) reports failures
/// with one of these kinds. They all collapse to [`ERROR_SENTINEL`] in
/// [`calculate`](fn.calculate.html).
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Unsupported symbol or whitespace in the input
    #[error("unsupported character in input")]
    InvalidCharacter,
    /// Something shaped like a function call, with an unknown name
    #[error("unknown function")]
    UnknownFunction,
    /// A `)` without a matching `(`
    #[error("unbalanced parentheses")]
    UnbalancedParentheses,
    /// An operator with nothing after it at the end of input
    #[error("missing operand")]
    MissingOperand,
    /// Any other grammar violation
    #[error("invalid syntax")]
    InvalidSyntax,
    /// Argument outside of the domain of a function, or a NaN result
    #[error("argument outside of the function domain")]
    DomainError,
    /// Division or modulo by zero
    #[error("division by zero")]
    DivisionByZero,
    /// A value became infinite
    #[error("numeric overflow")]
    Overflow,
    /// The rendered result does not fit in the output bound
    #[error("result is too long to display")]
    ResultTooLong,
}

/// Error type for the function sampler
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SampleError {
    /// The interval bounds are not finite or not in increasing order
    #[error("invalid sampling interval [{low}, {high}]")]
    InvalidInterval {
        /// Lower bound of the interval
        low: f64,
        /// Upper bound of the interval
        high: f64,
    },
}
