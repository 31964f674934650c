#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(
    clippy::needless_return,
    clippy::missing_docs_in_private_items,
    clippy::missing_errors_doc,
    clippy::non_ascii_literal
)]

//! Smartcalc, a crate for evaluating single-line arithmetic expressions.
//!
//! The easiest way to use this crate is with the
//! [`calculate`](fn.calculate.html) function, which returns either the
//! rendered result or the `"Error"` marker:
//!
//! ```
//! assert_eq!(smartcalc::calculate("3+5*2"), "13");
//! assert_eq!(smartcalc::calculate("10/0"), "Error");
//! ```
//!
//! The reason of a failure is available through
//! [`evaluate_expression`](fn.evaluate_expression.html), and the raw number
//! through [`evaluate`](fn.evaluate.html):
//!
//! ```
//! use smartcalc::{evaluate, evaluate_expression, ErrorKind};
//!
//! assert_eq!(evaluate_expression("2/3"), Ok("0.6666667".into()));
//! assert_eq!(evaluate_expression("ln(0)"), Err(ErrorKind::DomainError));
//! assert_eq!(evaluate("2^-1"), Ok(0.5));
//! ```
//!
//! Expressions with a variable can be sampled over an interval, to draw the
//! graph of a function:
//!
//! ```
//! let samples = smartcalc::sample("sqrt(x)", "x", -1.0, 1.0, 3).unwrap();
//! assert_eq!(samples.gaps(), 1);
//! ```
//!
//! # Language definition
//!
//! The language implemented by smartcalc can contain the following elements,
//! without any whitespace:
//!
//! - number literals: `12`, `0.5`, `1E5`, `2.5E(-3)`;
//! - the `Pi` constant;
//! - left and right parenthesis. Parentheses left open at the end of the
//!   input are closed implicitly, `ln(sin(0.5` is the same as
//!   `ln(sin(0.5))`. An extra `)` is an error;
//! - mathematical operators: `+` for addition, `-` for subtraction,
//!   `*` for multiplication, `/` for division, `mod` for the remainder
//!   (with the sign of the dividend) and `^` for right-associative
//!   exponentiation;
//! - unary minus, which can be repeated (`--1`) and follows any operator
//!   (`2*-3`). A single unary plus is only allowed at the very start;
//! - function call: `sin(a)`, `atan(22.0)`. The available functions are
//!   `sin`, `cos`, `tan`, `asin`, `acos`, `atan`, `ln`, `log` (base 10) and
//!   `sqrt`. Arguments outside of a function domain are errors.
//!
//! Any other symbol is forbidden in the input.
//!
//! # Technical details
//!
//! smartcalc is based on an AST interpreter, with a precedence climbing
//! parser. It works only with `f64` data. Results are rendered with at most
//! 7 decimals, and may not be longer than 256 characters.

#[macro_use]
extern crate lazy_static;

mod ast;
mod error;
mod expr;
mod lexer;
mod parser;
mod sampler;
mod token;
mod util;

pub use ast::Ast;
pub use error::{ErrorKind, SampleError, ERROR_SENTINEL};
pub use expr::{calculate, evaluate, evaluate_expression, Expr};
pub use lexer::tokenize;
pub use parser::parse;
pub use sampler::{
    sample, sample_sequential, substitute, Sample, SampleSet, SamplerConfig, Viewport,
    DEFAULT_SAMPLE_COUNT, MAX_VALUE_AREA,
};
pub use token::{Function, Op, Token};
pub use util::{format_result, MAX_RESULT_LEN};
