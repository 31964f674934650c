use crate::ast::Ast;
use crate::error::{ErrorKind, ERROR_SENTINEL};
use crate::lexer::Lexer;
use crate::parser;
use crate::token::{Function, Op};
use crate::util::format_result;
use tracing::{debug, trace};

/// `tan` is undefined where the cosine of its argument is this close to zero
const TAN_POLE_EPSILON: f64 = 1e-7;

/// Evaluate a single expression from `input` to a number.
///
/// Returns `Ok(result)` if the evaluation is successful, or `Err(kind)` with
/// the first failure met while lexing, parsing or evaluating the expression.
///
/// # Example
///
/// ```
/// # use smartcalc::{evaluate, ErrorKind};
/// assert_eq!(evaluate("45-2^3"), Ok(37.0));
/// assert_eq!(evaluate("10/0"), Err(ErrorKind::DivisionByZero));
/// ```
pub fn evaluate(input: &str) -> Result<f64, ErrorKind> {
    Expr::parse(input).and_then(|expr| expr.eval())
}

/// Evaluate a single expression from `input`, and render the result.
///
/// # Example
///
/// ```
/// # use smartcalc::{evaluate_expression, ErrorKind};
/// assert_eq!(evaluate_expression("7mod3"), Ok("1".to_owned()));
/// assert_eq!(evaluate_expression("sqrt(-1)"), Err(ErrorKind::DomainError));
/// ```
pub fn evaluate_expression(input: &str) -> Result<String, ErrorKind> {
    let result = evaluate(input).and_then(format_result);
    if let Err(kind) = result {
        debug!(input, error = %kind, "expression rejected");
    }
    result
}

/// Evaluate a single expression from `input`, returning either the rendered
/// result or the `"Error"` marker.
///
/// # Example
///
/// ```
/// # use smartcalc::calculate;
/// assert_eq!(calculate("1+2"), "3");
/// assert_eq!(calculate("1*+2"), "Error");
/// ```
#[must_use]
pub fn calculate(input: &str) -> String {
    evaluate_expression(input).unwrap_or_else(|_| ERROR_SENTINEL.to_owned())
}

/// A parsed mathematical expression.
///
/// # Examples
/// ```
/// # use smartcalc::Expr;
/// let expr = Expr::parse("3+5*2").unwrap();
/// assert_eq!(expr.eval(), Ok(13.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    ast: Ast,
}

impl Expr {
    /// Parse the given mathematical `expression` into an `Expr`.
    ///
    /// # Examples
    /// ```
    /// # use smartcalc::Expr;
    /// // A valid expression
    /// assert!(Expr::parse("3+5*2").is_ok());
    /// // an invalid expression
    /// assert!(Expr::parse("3eff+5*2").is_err());
    /// ```
    pub fn parse(expression: &str) -> Result<Self, ErrorKind> {
        let tokens = Lexer::new(expression).tokenize()?;
        trace!(count = tokens.len(), "lexed");
        let ast = parser::parse(tokens)?;
        trace!(nodes = ast.size(), "parsed");
        Ok(Self { ast })
    }

    /// Evaluate the expression.
    ///
    /// Evaluation stops at the first failure, no partial value is produced.
    pub fn eval(&self) -> Result<f64, ErrorKind> {
        Self::inner_eval(&self.ast)
    }

    /// The tree of the expression
    pub fn ast(&self) -> &Ast {
        &self.ast
    }

    fn inner_eval(ast: &Ast) -> Result<f64, ErrorKind> {
        let value = match *ast {
            Ast::Value(number) => number,
            Ast::Neg(ref arg) => -Self::inner_eval(arg)?,
            Ast::Binary(op, ref left, ref right) => {
                let left = Self::inner_eval(left)?;
                let right = Self::inner_eval(right)?;
                apply_op(op, left, right)?
            }
            Ast::Function(function, ref arg) => call(function, Self::inner_eval(arg)?)?,
        };
        finite(value)
    }
}

fn apply_op(op: Op, left: f64, right: f64) -> Result<f64, ErrorKind> {
    Ok(match op {
        Op::Plus => left + right,
        Op::Minus => left - right,
        Op::Mul => left * right,
        Op::Div | Op::Mod if right == 0.0 => return Err(ErrorKind::DivisionByZero),
        Op::Div => left / right,
        // same sign as the dividend
        Op::Mod => libm::fmod(left, right),
        Op::Exp => libm::pow(left, right),
    })
}

/// Call `function`, checking `arg` against the function domain first
fn call(function: Function, arg: f64) -> Result<f64, ErrorKind> {
    let in_domain = match function {
        Function::Asin | Function::Acos => (-1.0..=1.0).contains(&arg),
        Function::Ln | Function::Log => arg > 0.0,
        Function::Sqrt => arg >= 0.0,
        Function::Tan => libm::cos(arg).abs() > TAN_POLE_EPSILON,
        Function::Sin | Function::Cos | Function::Atan => true,
    };
    if !in_domain {
        debug!(function = function.name(), arg, "argument outside of the domain");
        return Err(ErrorKind::DomainError);
    }

    Ok(match function {
        Function::Sin => libm::sin(arg),
        Function::Cos => libm::cos(arg),
        Function::Tan => {
            let value = libm::tan(arg);
            if value.abs() <= TAN_POLE_EPSILON {
                0.0
            } else {
                value
            }
        }
        Function::Asin => libm::asin(arg),
        Function::Acos => libm::acos(arg),
        Function::Atan => libm::atan(arg),
        Function::Ln => libm::log(arg),
        Function::Log => libm::log10(arg),
        Function::Sqrt => libm::sqrt(arg),
    })
}

fn finite(value: f64) -> Result<f64, ErrorKind> {
    if value.is_nan() {
        Err(ErrorKind::DomainError)
    } else if value.is_infinite() {
        Err(ErrorKind::Overflow)
    } else {
        Ok(value)
    }
}
