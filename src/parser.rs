use crate::ast::Ast;
use crate::error::ErrorKind;
use crate::token::{Op, Token};
use std::f64::consts::PI;
use std::iter::Peekable;
use std::vec::IntoIter;
use tracing::debug;

/// Build the tree for a sequence of tokens.
///
/// The grammar, from the lowest to the highest precedence:
///
/// ```text
/// expr    := term (('+' | '-') term)*
/// term    := power (('*' | '/' | 'mod') power)*
/// power   := unary ('^' power)?
/// unary   := '-'* primary
/// primary := NUMBER | Pi | FUNCTION '(' expr ')' | '(' expr ')'
/// ```
///
/// A single `+` is allowed at the very start of the input. Closing
/// parentheses still open at the end of the input are implied.
pub fn parse(tokens: Vec<Token>) -> Result<Ast, ErrorKind> {
    if tokens.is_empty() {
        return Err(ErrorKind::InvalidSyntax);
    }

    let mut parser = Parser {
        tokens: tokens.into_iter().peekable(),
        depth: 0,
        nesting: 0,
    };
    parser.tokens.next_if_eq(&Token::Op(Op::Plus));

    let (ast, _) = parser.expression(0)?;
    match parser.tokens.next() {
        None => Ok(ast),
        Some(Token::RParen) => Err(unbalanced()),
        Some(token) => Err(leftover(&token)),
    }
}

/// Largest height of a tree, and largest nesting of the parser itself. The
/// parser, the evaluator and the destructor of `Ast` all recurse once per
/// level.
const MAX_DEPTH: usize = 256;

/// A subtree with its height
type Node = (Ast, usize);

struct Parser {
    tokens: Peekable<IntoIter<Token>>,
    /// Number of groups currently open
    depth: usize,
    /// Number of `expression` calls currently running
    nesting: usize,
}

impl Parser {
    /// Precedence climbing over binary operators. Only operators binding at
    /// least as tight as `min_precedence` are consumed.
    fn expression(&mut self, min_precedence: u8) -> Result<Node, ErrorKind> {
        self.nesting += 1;
        if self.nesting > MAX_DEPTH {
            return Err(too_deep());
        }
        let (mut left, mut height) = self.unary()?;
        while let Some(&Token::Op(op)) = self.tokens.peek() {
            if op.precedence() < min_precedence {
                break;
            }
            self.tokens.next();
            let next_precedence = if op.is_left_associative() {
                op.precedence() + 1
            } else {
                op.precedence()
            };
            let (right, right_height) = self.expression(next_precedence)?;
            height = checked_height(height.max(right_height))?;
            left = Ast::binary(op, left, right);
        }
        self.nesting -= 1;
        Ok((left, height))
    }

    /// An even run of `-` cancels out, an odd run is a single negation
    fn unary(&mut self) -> Result<Node, ErrorKind> {
        let mut negations = 0_usize;
        while self.tokens.next_if_eq(&Token::Op(Op::Minus)).is_some() {
            negations += 1;
        }
        let (ast, height) = self.primary()?;
        if negations % 2 == 1 {
            Ok((Ast::neg(ast), checked_height(height)?))
        } else {
            Ok((ast, height))
        }
    }

    fn primary(&mut self) -> Result<Node, ErrorKind> {
        match self.tokens.next() {
            None => {
                debug!("expression ends without an operand");
                Err(ErrorKind::MissingOperand)
            }
            Some(Token::Number(value, _)) => Ok((Ast::Value(value), 1)),
            Some(Token::Pi) => Ok((Ast::Value(PI), 1)),
            Some(Token::LParen) => self.group(),
            Some(Token::Function(function)) => {
                if self.tokens.next_if_eq(&Token::LParen).is_none() {
                    return Err(ErrorKind::InvalidSyntax);
                }
                let (arg, height) = self.group()?;
                Ok((Ast::call(function, arg), checked_height(height)?))
            }
            Some(Token::RParen) if self.depth == 0 => Err(unbalanced()),
            Some(token) => Err(leftover(&token)),
        }
    }

    /// Parse the inside of a group whose `(` was already consumed
    fn group(&mut self) -> Result<Node, ErrorKind> {
        self.depth += 1;
        let inner = self.expression(0)?;
        self.depth -= 1;
        match self.tokens.next() {
            None | Some(Token::RParen) => Ok(inner),
            Some(token) => Err(leftover(&token)),
        }
    }
}

/// Height of a node above a child of height `child`
fn checked_height(child: usize) -> Result<usize, ErrorKind> {
    if child >= MAX_DEPTH {
        Err(too_deep())
    } else {
        Ok(child + 1)
    }
}

fn too_deep() -> ErrorKind {
    debug!(limit = MAX_DEPTH, "expression nested too deeply");
    ErrorKind::InvalidSyntax
}

fn unbalanced() -> ErrorKind {
    debug!("closing parenthesis without an opening one");
    ErrorKind::UnbalancedParentheses
}

fn leftover(token: &Token) -> ErrorKind {
    debug!(?token, "unexpected token");
    match token {
        Token::Unknown(_) => ErrorKind::UnknownFunction,
        _ => ErrorKind::InvalidSyntax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;
    use crate::token::Function;
    use test_case::test_case;

    fn parse_str(input: &str) -> Result<Ast, ErrorKind> {
        parse(tokenize(input)?)
    }

    fn value(v: f64) -> Ast {
        Ast::Value(v)
    }

    #[test]
    fn precedence() {
        assert_eq!(
            parse_str("1+2*3"),
            Ok(Ast::binary(
                Op::Plus,
                value(1.0),
                Ast::binary(Op::Mul, value(2.0), value(3.0))
            ))
        );
        assert_eq!(
            parse_str("7mod3-1"),
            Ok(Ast::binary(
                Op::Minus,
                Ast::binary(Op::Mod, value(7.0), value(3.0)),
                value(1.0)
            ))
        );
    }

    #[test]
    fn associativity() {
        assert_eq!(
            parse_str("8-2-1"),
            Ok(Ast::binary(
                Op::Minus,
                Ast::binary(Op::Minus, value(8.0), value(2.0)),
                value(1.0)
            ))
        );
        assert_eq!(
            parse_str("2^3^2"),
            Ok(Ast::binary(
                Op::Exp,
                value(2.0),
                Ast::binary(Op::Exp, value(3.0), value(2.0))
            ))
        );
    }

    #[test]
    fn unary_minus() {
        assert_eq!(parse_str("--1"), Ok(value(1.0)));
        assert_eq!(parse_str("---1"), Ok(Ast::neg(value(1.0))));
        // negation binds tighter than the power
        assert_eq!(
            parse_str("-2^2"),
            Ok(Ast::binary(Op::Exp, Ast::neg(value(2.0)), value(2.0)))
        );
        assert_eq!(
            parse_str("2^-1"),
            Ok(Ast::binary(Op::Exp, value(2.0), Ast::neg(value(1.0))))
        );
        assert_eq!(
            parse_str("1*-2"),
            Ok(Ast::binary(Op::Mul, value(1.0), Ast::neg(value(2.0))))
        );
    }

    #[test]
    fn leading_plus() {
        assert_eq!(parse_str("+10"), Ok(value(10.0)));
        assert_eq!(parse_str("+-1"), Ok(Ast::neg(value(1.0))));
    }

    #[test]
    fn implicit_close() {
        let closed = parse_str("ln(sin(0.5))");
        assert!(closed.is_ok());
        assert_eq!(parse_str("ln(sin(0.5)"), closed);
        assert_eq!(parse_str("ln(sin(0.5"), closed);
        assert_eq!(
            parse_str("(2+3"),
            Ok(Ast::binary(Op::Plus, value(2.0), value(3.0)))
        );
    }

    #[test]
    fn calls() {
        assert_eq!(
            parse_str("sqrt(2)^2"),
            Ok(Ast::binary(
                Op::Exp,
                Ast::call(Function::Sqrt, value(2.0)),
                value(2.0)
            ))
        );
        assert_eq!(parse_str("Pi"), Ok(value(PI)));
    }

    #[test]
    fn depth_limit() {
        let nested = |levels: usize| format!("{}1", "(".repeat(levels));
        assert_eq!(parse_str(&nested(MAX_DEPTH - 1)), Ok(value(1.0)));
        assert_eq!(parse_str(&nested(MAX_DEPTH)), Err(ErrorKind::InvalidSyntax));

        let sum = |terms: usize| vec!["1"; terms].join("+");
        assert!(parse_str(&sum(MAX_DEPTH)).is_ok());
        assert_eq!(parse_str(&sum(MAX_DEPTH + 1)), Err(ErrorKind::InvalidSyntax));

        let calls = |levels: usize| format!("{}1", "sin(".repeat(levels));
        assert!(parse_str(&calls(MAX_DEPTH - 1)).is_ok());
        assert_eq!(parse_str(&calls(MAX_DEPTH)), Err(ErrorKind::InvalidSyntax));
    }

    #[test]
    fn long_minus_run_is_collapsed() {
        let odd = format!("{}1", "-".repeat(100_001));
        assert_eq!(parse_str(&odd), Ok(Ast::neg(value(1.0))));
        let even = format!("{}1", "-".repeat(100_000));
        assert_eq!(parse_str(&even), Ok(value(1.0)));
    }

    #[test_case("" => ErrorKind::InvalidSyntax ; "empty input")]
    #[test_case("1*+2" => ErrorKind::InvalidSyntax ; "plus after an operator")]
    #[test_case("1/*2" => ErrorKind::InvalidSyntax ; "two binary operators")]
    #[test_case("++1" => ErrorKind::InvalidSyntax ; "two leading plus")]
    #[test_case("(+2)" => ErrorKind::InvalidSyntax ; "plus after a parenthesis")]
    #[test_case("*2" => ErrorKind::InvalidSyntax ; "leading binary operator")]
    #[test_case("()" => ErrorKind::InvalidSyntax ; "empty group")]
    #[test_case("2(3)" => ErrorKind::InvalidSyntax ; "juxtaposition")]
    #[test_case("2Pi" => ErrorKind::InvalidSyntax ; "juxtaposed constant")]
    #[test_case("(1)2" => ErrorKind::InvalidSyntax ; "stray number")]
    #[test_case("3+" => ErrorKind::MissingOperand ; "trailing operator")]
    #[test_case("3mod" => ErrorKind::MissingOperand ; "trailing mod")]
    #[test_case("-" => ErrorKind::MissingOperand ; "lonely minus")]
    #[test_case("+" => ErrorKind::MissingOperand ; "lonely plus")]
    #[test_case("sqrt(" => ErrorKind::MissingOperand ; "unfinished call")]
    #[test_case("2*(3+4))" => ErrorKind::UnbalancedParentheses ; "excess closer")]
    #[test_case(")1" => ErrorKind::UnbalancedParentheses ; "leading closer")]
    #[test_case("1+)" => ErrorKind::UnbalancedParentheses ; "closer after operator")]
    #[test_case("(1+)" => ErrorKind::InvalidSyntax ; "closer after operator in a group")]
    #[test_case("si(1)" => ErrorKind::UnknownFunction ; "unknown function")]
    #[test_case("2*foo(1)" => ErrorKind::UnknownFunction ; "unknown function after operator")]
    #[test_case("2foo(1)" => ErrorKind::UnknownFunction ; "juxtaposed unknown function")]
    fn errors(input: &str) -> ErrorKind {
        parse_str(input).unwrap_err()
    }
}
