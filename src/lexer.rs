use crate::error::ErrorKind;
use crate::token::{Op, Token};
use crate::util::keyword_prefix;
use std::iter::Peekable;
use std::str::Chars;
use tracing::debug;

/// Split `input` into tokens.
///
/// The whole input is rejected at the first character which can not start or
/// continue a token, including any whitespace.
///
/// # Examples
///
/// ```
/// # use smartcalc::{tokenize, ErrorKind};
/// assert_eq!(tokenize("7mod3").map(|tokens| tokens.len()), Ok(3));
/// assert_eq!(tokenize("1 + 2"), Err(ErrorKind::InvalidCharacter));
/// ```
pub fn tokenize(input: &str) -> Result<Vec<Token>, ErrorKind> {
    Lexer::new(input).tokenize()
}

/// An helper struct for lexing the input
pub struct Lexer<'a> {
    input: Peekable<Chars<'a>>,
}

impl<'a> Lexer<'a> {
    pub fn new(string: &'a str) -> Lexer<'a> {
        Lexer {
            input: string.chars().peekable(),
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>, ErrorKind> {
        let mut output = Vec::new();
        while let Some(&c) = self.input.peek() {
            match c {
                c if c.is_ascii_digit() => output.push(self.number()?),
                c if c.is_ascii_alphabetic() => self.word(&mut output)?,
                _ => {
                    self.input.next();
                    let token = match c {
                        '+' => Token::Op(Op::Plus),
                        '-' => Token::Op(Op::Minus),
                        '*' => Token::Op(Op::Mul),
                        '/' => Token::Op(Op::Div),
                        '^' => Token::Op(Op::Exp),
                        '(' => Token::LParen,
                        ')' => Token::RParen,
                        other => return Err(invalid(other)),
                    };
                    output.push(token);
                }
            }
        }
        Ok(output)
    }

    /// Read `digits ['.' digits] ['E' (digits | '(' ['-'] digits ')')]`
    fn number(&mut self) -> Result<Token, ErrorKind> {
        let mut lexeme = self.digits();
        if self.input.next_if_eq(&'.').is_some() {
            let fraction = self.digits();
            if fraction.is_empty() {
                return Err(invalid('.'));
            }
            lexeme.push('.');
            lexeme.push_str(&fraction);
        }

        let mut literal = lexeme.clone();
        if self.input.next_if_eq(&'E').is_some() {
            let exponent = if self.input.next_if_eq(&'(').is_some() {
                let sign = if self.input.next_if_eq(&'-').is_some() { "-" } else { "" };
                let digits = self.digits();
                if digits.is_empty() || self.input.next_if_eq(&')').is_none() {
                    return Err(invalid('E'));
                }
                lexeme.push_str(&format!("E({}{})", sign, digits));
                format!("{}{}", sign, digits)
            } else {
                let digits = self.digits();
                if digits.is_empty() {
                    return Err(invalid('E'));
                }
                lexeme.push('E');
                lexeme.push_str(&digits);
                digits
            };
            literal.push('e');
            literal.push_str(&exponent);
        }

        // Overflowing literals parse to infinity, and are reported by the evaluator
        let value = literal.parse::<f64>().map_err(|_| invalid('E'))?;
        Ok(Token::Number(value, lexeme))
    }

    fn digits(&mut self) -> String {
        let mut digits = String::new();
        while let Some(c) = self.input.next_if(char::is_ascii_digit) {
            digits.push(c);
        }
        digits
    }

    /// Split a run of letters into keywords. A function name must be directly
    /// followed by `(`. Letters which do not start a keyword are only allowed
    /// in front of `(`, where they make an unknown function call.
    fn word(&mut self, output: &mut Vec<Token>) -> Result<(), ErrorKind> {
        let mut word = String::new();
        while let Some(c) = self.input.next_if(char::is_ascii_alphabetic) {
            word.push(c);
        }

        let mut rest = word.as_str();
        while !rest.is_empty() {
            if let Some((len, token)) = keyword_prefix(rest) {
                rest = &rest[len..];
                if let Token::Function(_) = token {
                    if !rest.is_empty() || self.input.peek() != Some(&'(') {
                        debug!(word = %word, "function name without a parenthesis");
                        return Err(ErrorKind::InvalidCharacter);
                    }
                }
                output.push(token.clone());
            } else if self.input.peek() == Some(&'(') {
                output.push(Token::Unknown(rest.to_owned()));
                return Ok(());
            } else {
                debug!(word = %word, "unknown identifier");
                return Err(ErrorKind::InvalidCharacter);
            }
        }
        Ok(())
    }
}

fn invalid(c: char) -> ErrorKind {
    debug!(character = ?c, "invalid character");
    ErrorKind::InvalidCharacter
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::{Function, Op, Token};
    use test_case::test_case;

    fn number(value: f64, lexeme: &str) -> Token {
        Token::Number(value, lexeme.to_string())
    }

    #[test_case("1+2" => Ok(vec![number(1.0, "1"), Token::Op(Op::Plus), number(2.0, "2")]) ; "addition is lexed properly")]
    #[test_case("7mod3" => Ok(vec![number(7.0, "7"), Token::Op(Op::Mod), number(3.0, "3")]) ; "mod is an operator")]
    #[test_case("2.5^-Pi" => Ok(vec![number(2.5, "2.5"), Token::Op(Op::Exp), Token::Op(Op::Minus), Token::Pi]) ; "constants and decimals")]
    #[test_case("sqrt(4" => Ok(vec![Token::Function(Function::Sqrt), Token::LParen, number(4.0, "4")]) ; "functions keep their parenthesis")]
    #[test_case("Pimod2" => Ok(vec![Token::Pi, Token::Op(Op::Mod), number(2.0, "2")]) ; "keywords are split from a single word")]
    #[test_case("1E5" => Ok(vec![number(1e5, "1E5")]) ; "plain exponent")]
    #[test_case("1E(-3)" => Ok(vec![number(1e-3, "1E(-3)")]) ; "signed exponent")]
    #[test_case("2.5E(2)" => Ok(vec![number(250.0, "2.5E(2)")]) ; "parenthesized unsigned exponent")]
    #[test_case("si(1)" => Ok(vec![Token::Unknown("si".to_string()), Token::LParen, number(1.0, "1"), Token::RParen]) ; "unknown call")]
    #[test_case("" => Ok(vec![]) ; "empty input")]
    #[test_case("1 + 2" => Err(ErrorKind::InvalidCharacter) ; "spaces are rejected")]
    #[test_case("1\t2" => Err(ErrorKind::InvalidCharacter) ; "tabs are rejected")]
    #[test_case("1#2" => Err(ErrorKind::InvalidCharacter) ; "unknown symbol")]
    #[test_case("2x+3" => Err(ErrorKind::InvalidCharacter) ; "free variable")]
    #[test_case("sin1" => Err(ErrorKind::InvalidCharacter) ; "function without parenthesis")]
    #[test_case("sinh(1)" => Err(ErrorKind::InvalidCharacter) ; "function name followed by letters")]
    #[test_case("3." => Err(ErrorKind::InvalidCharacter) ; "dot without decimals")]
    #[test_case(".5" => Err(ErrorKind::InvalidCharacter) ; "dot without integer part")]
    #[test_case("1E" => Err(ErrorKind::InvalidCharacter) ; "empty exponent")]
    #[test_case("1E(-3" => Err(ErrorKind::InvalidCharacter) ; "unclosed exponent")]
    #[test_case("1E(+3)" => Err(ErrorKind::InvalidCharacter) ; "plus in exponent")]
    #[test_case("pi" => Err(ErrorKind::InvalidCharacter) ; "keywords are case sensitive")]
    #[test_case("2×3" => Err(ErrorKind::InvalidCharacter) ; "non ascii")]
    fn lex(input: &str) -> Result<Vec<Token>, ErrorKind> {
        tokenize(input)
    }

    #[test]
    fn overflowing_literal() {
        let tokens = tokenize("1E400").unwrap();
        assert!(matches!(tokens[0], Token::Number(value, _) if value.is_infinite()));
    }

    #[test]
    fn no_partial_tokens() {
        // an invalid character at the end still rejects everything before it
        assert_eq!(tokenize("1+2+3+4+5+6#"), Err(ErrorKind::InvalidCharacter));
    }
}
