use crate::error::ErrorKind;
use crate::token::{Function, Op, Token};
use hashbrown::HashMap;

/// Maximal length of a rendered result
pub const MAX_RESULT_LEN: usize = 256;

/// Number of digits kept after the decimal point in rendered results
pub const RESULT_PRECISION: usize = 7;

const MAX_KEYWORD_LEN: usize = 4;

lazy_static! {
    /// All the words the lexer knows, with the token they produce
    pub static ref KEYWORDS: HashMap<&'static str, Token> = {
        let mut map = HashMap::<&'static str, Token>::new();
        let functions = [
            Function::Sin,
            Function::Cos,
            Function::Tan,
            Function::Asin,
            Function::Acos,
            Function::Atan,
            Function::Ln,
            Function::Log,
            Function::Sqrt,
        ];
        for function in &functions {
            map.insert(function.name(), Token::Function(*function));
        }
        map.insert("mod", Token::Op(Op::Mod));
        map.insert("Pi", Token::Pi);
        map.shrink_to_fit();
        map
    };
}

/// Find the longest keyword at the start of `word`, and return its length
/// together with the corresponding token. `word` must be ASCII.
pub fn keyword_prefix(word: &str) -> Option<(usize, &'static Token)> {
    (1..=word.len().min(MAX_KEYWORD_LEN))
        .rev()
        .find_map(|len| KEYWORDS.get(&word[..len]).map(|token| (len, token)))
}

/// Render a numeric result for display.
///
/// Values within rounding distance of an integer are written without a
/// fractional part, other values keep up to 7 digits after the decimal point.
///
/// # Examples
///
/// ```
/// # use smartcalc::format_result;
/// assert_eq!(format_result(3.0), Ok("3".to_owned()));
/// assert_eq!(format_result(1.0 / 3.0), Ok("0.3333333".to_owned()));
/// assert_eq!(format_result(-2.5), Ok("-2.5".to_owned()));
/// ```
pub fn format_result(value: f64) -> Result<String, ErrorKind> {
    if value.is_nan() {
        return Err(ErrorKind::DomainError);
    }
    if value.is_infinite() {
        return Err(ErrorKind::Overflow);
    }

    let mut rendered = format!("{:.*}", RESULT_PRECISION, value);
    if rendered.contains('.') {
        let trimmed = rendered.trim_end_matches('0').trim_end_matches('.').len();
        rendered.truncate(trimmed);
    }
    if rendered == "-0" {
        rendered.remove(0);
    }

    if rendered.len() > MAX_RESULT_LEN {
        return Err(ErrorKind::ResultTooLong);
    }
    Ok(rendered)
}
