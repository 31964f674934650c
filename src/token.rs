/// Possible tokens to find in the input string
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// A number literal, with the text it was read from
    Number(f64, String),
    /// A binary operator
    Op(Op),
    /// A built-in function. The lexer only produces it when a `(` follows.
    Function(Function),
    /// A name in front of `(` which is not a built-in function
    Unknown(String),
    /// The `Pi` constant
    Pi,
    /// Left parenthesis
    LParen,
    /// Right parenthesis
    RParen,
}

/// Allowed operators in the algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `mod`
    Mod,
    /// `^`
    Exp,
}

impl Op {
    /// Get the operator precedence. Operators with higher precedence should be
    /// evaluated first.
    #[must_use]
    pub fn precedence(self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div | Self::Mod => 2,
            Self::Exp => 3,
        }
    }

    /// Check if the operator is left associative
    #[must_use]
    pub fn is_left_associative(self) -> bool {
        match self {
            Self::Plus | Self::Minus | Self::Mul | Self::Div | Self::Mod => true,
            Self::Exp => false,
        }
    }

    /// Check if the operator is right associative
    #[must_use]
    pub fn is_right_associative(self) -> bool {
        !self.is_left_associative()
    }
}

/// Built-in functions of one argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    /// Sine, in radians
    Sin,
    /// Cosine, in radians
    Cos,
    /// Tangent, in radians
    Tan,
    /// Arcsine, defined on `[-1, 1]`
    Asin,
    /// Arccosine, defined on `[-1, 1]`
    Acos,
    /// Arctangent
    Atan,
    /// Natural logarithm
    Ln,
    /// Base 10 logarithm
    Log,
    /// Square root
    Sqrt,
}

impl Function {
    /// The name of the function, as written in expressions
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Ln => "ln",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
        }
    }
}
