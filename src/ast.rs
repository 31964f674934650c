use crate::token::{Function, Op};

/// Ast nodes for the expressions
#[derive(Debug, Clone)]
pub enum Ast {
    /// A constant value
    Value(f64),
    /// -<arg>
    Neg(Box<Ast>),
    /// <left> <op> <right>
    Binary(Op, Box<Ast>, Box<Ast>),
    /// fn(<arg>)
    Function(Function, Box<Ast>),
}

impl PartialEq<Self> for Ast {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Ast::Value(v), Ast::Value(v2)) => v.to_le_bytes() == v2.to_le_bytes(),
            (Ast::Neg(a), Ast::Neg(a2)) => a == a2,
            (Ast::Binary(op, a, b), Ast::Binary(op2, a2, b2)) => op == op2 && a == a2 && b == b2,
            (Ast::Function(f, a), Ast::Function(f2, a2)) => f == f2 && a == a2,
            _ => false,
        }
    }
}
impl Eq for Ast {}

impl Ast {
    /// Build `<left> <op> <right>`
    pub fn binary(op: Op, left: Self, right: Self) -> Self {
        Self::Binary(op, Box::new(left), Box::new(right))
    }

    /// Build `-<arg>`
    pub fn neg(arg: Self) -> Self {
        Self::Neg(Box::new(arg))
    }

    /// Build `fn(<arg>)`
    pub fn call(function: Function, arg: Self) -> Self {
        Self::Function(function, Box::new(arg))
    }

    /// If the AST node correspond to a constant, get `Some(constant)`. Else,
    /// get `None`
    pub fn value(&self) -> Option<f64> {
        if let Self::Value(value) = *self {
            Some(value)
        } else {
            None
        }
    }

    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Self::Value(_) => 1,
            Self::Neg(arg) | Self::Function(_, arg) => 1 + arg.size(),
            Self::Binary(_, left, right) => 1 + left.size() + right.size(),
        }
    }
}
