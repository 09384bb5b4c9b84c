// AST (Abstract Syntax Tree) definitions for hoc expressions

use super::lexer::LexWarning;
use std::fmt;

/// Source location information for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
}

impl SourceLocation {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// Named constants of the language.
///
/// The lexer classifies an identifier as a constant when it matches one of
/// these names exactly; the parser then replaces it with its numeric value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
    Gamma,
    Deg,
    Phi,
}

impl Constant {
    pub const ALL: [Constant; 5] = [
        Constant::Pi,
        Constant::E,
        Constant::Gamma,
        Constant::Deg,
        Constant::Phi,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "PI" => Some(Constant::Pi),
            "E" => Some(Constant::E),
            "GAMMA" => Some(Constant::Gamma),
            "DEG" => Some(Constant::Deg),
            "PHI" => Some(Constant::Phi),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Constant::Pi => "PI",
            Constant::E => "E",
            Constant::Gamma => "GAMMA",
            Constant::Deg => "DEG",
            Constant::Phi => "PHI",
        }
    }

    pub fn value(self) -> f64 {
        match self {
            Constant::Pi => std::f64::consts::PI,
            Constant::E => std::f64::consts::E,
            Constant::Gamma => 0.577_215_664_901_532_9, // Euler-Mascheroni
            Constant::Deg => 57.295_779_513_082_32,     // degrees per radian
            Constant::Phi => 1.618_033_988_749_895,     // golden ratio
        }
    }
}

/// Built-in single-argument functions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Sin,
    Cos,
    Atan,
    Log,
    Log10,
    Exp,
    Sqrt,
    Abs,
    Int,
}

impl Builtin {
    pub const ALL: [Builtin; 9] = [
        Builtin::Sin,
        Builtin::Cos,
        Builtin::Atan,
        Builtin::Log,
        Builtin::Log10,
        Builtin::Exp,
        Builtin::Sqrt,
        Builtin::Abs,
        Builtin::Int,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sin" => Some(Builtin::Sin),
            "cos" => Some(Builtin::Cos),
            "atan" => Some(Builtin::Atan),
            "log" => Some(Builtin::Log),
            "log10" => Some(Builtin::Log10),
            "exp" => Some(Builtin::Exp),
            "sqrt" => Some(Builtin::Sqrt),
            "abs" => Some(Builtin::Abs),
            "int" => Some(Builtin::Int),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Sin => "sin",
            Builtin::Cos => "cos",
            Builtin::Atan => "atan",
            Builtin::Log => "log",
            Builtin::Log10 => "log10",
            Builtin::Exp => "exp",
            Builtin::Sqrt => "sqrt",
            Builtin::Abs => "abs",
            Builtin::Int => "int",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Plus,  // +x
    Minus, // -x
}

impl UnaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Plus => "+",
            UnaryOp::Minus => "-",
        }
    }
}

/// Binary operators.
///
/// All five share one precedence level and associate to the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// A reference to a named variable
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
}

impl Variable {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Expression nodes.
///
/// Every node owns its children, so a parsed statement is always a tree.
/// `Parentheses` is kept as its own node so that rendered graphs show the
/// grouping written in the source.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Variable(Variable),
    Assignment {
        target: Variable,
        value: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Exponentiation {
        base: Box<Expr>,
        exponent: Box<Expr>,
    },
    Function {
        builtin: Builtin,
        argument: Box<Expr>,
    },
    Parentheses(Box<Expr>),
}

impl Expr {
    pub fn variable(name: impl Into<String>) -> Self {
        Expr::Variable(Variable::new(name))
    }

    pub fn assignment(target: impl Into<String>, value: Expr) -> Self {
        Expr::Assignment {
            target: Variable::new(target),
            value: Box::new(value),
        }
    }

    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn exponentiation(base: Expr, exponent: Expr) -> Self {
        Expr::Exponentiation {
            base: Box::new(base),
            exponent: Box::new(exponent),
        }
    }

    pub fn function(builtin: Builtin, argument: Expr) -> Self {
        Expr::Function {
            builtin,
            argument: Box::new(argument),
        }
    }

    pub fn parentheses(inner: Expr) -> Self {
        Expr::Parentheses(Box::new(inner))
    }
}

/// Formats a numeric literal the way it is shown in listings and graphs.
///
/// Integral values keep a trailing `.0` so literals never read as integers.
/// Infinity, which only arises from an overflowing literal, is written as a
/// literal that overflows again when read back.
pub fn format_number(value: f64) -> String {
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}1e999", sign);
    }
    format!("{:?}", value)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(value) => write!(f, "{}", format_number(*value)),
            Expr::Variable(var) => write!(f, "{}", var.name),
            Expr::Assignment { target, value } => write!(f, "{} = {}", target.name, value),
            Expr::Unary { op, operand } => write!(f, "{}{}", op.symbol(), operand),
            Expr::Binary { op, left, right } => write!(f, "{} {} {}", left, op.symbol(), right),
            Expr::Exponentiation { base, exponent } => write!(f, "{} ^ {}", base, exponent),
            Expr::Function { builtin, argument } => write!(f, "{}({})", builtin.name(), argument),
            Expr::Parentheses(inner) => write!(f, "({})", inner),
        }
    }
}

/// A parsed source text: its statements in source order, plus any
/// lexical warnings raised while scanning it.
#[derive(Debug, Clone)]
pub struct Program {
    pub statements: Vec<Expr>,
    pub warnings: Vec<LexWarning>,
}
