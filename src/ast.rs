use std::fmt;

use crate::span::Span;

/// An abstract syntax tree (AST) node.
///
/// Each variant models one surface form of the language and carries the
/// span of source text it was parsed from. Children are owned exclusively by
/// their parent, so a parsed program is a strict tree.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    /// The whole program: zero or more definitions followed by one trailing
    /// expression.
    Program {
        /// Definitions in source order, then the trailing expression.
        nodes: Vec<Self>,
        /// Span in the source code.
        span:  Span,
    },
    /// Function definition, e.g. `add(a, b) = +(a, b)`.
    Assign {
        /// Name the function is bound to.
        name:   String,
        /// Parameter names in declaration order.
        params: Vec<String>,
        /// Body expressions, evaluated in order on each call.
        body:   Vec<Self>,
        /// Span in the source code.
        span:   Span,
    },
    /// Variable assignment, e.g. `x = +(x, 1)`.
    VarAssign {
        /// Name of the variable.
        name:  String,
        /// The value which is being assigned.
        value: Box<Self>,
        /// Span in the source code.
        span:  Span,
    },
    /// Reference to a variable by name.
    VarAccess {
        /// Name of the variable.
        name: String,
        /// Span in the source code.
        span: Span,
    },
    /// Integer literal.
    Int {
        value: i64,
        span:  Span,
    },
    /// Floating-point literal.
    Float {
        value: f64,
        span:  Span,
    },
    /// String literal, escapes already decoded.
    Str {
        value: String,
        span:  Span,
    },
    /// `#`: reads one line of external input.
    Input {
        span: Span,
    },
    /// `$( expr )`: writes the value of `expr` and evaluates to it.
    Print {
        /// The operand expression.
        expr: Box<Self>,
        /// Span in the source code.
        span: Span,
    },
    /// Binary arithmetic, e.g. `+( a, b )`.
    Binary {
        /// The arithmetic operator.
        op:    ArithOp,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Span in the source code.
        span:  Span,
    },
    /// Guarded comparison, e.g. `<( a, b, expr... )`.
    ///
    /// The body runs only when the comparison holds.
    Guard {
        /// The comparison operator.
        op:    CompareOp,
        /// Left operand.
        left:  Box<Self>,
        /// Right operand.
        right: Box<Self>,
        /// Expressions evaluated in order when the comparison holds.
        body:  Vec<Self>,
        /// Span in the source code.
        span:  Span,
    },
    /// Function call expression, e.g. `add(3, 4)`.
    Call {
        /// Name of the function being called.
        name:      String,
        /// Arguments to the function.
        arguments: Vec<Self>,
        /// Span in the source code.
        span:      Span,
    },
    /// `@( low, high )`: uniform random integer in the inclusive range.
    Rand {
        /// Lower bound.
        low:  Box<Self>,
        /// Upper bound.
        high: Box<Self>,
        /// Span in the source code.
        span: Span,
    },
}

impl Node {
    /// Gets the span from `self`.
    /// ## Example
    /// ```
    /// use funke::{ast::Node, span::Span};
    ///
    /// let node = Node::VarAccess { name: "x".to_string(),
    ///                              span: Span::default(), };
    ///
    /// assert_eq!(node.span(), Span::default());
    /// ```
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Program { span, .. }
            | Self::Assign { span, .. }
            | Self::VarAssign { span, .. }
            | Self::VarAccess { span, .. }
            | Self::Int { span, .. }
            | Self::Float { span, .. }
            | Self::Str { span, .. }
            | Self::Input { span }
            | Self::Print { span, .. }
            | Self::Binary { span, .. }
            | Self::Guard { span, .. }
            | Self::Call { span, .. }
            | Self::Rand { span, .. } => *span,
        }
    }
}

/// The five binary arithmetic forms.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArithOp {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
}

/// The four guarded comparison forms.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CompareOp {
    /// Equal to (`=`)
    Equal,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Not equal to (`!=`)
    NotEqual,
}

impl fmt::Display for ArithOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
        };
        write!(f, "{operator}")
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let operator = match self {
            Self::Equal => "=",
            Self::Less => "<",
            Self::Greater => ">",
            Self::NotEqual => "!=",
        };
        write!(f, "{operator}")
    }
}

/// Writes `items` separated by `", "`.
fn comma_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Formats a float so that it lexes back as a float literal.
pub(crate) fn float_literal(value: f64) -> String {
    let text = value.to_string();
    if text.contains(['.', 'e', 'i', 'N']) {
        text
    } else {
        format!("{text}.0")
    }
}

/// Quotes a string so that it lexes back to the same contents.
fn string_literal(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() && u32::from(c) < 0x100 => {
                out.push_str(&format!("\\x{:02x}", u32::from(c)));
            },
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// The canonical textual form of a node.
///
/// Definitions of a program are written one per line, followed by the
/// trailing expression. Lexing and parsing this text yields the same tree
/// up to spans.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Program { nodes, .. } => {
                for (i, node) in nodes.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{node}")?;
                }
                Ok(())
            },
            Self::Assign { name, params, body, .. } => {
                write!(f, "{name}(")?;
                comma_list(f, params)?;
                write!(f, ") = ")?;
                comma_list(f, body)
            },
            Self::VarAssign { name, value, .. } => write!(f, "{name} = {value}"),
            Self::VarAccess { name, .. } => write!(f, "{name}"),
            Self::Int { value, .. } => write!(f, "{value}"),
            Self::Float { value, .. } => write!(f, "{}", float_literal(*value)),
            Self::Str { value, .. } => write!(f, "{}", string_literal(value)),
            Self::Input { .. } => write!(f, "#"),
            Self::Print { expr, .. } => write!(f, "$({expr})"),
            Self::Binary { op, left, right, .. } => write!(f, "{op}({left}, {right})"),
            Self::Guard { op,
                          left,
                          right,
                          body,
                          .. } => {
                write!(f, "{op}({left}, {right}, ")?;
                comma_list(f, body)?;
                write!(f, ")")
            },
            Self::Call { name, arguments, .. } => {
                write!(f, "{name}(")?;
                comma_list(f, arguments)?;
                write!(f, ")")
            },
            Self::Rand { low, high, .. } => write!(f, "@({low}, {high})"),
        }
    }
}
