use std::{fmt, rc::Rc};

use crate::{
    ast::{ArithOp, CompareOp, float_literal},
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::function::Function,
    },
    span::Span,
};

/// Result of a value-level operation. The caller attaches the span.
pub type OpResult = Result<Value, RuntimeError>;

/// Largest string, in bytes, that repetition may produce.
pub const MAX_STRING_LEN: usize = 1 << 26;

/// Represents a runtime value in the interpreter.
///
/// Operations dispatch on the left operand's variant. Any combination a
/// variant does not implement falls back to an `UnsupportedOperation`
/// error.
#[derive(Debug, Clone)]
pub enum Value {
    /// A 64-bit signed integer.
    Int(i64),
    /// A double precision floating-point number.
    Float(f64),
    /// A string of text.
    Str(String),
    /// A user-defined function.
    Function(Rc<Function>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Str(v)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Self::Function(Rc::new(f))
    }
}

impl Value {
    /// Name of the variant, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Int(_) => "Int",
            Self::Float(_) => "Float",
            Self::Str(_) => "String",
            Self::Function(_) => "Function",
        }
    }

    /// Classifies one line of external input.
    ///
    /// Text made only of ASCII digits becomes an `Int`; digits with exactly
    /// one decimal point become a `Float`; anything else, including digit
    /// runs too large for an `i64`, stays a `Str`.
    ///
    /// # Example
    /// ```
    /// use funke::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from_input("42"), Value::Int(42));
    /// assert_eq!(Value::from_input("4.5"), Value::Float(4.5));
    /// assert_eq!(Value::from_input("-4"), Value::Str("-4".to_string()));
    /// ```
    #[must_use]
    pub fn from_input(text: &str) -> Self {
        let digits = text.chars().filter(char::is_ascii_digit).count();
        let points = text.chars().filter(|&c| c == '.').count();

        if digits > 0 && digits == text.chars().count() {
            if let Ok(n) = text.parse() {
                return Self::Int(n);
            }
        } else if digits > 0 && points == 1 && digits + points == text.chars().count() {
            if let Ok(x) = text.parse() {
                return Self::Float(x);
            }
        }
        Self::Str(text.to_string())
    }

    fn unsupported(&self, operation: &'static str, other: &Self) -> RuntimeError {
        RuntimeError::UnsupportedOperation { operation,
                                             left: self.type_name(),
                                             right: other.type_name() }
    }

    /// Applies the arithmetic operator `op` with `self` on the left.
    ///
    /// # Example
    /// ```
    /// use funke::{ast::ArithOp, interpreter::value::core::Value};
    ///
    /// let seven = Value::Int(3).arithmetic(ArithOp::Add, &Value::Int(4)).unwrap();
    /// assert_eq!(seven, Value::Int(7));
    /// ```
    pub fn arithmetic(&self, op: ArithOp, other: &Self) -> OpResult {
        match op {
            ArithOp::Add => self.add(other),
            ArithOp::Sub => self.sub(other),
            ArithOp::Mul => self.mul(other),
            ArithOp::Div => self.div(other),
            ArithOp::Mod => self.modulo(other),
        }
    }

    /// Integer addition, float addition or string concatenation.
    pub fn add(&self, other: &Self) -> OpResult {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.checked_add(*b).map(Self::Int).ok_or(RuntimeError::Overflow),
            (Self::Float(a), Self::Float(b)) => Ok(Self::Float(a + b)),
            (Self::Str(a), Self::Str(b)) => Ok(Self::Str(format!("{a}{b}"))),
            _ => Err(self.unsupported("Addition", other)),
        }
    }

    pub fn sub(&self, other: &Self) -> OpResult {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.checked_sub(*b).map(Self::Int).ok_or(RuntimeError::Overflow),
            (Self::Float(a), Self::Float(b)) => Ok(Self::Float(a - b)),
            _ => Err(self.unsupported("Subtraction", other)),
        }
    }

    /// Numeric multiplication, or repetition of a string by an `Int`.
    ///
    /// A negative repeat count yields the empty string.
    ///
    /// # Errors
    /// `StringTooLong` if the repeated string would exceed `MAX_STRING_LEN`
    /// bytes.
    pub fn mul(&self, other: &Self) -> OpResult {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.checked_mul(*b).map(Self::Int).ok_or(RuntimeError::Overflow),
            (Self::Float(a), Self::Float(b)) => Ok(Self::Float(a * b)),
            (Self::Str(s), Self::Int(n)) => repeat(s, *n).map(Self::Str),
            _ => Err(self.unsupported("Multiplication", other)),
        }
    }

    /// Floor division for integers, true division for floats.
    ///
    /// # Errors
    /// `DivisionByZero` when the divisor is zero, for either type.
    pub fn div(&self, other: &Self) -> OpResult {
        match (self, other) {
            (Self::Int(_), Self::Int(0)) => Err(RuntimeError::DivisionByZero),
            (Self::Int(a), Self::Int(b)) => floor_div(*a, *b).map(Self::Int),
            (Self::Float(_), Self::Float(b)) if *b == 0.0 => Err(RuntimeError::DivisionByZero),
            (Self::Float(a), Self::Float(b)) => Ok(Self::Float(a / b)),
            _ => Err(self.unsupported("Division", other)),
        }
    }

    /// Remainder whose sign follows the divisor, for integers and floats.
    ///
    /// # Errors
    /// `ModuloByZero` when the divisor is zero, for either type.
    ///
    /// # Example
    /// ```
    /// use funke::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::Int(-7).modulo(&Value::Int(3)).unwrap(), Value::Int(2));
    /// assert!(Value::Float(1.0).modulo(&Value::Float(0.0)).is_err());
    /// ```
    pub fn modulo(&self, other: &Self) -> OpResult {
        match (self, other) {
            (Self::Int(_), Self::Int(0)) => Err(RuntimeError::ModuloByZero),
            (Self::Int(a), Self::Int(b)) => Ok(Self::Int(floor_mod(*a, *b))),
            (Self::Float(_), Self::Float(b)) if *b == 0.0 => Err(RuntimeError::ModuloByZero),
            (Self::Float(a), Self::Float(b)) => {
                let r = a % b;
                Ok(Self::Float(if r != 0.0 && (r < 0.0) != (*b < 0.0) { r + b } else { r }))
            },
            _ => Err(self.unsupported("Modulo", other)),
        }
    }

    /// Equality of variant and payload. Functions are equal only to
    /// themselves.
    #[must_use]
    pub fn equals(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a == b,
            (Self::Float(a), Self::Float(b)) => a == b,
            (Self::Str(a), Self::Str(b)) => a == b,
            (Self::Function(a), Self::Function(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Ordering between two values of the same primitive variant; `false`
    /// for any other pairing.
    #[must_use]
    pub fn less_than(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a < b,
            (Self::Float(a), Self::Float(b)) => a < b,
            (Self::Str(a), Self::Str(b)) => a < b,
            _ => false,
        }
    }

    #[must_use]
    pub fn greater_than(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a > b,
            (Self::Float(a), Self::Float(b)) => a > b,
            (Self::Str(a), Self::Str(b)) => a > b,
            _ => false,
        }
    }

    #[must_use]
    pub fn not_equals(&self, other: &Self) -> bool {
        !self.equals(other)
    }

    /// Evaluates the comparison `op` with `self` on the left.
    ///
    /// # Example
    /// ```
    /// use funke::{ast::CompareOp, interpreter::value::core::Value};
    ///
    /// assert!(Value::Int(1).compare(CompareOp::Less, &Value::Int(2)));
    /// assert!(!Value::Int(1).compare(CompareOp::Less, &Value::Float(2.0)));
    /// assert!(Value::Int(1).compare(CompareOp::NotEqual, &Value::Float(1.0)));
    /// ```
    #[must_use]
    pub fn compare(&self, op: CompareOp, other: &Self) -> bool {
        match op {
            CompareOp::Equal => self.equals(other),
            CompareOp::Less => self.less_than(other),
            CompareOp::Greater => self.greater_than(other),
            CompareOp::NotEqual => self.not_equals(other),
        }
    }

    /// Invokes the value with already evaluated arguments.
    ///
    /// Only functions are callable. The callee runs against `env`, the
    /// caller's own environment.
    ///
    /// # Errors
    /// `NotCallable` (at `span`) for every other variant, plus any error of
    /// the call itself.
    pub fn call(&self,
                args: Vec<Self>,
                env: &Environment,
                caller: &mut Interpreter<'_>,
                span: Span)
                -> EvalResult<Option<Self>> {
        match self {
            Self::Function(function) => function.call(args, env, caller, span),
            other => Err(Error::runtime(RuntimeError::NotCallable { kind: other.type_name() }, span)),
        }
    }
}

/// Repeats `s` `count` times; a negative count gives the empty string.
fn repeat(s: &str, count: i64) -> Result<String, RuntimeError> {
    let count = usize::try_from(count).unwrap_or(0);
    match s.len().checked_mul(count) {
        Some(len) if len <= MAX_STRING_LEN => Ok(s.repeat(count)),
        _ => Err(RuntimeError::StringTooLong { limit: MAX_STRING_LEN }),
    }
}

/// Integer division rounding towards negative infinity.
fn floor_div(a: i64, b: i64) -> Result<i64, RuntimeError> {
    let quotient = a.checked_div(b).ok_or(RuntimeError::Overflow)?;
    if a % b != 0 && (a < 0) != (b < 0) {
        Ok(quotient - 1)
    } else {
        Ok(quotient)
    }
}

/// Integer remainder taking the sign of the divisor.
fn floor_mod(a: i64, b: i64) -> i64 {
    // `i64::MIN % -1` overflows, but the remainder is 0.
    let r = a.checked_rem(b).unwrap_or(0);
    if r != 0 && (r < 0) != (b < 0) {
        r + b
    } else {
        r
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{}", float_literal(*x)),
            Self::Str(s) => write!(f, "{s}"),
            Self::Function(function) => write!(f, "{function}"),
        }
    }
}
