use thiserror::Error;

/// Represents all errors that can occur during evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// Tried to read a variable that is bound nowhere in the environment
    /// chain.
    #[error("'{name}' is not defined")]
    UnknownVariable {
        /// The name of the variable.
        name: String,
    },
    /// Called a function name that is bound nowhere in the environment
    /// chain.
    #[error("Function '{name}' is not defined")]
    UnknownFunction {
        /// The name of the function.
        name: String,
    },
    /// Attempted division by zero.
    #[error("Division by zero")]
    DivisionByZero,
    /// Attempted modulo by zero.
    #[error("Modulo by zero")]
    ModuloByZero,
    /// The operator has no implementation for these operand types.
    #[error("{operation} not implemented for {left} and {right}")]
    UnsupportedOperation {
        /// Name of the operation, e.g. `Addition`.
        operation: &'static str,
        /// Type of the left operand.
        left:      &'static str,
        /// Type of the right operand.
        right:     &'static str,
    },
    /// The callee is bound to something that is not a function.
    #[error("{kind} is not callable")]
    NotCallable {
        /// Type of the value that was called.
        kind: &'static str,
    },
    /// The wrong number of arguments was supplied to a function.
    #[error("Expected {expected} argument(s), found {found}")]
    ArgumentCountMismatch {
        /// Number of declared parameters.
        expected: usize,
        /// Number of supplied arguments.
        found:    usize,
    },
    /// An expression that must produce a value produced none (a guarded form
    /// whose predicate was false).
    #[error("Expression produced no value")]
    MissingValue,
    /// Integer arithmetic overflowed.
    #[error("Integer overflow")]
    Overflow,
    /// String repetition would produce a string longer than allowed.
    #[error("String would exceed {limit} bytes")]
    StringTooLong {
        /// The length limit in bytes.
        limit: usize,
    },
    /// The bounds handed to `@` are not integers or describe an empty range.
    #[error("Invalid random range: {details}")]
    InvalidRandomBounds {
        /// Why the bounds were rejected.
        details: String,
    },
    /// `#` was evaluated but the input source has no further line.
    #[error("Input exhausted")]
    InputExhausted,
    /// Reading input failed.
    #[error("Failed to read input: {details}")]
    InputFailed {
        /// The underlying I/O error.
        details: String,
    },
    /// User function calls nested deeper than the interpreter allows.
    #[error("Maximum call depth of {limit} exceeded")]
    CallDepthExceeded {
        /// The configured nesting limit.
        limit: usize,
    },
}
