/// Core parsing routines.
///
/// Defines `ParseResult` and the program-level productions: the greedy scan
/// for function definitions and the backtrack to the trailing expression.
pub mod core;

/// Expression parsing.
///
/// Contains the `exprs`, `expr` and `basic_expr` productions and one parser
/// per builtin form.
pub mod expression;

/// Shared helpers used by the parsing modules.
///
/// Includes token expectation, comma-separated lists and identifiers.
mod utils;
