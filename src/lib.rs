//! # funke
//!
//! funke is an interpreter for a tiny prefix-notation expression language.
//! A program is a list of function definitions followed by one expression
//! whose value is the program's result:
//!
//! ```text
//! add(a, b) = +(a, b)
//! print(n) = $(n)
//! print(add(3, 4))
//! ```
//!
//! Source text flows through the lexer, the recursive-descent parser and
//! the tree-walking evaluator. Every stage reports failures as an [`Error`]
//! carrying the source span it refers to.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use tracing::debug;

pub use crate::error::Error;
use crate::{
    ast::Node,
    interpreter::{
        evaluator::core::Interpreter,
        host::Host,
        lexer::Token,
        parser::core::parse_program,
        value::core::Value,
    },
};

/// Defines the structure of parsed code.
///
/// This module declares the `Node` enum and the operator enums that represent
/// the syntactic structure of a program as a tree. The tree is built by the
/// parser and traversed by the evaluator, and prints back as canonical
/// source text.
pub mod ast;
/// Provides unified error types for lexing, parsing and evaluation.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (lexer, parser, evaluator).
/// - Attaches source spans to every error.
/// - Renders an error as a report with the offending source underlined.
pub mod error;
/// Orchestrates the entire process of code execution.
///
/// This module ties together lexing, parsing, evaluation, value
/// representations and the host capabilities a running program uses.
///
/// # Responsibilities
/// - Coordinates all core components: lexer, parser, evaluator, and value
///   types.
/// - Manages the flow of data and errors between phases.
pub mod interpreter;
/// Source positions and spans.
pub mod span;

/// Splits `source` into tokens.
///
/// The returned sequence always ends with an `Eof` token.
///
/// # Errors
/// The first illegal character, unterminated string or oversized integer
/// literal.
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    interpreter::lexer::tokenize(source)
}

/// Tokenizes and parses `source` into a `Node::Program`.
///
/// # Examples
/// ```
/// let program = funke::parse("add(a,b)=+(a,b)\nadd(3,4)").unwrap();
/// assert_eq!(program.to_string(), "add(a, b) = +(a, b)\nadd(3, 4)");
/// ```
pub fn parse(source: &str) -> Result<Node, Error> {
    let tokens = tokenize(source)?;
    parse_program(&mut tokens.iter().peekable())
}

/// Runs the whole pipeline on `source` and returns the program's value.
///
/// Input, output and random numbers are served by `host`. Evaluation stops
/// at the first error; anything written before it stays written.
///
/// # Examples
/// ```
/// use funke::interpreter::{host::BufferedHost, value::core::Value};
///
/// let mut host = BufferedHost::new(0);
/// let source = "add(a, b) = +(a, b)\nprint(n) = $(n)\nprint(add(3, 4))";
///
/// assert_eq!(funke::run(source, &mut host), Ok(Some(Value::Int(7))));
/// assert_eq!(host.output(), ["7"]);
///
/// // An intentional error (unknown variable).
/// assert!(funke::run("x", &mut host).is_err());
/// ```
pub fn run(source: &str, host: &mut dyn Host) -> Result<Option<Value>, Error> {
    let program = parse(source)?;
    debug!(span = %program.span(), "parsed program");

    let result = Interpreter::new(host).interpret(&program);
    debug!(ok = result.is_ok(), "evaluated program");
    result
}
