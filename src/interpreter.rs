/// The environment module binds names to runtime values.
///
/// An environment is a shared mapping with an optional parent. Lookups walk
/// the parent chain; definitions always land in the mapping itself.
pub mod environment;
/// The evaluator module executes the syntax tree and computes results.
///
/// The evaluator walks the tree produced by the parser, resolves names in
/// the environment, applies value operations and calls user functions.
///
/// # Responsibilities
/// - Evaluates every node kind, yielding a value or nothing.
/// - Reports runtime errors with the span of the failing node.
/// - Bounds the nesting depth of user function calls.
pub mod evaluator;
/// The host module abstracts the outside world a program talks to.
///
/// Input lines, output lines and random numbers all go through a `Host`, so
/// embedders and tests can run programs without touching the process's
/// standard streams.
pub mod host;
/// The lexer module tokenizes source code for further parsing.
///
/// The lexer reads the raw source text and produces a stream of tokens, each
/// corresponding to a literal, an identifier or one of the fixed operator
/// and punctuation characters. This is the first stage of interpretation.
///
/// # Responsibilities
/// - Converts the input character stream into tokens with type and source
///   span.
/// - Decodes numeric and string literals.
/// - Reports the first illegal character and aborts.
pub mod lexer;
/// The parser module builds the syntax tree from tokens.
///
/// The parser is a recursive-descent parser with one token of lookahead. It
/// scans function definitions greedily and backtracks once to read the
/// program's trailing expression.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// Integers, floats, strings and functions, with the arithmetic and
/// comparison operations each of them supports.
pub mod value;
