/// Core evaluation logic.
///
/// Contains the `Interpreter`, the dispatch over node kinds, and the rules
/// for programs, definitions, variables and literals.
pub mod core;

/// Arithmetic and guarded comparison forms.
pub mod binary;

/// The host-backed builtin forms: input, print and random.
pub mod builtin;

/// Evaluation of function calls.
///
/// Resolves the callee, evaluates the arguments and hands over to the
/// callee's call protocol.
pub mod function;
