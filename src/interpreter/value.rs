/// The `Value` enum and its operations.
///
/// Arithmetic, comparisons, display and input classification. Every
/// operation dispatches on the left operand; unsupported pairings report an
/// error naming both types.
pub mod core;

/// User-defined functions.
///
/// Defines the `Function` value created by a definition and the call
/// protocol that binds arguments and runs the body.
pub mod function;
