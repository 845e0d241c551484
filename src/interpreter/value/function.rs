use std::fmt;

use tracing::trace;

use crate::{
    ast::Node,
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
    span::Span,
};

/// A user-defined function value.
///
/// Created when a definition such as `add(a, b) = +(a, b)` is evaluated. The
/// function keeps its own copy of the parameter names and body, so it stays
/// valid however long the value lives.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Parameter names in declaration order.
    pub params: Vec<String>,
    /// Body expressions; the last one that yields a value is the result.
    pub body:   Vec<Node>,
    /// Span of the definition.
    pub span:   Span,
}

impl Function {
    #[must_use]
    pub const fn new(params: Vec<String>, body: Vec<Node>, span: Span) -> Self {
        Self { params, body, span }
    }

    /// Invokes the function.
    ///
    /// Each parameter is bound, in order, to its argument in the environment
    /// `env` supplied by the caller. The body then runs in a fresh nested
    /// interpreter against that same environment, so assignments inside the
    /// body are visible to the caller afterwards.
    ///
    /// # Parameters
    /// - `args`: Evaluated arguments.
    /// - `env`: The caller's environment.
    /// - `caller`: The interpreter performing the call.
    /// - `span`: Span of the call expression, used for errors.
    ///
    /// # Returns
    /// The value of the last body expression that produced one, or `None`
    /// if none did.
    ///
    /// # Errors
    /// - `ArgumentCountMismatch` if `args` does not match the parameters.
    /// - `CallDepthExceeded` if the call nests too deeply.
    /// - Any error raised while evaluating the body.
    pub fn call(&self,
                args: Vec<Value>,
                env: &Environment,
                caller: &mut Interpreter<'_>,
                span: Span)
                -> EvalResult<Option<Value>> {
        if args.len() != self.params.len() {
            return Err(Error::runtime(RuntimeError::ArgumentCountMismatch { expected:
                                                                                self.params.len(),
                                                                            found:
                                                                                args.len() },
                                      span));
        }

        let mut interpreter = caller.nested(span)?;
        trace!(depth = interpreter.depth(), arguments = args.len(), "entering function body");

        for (param, arg) in self.params.iter().zip(args) {
            env.define(param, arg);
        }

        let mut result = None;
        for node in &self.body {
            if let Some(value) = interpreter.visit(node, env)? {
                result = Some(value);
            }
        }
        Ok(result)
    }
}

impl fmt::Display for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<function({})>", self.params.join(", "))
    }
}
