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

impl Interpreter<'_> {
    /// Evaluates a function call.
    ///
    /// The callee is looked up by name first, then the arguments are
    /// evaluated left to right in the caller's environment. The callee's
    /// body runs against that same environment.
    ///
    /// # Parameters
    /// - `name`: Name the callee is bound to.
    /// - `arguments`: Argument expressions.
    /// - `span`: Span of the whole call.
    /// - `env`: The caller's environment.
    ///
    /// # Errors
    /// - `UnknownFunction` if `name` is unbound.
    /// - `MissingValue` if an argument yields no value.
    /// - `NotCallable` if `name` is bound to something other than a
    ///   function.
    /// - Any error of the call itself.
    pub(crate) fn visit_call(&mut self,
                             name: &str,
                             arguments: &[Node],
                             span: Span,
                             env: &Environment)
                             -> EvalResult<Option<Value>> {
        let unknown = || RuntimeError::UnknownFunction { name: name.to_string() };
        let callee = env.find(name)
                        .ok_or_else(|| Error::runtime(unknown(), span))?;

        let args = arguments.iter()
                            .map(|argument| self.visit_value(argument, env))
                            .collect::<EvalResult<Vec<_>>>()?;

        trace!(function = name, depth = self.depth(), "call");
        callee.call(args, env, self, span)
    }
}
