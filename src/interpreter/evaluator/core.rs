use std::rc::Rc;

use tracing::debug;

use crate::{
    ast::Node,
    error::{Error, RuntimeError},
    interpreter::{
        environment::Environment,
        host::Host,
        value::{core::Value, function::Function},
    },
    span::Span,
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or an
/// `Error` carrying the span of the failing node.
pub type EvalResult<T> = Result<T, Error>;

/// Maximum number of nested function calls before evaluation is aborted.
pub const MAX_CALL_DEPTH: usize = 256;

/// Walks the syntax tree and computes values.
///
/// An interpreter borrows the host for its whole lifetime; every call of a
/// user function runs its body in a nested interpreter that borrows the
/// same host one level deeper.
///
/// ## Usage
///
/// ```
/// use funke::interpreter::{evaluator::core::Interpreter, host::BufferedHost, value::core::Value};
///
/// let program = funke::parse("sq(x) = *(x, x)\nsq(9)").unwrap();
/// let mut host = BufferedHost::new(0);
///
/// let result = Interpreter::new(&mut host).interpret(&program).unwrap();
/// assert_eq!(result, Some(Value::Int(81)));
/// ```
pub struct Interpreter<'h> {
    pub(crate) host: &'h mut dyn Host,
    depth:           usize,
}

impl<'h> Interpreter<'h> {
    /// Creates a top-level interpreter using `host` for input, output and
    /// random numbers.
    #[must_use]
    pub fn new(host: &'h mut dyn Host) -> Self {
        Self { host, depth: 0 }
    }

    /// Number of function calls enclosing this interpreter.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Creates the interpreter that runs a function body called from this
    /// one.
    ///
    /// # Errors
    /// `CallDepthExceeded` (at `span`) once `MAX_CALL_DEPTH` calls are
    /// nested.
    pub fn nested(&mut self, span: Span) -> EvalResult<Interpreter<'_>> {
        if self.depth >= MAX_CALL_DEPTH {
            return Err(Error::runtime(RuntimeError::CallDepthExceeded { limit: MAX_CALL_DEPTH },
                                      span));
        }
        Ok(Interpreter { host:  &mut *self.host,
                         depth: self.depth + 1, })
    }

    /// Evaluates a whole program in a fresh global environment.
    pub fn interpret(&mut self, program: &Node) -> EvalResult<Option<Value>> {
        let env = Environment::new();
        let result = self.visit(program, &env)?;
        debug!(globals = ?env.names(), "program finished");
        Ok(result)
    }

    /// Evaluates a node and returns its value.
    ///
    /// This is the single dispatch point of the evaluator. Each node kind
    /// is handled by its own method.
    ///
    /// # Parameters
    /// - `node`: The node to evaluate.
    /// - `env`: The environment names are resolved and bound in.
    ///
    /// # Returns
    /// `Some(Value)` for nodes that produce a value, or `None` for a guard
    /// whose comparison does not hold (and anything whose value derives
    /// from one).
    ///
    /// # Errors
    /// The first runtime error raised anywhere below `node`; evaluation
    /// stops there.
    pub fn visit(&mut self, node: &Node, env: &Environment) -> EvalResult<Option<Value>> {
        match node {
            Node::Program { nodes, .. } => self.visit_program(nodes, env),
            Node::Assign { name,
                           params,
                           body,
                           span, } => Ok(Some(Self::visit_assign(name, params, body, *span, env))),
            Node::VarAssign { name, value, .. } => self.visit_var_assign(name, value, env),
            Node::VarAccess { name, span } => Self::visit_var_access(name, *span, env).map(Some),
            Node::Int { value, .. } => Ok(Some(Value::Int(*value))),
            Node::Float { value, .. } => Ok(Some(Value::Float(*value))),
            Node::Str { value, .. } => Ok(Some(Value::Str(value.clone()))),
            Node::Input { span } => self.visit_input(*span).map(Some),
            Node::Print { expr, .. } => self.visit_print(expr, env).map(Some),
            Node::Binary { op, left, right, .. } => {
                self.visit_binary(*op, left, right, env).map(Some)
            },
            Node::Guard { op,
                          left,
                          right,
                          body,
                          .. } => self.visit_guard(*op, left, right, body, env),
            Node::Call { name,
                         arguments,
                         span, } => self.visit_call(name, arguments, *span, env),
            Node::Rand { low, high, span } => self.visit_rand(low, high, *span, env).map(Some),
        }
    }

    /// Evaluates `node` where a value is required.
    ///
    /// # Errors
    /// `MissingValue` (at the node's span) if the node yields none.
    pub(crate) fn visit_value(&mut self, node: &Node, env: &Environment) -> EvalResult<Value> {
        self.visit(node, env)?
            .ok_or_else(|| Error::runtime(RuntimeError::MissingValue, node.span()))
    }

    /// Evaluates the children in order; the program's value is that of the
    /// last one.
    fn visit_program(&mut self, nodes: &[Node], env: &Environment) -> EvalResult<Option<Value>> {
        let mut result = None;
        for node in nodes {
            result = self.visit(node, env)?;
        }
        Ok(result)
    }

    /// Binds a new function value to `name`. The definition evaluates to
    /// that function.
    fn visit_assign(name: &str,
                    params: &[String],
                    body: &[Node],
                    span: Span,
                    env: &Environment)
                    -> Value {
        let function = Value::Function(Rc::new(Function::new(params.to_vec(), body.to_vec(), span)));
        env.define(name, function.clone());
        function
    }

    /// Binds the value of `value` to `name`.
    ///
    /// An expression producing no value leaves the environment untouched
    /// and the assignment yields nothing either.
    fn visit_var_assign(&mut self,
                        name: &str,
                        value: &Node,
                        env: &Environment)
                        -> EvalResult<Option<Value>> {
        let value = self.visit(value, env)?;
        if let Some(v) = &value {
            env.define(name, v.clone());
        }
        Ok(value)
    }

    fn visit_var_access(name: &str, span: Span, env: &Environment) -> EvalResult<Value> {
        env.find(name)
           .ok_or_else(|| Error::runtime(RuntimeError::UnknownVariable { name: name.to_string() }, span))
    }
}
