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
    /// Reads one line from the host and classifies it.
    ///
    /// # Errors
    /// - `InputExhausted` if the host has no more input.
    /// - `InputFailed` if the host could not read.
    pub(crate) fn visit_input(&mut self, span: Span) -> EvalResult<Value> {
        match self.host.read_line() {
            Ok(Some(line)) => Ok(Value::from_input(&line)),
            Ok(None) => Err(Error::runtime(RuntimeError::InputExhausted, span)),
            Err(e) => Err(Error::runtime(RuntimeError::InputFailed { details: e.to_string() },
                                         span)),
        }
    }

    /// Writes the display form of the operand's value and yields that value.
    pub(crate) fn visit_print(&mut self, expr: &Node, env: &Environment) -> EvalResult<Value> {
        let value = self.visit_value(expr, env)?;
        self.host.write_line(&value.to_string());
        Ok(value)
    }

    /// Draws a random integer from the inclusive range given by the two
    /// operands.
    ///
    /// # Errors
    /// `InvalidRandomBounds` if a bound is not an `Int` or the lower bound
    /// exceeds the upper one.
    pub(crate) fn visit_rand(&mut self,
                             low: &Node,
                             high: &Node,
                             span: Span,
                             env: &Environment)
                             -> EvalResult<Value> {
        let low = self.visit_value(low, env)?;
        let high = self.visit_value(high, env)?;

        let details = match (&low, &high) {
            (Value::Int(l), Value::Int(h)) if l <= h => {
                return Ok(Value::Int(self.host.random_int(*l, *h)));
            },
            (Value::Int(l), Value::Int(h)) => format!("{l} is greater than {h}"),
            _ => format!("expected Int and Int, found {} and {}",
                         low.type_name(),
                         high.type_name()),
        };
        Err(Error::runtime(RuntimeError::InvalidRandomBounds { details }, span))
    }
}
