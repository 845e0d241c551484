use crate::{
    ast::{ArithOp, CompareOp, Node},
    error::Error,
    interpreter::{
        environment::Environment,
        evaluator::core::{EvalResult, Interpreter},
        value::core::Value,
    },
};

impl Interpreter<'_> {
    /// Evaluates an arithmetic form.
    ///
    /// Both operands are evaluated, left first, and the operator is applied
    /// to the left operand's value.
    ///
    /// # Errors
    /// - `MissingValue` if an operand yields no value.
    /// - Any error of the operation itself, spanning both operands.
    pub(crate) fn visit_binary(&mut self,
                               op: ArithOp,
                               left: &Node,
                               right: &Node,
                               env: &Environment)
                               -> EvalResult<Value> {
        let lhs = self.visit_value(left, env)?;
        let rhs = self.visit_value(right, env)?;

        lhs.arithmetic(op, &rhs)
           .map_err(|e| Error::runtime(e, left.span().to(right.span())))
    }

    /// Evaluates a guarded comparison.
    ///
    /// If the comparison holds, the guarded expressions run in order and the
    /// form yields the value of the last one. Otherwise none of them run and
    /// the form yields no value.
    pub(crate) fn visit_guard(&mut self,
                              op: CompareOp,
                              left: &Node,
                              right: &Node,
                              body: &[Node],
                              env: &Environment)
                              -> EvalResult<Option<Value>> {
        let lhs = self.visit_value(left, env)?;
        let rhs = self.visit_value(right, env)?;

        if !lhs.compare(op, &rhs) {
            return Ok(None);
        }

        let mut result = None;
        for node in body {
            result = self.visit(node, env)?;
        }
        Ok(result)
    }
}
