use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::ids::{ExpressionId, TaskId};

/// Kind of work a task performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Operation {
    /// A resolved number; never dispatched to a worker.
    #[serde(rename = "literal")]
    Literal,
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Subtract,
    #[serde(rename = "*")]
    Multiply,
    #[serde(rename = "/")]
    Divide,
}

impl Operation {
    /// Map an operator symbol (`+ - * /`) to its operation.
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operation::Add),
            "-" => Some(Operation::Subtract),
            "*" => Some(Operation::Multiply),
            "/" => Some(Operation::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Literal => "literal",
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    /// Shunting-yard precedence. Higher binds tighter.
    pub fn precedence(self) -> u8 {
        match self {
            Operation::Multiply | Operation::Divide => 2,
            Operation::Add | Operation::Subtract => 1,
            Operation::Literal => 0,
        }
    }

    /// Apply the operator with plain IEEE-754 semantics.
    ///
    /// Division by zero yields an infinity or NaN, never an error.
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
            Operation::Literal => a,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::from_symbol(s).ok_or_else(|| CoreError::UnknownOperator(s.to_string()))
    }
}

/// One operand slot of a task.
///
/// A slot is either already bound to a value or waits on exactly one
/// producing task. Binding is explicit, so a legitimate zero is never
/// mistaken for an empty slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    Bound(f64),
    Pending(TaskId),
}

impl Operand {
    /// The bound value, or 0 while the slot still waits on a dependency.
    pub fn value(&self) -> f64 {
        match self {
            Operand::Bound(v) => *v,
            Operand::Pending(_) => 0.0,
        }
    }

    pub fn pending_on(&self) -> Option<TaskId> {
        match self {
            Operand::Pending(id) => Some(*id),
            Operand::Bound(_) => None,
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, Operand::Bound(_))
    }
}

/// A node of an expression's task graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub expression_id: ExpressionId,
    pub operation: Operation,
    pub operand_a: Operand,
    pub operand_b: Operand,
    /// Artificial compute latency handed to the worker.
    pub simulated_duration_ms: u64,
    /// Producing tasks that were unresolved when the graph was built (A first, then B).
    pub dependencies: Vec<TaskId>,
    pub completed: bool,
    pub claimed: bool,
    pub result: f64,
}

impl Task {
    /// A literal: born completed, no dependencies, never stored.
    pub fn literal(expression_id: ExpressionId, value: f64) -> Self {
        Self {
            id: TaskId::new(),
            expression_id,
            operation: Operation::Literal,
            operand_a: Operand::Bound(value),
            operand_b: Operand::Bound(0.0),
            simulated_duration_ms: 0,
            dependencies: Vec::new(),
            completed: true,
            claimed: false,
            result: value,
        }
    }

    /// An operator application over two operand slots.
    pub fn binary(
        expression_id: ExpressionId,
        operation: Operation,
        operand_a: Operand,
        operand_b: Operand,
        simulated_duration_ms: u64,
    ) -> Self {
        let dependencies = [operand_a, operand_b]
            .iter()
            .filter_map(Operand::pending_on)
            .collect();
        Self {
            id: TaskId::new(),
            expression_id,
            operation,
            operand_a,
            operand_b,
            simulated_duration_ms,
            dependencies,
            completed: false,
            claimed: false,
            result: 0.0,
        }
    }

    /// Bind `value` into every slot waiting on `dependency`.
    ///
    /// Returns `true` if a slot was filled.
    pub fn bind(&mut self, dependency: TaskId, value: f64) -> bool {
        let mut bound = false;
        for slot in [&mut self.operand_a, &mut self.operand_b] {
            if slot.pending_on() == Some(dependency) {
                *slot = Operand::Bound(value);
                bound = true;
            }
        }
        bound
    }

    pub fn operands_bound(&self) -> bool {
        self.operand_a.is_bound() && self.operand_b.is_bound()
    }

    /// Record a worker's result. Not guarded: a second call overwrites the first.
    pub fn complete(&mut self, result: f64) {
        self.result = result;
        self.completed = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_round_trip() {
        for op in [
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ] {
            assert_eq!(Operation::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operation::from_symbol("^"), None);
        assert!("%".parse::<Operation>().is_err());
    }

    #[test]
    fn precedence_orders_multiplicative_above_additive() {
        assert!(Operation::Multiply.precedence() > Operation::Add.precedence());
        assert_eq!(Operation::Divide.precedence(), Operation::Multiply.precedence());
        assert_eq!(Operation::Subtract.precedence(), Operation::Add.precedence());
    }

    #[test]
    fn divide_by_zero_is_infinite() {
        assert_eq!(Operation::Divide.apply(1.0, 0.0), f64::INFINITY);
        assert!(Operation::Divide.apply(0.0, 0.0).is_nan());
    }

    #[test]
    fn binary_task_collects_pending_slots_in_order() {
        let expr = ExpressionId::new();
        let a = TaskId::new();
        let b = TaskId::new();
        let task = Task::binary(
            expr,
            Operation::Add,
            Operand::Pending(a),
            Operand::Pending(b),
            10,
        );
        assert_eq!(task.dependencies, vec![a, b]);
        assert!(!task.operands_bound());
    }

    #[test]
    fn bind_fills_only_the_waiting_slot() {
        let expr = ExpressionId::new();
        let dep = TaskId::new();
        // (x) - 0 where x is still pending: slot A waits, slot B is a real zero.
        let mut task = Task::binary(
            expr,
            Operation::Subtract,
            Operand::Pending(dep),
            Operand::Bound(0.0),
            10,
        );
        assert!(task.bind(dep, 6.0));
        assert_eq!(task.operand_a, Operand::Bound(6.0));
        assert_eq!(task.operand_b, Operand::Bound(0.0));
        assert!(task.operands_bound());
        assert!(!task.bind(TaskId::new(), 1.0));
    }

    #[test]
    fn literal_is_born_completed() {
        let lit = Task::literal(ExpressionId::new(), 4.5);
        assert!(lit.completed);
        assert!(lit.dependencies.is_empty());
        assert_eq!(lit.result, 4.5);
    }
}
