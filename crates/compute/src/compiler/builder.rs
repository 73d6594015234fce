use distcalc_core::config::OperationTimes;
use distcalc_core::{ExpressionId, Operand, Task, TaskId};
use tracing::debug;

use super::error::CompileError;
use super::tokenizer::Token;

/// Where an expression's final value comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Root {
    /// The value is produced by this task.
    Task(TaskId),
    /// The expression was a lone literal and is already resolved.
    Value(f64),
}

/// Task graph for one expression, ready for insertion into the store.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    pub expression_id: ExpressionId,
    /// Operator tasks in creation order. Literals never appear here.
    pub tasks: Vec<Task>,
    pub root: Root,
}

/// A postfix stack entry: either a literal's value or a task still to run.
#[derive(Debug, Clone, Copy)]
enum Handle {
    Resolved(f64),
    Pending(TaskId),
}

impl Handle {
    fn operand(self) -> Operand {
        match self {
            Handle::Resolved(value) => Operand::Bound(value),
            Handle::Pending(id) => Operand::Pending(id),
        }
    }
}

fn parse_numeral(text: &str) -> f64 {
    match text.parse::<f64>() {
        Ok(value) => value,
        Err(_) => {
            debug!(numeral = text, "Unparsable numeral, using 0");
            0.0
        }
    }
}

/// Turn a postfix token sequence into a task graph.
///
/// Each operator becomes one task whose operand slots are either bound
/// to a literal or wait on the task that produces them.
pub fn build_tasks(
    expression_id: ExpressionId,
    postfix: &[Token],
    times: &OperationTimes,
) -> Result<CompiledExpression, CompileError> {
    if postfix.is_empty() {
        return Err(CompileError::Empty);
    }

    let mut stack: Vec<Handle> = Vec::new();
    let mut tasks = Vec::new();

    for token in postfix {
        match token {
            Token::Number(text) => {
                let literal = Task::literal(expression_id, parse_numeral(text));
                stack.push(Handle::Resolved(literal.result));
            }
            Token::Operator(op) => {
                let missing = || CompileError::MissingOperand(op.symbol().to_string());
                let b = stack.pop().ok_or_else(missing)?;
                let a = stack.pop().ok_or_else(missing)?;
                let task = Task::binary(
                    expression_id,
                    *op,
                    a.operand(),
                    b.operand(),
                    times.for_operation(*op),
                );
                stack.push(Handle::Pending(task.id));
                tasks.push(task);
            }
            Token::LeftParen | Token::RightParen => return Err(CompileError::UnbalancedParens),
        }
    }

    let root = match stack.as_slice() {
        [Handle::Pending(id)] => Root::Task(*id),
        [Handle::Resolved(value)] => Root::Value(*value),
        rest => return Err(CompileError::DanglingOperand(rest.len())),
    };

    Ok(CompiledExpression {
        expression_id,
        tasks,
        root,
    })
}
