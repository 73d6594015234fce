use crate::compiler::CompileError;

/// Errors raised by the task store and dispatcher.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Expression is empty")]
    EmptyExpression,

    #[error("Invalid expression: {0}")]
    Compile(#[from] CompileError),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Expression not found: {0}")]
    ExpressionNotFound(String),

    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),
}
