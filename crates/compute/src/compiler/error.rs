/// Structural problems found while compiling an expression.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CompileError {
    #[error("Expression contains no tokens")]
    Empty,

    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    #[error("Operator '{0}' is missing an operand")]
    MissingOperand(String),

    #[error("Expression leaves {0} operands without an operator")]
    DanglingOperand(usize),
}
