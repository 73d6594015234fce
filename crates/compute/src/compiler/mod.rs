//! Expression compiler: tokenizer, shunting-yard conversion and task-graph construction.

pub mod builder;
pub mod error;
pub mod postfix;
pub mod tokenizer;

pub use builder::{build_tasks, CompiledExpression, Root};
pub use error::CompileError;
pub use postfix::to_postfix;
pub use tokenizer::{tokenize, Token};

use distcalc_core::config::OperationTimes;
use distcalc_core::ExpressionId;

/// Compile `source` into the task graph for expression `expression_id`.
pub fn compile(
    expression_id: ExpressionId,
    source: &str,
    times: &OperationTimes,
) -> Result<CompiledExpression, CompileError> {
    let tokens = tokenize(source);
    if tokens.is_empty() {
        return Err(CompileError::Empty);
    }
    let postfix = to_postfix(&tokens)?;
    build_tasks(expression_id, &postfix, times)
}
