pub mod compiler;
pub mod dispatch;

pub use compiler::{compile, CompileError, CompiledExpression, Root};
pub use dispatch::{
    CompletionOutcome, DispatchError, DispatchMetrics, Dispatcher, StoreState, TaskStore,
};
