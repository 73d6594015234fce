pub mod config;
pub mod error;
pub mod expression;
pub mod ids;
pub mod number;
pub mod task;
pub mod wire;

pub use config::Config;
pub use error::*;
pub use expression::*;
pub use ids::{ExpressionId, TaskId};
pub use task::*;
