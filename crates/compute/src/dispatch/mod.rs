//! Task store and claim/complete dispatcher.
//!
//! All expression and task records live in one [`StoreState`] behind a
//! single mutex. Workers claim ready tasks in insertion order and report
//! results back; completing an expression's root task finalizes the
//! expression and removes its tasks.

pub mod dispatcher;
pub mod error;
pub mod metrics;
pub mod store;

pub use dispatcher::{CompletionOutcome, Dispatcher};
pub use error::DispatchError;
pub use metrics::DispatchMetrics;
pub use store::{StoreState, TaskStore};
