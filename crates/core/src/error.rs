use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Unknown operator: {0}")]
    UnknownOperator(String),
}
