//! Error types for the 10,000 engine

use crate::core::Die;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TenKError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A keep selection that is empty, scores nothing, or claims dice that
    /// were not rolled. A Farkle is a normal outcome and never uses this.
    #[error("Invalid selection: kept {keep:?} from roll {roll:?}")]
    InvalidSelection { roll: Vec<Die>, keep: Vec<Die> },

    #[error("Invalid game action: {0}")]
    InvalidAction(String),

    #[error("Collaborator disconnected: {0}")]
    Disconnected(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, TenKError>;
