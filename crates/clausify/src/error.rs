//! Error types for clausify

use crate::normalize::Stage;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClausifyError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Formula is not clausal: {0}")]
    NotClausal(String),

    #[error("Normalization timed out during {stage}")]
    Timeout { stage: Stage },

    #[error("Clause limit of {limit} exceeded during {stage}")]
    ClauseLimitExceeded { stage: Stage, limit: usize },

    #[error("Invariant violated after {stage}")]
    InvariantViolated { stage: Stage },
}

pub type Result<T> = std::result::Result<T, ClausifyError>;
