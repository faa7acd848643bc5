//! Audio Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum AudioError {
    #[error("Filter graph needs at least one input")]
    NoInputs,

    #[error("Invalid silence duration: {0}")]
    InvalidSilenceDuration(f64),

    #[error("Unknown silence placement: {0}")]
    UnknownPlacement(String),
}
