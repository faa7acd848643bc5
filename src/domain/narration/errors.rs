//! Narration Context - Errors

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NarrationError {
    #[error("Sentence {0} is empty after trimming")]
    EmptySentence(usize),

    #[error("Sentence index must start at 1, got {0}")]
    InvalidIndex(usize),
}
