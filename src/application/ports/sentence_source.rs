//! Sentence Source Port - 句子来源抽象

use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

use crate::domain::narration::Sentence;

/// 句子来源错误
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("File read error: {0}")]
    ReadError(String),

    #[error("No usable sentences in {0}")]
    NoSentences(String),
}

/// Sentence Source Port
///
/// 返回有序、非空的句子序列
#[async_trait]
pub trait SentenceSourcePort: Send + Sync {
    async fn read_sentences(&self, path: &Path) -> Result<Vec<Sentence>, SourceError>;
}
