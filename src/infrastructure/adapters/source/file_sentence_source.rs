//! File Sentence Source - 从 UTF-8 文本文件读取句子
//!
//! 实现 SentenceSourcePort trait：每个非空行为一个句子

use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::Path;
use tokio::fs;

use crate::application::ports::{SentenceSourcePort, SourceError};
use crate::domain::narration::Sentence;
use crate::domain::sentences_from_text;

/// 文件句子来源
#[derive(Debug, Clone, Default)]
pub struct FileSentenceSource;

impl FileSentenceSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SentenceSourcePort for FileSentenceSource {
    async fn read_sentences(&self, path: &Path) -> Result<Vec<Sentence>, SourceError> {
        let shown = path.display().to_string();

        let bytes = fs::read(path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => SourceError::FileNotFound(shown.clone()),
            _ => SourceError::ReadError(format!("{}: {}", shown, e)),
        })?;

        let text = String::from_utf8(bytes)
            .map_err(|e| SourceError::ReadError(format!("{}: not valid UTF-8 ({})", shown, e)))?;

        let sentences = sentences_from_text(&text);
        if sentences.is_empty() {
            return Err(SourceError::NoSentences(shown));
        }

        tracing::debug!(path = %shown, sentences = sentences.len(), "Sentences loaded");
        Ok(sentences)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_reads_non_blank_lines() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lesson.txt");
        std::fs::write(&path, "Hello.\n\n  How are you?  \n").unwrap();

        let sentences = FileSentenceSource::new().read_sentences(&path).await.unwrap();
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0].text(), "Hello.");
        assert_eq!(sentences[1].text(), "How are you?");
        assert_eq!(sentences[1].index(), 2);
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempdir().unwrap();
        let result = FileSentenceSource::new()
            .read_sentences(&dir.path().join("absent.txt"))
            .await;
        assert!(matches!(result, Err(SourceError::FileNotFound(_))));
    }

    #[tokio::test]
    async fn test_whitespace_only_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("blank.txt");
        std::fs::write(&path, "  \n\t\n").unwrap();

        let result = FileSentenceSource::new().read_sentences(&path).await;
        assert!(matches!(result, Err(SourceError::NoSentences(_))));
    }

    #[tokio::test]
    async fn test_invalid_utf8() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("latin1.txt");
        std::fs::write(&path, [0x66, 0x6f, 0xff, 0x0a]).unwrap();

        let result = FileSentenceSource::new().read_sentences(&path).await;
        assert!(matches!(result, Err(SourceError::ReadError(_))));
    }
}
