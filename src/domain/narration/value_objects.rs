//! Narration Context - Value Objects

use uuid::Uuid;

use super::NarrationError;

/// 单次运行唯一标识
///
/// 所有中间文件名都带上该标识，保证共享工作目录的并发运行互不冲突
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunId(Uuid);

impl RunId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// 短标识（前 8 位），用于文件名
    pub fn short(&self) -> String {
        self.0.simple().to_string()[..8].to_string()
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 待朗读的句子
///
/// 不可变；编号从 1 开始，内容已去除首尾空白且非空
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sentence {
    index: usize,
    text: String,
}

impl Sentence {
    pub fn new(index: usize, text: impl AsRef<str>) -> Result<Self, NarrationError> {
        if index == 0 {
            return Err(NarrationError::InvalidIndex(index));
        }
        let text = text.as_ref().trim();
        if text.is_empty() {
            return Err(NarrationError::EmptySentence(index));
        }
        Ok(Self {
            index,
            text: text.to_string(),
        })
    }

    /// 1 起始编号
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// 截断预览（按字符，不会切断 UTF-8）
    pub fn preview(&self, max_chars: usize) -> String {
        if self.text.chars().count() <= max_chars {
            return self.text.clone();
        }
        let head: String = self.text.chars().take(max_chars).collect();
        format!("{}...", head)
    }
}

impl std::fmt::Display for Sentence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}. {}", self.index, self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_is_trimmed() {
        let sentence = Sentence::new(1, "  Hello.  ").unwrap();
        assert_eq!(sentence.text(), "Hello.");
        assert_eq!(sentence.index(), 1);
    }

    #[test]
    fn test_blank_sentence_rejected() {
        assert_eq!(
            Sentence::new(3, " \t "),
            Err(NarrationError::EmptySentence(3))
        );
    }

    #[test]
    fn test_zero_index_rejected() {
        assert_eq!(Sentence::new(0, "Hi"), Err(NarrationError::InvalidIndex(0)));
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let sentence = Sentence::new(1, "héllo wörld").unwrap();
        assert_eq!(sentence.preview(5), "héllo...");
        assert_eq!(sentence.preview(50), "héllo wörld");
    }

    #[test]
    fn test_run_id_short_is_unique_per_run() {
        let a = RunId::new();
        let b = RunId::new();
        assert_eq!(a.short().len(), 8);
        assert_ne!(a, b);
    }
}
