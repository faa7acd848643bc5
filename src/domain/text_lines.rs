//! 文本分行器
//!
//! 每一个非空行就是一个句子：去除首尾空白，丢弃空白行，保持原有顺序

use super::narration::Sentence;

/// 按行分割（支持 \n 和 \r\n），返回去除空白后的非空行
pub fn split_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 对文本进行分句，编号从 1 开始
pub fn sentences_from_text(text: &str) -> Vec<Sentence> {
    split_lines(text)
        .into_iter()
        .enumerate()
        // split_lines 已过滤空行，构造不会失败
        .filter_map(|(i, line)| Sentence::new(i + 1, line).ok())
        .collect()
}
