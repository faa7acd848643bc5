//! Domain Layer - 领域层
//!
//! 包含两个部分:
//! - Narration Context: 句子与运行标识
//! - Audio Context: 音频片段、滤镜链、滤镜图（纯值对象，不涉及进程调用）

pub mod audio;
pub mod narration;

// 共享的文本分行器
mod text_lines;

pub use text_lines::{sentences_from_text, split_lines};
