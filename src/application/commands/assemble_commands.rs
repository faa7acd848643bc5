//! Assemble Commands

use std::path::PathBuf;

use crate::domain::audio::AudioClip;
use crate::domain::narration::{RunId, Sentence};

/// 把有序句子组装成一条朗读音轨
#[derive(Debug, Clone)]
pub struct AssembleNarration {
    pub sentences: Vec<Sentence>,
    pub output_path: PathBuf,
}

/// 组装结果
#[derive(Debug, Clone)]
pub struct AssembleNarrationResponse {
    pub run_id: RunId,
    /// 最终输出（不在清理范围内）
    pub output: AudioClip,
    pub sentence_count: usize,
    pub silence_insertions: usize,
    /// 引擎版本信息
    pub engine_version: String,
}
