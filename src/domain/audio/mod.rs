//! Audio Context - 音频限界上下文
//!
//! 职责:
//! - 音频片段值对象与统一输出编码
//! - 滤镜链 / 滤镜图的类型化描述及其到引擎命令行的序列化
//! - 增强预设（逐句链、最终链）
//! - 静音源与静音插入策略

mod clip;
mod enhancement;
mod errors;
mod filter;
mod graph;
mod silence;

pub use clip::{AudioClip, ClipRole, OutputEncoding, PIPELINE_ENCODING};
pub use enhancement::{
    clip_chain, final_chain, Compression, LoudnessTarget, BROADCAST_LOUDNESS, CLIP_COMPRESSION,
    FINAL_COMPRESSION, HIGH_PASS_HZ, LOW_PASS_HZ,
};
pub use errors::AudioError;
pub use filter::{FilterChain, FilterStage};
pub use graph::{EngineInput, EngineInvocation, FilterGraph, COMBINED_LABEL, OUTPUT_LABEL};
pub use silence::{silence_input, SilenceDuration, SilencePlacement};
