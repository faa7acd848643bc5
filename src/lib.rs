//! Narrator - 句子朗读音轨生成
//!
//! 把一组句子逐句合成语音、逐句增强，与固定时长的静音交错拼接，
//! 再做一次整体压缩与响度归一化，输出一条 MP3 音轨。
//!
//! 架构设计: Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Narration Context: 句子、运行标识
//! - Audio Context: 滤镜链、滤镜图、增强预设、静音策略
//!
//! 应用层 (application/):
//! - Ports: SpeechSynthesizer, AudioEngine, SentenceSource, AudioProbe
//! - Commands: AssembleNarration 及其处理器（Assembler）
//! - Janitor: 中间产物登记与清理
//!
//! 基础设施层 (infrastructure/):
//! - Adapters: HTTP TTS Client, FFmpeg Engine, File Sentence Source, Symphonia Probe

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
