//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（SpeechSynthesizer、AudioEngine、SentenceSource、AudioProbe）
//! - commands: 组装命令及处理器（Assembler）
//! - stages: 产生音频片段的步骤（Enhancer、SilenceProducer）
//! - janitor: 单次运行的中间产物登记与清理
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod janitor;
pub mod ports;
pub mod stages;

// Re-exports
pub use commands::{
    handlers::{AssembleNarrationHandler, AssemblerConfig},
    AssembleNarration, AssembleNarrationResponse,
};

pub use error::{AssemblyError, AssemblyStep};

pub use janitor::{CleanupGuard, CleanupReport, ResourceJanitor};

pub use ports::{
    // Audio engine
    AudioEnginePort,
    EngineError,
    // Audio probe
    AudioInfo,
    AudioProbePort,
    ProbeError,
    // Sentence source
    SentenceSourcePort,
    SourceError,
    // Speech synthesizer
    SpeechSynthesizerPort,
    SynthesisRequest,
    SynthesisResponse,
    TtsError,
};

pub use stages::{Enhancer, SilenceProducer};
