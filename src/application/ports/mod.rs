//! Application Ports - 出站端口定义
//!
//! 定义应用层与基础设施层的抽象接口

mod audio_engine;
mod audio_probe;
mod sentence_source;
mod speech_synthesizer;

pub use audio_engine::{AudioEnginePort, EngineError};
pub use audio_probe::{AudioInfo, AudioProbePort, ProbeError};
pub use sentence_source::{SentenceSourcePort, SourceError};
pub use speech_synthesizer::{SpeechSynthesizerPort, SynthesisRequest, SynthesisResponse, TtsError};
