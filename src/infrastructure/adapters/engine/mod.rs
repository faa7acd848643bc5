//! Engine Adapter - 音频引擎实现

mod fake_engine;
mod ffmpeg_engine;

pub use fake_engine::FakeAudioEngine;
pub use ffmpeg_engine::{FfmpegEngine, FfmpegEngineConfig};
