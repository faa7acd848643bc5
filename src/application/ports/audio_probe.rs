//! Audio Probe Port - 音频信息探测

use std::path::Path;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("Decoding error: {0}")]
    DecodingError(String),
}

/// 音频信息
#[derive(Debug, Clone, PartialEq)]
pub struct AudioInfo {
    pub duration: Duration,
    pub sample_rate: u32,
    pub channels: u8,
}

/// Audio Probe Port
pub trait AudioProbePort: Send + Sync {
    /// 获取音频信息（不解码 PCM）
    fn probe(&self, path: &Path) -> Result<AudioInfo, ProbeError>;
}
