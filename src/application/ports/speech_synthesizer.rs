//! Speech Synthesizer Port - 语音合成抽象
//!
//! 定义语音合成的抽象接口，具体实现在 infrastructure/adapters 层

use async_trait::async_trait;
use thiserror::Error;

/// 合成错误
#[derive(Debug, Error)]
pub enum TtsError {
    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Service error: {0}")]
    ServiceError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Unsupported language tag: {0}")]
    UnsupportedLanguage(String),

    #[error("Text is empty")]
    EmptyText,
}

impl TtsError {
    /// 网络类错误可以重试，其余错误重试无意义
    pub fn is_retryable(&self) -> bool {
        matches!(self, TtsError::NetworkError(_) | TtsError::Timeout)
    }
}

/// 合成请求
#[derive(Debug, Clone)]
pub struct SynthesisRequest {
    /// 要合成的文本内容
    pub text: String,
    /// 语言标签（例如 en-us）
    pub language: String,
}

/// 合成结果
#[derive(Debug, Clone)]
pub struct SynthesisResponse {
    /// 已编码的原始音频数据（MP3）
    pub audio_data: Vec<u8>,
    /// 服务端请求次数（长文本会被切分为多次请求）
    pub requests: usize,
}

/// Speech Synthesizer Port
///
/// 外部语音合成服务的抽象接口
#[async_trait]
pub trait SpeechSynthesizerPort: Send + Sync {
    /// 合成一段文本，返回编码后的音频数据
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError>;
}
