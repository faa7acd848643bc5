//! Fake TTS Client - 用于测试的语音合成客户端
//!
//! 不调用外部服务；返回固定音频（或以文本本身作为占位数据），并记录调用次数

use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{
    SpeechSynthesizerPort, SynthesisRequest, SynthesisResponse, TtsError,
};

/// Fake TTS Client 配置
#[derive(Debug, Clone, Default)]
pub struct FakeTtsClientConfig {
    /// 固定返回的音频文件路径；为 None 时返回 `speech:<text>` 占位数据
    pub audio_file_path: Option<PathBuf>,
    /// 第 N 次调用（1 起始）返回服务错误
    pub fail_on_call: Option<usize>,
}

/// Fake TTS Client
pub struct FakeTtsClient {
    config: FakeTtsClientConfig,
    /// 缓存的音频数据
    audio_data: Option<Vec<u8>>,
    calls: AtomicUsize,
    texts: Mutex<Vec<String>>,
}

impl FakeTtsClient {
    /// 创建新的 FakeTtsClient
    pub fn new(config: FakeTtsClientConfig) -> Result<Self, std::io::Error> {
        let audio_data = match &config.audio_file_path {
            Some(path) => {
                let data = std::fs::read(path)?;
                tracing::info!(path = %path.display(), "FakeTtsClient initialized");
                Some(data)
            }
            None => None,
        };
        Ok(Self {
            config,
            audio_data,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        })
    }

    /// 使用占位数据创建
    pub fn with_defaults() -> Self {
        Self {
            config: FakeTtsClientConfig::default(),
            audio_data: None,
            calls: AtomicUsize::new(0),
            texts: Mutex::new(Vec::new()),
        }
    }

    /// 第 N 次调用失败
    pub fn failing_on(call: usize) -> Self {
        let mut client = Self::with_defaults();
        client.config.fail_on_call = Some(call);
        client
    }

    /// 已收到的调用次数
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// 已收到的文本（按调用顺序）
    pub fn texts(&self) -> Vec<String> {
        self.texts
            .lock()
            .map(|texts| texts.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl SpeechSynthesizerPort for FakeTtsClient {
    async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisResponse, TtsError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut texts) = self.texts.lock() {
            texts.push(request.text.clone());
        }

        tracing::debug!(
            call = call,
            text_len = request.text.len(),
            language = %request.language,
            "FakeTtsClient: returning fixed audio"
        );

        if self.config.fail_on_call == Some(call) {
            return Err(TtsError::ServiceError(format!(
                "injected failure on call {}",
                call
            )));
        }
        if request.text.trim().is_empty() {
            return Err(TtsError::EmptyText);
        }

        let audio_data = match &self.audio_data {
            Some(data) => data.clone(),
            None => format!("speech:{}", request.text).into_bytes(),
        };
        Ok(SynthesisResponse {
            audio_data,
            requests: 1,
        })
    }
}
