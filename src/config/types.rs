//! Configuration Types
//!
//! 定义所有配置结构体

use serde::Deserialize;
use std::path::PathBuf;

use crate::domain::audio::SilencePlacement;

/// 应用主配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// 语音合成配置
    #[serde(default)]
    pub tts: TtsConfig,

    /// 音频引擎配置
    #[serde(default)]
    pub engine: EngineConfig,

    /// 静音配置
    #[serde(default)]
    pub silence: SilenceConfig,

    /// 存储配置
    #[serde(default)]
    pub storage: StorageConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

/// 语音合成配置
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// TTS 服务基础 URL
    #[serde(default = "default_tts_url")]
    pub url: String,

    /// 语言标签
    #[serde(default = "default_lang")]
    pub lang: String,

    /// 请求超时时间（秒）
    #[serde(default = "default_tts_timeout")]
    pub timeout_secs: u64,

    /// 最大重试次数
    #[serde(default)]
    pub max_retries: u32,

    /// 慢速朗读
    #[serde(default)]
    pub slow: bool,
}

fn default_tts_url() -> String {
    "https://translate.google.com".to_string()
}

fn default_lang() -> String {
    "en-us".to_string()
}

fn default_tts_timeout() -> u64 {
    30
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            url: default_tts_url(),
            lang: default_lang(),
            timeout_secs: default_tts_timeout(),
            max_retries: 0,
            slow: false,
        }
    }
}

/// 音频引擎配置
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// 可执行文件名或路径
    #[serde(default = "default_engine_binary")]
    pub binary: String,

    /// 单次调用超时（秒），0 表示不限制
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

fn default_engine_binary() -> String {
    "ffmpeg".to_string()
}

fn default_engine_timeout() -> u64 {
    300 // 5 分钟
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            binary: default_engine_binary(),
            timeout_secs: default_engine_timeout(),
        }
    }
}

/// 静音配置
#[derive(Debug, Clone, Deserialize)]
pub struct SilenceConfig {
    /// 静音时长（秒）
    #[serde(default = "default_silence_duration")]
    pub duration_secs: f64,

    /// 插入策略: after_every | between_only
    #[serde(default)]
    pub placement: SilencePlacement,
}

fn default_silence_duration() -> f64 {
    2.0
}

impl Default for SilenceConfig {
    fn default() -> Self {
        Self {
            duration_secs: default_silence_duration(),
            placement: SilencePlacement::default(),
        }
    }
}

/// 存储配置
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageConfig {
    /// 中间文件目录，未设置时使用系统临时目录
    #[serde(default)]
    pub work_dir: Option<PathBuf>,
}

impl StorageConfig {
    pub fn resolved_work_dir(&self) -> PathBuf {
        self.work_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
