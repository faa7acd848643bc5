//! Audio Engine Port - 音频处理引擎抽象
//!
//! 引擎执行一次声明式滤镜图调用（输入、滤镜图、输出编码、目标路径都在
//! `EngineInvocation` 中描述）。退出码非零时目标文件一律视为无效。

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::audio::EngineInvocation;

/// 引擎错误
#[derive(Debug, Error)]
pub enum EngineError {
    /// 环境中没有可用引擎，不可重试
    #[error("Audio engine unavailable: {0}")]
    Unavailable(String),

    /// 引擎退出码非零，携带诊断输出
    #[error("Audio engine exited with {status}: {stderr}")]
    Failed { status: String, stderr: String },

    #[error("Audio engine timed out after {0}s")]
    Timeout(u64),

    #[error("IO error: {0}")]
    IoError(String),
}

impl EngineError {
    /// 引擎的诊断文本
    pub fn diagnostic(&self) -> String {
        match self {
            EngineError::Failed { stderr, .. } => stderr.trim().to_string(),
            other => other.to_string(),
        }
    }
}

/// Audio Engine Port
#[async_trait]
pub trait AudioEnginePort: Send + Sync {
    /// 探测引擎是否可用，返回版本信息
    async fn probe(&self) -> Result<String, EngineError>;

    /// 执行一次调用；成功返回即表示目标文件完整有效
    async fn run(&self, invocation: &EngineInvocation) -> Result<(), EngineError>;
}
