//! 应用层错误定义
//!
//! 一次朗读组装只有一个终止错误：外部协作者的错误在组装边界被捕获，
//! 附上失败的步骤后统一返回

use thiserror::Error;

use super::ports::{EngineError, SourceError, TtsError};
use crate::domain::audio::AudioError;

/// 组装步骤（用于错误上下文和日志）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyStep {
    /// 引擎可用性探测
    Probe,
    /// 第 N 句语音合成
    Synthesize { sentence: usize },
    /// 第 N 句增强
    Enhance { sentence: usize },
    /// 静音生成
    Silence,
    /// 最终拼接
    Concatenate,
}

impl std::fmt::Display for AssemblyStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssemblyStep::Probe => write!(f, "engine probe"),
            AssemblyStep::Synthesize { sentence } => write!(f, "synthesis of sentence {}", sentence),
            AssemblyStep::Enhance { sentence } => write!(f, "enhancement of sentence {}", sentence),
            AssemblyStep::Silence => write!(f, "silence generation"),
            AssemblyStep::Concatenate => write!(f, "final concatenation"),
        }
    }
}

/// 组装错误
#[derive(Debug, Error)]
pub enum AssemblyError {
    /// 环境中没有音频引擎，未做任何合成
    #[error("Audio engine is not available: {0}")]
    MissingCapability(String),

    /// 输入缺失、不可读或没有可用句子
    #[error("Input error: {0}")]
    InputError(String),

    /// 某一句合成失败，整次运行中止
    #[error("Speech synthesis failed for sentence {sentence}: {source}")]
    SynthesisError {
        sentence: usize,
        #[source]
        source: TtsError,
    },

    /// 引擎调用退出码非零
    #[error("{step} failed: {diagnostic}")]
    EngineInvocationError {
        step: AssemblyStep,
        diagnostic: String,
    },

    /// 中间文件写入失败
    #[error("Storage error during {step}: {message}")]
    StorageError { step: AssemblyStep, message: String },
}

impl AssemblyError {
    /// 包装探测之后某一步的引擎错误
    ///
    /// 引擎中途消失也按该步骤失败上报；`MissingCapability` 只来自运行前的探测
    pub fn engine(step: AssemblyStep, err: EngineError) -> Self {
        Self::EngineInvocationError {
            step,
            diagnostic: err.diagnostic(),
        }
    }

    /// 滤镜图构建失败（没有输入）也按引擎调用失败处理
    pub fn graph(step: AssemblyStep, err: AudioError) -> Self {
        Self::EngineInvocationError {
            step,
            diagnostic: err.to_string(),
        }
    }

    pub fn storage(step: AssemblyStep, message: impl Into<String>) -> Self {
        Self::StorageError {
            step,
            message: message.into(),
        }
    }

    /// 失败步骤（输入错误不属于任何步骤）
    pub fn step(&self) -> Option<AssemblyStep> {
        match self {
            AssemblyError::MissingCapability(_) => Some(AssemblyStep::Probe),
            AssemblyError::InputError(_) => None,
            AssemblyError::SynthesisError { sentence, .. } => Some(AssemblyStep::Synthesize {
                sentence: *sentence,
            }),
            AssemblyError::EngineInvocationError { step, .. }
            | AssemblyError::StorageError { step, .. } => Some(*step),
        }
    }
}

impl From<SourceError> for AssemblyError {
    fn from(err: SourceError) -> Self {
        Self::InputError(err.to_string())
    }
}
