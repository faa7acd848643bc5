//! Audio Context - 音频片段与输出编码

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// 音频片段角色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClipRole {
    /// 语音合成服务返回的原始音频
    RawSpeech,
    /// 经过逐句增强链处理的音频
    EnhancedSpeech,
    /// 静音片段
    Silence,
    /// 最终输出，交给调用方，不参与清理
    Final,
}

impl ClipRole {
    /// 是否为中间产物（运行结束时需要删除）
    pub fn is_intermediate(&self) -> bool {
        !matches!(self, ClipRole::Final)
    }
}

impl std::fmt::Display for ClipRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClipRole::RawSpeech => write!(f, "raw-speech"),
            ClipRole::EnhancedSpeech => write!(f, "enhanced-speech"),
            ClipRole::Silence => write!(f, "silence"),
            ClipRole::Final => write!(f, "final"),
        }
    }
}

/// 引擎输出编码
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputEncoding {
    /// 编码器名称
    pub codec: &'static str,
    /// 采样率（Hz）
    pub sample_rate: u32,
    /// 声道数
    pub channels: u8,
    /// 恒定比特率（kbit/s）
    pub bitrate_kbps: u32,
    /// 质量参数，0 为最高
    pub quality: u8,
    /// 文件扩展名
    pub extension: &'static str,
}

/// 整条流水线唯一的输出编码
///
/// 每一次产生音频的引擎调用都使用它，拼接时片段参数才能一致
pub const PIPELINE_ENCODING: OutputEncoding = OutputEncoding {
    codec: "libmp3lame",
    sample_rate: 44_100,
    channels: 2,
    bitrate_kbps: 320,
    quality: 0,
    extension: "mp3",
};

impl OutputEncoding {
    /// 编码参数：`-c:a libmp3lame -b:a 320k -ar 44100 -ac 2 -q:a 0`
    pub fn to_args(&self) -> Vec<OsString> {
        [
            "-c:a".to_string(),
            self.codec.to_string(),
            "-b:a".to_string(),
            format!("{}k", self.bitrate_kbps),
            "-ar".to_string(),
            self.sample_rate.to_string(),
            "-ac".to_string(),
            self.channels.to_string(),
            "-q:a".to_string(),
            self.quality.to_string(),
        ]
        .into_iter()
        .map(OsString::from)
        .collect()
    }

    /// 声道布局名称（静音源使用）
    pub fn channel_layout(&self) -> &'static str {
        if self.channels == 1 {
            "mono"
        } else {
            "stereo"
        }
    }
}

/// 磁盘上的音频片段
#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub path: PathBuf,
    pub role: ClipRole,
    /// 原始合成音频的编码未知，为 None
    pub encoding: Option<OutputEncoding>,
    /// 实测时长（仅最终输出会探测）
    pub duration: Option<Duration>,
}

impl AudioClip {
    /// 合成服务返回的原始片段
    pub fn raw(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            role: ClipRole::RawSpeech,
            encoding: None,
            duration: None,
        }
    }

    /// 引擎产出的片段，编码固定为流水线编码
    pub fn encoded(path: impl Into<PathBuf>, role: ClipRole) -> Self {
        Self {
            path: path.into(),
            role,
            encoding: Some(PIPELINE_ENCODING),
            duration: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn with_duration(mut self, duration: Option<Duration>) -> Self {
        self.duration = duration;
        self
    }
}
