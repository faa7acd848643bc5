//! FFmpeg Engine - 通过子进程调用 ffmpeg
//!
//! 实现 AudioEnginePort trait。每次调用都是阻塞等待的外部进程，可配置超时；
//! 超时后子进程随 future 一起被终止。

use async_trait::async_trait;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;

use crate::application::ports::{AudioEnginePort, EngineError};
use crate::domain::audio::EngineInvocation;

/// 失败时保留的 stderr 行数
const STDERR_TAIL_LINES: usize = 20;

/// FFmpeg 引擎配置
#[derive(Debug, Clone)]
pub struct FfmpegEngineConfig {
    /// 可执行文件名或路径
    pub binary: String,
    /// 单次调用超时（秒），0 表示不限制
    pub timeout_secs: u64,
}

impl Default for FfmpegEngineConfig {
    fn default() -> Self {
        Self {
            binary: "ffmpeg".to_string(),
            timeout_secs: 300,
        }
    }
}

/// FFmpeg 引擎
pub struct FfmpegEngine {
    config: FfmpegEngineConfig,
}

impl FfmpegEngine {
    pub fn new(config: FfmpegEngineConfig) -> Self {
        Self { config }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.config.binary);
        cmd.stdin(Stdio::null()).kill_on_drop(true);
        cmd
    }

    fn install_hint(&self) -> String {
        format!(
            "'{}' could not be run. Install FFmpeg \
             (macOS: brew install ffmpeg, Ubuntu: sudo apt install ffmpeg, \
             Windows: https://ffmpeg.org/download.html)",
            self.config.binary
        )
    }
}

#[async_trait]
impl AudioEnginePort for FfmpegEngine {
    async fn probe(&self) -> Result<String, EngineError> {
        let output = self
            .command()
            .arg("-version")
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| EngineError::Unavailable(format!("{}: {}", self.install_hint(), e)))?;

        if !output.status.success() {
            return Err(EngineError::Unavailable(format!(
                "{} -version exited with {}",
                self.config.binary, output.status
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.lines().next().unwrap_or_default().trim().to_string())
    }

    async fn run(&self, invocation: &EngineInvocation) -> Result<(), EngineError> {
        let mut cmd = self.command();
        cmd.args(["-hide_banner", "-nostdin"])
            .args(invocation.to_args())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());

        tracing::debug!(
            inputs = invocation.inputs().len(),
            graph = %invocation.graph(),
            destination = %invocation.destination().display(),
            "Running audio engine"
        );

        let result = if self.config.timeout_secs > 0 {
            tokio::time::timeout(Duration::from_secs(self.config.timeout_secs), cmd.output())
                .await
                .map_err(|_| EngineError::Timeout(self.config.timeout_secs))?
        } else {
            cmd.output().await
        };

        let output = result.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                EngineError::Unavailable(self.install_hint())
            } else {
                EngineError::IoError(e.to_string())
            }
        })?;

        if !output.status.success() {
            return Err(EngineError::Failed {
                status: output.status.to_string(),
                stderr: stderr_tail(&output.stderr, STDERR_TAIL_LINES),
            });
        }

        Ok(())
    }
}

/// 取 stderr 末尾若干行（ffmpeg 的错误信息在最后）
fn stderr_tail(stderr: &[u8], lines: usize) -> String {
    let text = String::from_utf8_lossy(stderr);
    let all: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
    let start = all.len().saturating_sub(lines);
    all[start..].join("\n")
}
