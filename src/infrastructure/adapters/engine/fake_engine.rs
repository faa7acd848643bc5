//! Fake Audio Engine - 用于测试的音频引擎
//!
//! 不做真实音频处理：输出文件内容是各输入内容以 `|` 连接（lavfi 输入记为 `silence`），
//! 便于断言拼接顺序。记录每一次调用，支持注入失败与"未安装"状态。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::application::ports::{AudioEnginePort, EngineError};
use crate::domain::audio::{EngineInput, EngineInvocation};

pub struct FakeAudioEngine {
    available: bool,
    /// 第 N 次 run（1 起始）失败，并在目标路径留下残缺文件
    fail_on_run: Option<usize>,
    runs: AtomicUsize,
    invocations: Mutex<Vec<EngineInvocation>>,
}

impl FakeAudioEngine {
    pub fn new() -> Self {
        Self {
            available: true,
            fail_on_run: None,
            runs: AtomicUsize::new(0),
            invocations: Mutex::new(Vec::new()),
        }
    }

    /// 模拟环境中没有引擎
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    pub fn failing_on(run: usize) -> Self {
        Self {
            fail_on_run: Some(run),
            ..Self::new()
        }
    }

    pub fn run_count(&self) -> usize {
        self.runs.load(Ordering::SeqCst)
    }

    /// 已记录的调用（按顺序）
    pub fn invocations(&self) -> Vec<EngineInvocation> {
        self.invocations
            .lock()
            .map(|list| list.clone())
            .unwrap_or_default()
    }

    pub fn last_invocation(&self) -> Option<EngineInvocation> {
        self.invocations().pop()
    }
}

impl Default for FakeAudioEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioEnginePort for FakeAudioEngine {
    async fn probe(&self) -> Result<String, EngineError> {
        if self.available {
            Ok("fake-engine version 1.0".to_string())
        } else {
            Err(EngineError::Unavailable("fake engine disabled".to_string()))
        }
    }

    async fn run(&self, invocation: &EngineInvocation) -> Result<(), EngineError> {
        if !self.available {
            return Err(EngineError::Unavailable("fake engine disabled".to_string()));
        }
        let run = self.runs.fetch_add(1, Ordering::SeqCst) + 1;
        if let Ok(mut list) = self.invocations.lock() {
            list.push(invocation.clone());
        }

        let destination = invocation.destination();
        if self.fail_on_run == Some(run) {
            tokio::fs::write(destination, b"partial")
                .await
                .map_err(|e| EngineError::IoError(e.to_string()))?;
            return Err(EngineError::Failed {
                status: "exit status: 1".to_string(),
                stderr: format!("injected failure on run {}", run),
            });
        }

        let mut parts: Vec<Vec<u8>> = Vec::with_capacity(invocation.inputs().len());
        for input in invocation.inputs() {
            match input {
                EngineInput::File(path) => {
                    let data = tokio::fs::read(path).await.map_err(|e| EngineError::Failed {
                        status: "exit status: 1".to_string(),
                        stderr: format!("{}: {}", path.display(), e),
                    })?;
                    parts.push(data);
                }
                EngineInput::Lavfi { .. } => parts.push(b"silence".to_vec()),
            }
        }

        tokio::fs::write(destination, parts.join(&b'|'))
            .await
            .map_err(|e| EngineError::IoError(e.to_string()))
    }
}
