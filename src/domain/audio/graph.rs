//! Audio Context - 滤镜图与引擎调用
//!
//! 一次引擎调用 = 有序输入 + 滤镜图 + 固定输出编码 + 目标路径。
//! 滤镜图结构：
//!
//! ```text
//! [0][1]...[n-1]concat=n=<n>:v=0:a=1[combined];[combined]<chain>[out]
//! ```
//!
//! 链为空时 concat 直接输出到 `[out]`。

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use super::{AudioError, FilterChain, OutputEncoding, PIPELINE_ENCODING};

/// concat 输出标签
pub const COMBINED_LABEL: &str = "combined";
/// 最终输出标签
pub const OUTPUT_LABEL: &str = "out";

/// 引擎输入
#[derive(Debug, Clone, PartialEq)]
pub enum EngineInput {
    /// 已存在的音频文件
    File(PathBuf),
    /// lavfi 虚拟源（例如 anullsrc），带时长限制
    Lavfi { expr: String, duration_secs: f64 },
}

impl EngineInput {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(path.into())
    }

    fn push_args(&self, args: &mut Vec<OsString>) {
        match self {
            EngineInput::File(path) => {
                args.push("-i".into());
                args.push(path.as_os_str().to_owned());
            }
            EngineInput::Lavfi {
                expr,
                duration_secs,
            } => {
                args.push("-f".into());
                args.push("lavfi".into());
                args.push("-t".into());
                args.push(duration_secs.to_string().into());
                args.push("-i".into());
                args.push(expr.into());
            }
        }
    }
}

/// 滤镜图：所有输入按顺序 concat，再经过滤镜链，输出到 `[out]`
#[derive(Debug, Clone, PartialEq)]
pub struct FilterGraph {
    input_count: usize,
    chain: FilterChain,
}

impl FilterGraph {
    pub fn new(input_count: usize, chain: FilterChain) -> Result<Self, AudioError> {
        if input_count == 0 {
            return Err(AudioError::NoInputs);
        }
        Ok(Self { input_count, chain })
    }

    pub fn input_count(&self) -> usize {
        self.input_count
    }

    pub fn chain(&self) -> &FilterChain {
        &self.chain
    }
}

impl std::fmt::Display for FilterGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 标签编号按全部输入的位置分配，从 0 开始
        for index in 0..self.input_count {
            write!(f, "[{}]", index)?;
        }
        write!(f, "concat=n={}:v=0:a=1", self.input_count)?;
        if self.chain.is_empty() {
            write!(f, "[{}]", OUTPUT_LABEL)
        } else {
            write!(
                f,
                "[{c}];[{c}]{}[{}]",
                self.chain,
                OUTPUT_LABEL,
                c = COMBINED_LABEL
            )
        }
    }
}

/// 一次完整的引擎调用
///
/// 滤镜图的输入数量由 `inputs` 推导，两者不会不一致
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInvocation {
    inputs: Vec<EngineInput>,
    graph: FilterGraph,
    encoding: OutputEncoding,
    destination: PathBuf,
}

impl EngineInvocation {
    pub fn new(
        inputs: Vec<EngineInput>,
        chain: FilterChain,
        destination: impl Into<PathBuf>,
    ) -> Result<Self, AudioError> {
        let graph = FilterGraph::new(inputs.len(), chain)?;
        Ok(Self {
            inputs,
            graph,
            encoding: PIPELINE_ENCODING,
            destination: destination.into(),
        })
    }

    pub fn inputs(&self) -> &[EngineInput] {
        &self.inputs
    }

    pub fn graph(&self) -> &FilterGraph {
        &self.graph
    }

    pub fn encoding(&self) -> &OutputEncoding {
        &self.encoding
    }

    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// 序列化为引擎命令行参数（不含可执行文件名）
    pub fn to_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec!["-y".into()];
        for input in &self.inputs {
            input.push_args(&mut args);
        }
        args.push("-filter_complex".into());
        args.push(self.graph.to_string().into());
        args.push("-map".into());
        args.push(format!("[{}]", OUTPUT_LABEL).into());
        args.extend(self.encoding.to_args());
        args.push(self.destination.as_os_str().to_owned());
        args
    }
}
