//! Pipeline Stages - 产生音频片段的引擎调用步骤
//!
//! - Enhancer: 逐句增强、最终增强链
//! - SilenceProducer: 生成固定时长静音

mod enhancer;
mod silence_producer;

pub use enhancer::Enhancer;
pub use silence_producer::SilenceProducer;
