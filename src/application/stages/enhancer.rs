//! Enhancer - 逐句增强

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::error::{AssemblyError, AssemblyStep};
use crate::application::ports::AudioEnginePort;
use crate::domain::audio::{
    clip_chain, final_chain, AudioClip, ClipRole, EngineInput, EngineInvocation, FilterChain,
};

pub struct Enhancer {
    engine: Arc<dyn AudioEnginePort>,
}

impl Enhancer {
    pub fn new(engine: Arc<dyn AudioEnginePort>) -> Self {
        Self { engine }
    }

    /// 对一段原始合成音频应用逐句增强链，输出为流水线统一编码
    pub async fn enhance_clip(
        &self,
        raw: &AudioClip,
        destination: impl Into<PathBuf>,
        sentence: usize,
    ) -> Result<AudioClip, AssemblyError> {
        let step = AssemblyStep::Enhance { sentence };
        let invocation =
            EngineInvocation::new(vec![EngineInput::file(raw.path())], clip_chain(), destination)
                .map_err(|e| AssemblyError::graph(step, e))?;

        self.engine
            .run(&invocation)
            .await
            .map_err(|e| AssemblyError::engine(step, e))?;

        Ok(AudioClip::encoded(
            invocation.destination(),
            ClipRole::EnhancedSpeech,
        ))
    }

    /// 拼接后使用的最终链
    pub fn final_chain(&self) -> FilterChain {
        final_chain()
    }
}
