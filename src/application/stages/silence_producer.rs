//! Silence Producer - 生成静音片段

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::error::{AssemblyError, AssemblyStep};
use crate::application::ports::AudioEnginePort;
use crate::domain::audio::{
    silence_input, AudioClip, ClipRole, EngineInvocation, FilterChain, SilenceDuration,
    PIPELINE_ENCODING,
};

pub struct SilenceProducer {
    engine: Arc<dyn AudioEnginePort>,
}

impl SilenceProducer {
    pub fn new(engine: Arc<dyn AudioEnginePort>) -> Self {
        Self { engine }
    }

    /// 生成一段纯数字静音，采样率/声道/编码与其他片段一致
    pub async fn make_silence(
        &self,
        duration: SilenceDuration,
        destination: impl Into<PathBuf>,
    ) -> Result<AudioClip, AssemblyError> {
        let step = AssemblyStep::Silence;
        let invocation = EngineInvocation::new(
            vec![silence_input(duration, &PIPELINE_ENCODING)],
            FilterChain::empty(),
            destination,
        )
        .map_err(|e| AssemblyError::graph(step, e))?;

        self.engine
            .run(&invocation)
            .await
            .map_err(|e| AssemblyError::engine(step, e))?;

        Ok(AudioClip::encoded(invocation.destination(), ClipRole::Silence))
    }
}
