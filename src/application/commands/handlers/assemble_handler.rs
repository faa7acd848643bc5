//! Assemble Narration Handler - 朗读组装编排
//!
//! 流程:
//! 1. 探测引擎（在任何合成之前）
//! 2. 逐句：合成原始音频 → 逐句增强
//! 3. 生成一段静音
//! 4. 按插入策略拼接 + 最终增强链，一次引擎调用输出到目标路径
//! 5. 无论成功失败，返回前清理全部中间产物

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::application::commands::{AssembleNarration, AssembleNarrationResponse};
use crate::application::error::{AssemblyError, AssemblyStep};
use crate::application::janitor::ResourceJanitor;
use crate::application::ports::{
    AudioEnginePort, AudioProbePort, SpeechSynthesizerPort, SynthesisRequest,
};
use crate::application::stages::{Enhancer, SilenceProducer};
use crate::domain::audio::{
    AudioClip, ClipRole, EngineInput, EngineInvocation, SilenceDuration, SilencePlacement,
    PIPELINE_ENCODING,
};
use crate::domain::narration::{RunId, Sentence};

/// 进度日志中句子预览的最大字符数
const PREVIEW_CHARS: usize = 50;

/// 组装配置
#[derive(Debug, Clone)]
pub struct AssemblerConfig {
    /// 合成语言标签
    pub language: String,
    /// 静音时长
    pub silence_duration: SilenceDuration,
    /// 静音插入策略
    pub placement: SilencePlacement,
    /// 中间文件目录
    pub work_dir: PathBuf,
}

/// 单次运行的中间文件命名
struct RunPaths<'a> {
    run_id: RunId,
    work_dir: &'a Path,
    extension: &'static str,
}

impl RunPaths<'_> {
    fn file(&self, name: &str) -> PathBuf {
        self.work_dir.join(format!(
            "narrator-{}-{}.{}",
            self.run_id.short(),
            name,
            self.extension
        ))
    }

    fn raw(&self, sentence: usize) -> PathBuf {
        self.file(&format!("raw-{}", sentence))
    }

    fn clip(&self, sentence: usize) -> PathBuf {
        self.file(&format!("clip-{}", sentence))
    }

    fn silence(&self) -> PathBuf {
        self.file("silence")
    }
}

/// Assemble Narration Handler
pub struct AssembleNarrationHandler {
    config: AssemblerConfig,
    synthesizer: Arc<dyn SpeechSynthesizerPort>,
    engine: Arc<dyn AudioEnginePort>,
    probe: Option<Arc<dyn AudioProbePort>>,
    enhancer: Enhancer,
    silence_producer: SilenceProducer,
}

impl AssembleNarrationHandler {
    pub fn new(
        config: AssemblerConfig,
        synthesizer: Arc<dyn SpeechSynthesizerPort>,
        engine: Arc<dyn AudioEnginePort>,
    ) -> Self {
        Self {
            config,
            synthesizer,
            enhancer: Enhancer::new(engine.clone()),
            silence_producer: SilenceProducer::new(engine.clone()),
            engine,
            probe: None,
        }
    }

    /// 成功后探测最终输出的时长
    pub fn with_probe(mut self, probe: Arc<dyn AudioProbePort>) -> Self {
        self.probe = Some(probe);
        self
    }

    pub async fn handle(
        &self,
        command: AssembleNarration,
    ) -> Result<AssembleNarrationResponse, AssemblyError> {
        if command.sentences.is_empty() {
            return Err(AssemblyError::InputError(
                "no sentences to narrate".to_string(),
            ));
        }
        check_numbering(&command.sentences)?;

        // 引擎不可用时不做任何合成
        let engine_version = self
            .engine
            .probe()
            .await
            .map_err(|e| AssemblyError::MissingCapability(e.to_string()))?;
        tracing::debug!(engine = %engine_version, "Audio engine available");

        let run_id = RunId::new();
        let janitor = ResourceJanitor::new();
        let _cleanup = janitor.guard();

        let paths = RunPaths {
            run_id,
            work_dir: &self.config.work_dir,
            extension: PIPELINE_ENCODING.extension,
        };

        tracing::info!(
            run_id = %run_id,
            sentences = command.sentences.len(),
            placement = %self.config.placement,
            silence_secs = self.config.silence_duration.as_secs(),
            "Assembling narration"
        );

        let output = self
            .assemble(&command.sentences, &command.output_path, &paths, &janitor)
            .await?;

        let silence_insertions = self
            .config
            .placement
            .insertion_count(command.sentences.len());

        tracing::info!(
            run_id = %run_id,
            output = %output.path.display(),
            duration_ms = ?output.duration.map(|d| d.as_millis()),
            "Narration assembled"
        );

        Ok(AssembleNarrationResponse {
            run_id,
            output,
            sentence_count: command.sentences.len(),
            silence_insertions,
            engine_version,
        })
    }

    async fn assemble(
        &self,
        sentences: &[Sentence],
        output_path: &Path,
        paths: &RunPaths<'_>,
        janitor: &ResourceJanitor,
    ) -> Result<AudioClip, AssemblyError> {
        let total = sentences.len();
        let mut clips = Vec::with_capacity(total);

        for sentence in sentences {
            tracing::info!(
                "{}/{}: {}",
                sentence.index(),
                total,
                sentence.preview(PREVIEW_CHARS)
            );
            let raw = self.synthesize(sentence, paths, janitor).await?;

            let clip_path = paths.clip(sentence.index());
            janitor.track(&clip_path, ClipRole::EnhancedSpeech);
            let clip = self
                .enhancer
                .enhance_clip(&raw, clip_path, sentence.index())
                .await?;
            clips.push(clip);
        }

        let silence_path = paths.silence();
        janitor.track(&silence_path, ClipRole::Silence);
        let silence = self
            .silence_producer
            .make_silence(self.config.silence_duration, silence_path)
            .await?;
        tracing::debug!(path = %silence.path.display(), "Silence generated");

        let sequence = self.config.placement.interleave(&clips, &silence);
        let inputs = sequence
            .iter()
            .map(|clip| EngineInput::file(clip.path()))
            .collect();

        let step = AssemblyStep::Concatenate;
        let invocation = EngineInvocation::new(inputs, self.enhancer.final_chain(), output_path)
            .map_err(|e| AssemblyError::graph(step, e))?;

        tracing::info!(segments = sequence.len(), "Combining clips");
        tracing::debug!(artifacts = janitor.len(), "Intermediate artifacts tracked");
        if let Err(e) = self.engine.run(&invocation).await {
            discard_partial_output(output_path).await;
            return Err(AssemblyError::engine(step, e));
        }

        let duration = self.probe_duration(output_path);
        Ok(AudioClip::encoded(output_path, ClipRole::Final).with_duration(duration))
    }

    /// 合成一句并写入原始片段文件
    async fn synthesize(
        &self,
        sentence: &Sentence,
        paths: &RunPaths<'_>,
        janitor: &ResourceJanitor,
    ) -> Result<AudioClip, AssemblyError> {
        let step = AssemblyStep::Synthesize {
            sentence: sentence.index(),
        };
        let request = SynthesisRequest {
            text: sentence.text().to_string(),
            language: self.config.language.clone(),
        };

        let response = self
            .synthesizer
            .synthesize(request)
            .await
            .map_err(|source| AssemblyError::SynthesisError {
                sentence: sentence.index(),
                source,
            })?;

        let raw_path = paths.raw(sentence.index());
        janitor.track(&raw_path, ClipRole::RawSpeech);
        tokio::fs::write(&raw_path, &response.audio_data)
            .await
            .map_err(|e| AssemblyError::storage(step, e.to_string()))?;

        tracing::debug!(
            sentence = sentence.index(),
            size = response.audio_data.len(),
            requests = response.requests,
            "Speech synthesized"
        );

        Ok(AudioClip::raw(raw_path))
    }

    fn probe_duration(&self, path: &Path) -> Option<std::time::Duration> {
        let probe = self.probe.as_ref()?;
        match probe.probe(path) {
            Ok(info) => Some(info.duration),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to probe output");
                None
            }
        }
    }
}

/// 中间文件按句子编号命名，编号必须依次为 1..=N
fn check_numbering(sentences: &[Sentence]) -> Result<(), AssemblyError> {
    for (position, sentence) in sentences.iter().enumerate() {
        if sentence.index() != position + 1 {
            return Err(AssemblyError::InputError(format!(
                "sentence at position {} is numbered {}, expected {}",
                position + 1,
                sentence.index(),
                position + 1
            )));
        }
    }
    Ok(())
}

/// 最终调用失败时，目标路径上的残留文件一律删除
async fn discard_partial_output(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "Partial output removed"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), error = %e, "Failed to remove partial output"),
    }
}
