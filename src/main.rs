//! Narrator - 文本文件 → 朗读 MP3
//!
//! 用法: narrator <TEXT_FILE> [--output <MP3>] [--config <TOML>]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use narrator::application::{
    AssembleNarration, AssembleNarrationHandler, AssemblerConfig, SentenceSourcePort,
};
use narrator::config::{load_config_from_path, print_config, validate_config};
use narrator::domain::audio::{SilenceDuration, SilencePlacement, PIPELINE_ENCODING};
use narrator::infrastructure::adapters::{
    FfmpegEngine, FfmpegEngineConfig, FileSentenceSource, HttpTtsClient, HttpTtsClientConfig,
    SymphoniaProbe,
};

#[derive(Parser)]
#[command(name = "narrator")]
#[command(about = "Convert a text file of sentences into one narrated MP3", long_about = None)]
struct Cli {
    /// 输入文本文件（UTF-8，每行一句）
    input: PathBuf,

    /// 输出路径，默认把输入扩展名替换为 .mp3
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 静音时长（秒），覆盖配置
    #[arg(long)]
    silence: Option<f64>,

    /// 静音插入策略: after-every | between-only
    #[arg(long)]
    placement: Option<SilencePlacement>,

    /// 语言标签，覆盖配置
    #[arg(long)]
    lang: Option<String>,
}

/// 默认输出路径：替换输入文件扩展名
fn default_output_path(input: &Path) -> PathBuf {
    input.with_extension(PIPELINE_ENCODING.extension)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
    if let Some(secs) = cli.silence {
        config.silence.duration_secs = secs;
    }
    if let Some(placement) = cli.placement {
        config.silence.placement = placement;
    }
    if let Some(lang) = cli.lang {
        config.tts.lang = lang;
    }
    validate_config(&config)?;

    // 初始化日志
    let log_filter = format!("{},narrator={}", config.log.level, config.log.level);
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter)),
        )
        .with_target(false)
        .init();

    print_config(&config);

    let output_path = cli
        .output
        .clone()
        .unwrap_or_else(|| default_output_path(&cli.input));

    tracing::info!("Reading text file: {}", cli.input.display());
    let sentences = FileSentenceSource::new()
        .read_sentences(&cli.input)
        .await
        .with_context(|| format!("Cannot read sentences from {}", cli.input.display()))?;

    tracing::info!("Found a total of {} sentences:", sentences.len());
    for sentence in &sentences {
        tracing::info!("  {}", sentence);
    }

    let tts_engine = Arc::new(HttpTtsClient::new(HttpTtsClientConfig {
        base_url: config.tts.url.clone(),
        timeout_secs: config.tts.timeout_secs,
        max_retries: config.tts.max_retries,
        slow: config.tts.slow,
    })?);
    let audio_engine = Arc::new(FfmpegEngine::new(FfmpegEngineConfig {
        binary: config.engine.binary.clone(),
        timeout_secs: config.engine.timeout_secs,
    }));

    let work_dir = config.storage.resolved_work_dir();
    tokio::fs::create_dir_all(&work_dir).await?;

    let assembler_config = AssemblerConfig {
        language: config.tts.lang.clone(),
        silence_duration: SilenceDuration::new(config.silence.duration_secs)?,
        placement: config.silence.placement,
        work_dir,
    };
    let handler = AssembleNarrationHandler::new(assembler_config, tts_engine, audio_engine)
        .with_probe(Arc::new(SymphoniaProbe::new()));

    let response = handler
        .handle(AssembleNarration {
            sentences,
            output_path,
        })
        .await?;

    tracing::info!(
        "Audio file created: {} ({} sentences, {} silence insertions, {} Hz, {} kbit/s, stereo)",
        response.output.path.display(),
        response.sentence_count,
        response.silence_insertions,
        PIPELINE_ENCODING.sample_rate,
        PIPELINE_ENCODING.bitrate_kbps,
    );

    Ok(())
}
