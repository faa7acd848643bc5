//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（narrator.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;
use crate::domain::audio::SilenceDuration;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["narrator", "narrator.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `NARRATOR_`，层级分隔符 `__`）
/// 2. 配置文件（narrator.toml 或 narrator.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `NARRATOR_TTS__LANG=en-gb`
/// - `NARRATOR_SILENCE__DURATION_SECS=1`
/// - `NARRATOR_SILENCE__PLACEMENT=between_only`
/// - `NARRATOR_ENGINE__BINARY=/opt/ffmpeg/bin/ffmpeg`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("tts.url", "https://translate.google.com")?
        .set_default("tts.lang", "en-us")?
        .set_default("tts.timeout_secs", 30)?
        .set_default("tts.max_retries", 0)?
        .set_default("tts.slow", false)?
        .set_default("engine.binary", "ffmpeg")?
        .set_default("engine.timeout_secs", 300)?
        .set_default("silence.duration_secs", 2.0)?
        .set_default("silence.placement", "after_every")?
        .set_default("log.level", "info")?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 例如: NARRATOR_TTS__LANG=en-gb
    builder = builder.add_source(
        Environment::with_prefix("NARRATOR")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;

    let app_config: AppConfig = config.try_deserialize().map_err(|e| {
        ConfigError::ParseError(format!("Failed to deserialize config: {}", e))
    })?;

    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if config.tts.url.is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS URL cannot be empty".to_string(),
        ));
    }

    if config.tts.lang.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "TTS language cannot be empty".to_string(),
        ));
    }

    if config.engine.binary.is_empty() {
        return Err(ConfigError::ValidationError(
            "Engine binary cannot be empty".to_string(),
        ));
    }

    SilenceDuration::new(config.silence.duration_secs)
        .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::debug!("=== Narrator Configuration ===");
    tracing::debug!("TTS URL: {}", config.tts.url);
    tracing::debug!("TTS Language: {}", config.tts.lang);
    tracing::debug!("TTS Timeout: {}s", config.tts.timeout_secs);
    tracing::debug!("Engine: {}", config.engine.binary);
    tracing::debug!("Engine Timeout: {}s", config.engine.timeout_secs);
    tracing::debug!("Silence: {}s ({})", config.silence.duration_secs, config.silence.placement);
    tracing::debug!("Work Directory: {:?}", config.storage.resolved_work_dir());
    tracing::debug!("Log Level: {}", config.log.level);
    tracing::debug!("==============================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::SilencePlacement;
    use tempfile::tempdir;

    #[test]
    fn test_validation_passes_for_valid_config() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_tts_url() {
        let mut config = AppConfig::default();
        config.tts.url = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_blank_lang() {
        let mut config = AppConfig::default();
        config.tts.lang = "  ".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_non_positive_silence() {
        let mut config = AppConfig::default();
        config.silence.duration_secs = 0.0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("narrator.toml");
        std::fs::write(
            &path,
            "[silence]\nduration_secs = 1.0\nplacement = \"between_only\"\n\n[tts]\nlang = \"en-gb\"\n",
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.silence.duration_secs, 1.0);
        assert_eq!(config.silence.placement, SilencePlacement::BetweenOnly);
        assert_eq!(config.tts.lang, "en-gb");
        assert_eq!(config.engine.binary, "ffmpeg");
    }

    #[test]
    fn test_placement_accepts_cli_spelling_in_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("narrator.toml");
        std::fs::write(&path, "[silence]\nplacement = \"between-only\"\n").unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.silence.placement, SilencePlacement::BetweenOnly);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempdir().unwrap();
        let result = load_config_from_path(Some(&dir.path().join("absent.toml")));
        assert!(result.is_err());
    }
}
