//! Audio Context - 静音源与插入策略

use serde::Deserialize;

use super::{AudioError, EngineInput, OutputEncoding};

/// 静音时长（秒），必须为有限正数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SilenceDuration(f64);

impl SilenceDuration {
    pub fn new(secs: f64) -> Result<Self, AudioError> {
        if !secs.is_finite() || secs <= 0.0 {
            return Err(AudioError::InvalidSilenceDuration(secs));
        }
        Ok(Self(secs))
    }

    pub fn as_secs(&self) -> f64 {
        self.0
    }
}

/// 静音源输入：与流水线编码相同的采样率和声道布局
pub fn silence_input(duration: SilenceDuration, encoding: &OutputEncoding) -> EngineInput {
    EngineInput::Lavfi {
        expr: format!(
            "anullsrc=channel_layout={}:sample_rate={}",
            encoding.channel_layout(),
            encoding.sample_rate
        ),
        duration_secs: duration.as_secs(),
    }
}

/// 静音插入策略
///
/// 同一次部署只能使用一种策略
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SilencePlacement {
    /// 每句之后都插入（含最后一句），N 句插入 N 次
    #[default]
    #[serde(alias = "after-every")]
    AfterEvery,
    /// 仅在句与句之间插入，N 句插入 N-1 次
    #[serde(alias = "between-only")]
    BetweenOnly,
}

impl SilencePlacement {
    /// N 句时的静音插入次数
    pub fn insertion_count(&self, sentences: usize) -> usize {
        match self {
            SilencePlacement::AfterEvery => sentences,
            SilencePlacement::BetweenOnly => sentences.saturating_sub(1),
        }
    }

    /// 按策略把静音穿插到片段序列中
    pub fn interleave<T: Clone>(&self, clips: &[T], silence: &T) -> Vec<T> {
        let mut sequence = Vec::with_capacity(clips.len() + self.insertion_count(clips.len()));
        for (i, clip) in clips.iter().enumerate() {
            sequence.push(clip.clone());
            let is_last = i + 1 == clips.len();
            if *self == SilencePlacement::AfterEvery || !is_last {
                sequence.push(silence.clone());
            }
        }
        sequence
    }
}

impl std::fmt::Display for SilencePlacement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SilencePlacement::AfterEvery => write!(f, "after_every"),
            SilencePlacement::BetweenOnly => write!(f, "between_only"),
        }
    }
}

impl std::str::FromStr for SilencePlacement {
    type Err = AudioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "after_every" => Ok(SilencePlacement::AfterEvery),
            "between_only" => Ok(SilencePlacement::BetweenOnly),
            _ => Err(AudioError::UnknownPlacement(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::audio::PIPELINE_ENCODING;

    #[test]
    fn test_insertion_counts() {
        for n in 1..6 {
            assert_eq!(SilencePlacement::AfterEvery.insertion_count(n), n);
            assert_eq!(SilencePlacement::BetweenOnly.insertion_count(n), n - 1);
        }
    }

    #[test]
    fn test_interleave_between_only() {
        let seq = SilencePlacement::BetweenOnly.interleave(&["a", "b", "c"], &"_");
        assert_eq!(seq, vec!["a", "_", "b", "_", "c"]);
    }

    #[test]
    fn test_interleave_after_every() {
        let seq = SilencePlacement::AfterEvery.interleave(&["a", "b"], &"_");
        assert_eq!(seq, vec!["a", "_", "b", "_"]);
    }

    #[test]
    fn test_single_clip_edge_case() {
        assert_eq!(SilencePlacement::BetweenOnly.interleave(&["a"], &"_"), vec!["a"]);
        assert_eq!(
            SilencePlacement::AfterEvery.interleave(&["a"], &"_"),
            vec!["a", "_"]
        );
    }

    #[test]
    fn test_placement_parsing() {
        assert_eq!(
            "between-only".parse::<SilencePlacement>().unwrap(),
            SilencePlacement::BetweenOnly
        );
        assert_eq!(
            "AFTER_EVERY".parse::<SilencePlacement>().unwrap(),
            SilencePlacement::AfterEvery
        );
        assert!("sometimes".parse::<SilencePlacement>().is_err());
    }

    #[test]
    fn test_silence_duration_validation() {
        assert!(SilenceDuration::new(1.0).is_ok());
        assert!(SilenceDuration::new(0.0).is_err());
        assert!(SilenceDuration::new(-2.0).is_err());
        assert!(SilenceDuration::new(f64::NAN).is_err());
    }

    #[test]
    fn test_silence_input_matches_encoding() {
        let input = silence_input(SilenceDuration::new(2.0).unwrap(), &PIPELINE_ENCODING);
        assert_eq!(
            input,
            EngineInput::Lavfi {
                expr: "anullsrc=channel_layout=stereo:sample_rate=44100".to_string(),
                duration_secs: 2.0,
            }
        );
    }
}
