//! Audio Context - 增强预设
//!
//! 逐句链：高通 80Hz → 低通 8kHz → 压缩 → 响度归一化
//! 最终链：较温和的压缩 → 同一响度目标

use super::{FilterChain, FilterStage};

/// 高通截止频率（Hz），去除人声以下的低频隆隆声
pub const HIGH_PASS_HZ: u32 = 80;
/// 低通截止频率（Hz），去除语音频带以外的嘶声
pub const LOW_PASS_HZ: u32 = 8000;

/// 动态压缩参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Compression {
    pub threshold_db: f64,
    pub ratio: f64,
    pub attack_ms: f64,
    pub release_ms: f64,
    pub makeup_db: f64,
}

impl Compression {
    pub fn to_stage(&self) -> FilterStage {
        FilterStage::new("acompressor")
            .param("threshold", format!("{}dB", self.threshold_db))
            .param("ratio", self.ratio)
            .param("attack", self.attack_ms)
            .param("release", self.release_ms)
            .param("makeup", format!("{}dB", self.makeup_db))
    }
}

/// 响度归一化目标
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoudnessTarget {
    /// 综合响度（LUFS）
    pub integrated_lufs: f64,
    /// 真峰值上限（dBTP）
    pub true_peak_db: f64,
    /// 响度范围（LU）
    pub range_lu: f64,
}

impl LoudnessTarget {
    pub fn to_stage(&self) -> FilterStage {
        FilterStage::new("loudnorm")
            .param("I", self.integrated_lufs)
            .param("TP", format!("{:.1}", self.true_peak_db))
            .param("LRA", self.range_lu)
    }
}

/// 逐句压缩
pub const CLIP_COMPRESSION: Compression = Compression {
    threshold_db: -18.0,
    ratio: 3.0,
    attack_ms: 3.0,
    release_ms: 100.0,
    makeup_db: 2.0,
};

/// 拼接后的二次压缩
pub const FINAL_COMPRESSION: Compression = Compression {
    threshold_db: -16.0,
    ratio: 2.5,
    attack_ms: 5.0,
    release_ms: 150.0,
    makeup_db: 1.0,
};

pub const BROADCAST_LOUDNESS: LoudnessTarget = LoudnessTarget {
    integrated_lufs: -13.0,
    true_peak_db: -1.0,
    range_lu: 11.0,
};

/// 逐句增强链
pub fn clip_chain() -> FilterChain {
    FilterChain::new(vec![
        FilterStage::new("highpass").param("f", HIGH_PASS_HZ),
        FilterStage::new("lowpass").param("f", LOW_PASS_HZ),
        CLIP_COMPRESSION.to_stage(),
        BROADCAST_LOUDNESS.to_stage(),
    ])
}

/// 最终增强链（作用于拼接后的整条音轨）
pub fn final_chain() -> FilterChain {
    FilterChain::new(vec![
        FINAL_COMPRESSION.to_stage(),
        BROADCAST_LOUDNESS.to_stage(),
    ])
}
