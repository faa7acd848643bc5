//! Probe Adapter - 音频信息探测实现

mod symphonia_probe;

pub use symphonia_probe::SymphoniaProbe;
