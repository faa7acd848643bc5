//! Symphonia Probe - 基于 symphonia 的音频时长探测
//!
//! 只读取包头（不解码 PCM）。MP3 通常没有帧数信息，按包时长累加。

use std::fs::File;
use std::path::Path;
use std::time::Duration;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::application::ports::{AudioInfo, AudioProbePort, ProbeError};

#[derive(Debug, Clone, Default)]
pub struct SymphoniaProbe;

impl SymphoniaProbe {
    pub fn new() -> Self {
        Self
    }
}

impl AudioProbePort for SymphoniaProbe {
    fn probe(&self, path: &Path) -> Result<AudioInfo, ProbeError> {
        let file = File::open(path).map_err(|e| ProbeError::IoError(e.to_string()))?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|e| ProbeError::UnsupportedFormat(format!("Probe failed: {}", e)))?;

        let mut format = probed.format;

        let track = format
            .default_track()
            .ok_or_else(|| ProbeError::DecodingError("No audio track found".to_string()))?;

        let sample_rate = track
            .codec_params
            .sample_rate
            .ok_or_else(|| ProbeError::DecodingError("Unknown sample rate".to_string()))?;
        let channels = track
            .codec_params
            .channels
            .map(|c| c.count() as u8)
            .unwrap_or(0);
        let time_base = track.codec_params.time_base;
        let n_frames = track.codec_params.n_frames;
        let track_id = track.id;

        let total_ts = match n_frames {
            Some(frames) => frames,
            None => {
                let mut total = 0u64;
                loop {
                    let packet = match format.next_packet() {
                        Ok(p) => p,
                        Err(symphonia::core::errors::Error::IoError(e))
                            if e.kind() == std::io::ErrorKind::UnexpectedEof =>
                        {
                            break;
                        }
                        Err(e) => {
                            return Err(ProbeError::DecodingError(format!(
                                "Packet read error: {}",
                                e
                            )));
                        }
                    };
                    if packet.track_id() == track_id {
                        total += packet.dur();
                    }
                }
                total
            }
        };

        let duration = match time_base {
            Some(tb) => {
                let time = tb.calc_time(total_ts);
                Duration::from_secs(time.seconds) + Duration::from_secs_f64(time.frac)
            }
            None => Duration::from_secs_f64(total_ts as f64 / sample_rate as f64),
        };

        Ok(AudioInfo {
            duration,
            sample_rate,
            channels,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    /// 1 秒，16kHz，单声道，16 位 PCM WAV
    fn create_test_wav() -> Vec<u8> {
        let sample_rate: u32 = 16000;
        let num_channels: u16 = 1;
        let bits_per_sample: u16 = 16;
        let num_samples = sample_rate as usize;
        let data_size = num_samples * (bits_per_sample as usize / 8) * num_channels as usize;
        let byte_rate = sample_rate * num_channels as u32 * bits_per_sample as u32 / 8;
        let block_align = num_channels * bits_per_sample / 8;

        let mut wav = Vec::with_capacity(44 + data_size);
        wav.extend_from_slice(b"RIFF");
        wav.extend_from_slice(&((36 + data_size) as u32).to_le_bytes());
        wav.extend_from_slice(b"WAVE");
        wav.extend_from_slice(b"fmt ");
        wav.extend_from_slice(&16u32.to_le_bytes());
        wav.extend_from_slice(&1u16.to_le_bytes()); // PCM
        wav.extend_from_slice(&num_channels.to_le_bytes());
        wav.extend_from_slice(&sample_rate.to_le_bytes());
        wav.extend_from_slice(&byte_rate.to_le_bytes());
        wav.extend_from_slice(&block_align.to_le_bytes());
        wav.extend_from_slice(&bits_per_sample.to_le_bytes());
        wav.extend_from_slice(b"data");
        wav.extend_from_slice(&(data_size as u32).to_le_bytes());
        wav.resize(44 + data_size, 0);
        wav
    }

    #[test]
    fn test_probe_wav_duration() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("tone.wav");
        std::fs::write(&path, create_test_wav()).unwrap();

        let info = SymphoniaProbe::new().probe(&path).unwrap();
        assert_eq!(info.sample_rate, 16000);
        assert_eq!(info.channels, 1);
        assert!((info.duration.as_secs_f64() - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_probe_missing_file() {
        let dir = tempdir().unwrap();
        let result = SymphoniaProbe::new().probe(&dir.path().join("absent.mp3"));
        assert!(matches!(result, Err(ProbeError::IoError(_))));
    }

    #[test]
    fn test_probe_garbage() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("noise.mp3");
        std::fs::write(&path, b"speech:Hello.|silence").unwrap();
        assert!(SymphoniaProbe::new().probe(&path).is_err());
    }
}
