//! ffmpeg Audio Processor
//!
//! AudioProcessorのffmpeg実装

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::path::Path;
use tokio::process::Command;

use crate::domain::repositories::audio_processor::AudioProcessor;

pub const DEFAULT_BITRATE: &str = "320k";

/// ffmpeg/ffprobe を呼び出す音声処理
pub struct FfmpegAudioProcessor {
    ffmpeg: String,
    ffprobe: String,
    bitrate: String,
}

impl FfmpegAudioProcessor {
    pub fn new() -> Self {
        Self {
            ffmpeg: "ffmpeg".to_string(),
            ffprobe: "ffprobe".to_string(),
            bitrate: DEFAULT_BITRATE.to_string(),
        }
    }

    fn transcode_args(&self, input: &Path, output: &Path) -> Vec<String> {
        vec![
            "-y".to_string(),
            "-loglevel".to_string(),
            "error".to_string(),
            "-i".to_string(),
            input.to_string_lossy().into_owned(),
            "-b:a".to_string(),
            self.bitrate.clone(),
            output.to_string_lossy().into_owned(),
        ]
    }

    fn duration_args(path: &Path) -> Vec<String> {
        vec![
            "-v".to_string(),
            "error".to_string(),
            "-show_entries".to_string(),
            "format=duration".to_string(),
            "-of".to_string(),
            "default=noprint_wrappers=1:nokey=1".to_string(),
            path.to_string_lossy().into_owned(),
        ]
    }
}

impl Default for FfmpegAudioProcessor {
    fn default() -> Self {
        Self::new()
    }
}

/// Parses ffprobe's `format=duration` output
pub fn parse_duration(output: &str) -> Result<f64> {
    let value = output.trim();
    let duration: f64 = value
        .parse()
        .with_context(|| format!("Unexpected ffprobe output: '{}'", value))?;

    if !duration.is_finite() || duration < 0.0 {
        bail!("Invalid duration: {}", duration);
    }
    Ok(duration)
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl AudioProcessor for FfmpegAudioProcessor {
    async fn transcode(&self, input: &Path, output: &Path) -> Result<()> {
        let args = self.transcode_args(input, output);
        info!("Running {} {}", self.ffmpeg, args.join(" "));

        let result = Command::new(&self.ffmpeg)
            .args(&args)
            .output()
            .await
            .with_context(|| format!("Failed to run {} (is it installed?)", self.ffmpeg))?;

        if !result.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.ffmpeg,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }

        Ok(())
    }

    async fn duration_seconds(&self, path: &Path) -> Result<f64> {
        let result = Command::new(&self.ffprobe)
            .args(Self::duration_args(path))
            .output()
            .await
            .with_context(|| format!("Failed to run {} (is it installed?)", self.ffprobe))?;

        if !result.status.success() {
            bail!(
                "{} exited with {}: {}",
                self.ffprobe,
                result.status,
                String::from_utf8_lossy(&result.stderr).trim()
            );
        }

        let duration = parse_duration(&String::from_utf8_lossy(&result.stdout))?;
        debug!("Duration of {}: {:.1}s", path.display(), duration);
        Ok(duration)
    }
}
