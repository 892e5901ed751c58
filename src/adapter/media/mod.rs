//! Media Adapter Modules
//!
//! 外部コマンド（ffmpeg/ffprobe）による音声処理

pub mod ffmpeg;

pub use ffmpeg::FfmpegAudioProcessor;
