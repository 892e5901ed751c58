//! Adapter Layer
//!
//! 外部システム（Mixcloud API, ファイルシステム, ffmpeg）との統合

pub mod auth;
pub mod config;
pub mod cue;
pub mod media;
pub mod mixcloud;
pub mod repositories;
