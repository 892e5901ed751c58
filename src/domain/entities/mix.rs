//! # Mix Entity
//!
//! アップロードするミックスとアップロード結果

use std::path::PathBuf;

use super::tracklist::Tracklist;

/// Mixcloudが受け付けるタグの最大数
pub const MAX_TAGS: usize = 5;

/// アップロードするミックス
#[derive(Debug, Clone)]
pub struct MixUpload {
    /// 変換済みの音声ファイル（mp3）
    pub audio_path: PathBuf,
    pub name: String,
    pub description: Option<String>,
    pub artwork_path: Option<PathBuf>,
    pub tags: Vec<String>,
    pub tracklist: Tracklist,
}

/// アップロード済みのミックス
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadedMix {
    /// Mixcloud上のキー（例: `/user/night-session-12/`）
    pub key: Option<String>,
    pub url: Option<String>,
}
