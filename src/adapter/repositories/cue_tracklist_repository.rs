//! Cue Tracklist Repository Implementation
//!
//! TracklistRepositoryのキューシート実装

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use std::fs;
use std::path::Path;

use crate::adapter::cue::parse_cuesheet;
use crate::domain::entities::tracklist::Tracklist;
use crate::domain::repositories::tracklist_repository::TracklistRepository;

/// キューシートファイルからトラックリストを読むリポジトリ
pub struct CueTracklistRepository;

impl CueTracklistRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// キューシートを読み込む（同期処理）
    fn load_sync(path: &Path) -> Result<Tracklist> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read cue sheet: {}", path.display()))?;
        // 不正なUTF-8は置換文字として読む
        let content = String::from_utf8_lossy(&bytes);

        let tracklist = parse_cuesheet(&content)
            .with_context(|| format!("Failed to parse cue sheet: {}", path.display()))?;

        info!(
            "Read {} tracks from {}",
            tracklist.len(),
            path.display()
        );

        Ok(tracklist)
    }
}

#[async_trait]
impl TracklistRepository for CueTracklistRepository {
    async fn load_cuesheet(&self, path: &Path) -> Result<Tracklist> {
        let path = path.to_path_buf();
        tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for CueTracklistRepository {
    fn default() -> Self {
        Self::new()
    }
}
