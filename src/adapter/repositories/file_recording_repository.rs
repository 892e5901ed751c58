//! File Recording Repository Implementation
//!
//! RecordingRepositoryのファイルシステム実装

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::domain::repositories::recording_repository::RecordingRepository;

/// ファイルシステムベースの録音リポジトリ
pub struct FileRecordingRepository;

impl FileRecordingRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// ディレクトリ直下のファイルを列挙する（内部実装）
    fn list_files_internal(dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            bail!("Recordings directory does not exist: {}", dir.display());
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
        {
            let entry = entry
                .with_context(|| format!("Failed to read directory {}", dir.display()))?;
            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        info!("Found {} files in {}", files.len(), dir.display());

        Ok(files)
    }
}

#[async_trait]
impl RecordingRepository for FileRecordingRepository {
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let dir = dir.to_path_buf();
        tokio::task::spawn_blocking(move || Self::list_files_internal(&dir))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    }
}

impl Default for FileRecordingRepository {
    fn default() -> Self {
        Self::new()
    }
}
