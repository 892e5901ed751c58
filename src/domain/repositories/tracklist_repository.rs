//! # Tracklist Repository Trait
//!
//! キューシートの読み込みを抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

use crate::domain::entities::tracklist::Tracklist;

/// トラックリストリポジトリ
#[async_trait]
pub trait TracklistRepository: Send + Sync {
    /// キューシートを読み込んでトラックリストに変換する
    ///
    /// # Arguments
    ///
    /// * `path` - キューシートのパス
    ///
    /// # Errors
    ///
    /// ファイルの読み込みまたはパースに失敗した場合にエラーを返す
    async fn load_cuesheet(&self, path: &Path) -> Result<Tracklist>;
}
