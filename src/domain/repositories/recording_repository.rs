//! # Recording Repository Trait
//!
//! 録音ディレクトリの走査を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// 録音リポジトリ
#[async_trait]
pub trait RecordingRepository: Send + Sync {
    /// 録音ディレクトリ直下のファイルを列挙する
    ///
    /// # Arguments
    ///
    /// * `dir` - 録音ディレクトリのパス
    ///
    /// # Errors
    ///
    /// ディレクトリの読み取りに失敗した場合にエラーを返す
    async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>>;
}
