//! # Audio Processor Trait
//!
//! 音声ファイルの変換と解析を抽象化

use anyhow::Result;
use async_trait::async_trait;
use std::path::Path;

#[async_trait]
pub trait AudioProcessor: Send + Sync {
    /// 録音をアップロード用の形式（mp3）に変換する
    ///
    /// 出力先に既存のファイルがある場合は上書きする
    async fn transcode(&self, input: &Path, output: &Path) -> Result<()>;

    /// 音声ファイルの長さ（秒）を返す
    async fn duration_seconds(&self, path: &Path) -> Result<f64>;
}
