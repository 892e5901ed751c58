//! # Transcode Recording Use Case
//!
//! 録音をアップロード用のmp3に変換するユースケース

use anyhow::{Context, Result};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::domain::entities::recording::Recording;
use crate::domain::repositories::audio_processor::AudioProcessor;

/// 変換結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeOutcome {
    /// 変換後のmp3ファイル
    pub path: PathBuf,
    /// 既存のファイルを再利用したかどうか
    pub reused: bool,
}

/// 録音変換ユースケース
///
/// 出力先に変換済みのファイルがあれば再利用する。失敗した変換の途中ファイルは残さない
pub struct TranscodeRecordingUseCase<P: AudioProcessor> {
    audio_processor: Arc<P>,
}

impl<P: AudioProcessor> TranscodeRecordingUseCase<P> {
    pub fn new(audio_processor: Arc<P>) -> Self {
        Self { audio_processor }
    }

    /// 録音をmp3に変換する
    ///
    /// # Arguments
    ///
    /// * `recording` - 変換する録音
    /// * `output_dir` - mp3の出力先ディレクトリ
    ///
    /// # Errors
    ///
    /// 出力先の作成または変換に失敗した場合にエラーを返す
    pub async fn execute(&self, recording: &Recording, output_dir: &Path) -> Result<TranscodeOutcome> {
        let path = recording.transcoded_path(output_dir);

        if tokio::fs::try_exists(&path).await.unwrap_or(false) {
            info!("Reusing transcoded file {}", path.display());
            return Ok(TranscodeOutcome { path, reused: true });
        }

        tokio::fs::create_dir_all(output_dir)
            .await
            .with_context(|| format!("Failed to create output directory {}", output_dir.display()))?;

        // 最終パスには完了した変換だけを置く
        let partial = path.with_extension("part.mp3");
        info!(
            "Transcoding {} to {}",
            recording.audio_path.display(),
            path.display()
        );
        if let Err(e) = self
            .audio_processor
            .transcode(&recording.audio_path, &partial)
            .await
        {
            if let Err(remove_err) = tokio::fs::remove_file(&partial).await {
                debug!("No partial file removed at {}: {}", partial.display(), remove_err);
            }
            return Err(e)
                .with_context(|| format!("Failed to transcode {}", recording.audio_path.display()));
        }

        tokio::fs::rename(&partial, &path)
            .await
            .with_context(|| format!("Failed to move transcoded file to {}", path.display()))?;

        Ok(TranscodeOutcome {
            path,
            reused: false,
        })
    }
}
