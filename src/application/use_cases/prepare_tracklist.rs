//! # Prepare Tracklist Use Case
//!
//! キューシートからアップロード用のトラックリストを作るユースケース

use anyhow::Result;
use log::{info, warn};
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::recording::Recording;
use crate::domain::entities::tracklist::Tracklist;
use crate::domain::repositories::audio_processor::AudioProcessor;
use crate::domain::repositories::tracklist_repository::TracklistRepository;
use crate::domain::services::tracklist_completion::TracklistCompletionService;

/// トラックリスト作成ユースケース
///
/// キューシートを読み込み、アーティストを補完し、音声の長さを超えるエントリを取り除く
pub struct PrepareTracklistUseCase<T: TracklistRepository, P: AudioProcessor> {
    tracklist_repository: Arc<T>,
    audio_processor: Arc<P>,
}

impl<T: TracklistRepository, P: AudioProcessor> PrepareTracklistUseCase<T, P> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `tracklist_repository` - トラックリストリポジトリ
    /// * `audio_processor` - 音声の長さの取得に使う
    pub fn new(tracklist_repository: Arc<T>, audio_processor: Arc<P>) -> Self {
        Self {
            tracklist_repository,
            audio_processor,
        }
    }

    /// トラックリストを作成する
    ///
    /// # Arguments
    ///
    /// * `recording` - キューシートを持つ録音
    /// * `audio_path` - 長さを調べる音声ファイル（変換後のmp3）
    ///
    /// # Errors
    ///
    /// キューシートの読み込みに失敗した場合にエラーを返す。
    /// 音声の長さが取得できない場合は警告のみで続行する。
    pub async fn execute(&self, recording: &Recording, audio_path: &Path) -> Result<Tracklist> {
        let tracklist = self
            .tracklist_repository
            .load_cuesheet(&recording.cue_path)
            .await?;
        let loaded = tracklist.len();

        let tracklist = TracklistCompletionService::complete(tracklist);

        let tracklist = match self.audio_processor.duration_seconds(audio_path).await {
            Ok(duration) => {
                let trimmed = TracklistCompletionService::trim(tracklist, duration);
                if trimmed.len() < loaded {
                    info!(
                        "Dropped {} tracks starting after the end of the audio ({:.0}s)",
                        loaded - trimmed.len(),
                        duration
                    );
                }
                trimmed
            }
            Err(e) => {
                warn!(
                    "Could not read duration of {}, keeping all tracks: {:#}",
                    audio_path.display(),
                    e
                );
                tracklist
            }
        };

        info!(
            "Prepared {} tracks from {}",
            tracklist.len(),
            recording.cue_path.display()
        );
        Ok(tracklist)
    }
}
