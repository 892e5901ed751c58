//! # Locate Recording Use Case
//!
//! アップロードする録音を特定するユースケース

use anyhow::{bail, Result};
use log::info;
use std::path::Path;
use std::sync::Arc;

use crate::domain::entities::recording::Recording;
use crate::domain::repositories::recording_repository::RecordingRepository;

/// 録音特定ユースケース
///
/// 録音名が指定されていればその録音を、なければディレクトリ内の最新の録音を選ぶ
pub struct LocateRecordingUseCase<R: RecordingRepository> {
    recording_repository: Arc<R>,
}

impl<R: RecordingRepository> LocateRecordingUseCase<R> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `recording_repository` - 録音リポジトリ
    pub fn new(recording_repository: Arc<R>) -> Self {
        Self {
            recording_repository,
        }
    }

    /// 録音を特定する
    ///
    /// # Arguments
    ///
    /// * `dir` - 録音ディレクトリ
    /// * `name` - 録音名（拡張子なし）
    ///
    /// # Errors
    ///
    /// 録音が見つからない場合、または指定された録音のファイルが揃っていない場合にエラーを返す
    pub async fn execute(&self, dir: &Path, name: Option<&str>) -> Result<Recording> {
        let files = self.recording_repository.list_files(dir).await?;

        let recording = match name {
            Some(name) => {
                let recording = Recording::named(dir, name);
                for path in [&recording.audio_path, &recording.cue_path] {
                    if !files.contains(path) {
                        bail!("{} does not exist", path.display());
                    }
                }
                recording
            }
            None => match Recording::latest(&files) {
                Some(recording) => recording,
                None => bail!("No recording found in {}", dir.display()),
            },
        };

        info!(
            "Using recording {} ({})",
            recording.name,
            recording.audio_path.display()
        );
        Ok(recording)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;

    struct MockRecordingRepository {
        files: Vec<PathBuf>,
    }

    #[async_trait]
    impl RecordingRepository for MockRecordingRepository {
        async fn list_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
            Ok(self.files.iter().map(|file| dir.join(file)).collect())
        }
    }

    fn create_use_case(files: &[&str]) -> LocateRecordingUseCase<MockRecordingRepository> {
        let mock_repo = Arc::new(MockRecordingRepository {
            files: files.iter().map(PathBuf::from).collect(),
        });
        LocateRecordingUseCase::new(mock_repo)
    }

    #[tokio::test]
    async fn test_locate_latest() {
        let use_case = create_use_case(&[
            "2024-12-20_21h00.wav",
            "2024-12-20_21h00.cue",
            "2024-12-25_22h30.wav",
            "2024-12-25_22h30.cue",
        ]);

        let recording = use_case.execute(Path::new("/rec"), None).await.unwrap();

        assert_eq!(recording.name, "2024-12-25_22h30");
        assert_eq!(
            recording.cue_path,
            PathBuf::from("/rec/2024-12-25_22h30.cue")
        );
    }

    #[tokio::test]
    async fn test_locate_named() {
        let use_case = create_use_case(&[
            "2024-12-20_21h00.wav",
            "2024-12-20_21h00.cue",
            "2024-12-25_22h30.wav",
            "2024-12-25_22h30.cue",
        ]);

        let recording = use_case
            .execute(Path::new("/rec"), Some("2024-12-20_21h00"))
            .await
            .unwrap();

        assert_eq!(
            recording.audio_path,
            PathBuf::from("/rec/2024-12-20_21h00.wav")
        );
    }

    #[tokio::test]
    async fn test_locate_named_missing_cue() {
        let use_case = create_use_case(&["2024-12-20_21h00.wav"]);

        let err = use_case
            .execute(Path::new("/rec"), Some("2024-12-20_21h00"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "/rec/2024-12-20_21h00.cue does not exist");
    }

    #[tokio::test]
    async fn test_locate_empty_directory() {
        let use_case = create_use_case(&["notes.txt"]);

        let err = use_case.execute(Path::new("/rec"), None).await.unwrap_err();

        assert!(err.to_string().starts_with("No recording found"));
    }
}
