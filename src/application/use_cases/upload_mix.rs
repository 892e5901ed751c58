//! # Upload Mix Use Case
//!
//! ミックスアップロードユースケース

use anyhow::{bail, Result};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::entities::mix::{MixUpload, UploadedMix, MAX_TAGS};
use crate::domain::repositories::mix_repository::MixRepository;

/// ミックスアップロードユースケース
///
/// アップロード前に名前とファイルを検証し、タグを上限数に切り詰める
pub struct UploadMixUseCase<M: MixRepository> {
    mix_repository: Arc<M>,
}

impl<M: MixRepository> UploadMixUseCase<M> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `mix_repository` - ミックスリポジトリ
    pub fn new(mix_repository: Arc<M>) -> Self {
        Self { mix_repository }
    }

    /// ミックスをアップロードする
    ///
    /// # Arguments
    ///
    /// * `mix` - アップロードするミックス
    ///
    /// # Returns
    ///
    /// アップロードされたミックスのキーとURL
    ///
    /// # Errors
    ///
    /// 名前が空の場合、音声またはアートワークのファイルがない場合、
    /// またはアップロードに失敗した場合にエラーを返す
    pub async fn execute(&self, mut mix: MixUpload) -> Result<UploadedMix> {
        if mix.name.trim().is_empty() {
            bail!("Mix name must not be empty");
        }
        if !tokio::fs::try_exists(&mix.audio_path).await.unwrap_or(false) {
            bail!("Audio file {} does not exist", mix.audio_path.display());
        }
        if let Some(artwork_path) = &mix.artwork_path {
            if !tokio::fs::try_exists(artwork_path).await.unwrap_or(false) {
                bail!("Artwork {} does not exist", artwork_path.display());
            }
        }

        if mix.tags.len() > MAX_TAGS {
            warn!(
                "Mixcloud accepts at most {} tags, dropping: {}",
                MAX_TAGS,
                mix.tags[MAX_TAGS..].join(", ")
            );
            mix.tags.truncate(MAX_TAGS);
        }

        info!(
            "Uploading '{}' with {} tracks and {} tags",
            mix.name,
            mix.tracklist.len(),
            mix.tags.len()
        );
        self.mix_repository.upload_mix(&mix).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use tempfile::TempDir;

    use crate::domain::entities::tracklist::{Tracklist, TracklistEntry};

    struct MockMixRepository {
        should_succeed: bool,
        uploaded: Mutex<Vec<MixUpload>>,
    }

    impl MockMixRepository {
        fn new(should_succeed: bool) -> Self {
            Self {
                should_succeed,
                uploaded: Mutex::new(Vec::new()),
            }
        }

        fn get_uploaded(&self) -> Vec<MixUpload> {
            self.uploaded.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl MixRepository for MockMixRepository {
        async fn list_mix_names(&self) -> Result<Vec<String>> {
            Ok(vec![])
        }

        async fn upload_mix(&self, mix: &MixUpload) -> Result<UploadedMix> {
            if !self.should_succeed {
                anyhow::bail!("Mixcloud API returned 500 Internal Server Error");
            }
            self.uploaded.lock().unwrap().push(mix.clone());
            Ok(UploadedMix {
                key: Some("/dj/night-session-12/".to_string()),
                url: Some("https://www.mixcloud.com/dj/night-session-12/".to_string()),
            })
        }
    }

    fn create_test_mix(temp_dir: &TempDir) -> MixUpload {
        let audio_path = temp_dir.path().join("transcoded-2024-12-25_22h30.mp3");
        std::fs::write(&audio_path, b"mp3").unwrap();

        MixUpload {
            audio_path,
            name: "Night Session #12".to_string(),
            description: None,
            artwork_path: None,
            tags: vec!["house".to_string()],
            tracklist: Tracklist::new(vec![TracklistEntry::new("Burial", "Archangel", 0)]),
        }
    }

    #[tokio::test]
    async fn test_upload_mix_success() {
        let temp_dir = TempDir::new().unwrap();
        let mock_repo = Arc::new(MockMixRepository::new(true));
        let use_case = UploadMixUseCase::new(mock_repo.clone());

        let uploaded = use_case.execute(create_test_mix(&temp_dir)).await.unwrap();

        assert_eq!(
            uploaded.url.as_deref(),
            Some("https://www.mixcloud.com/dj/night-session-12/")
        );
        assert_eq!(mock_repo.get_uploaded().len(), 1);
    }

    #[tokio::test]
    async fn test_upload_mix_truncates_tags() {
        let temp_dir = TempDir::new().unwrap();
        let mock_repo = Arc::new(MockMixRepository::new(true));
        let use_case = UploadMixUseCase::new(mock_repo.clone());

        let mix = MixUpload {
            tags: (1..=7).map(|i| format!("tag{}", i)).collect(),
            ..create_test_mix(&temp_dir)
        };
        use_case.execute(mix).await.unwrap();

        let uploaded = mock_repo.get_uploaded();
        assert_eq!(uploaded[0].tags.len(), MAX_TAGS);
        assert_eq!(uploaded[0].tags.last().map(String::as_str), Some("tag5"));
    }

    #[tokio::test]
    async fn test_upload_mix_empty_name() {
        let temp_dir = TempDir::new().unwrap();
        let mock_repo = Arc::new(MockMixRepository::new(true));
        let use_case = UploadMixUseCase::new(mock_repo.clone());

        let mix = MixUpload {
            name: "  ".to_string(),
            ..create_test_mix(&temp_dir)
        };
        let result = use_case.execute(mix).await;

        assert!(result.is_err());
        assert!(mock_repo.get_uploaded().is_empty());
    }

    #[tokio::test]
    async fn test_upload_mix_missing_artwork() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = UploadMixUseCase::new(Arc::new(MockMixRepository::new(true)));

        let mix = MixUpload {
            artwork_path: Some(PathBuf::from("/nonexistent/cover.png")),
            ..create_test_mix(&temp_dir)
        };
        let err = use_case.execute(mix).await.unwrap_err();

        assert_eq!(err.to_string(), "Artwork /nonexistent/cover.png does not exist");
    }

    #[tokio::test]
    async fn test_upload_mix_missing_audio() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = UploadMixUseCase::new(Arc::new(MockMixRepository::new(true)));

        let mix = MixUpload {
            audio_path: temp_dir.path().join("missing.mp3"),
            ..create_test_mix(&temp_dir)
        };
        let result = use_case.execute(mix).await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_upload_mix_failure() {
        let temp_dir = TempDir::new().unwrap();
        let use_case = UploadMixUseCase::new(Arc::new(MockMixRepository::new(false)));

        let result = use_case.execute(create_test_mix(&temp_dir)).await;

        assert!(result.is_err());
    }
}
