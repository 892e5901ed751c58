//! Mixcloud Mix Repository Implementation
//!
//! MixRepositoryのMixcloud API実装

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::adapter::mixcloud::client::MixcloudApi;
use crate::adapter::mixcloud::models::{mix_url, UploadForm, UploadSection};
use crate::domain::entities::mix::{MixUpload, UploadedMix};
use crate::domain::repositories::mix_repository::MixRepository;

/// Mixcloudミックスリポジトリ
pub struct MixcloudMixRepository {
    api: Arc<dyn MixcloudApi>,
}

impl MixcloudMixRepository {
    /// 新しいリポジトリを作成
    pub fn new(api: Arc<dyn MixcloudApi>) -> Self {
        Self { api }
    }

    /// Domain::MixUploadをmodels::UploadFormに変換
    fn to_upload_form(mix: &MixUpload) -> UploadForm {
        UploadForm {
            audio_path: mix.audio_path.clone(),
            artwork_path: mix.artwork_path.clone(),
            name: mix.name.clone(),
            description: mix.description.clone(),
            tags: mix.tags.clone(),
            sections: mix
                .tracklist
                .entries
                .iter()
                .map(|entry| UploadSection {
                    artist: entry.artist.clone(),
                    song: entry.title.clone(),
                    start_time: entry.start_seconds,
                })
                .collect(),
        }
    }
}

#[async_trait]
impl MixRepository for MixcloudMixRepository {
    async fn list_mix_names(&self) -> Result<Vec<String>> {
        self.api.cloudcast_names().await
    }

    async fn upload_mix(&self, mix: &MixUpload) -> Result<UploadedMix> {
        let form = Self::to_upload_form(mix);
        let result = self.api.upload(&form).await?;

        Ok(UploadedMix {
            url: result.key.as_deref().map(mix_url),
            key: result.key,
        })
    }
}
