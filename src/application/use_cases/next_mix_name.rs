//! # Next Mix Name Use Case
//!
//! プリセットの名前パターンから次のミックス名を決めるユースケース

use anyhow::{Context, Result};
use log::info;
use std::sync::Arc;

use crate::domain::entities::preset::NamePattern;
use crate::domain::repositories::mix_repository::MixRepository;
use crate::domain::services::name_sequence::NameSequenceService;

/// ミックス名決定ユースケース
pub struct NextMixNameUseCase<M: MixRepository> {
    mix_repository: Arc<M>,
}

impl<M: MixRepository> NextMixNameUseCase<M> {
    pub fn new(mix_repository: Arc<M>) -> Self {
        Self { mix_repository }
    }

    /// 既存のミックス名を取得し、パターンの次の連番で名前を作る
    ///
    /// # Errors
    ///
    /// 既存ミックスの取得に失敗した場合にエラーを返す
    pub async fn execute(&self, pattern: &NamePattern) -> Result<String> {
        let names = self
            .mix_repository
            .list_mix_names()
            .await
            .context("Failed to list existing mixes")?;

        let number = NameSequenceService::next_number(pattern, &names);
        let name = pattern.format(number);
        info!(
            "Next name for '{}' is '{}' ({} existing mixes checked)",
            pattern.template(),
            name,
            names.len()
        );

        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    use crate::domain::entities::mix::{MixUpload, UploadedMix};

    struct MockMixRepository {
        names: Option<Vec<String>>,
    }

    #[async_trait]
    impl MixRepository for MockMixRepository {
        async fn list_mix_names(&self) -> Result<Vec<String>> {
            match &self.names {
                Some(names) => Ok(names.clone()),
                None => anyhow::bail!("Mixcloud API returned 401 Unauthorized"),
            }
        }

        async fn upload_mix(&self, _mix: &MixUpload) -> Result<UploadedMix> {
            unreachable!("upload is not used by this use case")
        }
    }

    fn pattern() -> NamePattern {
        NamePattern::new("Night Session #{}").unwrap()
    }

    #[tokio::test]
    async fn test_next_name_increments() {
        let mock_repo = Arc::new(MockMixRepository {
            names: Some(vec![
                "Night Session #1".to_string(),
                "Night Session #2".to_string(),
                "Sunday Brunch".to_string(),
            ]),
        });
        let use_case = NextMixNameUseCase::new(mock_repo);

        let name = use_case.execute(&pattern()).await.unwrap();

        assert_eq!(name, "Night Session #3");
    }

    #[tokio::test]
    async fn test_next_name_first_in_series() {
        let mock_repo = Arc::new(MockMixRepository {
            names: Some(vec![]),
        });
        let use_case = NextMixNameUseCase::new(mock_repo);

        let name = use_case.execute(&pattern()).await.unwrap();

        assert_eq!(name, "Night Session #1");
    }

    #[tokio::test]
    async fn test_next_name_listing_fails() {
        let mock_repo = Arc::new(MockMixRepository { names: None });
        let use_case = NextMixNameUseCase::new(mock_repo);

        let err = use_case.execute(&pattern()).await.unwrap_err();

        assert_eq!(err.to_string(), "Failed to list existing mixes");
    }
}
