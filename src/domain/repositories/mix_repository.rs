//! # Mix Repository Trait
//!
//! ミックスの一覧取得とアップロードを抽象化

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::entities::mix::{MixUpload, UploadedMix};

/// ミックスリポジトリ
///
/// リモートのホスティングサービス上のミックスを扱うリポジトリ
#[async_trait]
pub trait MixRepository: Send + Sync {
    /// 既存のミックス名を取得する
    ///
    /// # Returns
    ///
    /// 認証ユーザーがアップロード済みのミックス名のリスト
    ///
    /// # Errors
    ///
    /// APIの呼び出しに失敗した場合にエラーを返す
    async fn list_mix_names(&self) -> Result<Vec<String>>;

    /// ミックスをアップロードする
    ///
    /// # Arguments
    ///
    /// * `mix` - アップロードするミックス
    ///
    /// # Returns
    ///
    /// アップロードされたミックスの情報
    ///
    /// # Errors
    ///
    /// アップロードに失敗した場合にエラーを返す
    async fn upload_mix(&self, mix: &MixUpload) -> Result<UploadedMix>;
}
