//! # Credential Repository Trait
//!
//! 取得済みアクセストークンの永続化を抽象化

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// キャッシュされた認証情報
///
/// ブラウザでの認可を毎回行わないために保存するアクセストークン
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct CachedCredentials {
    /// アクセストークン
    pub access_token: Option<String>,
    /// トークンを取得した日時（RFC 3339）
    pub obtained_at: Option<String>,
}

impl CachedCredentials {
    /// 空の認証情報を作成
    pub fn new() -> Self {
        Self::default()
    }

    /// 空でないアクセストークンを返す
    pub fn token(&self) -> Option<&str> {
        self.access_token
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty())
    }

    /// 新しいアクセストークンを記録
    pub fn store(&mut self, access_token: String, timestamp: String) {
        self.access_token = Some(access_token);
        self.obtained_at = Some(timestamp);
    }
}

/// 認証情報リポジトリ
///
/// アクセストークンの永続化を担当するリポジトリ
#[async_trait]
pub trait CredentialRepository: Send + Sync {
    /// 認証情報を読み込む
    ///
    /// # Arguments
    ///
    /// * `path` - キャッシュファイルのパス
    ///
    /// # Returns
    ///
    /// キャッシュされた認証情報（ファイルがない場合は空）
    ///
    /// # Errors
    ///
    /// ファイルの読み込みに失敗した場合にエラーを返す
    async fn load(&self, path: &str) -> Result<CachedCredentials>;

    /// 認証情報を保存する
    ///
    /// # Arguments
    ///
    /// * `path` - キャッシュファイルのパス
    /// * `credentials` - 保存する認証情報
    ///
    /// # Errors
    ///
    /// ファイルの書き込みに失敗した場合にエラーを返す
    async fn save(&self, path: &str, credentials: &CachedCredentials) -> Result<()>;
}
