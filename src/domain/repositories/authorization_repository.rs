//! # Authorization Repository Trait
//!
//! OAuthによるアクセストークンの取得を抽象化

use anyhow::Result;
use async_trait::async_trait;

/// OAuthクライアントの認証情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl ClientCredentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }
}

/// 認可リポジトリ
///
/// ユーザーの操作を伴うOAuthフローを実行してアクセストークンを取得する
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// アクセストークンを取得する
    ///
    /// # Errors
    ///
    /// 認可コードまたはアクセストークンを取得できなかった場合にエラーを返す
    async fn authorize(&self, credentials: &ClientCredentials) -> Result<String>;
}
