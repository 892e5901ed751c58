//! # Resolve Access Token Use Case
//!
//! アクセストークン解決ユースケース

use anyhow::{bail, Context, Result};
use chrono::Utc;
use log::info;
use std::fmt;
use std::sync::Arc;

use crate::domain::repositories::authorization_repository::{
    AuthorizationRepository, ClientCredentials,
};
use crate::domain::repositories::credential_repository::CredentialRepository;

/// アクセストークンの取得元
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
    Flag,
    Config,
    Cache,
    OAuth,
}

impl fmt::Display for TokenSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TokenSource::Flag => "command line",
            TokenSource::Config => "config file",
            TokenSource::Cache => "cached credentials",
            TokenSource::OAuth => "OAuth authorization",
        };
        f.write_str(label)
    }
}

/// 解決済みのアクセストークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    pub source: TokenSource,
}

/// トークン解決の入力
#[derive(Debug, Clone, Default)]
pub struct TokenRequest {
    /// `--access-token` で指定されたトークン
    pub explicit: Option<String>,
    /// config.json のトークン
    pub configured: Option<String>,
    /// キャッシュファイルのパス
    pub cached_path: String,
    /// OAuthクライアントの認証情報
    pub client: Option<ClientCredentials>,
    /// ブラウザでの認可を行えるかどうか
    pub interactive: bool,
}

fn non_blank(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// アクセストークン解決ユースケース
///
/// 指定されたトークン、設定ファイル、キャッシュの順に探し、
/// どれにもなければOAuthで取得してキャッシュに保存する
pub struct ResolveAccessTokenUseCase<C: CredentialRepository, A: AuthorizationRepository> {
    credential_repository: Arc<C>,
    authorization_repository: Arc<A>,
}

impl<C: CredentialRepository, A: AuthorizationRepository> ResolveAccessTokenUseCase<C, A> {
    /// 新しいユースケースを作成
    ///
    /// # Arguments
    ///
    /// * `credential_repository` - 認証情報リポジトリ
    /// * `authorization_repository` - 認可リポジトリ
    pub fn new(credential_repository: Arc<C>, authorization_repository: Arc<A>) -> Self {
        Self {
            credential_repository,
            authorization_repository,
        }
    }

    /// アクセストークンを解決する
    ///
    /// # Errors
    ///
    /// 非対話モードでトークンがない場合、クライアント認証情報がない場合、
    /// またはOAuthやキャッシュの保存に失敗した場合にエラーを返す
    pub async fn execute(&self, request: &TokenRequest) -> Result<AccessToken> {
        if let Some(token) = non_blank(request.explicit.as_deref()) {
            return Ok(AccessToken {
                token,
                source: TokenSource::Flag,
            });
        }

        if let Some(token) = non_blank(request.configured.as_deref()) {
            return Ok(AccessToken {
                token,
                source: TokenSource::Config,
            });
        }

        let mut cached = self
            .credential_repository
            .load(&request.cached_path)
            .await
            .context("Failed to load cached credentials")?;
        if let Some(token) = cached.token() {
            return Ok(AccessToken {
                token: token.to_string(),
                source: TokenSource::Cache,
            });
        }

        if !request.interactive {
            bail!("No access token available: pass --access-token or run interactively to authorize");
        }
        let Some(client) = &request.client else {
            bail!("No access token available and no OAuth client credentials: pass --client-id and --client-secret or create auth.json");
        };

        info!("No stored access token, starting OAuth authorization");
        let token = self.authorization_repository.authorize(client).await?;

        cached.store(token.clone(), Utc::now().to_rfc3339());
        self.credential_repository
            .save(&request.cached_path, &cached)
            .await
            .context("Failed to save cached credentials")?;

        Ok(AccessToken {
            token,
            source: TokenSource::OAuth,
        })
    }
}
