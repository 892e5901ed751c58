//! JSON Credential Repository Implementation
//!
//! CredentialRepositoryのJSON実装（アクセストークンをJSONファイルで永続化）

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;

use crate::adapter::config::expand_path;
use crate::domain::repositories::credential_repository::{
    CachedCredentials, CredentialRepository,
};

/// JSONファイルベースの認証情報リポジトリ
pub struct JsonCredentialRepository;

/// キャッシュされた認証情報（JSON永続化用の内部表現）
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
struct CachedCredentialsJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    access_token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    obtained_at: Option<String>,
}

impl JsonCredentialRepository {
    /// 新しいリポジトリを作成
    pub fn new() -> Self {
        Self
    }

    /// ファイルから認証情報を読み込む（同期処理）
    fn load_sync(path: &str) -> Result<CachedCredentialsJson> {
        let expanded = expand_path(path);

        if !expanded.exists() {
            info!("No cached credentials found at {}", path);
            return Ok(CachedCredentialsJson::default());
        }

        let content =
            fs::read_to_string(&expanded).context("Failed to read cached credentials file")?;

        let credentials: CachedCredentialsJson =
            serde_json::from_str(&content).context("Failed to parse cached credentials JSON")?;

        Ok(credentials)
    }

    /// ファイルに認証情報を保存する（同期処理）
    fn save_sync(path: &str, credentials: &CachedCredentialsJson) -> Result<()> {
        let expanded = expand_path(path);

        // Create parent directory if it doesn't exist
        if let Some(parent) = expanded.parent() {
            fs::create_dir_all(parent).context("Failed to create credentials directory")?;
        }

        let json = serde_json::to_string_pretty(credentials)
            .context("Failed to serialize cached credentials")?;

        #[cfg(unix)]
        {
            use std::io::Write;
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

            let mut file = fs::OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .mode(0o600)
                .open(&expanded)
                .context("Failed to open cached credentials file")?;
            // mode() only applies when the file is created
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .context("Failed to restrict cached credentials permissions")?;
            file.write_all(json.as_bytes())
                .context("Failed to write cached credentials file")?;
        }

        #[cfg(not(unix))]
        fs::write(&expanded, json).context("Failed to write cached credentials file")?;

        info!("Saved cached credentials to {}", path);

        Ok(())
    }

    /// JSON形式からDomain形式に変換
    fn to_domain(json: CachedCredentialsJson) -> CachedCredentials {
        CachedCredentials {
            access_token: json.access_token,
            obtained_at: json.obtained_at,
        }
    }

    /// Domain形式からJSON形式に変換
    fn from_domain(credentials: &CachedCredentials) -> CachedCredentialsJson {
        CachedCredentialsJson {
            access_token: credentials.access_token.clone(),
            obtained_at: credentials.obtained_at.clone(),
        }
    }
}

#[async_trait]
impl CredentialRepository for JsonCredentialRepository {
    async fn load(&self, path: &str) -> Result<CachedCredentials> {
        let path = path.to_string();
        let json = tokio::task::spawn_blocking(move || Self::load_sync(&path))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(Self::to_domain(json))
    }

    async fn save(&self, path: &str, credentials: &CachedCredentials) -> Result<()> {
        let path = path.to_string();
        let json = Self::from_domain(credentials);
        tokio::task::spawn_blocking(move || Self::save_sync(&path, &json))
            .await
            .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))??;

        Ok(())
    }
}

impl Default for JsonCredentialRepository {
    fn default() -> Self {
        Self::new()
    }
}
