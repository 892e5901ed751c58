//! Browser-based OAuth
//!
//! ブラウザでの認可とローカルのコールバックサーバーによるアクセストークン取得

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpListener;
use url::Url;

use crate::adapter::mixcloud::client::http_client;
use crate::adapter::mixcloud::models::AccessTokenResponse;
use crate::domain::repositories::authorization_repository::{
    AuthorizationRepository, ClientCredentials,
};

pub const AUTHORIZE_URL: &str = "https://www.mixcloud.com/oauth/authorize";
pub const ACCESS_TOKEN_URL: &str = "https://www.mixcloud.com/oauth/access_token";
pub const CALLBACK_PATH: &str = "/callback";
pub const CALLBACK_TIMEOUT_SECS: u64 = 300;

const OK_RESPONSE: &str = "HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nConnection: close\r\n\r\nAuthorized. You can close this window and return to the terminal.\n";
const NOT_FOUND_RESPONSE: &str = "HTTP/1.1 404 Not Found\r\nConnection: close\r\n\r\n";

/// What the browser sent to the local callback server
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Callback {
    Code(String),
    Denied(String),
    Other,
}

/// Builds the URL the user opens to authorize the app
pub fn authorize_url(base: &str, client_id: &str, redirect_uri: &str) -> Result<Url> {
    Url::parse_with_params(
        base,
        &[("client_id", client_id), ("redirect_uri", redirect_uri)],
    )
    .context("Failed to build authorization URL")
}

/// Parses an HTTP request line such as `GET /callback?code=abc HTTP/1.1`
pub fn parse_callback(request_line: &str) -> Callback {
    let mut parts = request_line.split_whitespace();
    let (Some("GET"), Some(target)) = (parts.next(), parts.next()) else {
        return Callback::Other;
    };

    let Ok(url) = Url::parse("http://localhost").and_then(|base| base.join(target)) else {
        return Callback::Other;
    };
    if url.path() != CALLBACK_PATH {
        return Callback::Other;
    }

    let mut error = None;
    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "code" if !value.is_empty() => return Callback::Code(value.into_owned()),
            "error" => error = Some(value.into_owned()),
            _ => {}
        }
    }

    match error {
        Some(error) => Callback::Denied(error),
        None => Callback::Other,
    }
}

/// Accepts connections until the callback carries an authorization code
async fn wait_for_code(listener: &TcpListener) -> Result<String> {
    loop {
        let (stream, peer) = listener
            .accept()
            .await
            .context("Failed to accept callback connection")?;
        debug!("Callback connection from {}", peer);

        let mut reader = BufReader::new(stream);
        let mut request_line = String::new();
        reader
            .read_line(&mut request_line)
            .await
            .context("Failed to read callback request")?;

        let callback = parse_callback(&request_line);
        let mut stream = reader.into_inner();
        let response = match callback {
            Callback::Code(_) | Callback::Denied(_) => OK_RESPONSE,
            Callback::Other => NOT_FOUND_RESPONSE,
        };
        if let Err(e) = stream.write_all(response.as_bytes()).await {
            debug!("Failed to answer callback: {}", e);
        }
        let _ = stream.shutdown().await;

        match callback {
            Callback::Code(code) => return Ok(code),
            Callback::Denied(error) => bail!("Authorization was denied: {}", error),
            Callback::Other => continue,
        }
    }
}

/// AuthorizationRepositoryのブラウザOAuth実装
pub struct BrowserOAuthRepository {
    http: Client,
    authorize_url: String,
    access_token_url: String,
    timeout: Duration,
}

impl BrowserOAuthRepository {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            authorize_url: AUTHORIZE_URL.to_string(),
            access_token_url: ACCESS_TOKEN_URL.to_string(),
            timeout: Duration::from_secs(CALLBACK_TIMEOUT_SECS),
        })
    }

    async fn exchange_code(
        &self,
        credentials: &ClientCredentials,
        redirect_uri: &str,
        code: &str,
    ) -> Result<String> {
        let response = self
            .http
            .get(&self.access_token_url)
            .query(&[
                ("client_id", credentials.client_id.as_str()),
                ("redirect_uri", redirect_uri),
                ("client_secret", credentials.client_secret.as_str()),
                ("code", code),
            ])
            .send()
            .await
            .context("Failed to request access token")?;

        let body = response
            .text()
            .await
            .context("Failed to read access token response")?;

        serde_json::from_str::<AccessTokenResponse>(&body)
            .ok()
            .and_then(|response| response.access_token)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| anyhow!("Could not fetch access token: {}", body))
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl AuthorizationRepository for BrowserOAuthRepository {
    async fn authorize(&self, credentials: &ClientCredentials) -> Result<String> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .context("Failed to start local callback server")?;
        let port = listener.local_addr()?.port();
        let redirect_uri = format!("http://localhost:{}{}", port, CALLBACK_PATH);

        let url = authorize_url(&self.authorize_url, &credentials.client_id, &redirect_uri)?;
        println!("→ Open this URL in your browser to authorize the uploader:");
        println!("  {}", url);
        info!("Waiting for OAuth callback on port {}", port);

        let code = tokio::time::timeout(self.timeout, wait_for_code(&listener))
            .await
            .map_err(|_| {
                anyhow!(
                    "No OAuth callback received within {} seconds",
                    self.timeout.as_secs()
                )
            })??;

        println!("✓ Received authorization code, requesting access token");
        self.exchange_code(credentials, &redirect_uri, &code).await
    }
}
