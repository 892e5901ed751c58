//! Mixcloud API Client
//!
//! クライアントの抽象化と実装

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Client, Response};
use std::path::Path;
use std::time::Duration;

#[cfg(test)]
use mockall::automock;

use super::models::{error_message, CloudcastPage, UploadForm, UploadResponse, UploadResultBody};

pub const API_BASE_URL: &str = "https://api.mixcloud.com";
pub const PAGE_LIMIT: usize = 100;
pub const MAX_PAGES: usize = 100;
const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Trait for the Mixcloud API operations the uploader needs
/// This enables mocking in tests while using the real client in production
#[cfg_attr(test, automock)]
#[async_trait]
pub trait MixcloudApi: Send + Sync {
    /// Names of all cloudcasts of the authenticated user
    async fn cloudcast_names(&self) -> Result<Vec<String>>;

    /// Upload a mix as a multipart form
    async fn upload(&self, form: &UploadForm) -> Result<UploadResultBody>;
}

/// Builds the HTTP client shared by the API client and the OAuth flow
pub fn http_client() -> Result<Client> {
    Client::builder()
        .user_agent(concat!("mixcloud-uploader/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
        .build()
        .context("Failed to build HTTP client")
}

/// Turns a non-2xx response into an error carrying the API's message
pub async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = error_message(&body).unwrap_or(body);
    bail!("Mixcloud API returned {}: {}", status, detail)
}

/// MIME type for the artwork upload, derived from the file extension
pub fn picture_mime(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Streams a file into a multipart part without buffering it
async fn file_part(path: &Path, mime: &str) -> Result<Part> {
    let file = tokio::fs::File::open(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let length = file
        .metadata()
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?
        .len();
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());

    Part::stream_with_length(Body::from(file), length)
        .file_name(file_name)
        .mime_str(mime)
        .context("Invalid MIME type")
}

/// Real Mixcloud client authenticated with an OAuth access token
pub struct MixcloudClient {
    http: Client,
    api_base_url: String,
    access_token: String,
}

impl MixcloudClient {
    pub fn new(access_token: String) -> Result<Self> {
        Self::with_base_url(API_BASE_URL, access_token)
    }

    pub fn with_base_url(api_base_url: &str, access_token: String) -> Result<Self> {
        Ok(Self {
            http: http_client()?,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            access_token,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }

    async fn fetch_page(&self, url: &str, first: bool) -> Result<CloudcastPage> {
        debug!("GET {}", url);

        let mut request = self
            .http
            .get(url)
            .query(&[("access_token", self.access_token.as_str())]);
        if first {
            request = request.query(&[("limit", PAGE_LIMIT.to_string())]);
        }

        let response = request
            .send()
            .await
            .context("Failed to fetch cloudcasts")?;
        check_status(response)
            .await?
            .json::<CloudcastPage>()
            .await
            .context("Failed to parse cloudcasts response")
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[async_trait]
impl MixcloudApi for MixcloudClient {
    async fn cloudcast_names(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let mut url = self.endpoint("/me/cloudcasts/");
        let mut first = true;

        for _ in 0..MAX_PAGES {
            let page = self.fetch_page(&url, first).await?;
            names.extend(page.data.into_iter().map(|cloudcast| cloudcast.name));

            match page.paging.and_then(|paging| paging.next) {
                Some(next) => {
                    url = next;
                    first = false;
                }
                None => {
                    info!("Fetched {} existing cloudcasts", names.len());
                    return Ok(names);
                }
            }
        }

        warn!(
            "Stopped listing cloudcasts after {} pages ({} names)",
            MAX_PAGES,
            names.len()
        );
        Ok(names)
    }

    async fn upload(&self, form: &UploadForm) -> Result<UploadResultBody> {
        let audio = file_part(&form.audio_path, "audio/mpeg").await?;
        let mut multipart = Form::new().part("mp3", audio);

        if let Some(artwork_path) = &form.artwork_path {
            multipart = multipart.part(
                "picture",
                file_part(artwork_path, picture_mime(artwork_path)).await?,
            );
        }

        for (name, value) in form.text_fields() {
            debug!("Form field {} = {}", name, value);
            multipart = multipart.text(name, value);
        }

        let url = self.endpoint("/upload/");
        info!("Uploading {} to {}", form.audio_path.display(), url);

        let response = self
            .http
            .post(&url)
            .query(&[("access_token", self.access_token.as_str())])
            .multipart(multipart)
            .send()
            .await
            .context("Failed to send upload request")?;

        let body = check_status(response)
            .await?
            .json::<UploadResponse>()
            .await
            .context("Failed to parse upload response")?;

        if !body.result.success {
            bail!(
                "Mixcloud rejected the upload: {}",
                body.result.message.as_deref().unwrap_or("no reason given")
            );
        }

        Ok(body.result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_picture_mime() {
        assert_eq!(picture_mime(&PathBuf::from("/art/cover.JPG")), "image/jpeg");
        assert_eq!(picture_mime(&PathBuf::from("/art/cover.jpeg")), "image/jpeg");
        assert_eq!(picture_mime(&PathBuf::from("/art/cover.png")), "image/png");
        assert_eq!(
            picture_mime(&PathBuf::from("/art/cover")),
            "application/octet-stream"
        );
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let client = MixcloudClient::with_base_url("http://localhost:8080/", "token".to_string())
            .unwrap();

        assert_eq!(
            client.endpoint("/upload/"),
            "http://localhost:8080/upload/"
        );
    }

    #[tokio::test]
    async fn test_file_part_missing_file() {
        let result = file_part(&PathBuf::from("/nonexistent/mix.mp3"), "audio/mpeg").await;

        let err = result.unwrap_err();
        assert!(err.to_string().contains("/nonexistent/mix.mp3"));
    }

    #[tokio::test]
    async fn test_file_part_streams_existing_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("transcoded-set.mp3");
        std::fs::write(&path, vec![0u8; 4096]).unwrap();

        let part = file_part(&path, "audio/mpeg").await.unwrap();
        let form = Form::new().part("mp3", part);

        assert!(!form.boundary().is_empty());
        assert!(file_part(&path, "not a mime").await.is_err());
    }
}
