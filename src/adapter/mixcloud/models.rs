//! Mixcloud API Models
//!
//! Mixcloud APIのリクエスト・レスポンスの表現

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const WEB_BASE_URL: &str = "https://www.mixcloud.com";

/// One page of `GET /{user}/cloudcasts/`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CloudcastPage {
    #[serde(default)]
    pub data: Vec<Cloudcast>,
    #[serde(default)]
    pub paging: Option<Paging>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Cloudcast {
    pub key: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(default)]
    pub next: Option<String>,
}

/// Response of `POST /upload/`
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
    pub result: UploadResultBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadResultBody {
    pub success: bool,
    #[serde(default)]
    pub key: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned by the API, e.g. `{"error": {"type": "OAuthException", "message": "..."}}`
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub error: ApiError,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiError {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the OAuth access token endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

/// A tracklist section in the upload form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSection {
    pub artist: String,
    pub song: String,
    pub start_time: u32,
}

/// Multipart form for `POST /upload/`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadForm {
    pub audio_path: PathBuf,
    pub artwork_path: Option<PathBuf>,
    pub name: String,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub sections: Vec<UploadSection>,
}

impl UploadForm {
    /// Text fields in the order they are sent
    ///
    /// Empty descriptions, artists and songs are left out
    pub fn text_fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![("name".to_string(), self.name.clone())];

        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            fields.push(("description".to_string(), description.to_string()));
        }

        for (i, tag) in self.tags.iter().enumerate() {
            fields.push((format!("tags-{}-tag", i), tag.clone()));
        }

        for (i, section) in self.sections.iter().enumerate() {
            if !section.artist.is_empty() {
                fields.push((format!("sections-{}-artist", i), section.artist.clone()));
            }
            if !section.song.is_empty() {
                fields.push((format!("sections-{}-song", i), section.song.clone()));
            }
            fields.push((
                format!("sections-{}-start_time", i),
                section.start_time.to_string(),
            ));
        }

        fields
    }
}

/// Public URL of a cloudcast key such as `/user/night-session-12/`
pub fn mix_url(key: &str) -> String {
    format!("{}{}", WEB_BASE_URL, key)
}

/// Extracts the API's error message from a response body, if it has one
pub fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|response| match (response.error.kind, response.error.message) {
            (Some(kind), Some(message)) => Some(format!("{}: {}", kind, message)),
            (None, Some(message)) => Some(message),
            (Some(kind), None) => Some(kind),
            (None, None) => None,
        })
}
