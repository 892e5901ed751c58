//! CLI Argument Parsing
//!
//! CLIの引数解析

use clap::Parser;

use crate::adapter::config::{DEFAULT_AUTH_PATH, DEFAULT_CACHED_AUTH_PATH, DEFAULT_CONFIG_PATH};

/// Mixxxの録音をMixcloudにアップロードするCLI
#[derive(Parser, Debug, Clone)]
#[command(name = "mixcloud-uploader")]
#[command(about = "Upload a Mixxx recording and its tracklist to Mixcloud", long_about = None)]
pub struct Args {
    /// Config file path
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// OAuth client credentials file path
    #[arg(long, default_value = DEFAULT_AUTH_PATH)]
    pub auth: String,

    /// Cached access token file path
    #[arg(long, default_value = DEFAULT_CACHED_AUTH_PATH)]
    pub cached_auth: String,

    /// Directory holding Mixxx recordings (.wav + .cue)
    #[arg(short = 'd', long)]
    pub recordings_dir: Option<String>,

    /// Recording to upload, without extension (defaults to the latest)
    #[arg(short = 'r', long)]
    pub recording_name: Option<String>,

    /// Directory for the transcoded mp3 (defaults to a temporary directory)
    #[arg(short = 'o', long)]
    pub output_dir: Option<String>,

    /// Mix name (overrides the preset's name pattern)
    #[arg(short = 'n', long)]
    pub name: Option<String>,

    /// Artwork image path
    #[arg(short = 'a', long)]
    pub artwork: Option<String>,

    /// Comma-separated tags
    #[arg(short = 't', long, value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Mix description
    #[arg(long)]
    pub description: Option<String>,

    /// Preset key from the config file
    #[arg(short = 'p', long)]
    pub preset: Option<String>,

    /// Don't open an editor or ask for confirmation
    #[arg(short = 'y', long)]
    pub noninteractive: bool,

    /// Mixcloud access token (skips OAuth)
    #[arg(long)]
    pub access_token: Option<String>,

    /// OAuth client id (overrides auth.json)
    #[arg(long, requires = "client_secret")]
    pub client_id: Option<String>,

    /// OAuth client secret (overrides auth.json)
    #[arg(long, requires = "client_id")]
    pub client_secret: Option<String>,

    /// Dry run mode - don't actually upload
    #[arg(long)]
    pub dry_run: bool,
}
