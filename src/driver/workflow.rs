//! Workflow Orchestration
//!
//! ワークフローのオーケストレーション

use anyhow::{anyhow, Context, Result};
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

use crate::adapter::auth::BrowserOAuthRepository;
use crate::adapter::config::{expand_path, AuthConfig, Config};
use crate::adapter::media::FfmpegAudioProcessor;
use crate::adapter::mixcloud::client::{MixcloudApi, MixcloudClient};
use crate::adapter::repositories::cue_tracklist_repository::CueTracklistRepository;
use crate::adapter::repositories::file_recording_repository::FileRecordingRepository;
use crate::adapter::repositories::json_credential_repository::JsonCredentialRepository;
use crate::adapter::repositories::mixcloud_mix_repository::MixcloudMixRepository;
use crate::application::dto::upload_options::{MixMetadata, MixName, MixOverrides, UploadOptions};
use crate::application::use_cases::locate_recording::LocateRecordingUseCase;
use crate::application::use_cases::next_mix_name::NextMixNameUseCase;
use crate::application::use_cases::prepare_tracklist::PrepareTracklistUseCase;
use crate::application::use_cases::resolve_access_token::{
    ResolveAccessTokenUseCase, TokenRequest,
};
use crate::application::use_cases::transcode_recording::TranscodeRecordingUseCase;
use crate::application::use_cases::upload_mix::UploadMixUseCase;
use crate::domain::entities::mix::MixUpload;
use crate::domain::entities::preset::Preset;
use crate::domain::repositories::authorization_repository::ClientCredentials;

use super::cli::Args;
use super::prompt;

/// Looks up the preset named on the command line
pub fn resolve_preset(config: &Config, key: Option<&str>) -> Result<Option<Preset>> {
    let Some(key) = key else {
        return Ok(None);
    };

    let preset = config.preset(key).ok_or_else(|| {
        let known: Vec<&str> = config.presets.keys().map(String::as_str).collect();
        anyhow!(
            "Unknown preset '{}' (available: {})",
            key,
            if known.is_empty() {
                "none".to_string()
            } else {
                known.join(", ")
            }
        )
    })?;

    Ok(Some(preset.to_preset()?))
}

/// Merges flags, preset and config into the options for this run
pub fn build_options(args: &Args, config: &Config, preset: Option<&Preset>) -> Result<UploadOptions> {
    let overrides = MixOverrides {
        name: args.name.clone(),
        artwork: args.artwork.as_deref().map(expand_path),
        tags: args.tags.clone(),
        description: args.description.clone(),
    };

    Ok(UploadOptions {
        recordings_dir: args
            .recordings_dir
            .as_deref()
            .map(expand_path)
            .unwrap_or_else(|| config.recordings_dir()),
        recording_name: args.recording_name.clone(),
        output_dir: args
            .output_dir
            .as_deref()
            .map(expand_path)
            .or_else(|| config.output_dir()),
        metadata: MixMetadata::resolve(overrides, preset)?,
        interactive: !args.noninteractive,
        dry_run: args.dry_run,
    })
}

/// Client credentials from the flags, falling back to auth.json
fn client_credentials(args: &Args) -> Result<Option<ClientCredentials>> {
    if let (Some(id), Some(secret)) = (&args.client_id, &args.client_secret) {
        return Ok(Some(ClientCredentials::new(id.trim(), secret.trim())));
    }

    Ok(AuthConfig::load(&args.auth)?.map(|auth| auth.credentials()))
}

/// Mix Upload Workflow
pub struct MixUploadWorkflow {
    config: Config,
    locate_use_case: LocateRecordingUseCase<FileRecordingRepository>,
    transcode_use_case: TranscodeRecordingUseCase<FfmpegAudioProcessor>,
    prepare_use_case: PrepareTracklistUseCase<CueTracklistRepository, FfmpegAudioProcessor>,
    token_use_case: ResolveAccessTokenUseCase<JsonCredentialRepository, BrowserOAuthRepository>,
}

impl MixUploadWorkflow {
    /// Create a new workflow instance with dependency injection
    pub fn new(config: Config) -> Result<Self> {
        // Repository implementations
        let recording_repo = Arc::new(FileRecordingRepository::new());
        let tracklist_repo = Arc::new(CueTracklistRepository::new());
        let audio_processor = Arc::new(FfmpegAudioProcessor::new());
        let credential_repo = Arc::new(JsonCredentialRepository::new());
        let authorization_repo = Arc::new(BrowserOAuthRepository::new()?);

        Ok(Self {
            config,
            locate_use_case: LocateRecordingUseCase::new(recording_repo),
            transcode_use_case: TranscodeRecordingUseCase::new(audio_processor.clone()),
            prepare_use_case: PrepareTracklistUseCase::new(tracklist_repo, audio_processor),
            token_use_case: ResolveAccessTokenUseCase::new(credential_repo, authorization_repo),
        })
    }

    async fn mix_repository(&self, args: &Args, interactive: bool) -> Result<Arc<MixcloudMixRepository>> {
        let request = TokenRequest {
            explicit: args.access_token.clone(),
            configured: self.config.access_token().map(str::to_string),
            cached_path: args.cached_auth.clone(),
            client: client_credentials(args)?,
            interactive,
        };
        let token = self.token_use_case.execute(&request).await?;
        println!("✓ Using access token from {}", token.source);

        let api: Arc<dyn MixcloudApi> = Arc::new(MixcloudClient::new(token.token)?);
        Ok(Arc::new(MixcloudMixRepository::new(api)))
    }

    /// Execute the upload workflow
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn execute(&self, args: Args) -> Result<()> {
        info!("Starting Mixcloud uploader...");
        info!("Dry run: {}", args.dry_run);

        let preset = resolve_preset(&self.config, args.preset.as_deref())?;
        if let Some(key) = &args.preset {
            println!("✓ Using preset '{}'", key);
        }
        let options = build_options(&args, &self.config, preset.as_ref())?;

        // Locate the recording before anything touches the network
        let recording = self
            .locate_use_case
            .execute(&options.recordings_dir, options.recording_name.as_deref())
            .await?;
        println!("✓ Found recording {}", recording.name);

        // A dry run with a fixed name never talks to Mixcloud
        let needs_api =
            !options.dry_run || matches!(options.metadata.name, MixName::Next(_));
        let mix_repo = if needs_api {
            Some(self.mix_repository(&args, options.interactive).await?)
        } else {
            None
        };

        let name = match &options.metadata.name {
            MixName::Fixed(name) => name.clone(),
            MixName::Next(pattern) => {
                let repo = mix_repo
                    .clone()
                    .context("Numbering a preset name needs a Mixcloud connection")?;
                NextMixNameUseCase::new(repo).execute(pattern).await?
            }
        };
        println!("✓ Mix name: {}", name);

        // Keep the temporary directory alive until the upload finishes
        let mut temp_dir: Option<TempDir> = None;
        let output_dir: PathBuf = match &options.output_dir {
            Some(dir) => dir.clone(),
            None => {
                let dir = tempfile::Builder::new()
                    .prefix("mixcloud-uploader-")
                    .tempdir()
                    .context("Failed to create temporary output directory")?;
                let path = dir.path().to_path_buf();
                temp_dir = Some(dir);
                path
            }
        };

        let transcoded = self
            .transcode_use_case
            .execute(&recording, &output_dir)
            .await?;
        if transcoded.reused {
            println!("✓ Reusing {}", transcoded.path.display());
        } else {
            println!("✓ Transcoded to {}", transcoded.path.display());
        }

        let mut tracklist = self
            .prepare_use_case
            .execute(&recording, &transcoded.path)
            .await?;
        if options.interactive {
            tracklist = prompt::edit_tracklist(&tracklist).await?;
        }
        if tracklist.is_empty() {
            println!("⚠ The tracklist is empty");
        }

        println!("✓ Tracklist ({} tracks):", tracklist.len());
        for entry in &tracklist.entries {
            println!("  {}", entry);
        }

        let mix = MixUpload {
            audio_path: transcoded.path,
            name,
            description: options.metadata.description.clone(),
            artwork_path: options.metadata.artwork.clone(),
            tags: options.metadata.tags.clone(),
            tracklist,
        };

        let Some(mix_repo) = mix_repo.filter(|_| !options.dry_run) else {
            println!("✓ Dry-run mode (not actually uploading)");
            println!("  Would upload '{}' from {}", mix.name, mix.audio_path.display());
            if let Some(artwork) = &mix.artwork_path {
                println!("  Artwork: {}", artwork.display());
            }
            if !mix.tags.is_empty() {
                println!("  Tags: {}", mix.tags.join(", "));
            }
            return Ok(());
        };

        if options.interactive && !prompt::confirm(&format!("Upload '{}'?", mix.name)).await? {
            println!("⚠ Upload cancelled");
            return Ok(());
        }

        let uploaded = UploadMixUseCase::new(mix_repo).execute(mix).await?;
        match uploaded.url {
            Some(url) => println!("✓ Uploaded: {}", url),
            None => println!("✓ Upload complete!"),
        }

        drop(temp_dir);
        Ok(())
    }
}
