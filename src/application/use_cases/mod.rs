//! # Use Cases
//!
//! アプリケーションのビジネスフロー（ユースケース）
//!
//! ## ユースケース
//!
//! - **LocateRecordingUseCase**: アップロードする録音の特定
//! - **ResolveAccessTokenUseCase**: アクセストークンの解決（必要ならOAuth）
//! - **NextMixNameUseCase**: プリセットの連番からミックス名を決定
//! - **TranscodeRecordingUseCase**: 録音のmp3変換
//! - **PrepareTracklistUseCase**: キューシートからトラックリストを作成
//! - **UploadMixUseCase**: ミックスのアップロード

pub mod locate_recording;
pub mod next_mix_name;
pub mod prepare_tracklist;
pub mod resolve_access_token;
pub mod transcode_recording;
pub mod upload_mix;
