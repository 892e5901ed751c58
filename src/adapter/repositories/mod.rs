//! Repository Implementations
//!
//! Domain層のRepositoryトレイトの実装

pub mod cue_tracklist_repository;
pub mod file_recording_repository;
pub mod json_credential_repository;
pub mod mixcloud_mix_repository;
