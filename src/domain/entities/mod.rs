//! # Domain Entities
//!
//! ビジネスエンティティとバリューオブジェクトを定義するモジュール
//!
//! ## エンティティ
//!
//! - **Tracklist**: キューシートから得られるトラックリスト
//! - **Recording**: 録音ファイル（.wav）とキューシート（.cue）の組
//! - **Preset**: 定期的なミックスシリーズ用のアップロード設定
//! - **MixUpload**: アップロードするミックス

pub mod mix;
pub mod preset;
pub mod recording;
pub mod tracklist;
