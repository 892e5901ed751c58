//! # Domain Layer
//!
//! このモジュールはミックスアップロードの核心的なルールとエンティティを定義します。
//!
//! ## 特徴
//!
//! - 外部システムに依存しない（HTTPやffmpegについて何も知らない）
//! - フレームワークに依存しない
//! - 純粋なビジネスロジック
//!
//! ## 構成要素
//!
//! - **entities**: ビジネスエンティティ（Tracklist, Recording, Presetなど）
//! - **repositories**: Repository trait（インターフェース定義のみ）
//! - **services**: Domain Service（連番の算出、トラックリストの補完）

pub mod entities;
pub mod repositories;
pub mod services;
