//! # Domain Services
//!
//! エンティティ単体に属さないビジネスルール
//!
//! - **NameSequenceService**: プリセットの連番算出
//! - **TracklistCompletionService**: トラックリストの補完とトリミング

pub mod name_sequence;
pub mod tracklist_completion;
