//! Tracklist File Formats
//!
//! キューシート（Mixxxが出力する .cue）と編集用のタブ区切り形式

pub mod cuesheet;
pub mod tabular;

use thiserror::Error;

pub use cuesheet::parse_cuesheet;
pub use tabular::{format_tabular, parse_tabular};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CueError {
    #[error("line {line}: invalid INDEX time '{value}'")]
    InvalidTime { line: usize, value: String },

    #[error("line {line}: invalid start time '{value}' (expected seconds)")]
    InvalidStart { line: usize, value: String },
}
