//! # Tracklist Entity
//!
//! ミックス内のトラック一覧

use std::fmt;

/// トラックリストの1エントリ
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracklistEntry {
    /// アーティスト名（不明な場合は空）
    pub artist: String,
    /// 曲名
    pub title: String,
    /// ミックス先頭からの開始位置（秒）
    pub start_seconds: u32,
}

impl TracklistEntry {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, start_seconds: u32) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            start_seconds,
        }
    }
}

impl fmt::Display for TracklistEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hours = self.start_seconds / 3600;
        let minutes = (self.start_seconds % 3600) / 60;
        let seconds = self.start_seconds % 60;

        if hours > 0 {
            write!(f, "{}:{:02}:{:02}", hours, minutes, seconds)?;
        } else {
            write!(f, "{:02}:{:02}", minutes, seconds)?;
        }

        if self.artist.is_empty() {
            write!(f, "  {}", self.title)
        } else {
            write!(f, "  {} - {}", self.artist, self.title)
        }
    }
}

/// トラックリスト
///
/// エントリはキューシートの順序を保持する
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tracklist {
    /// キューシート全体のタイトル
    pub title: Option<String>,
    /// キューシート全体のパフォーマー
    pub performer: Option<String>,
    pub entries: Vec<TracklistEntry>,
}

impl Tracklist {
    pub fn new(entries: Vec<TracklistEntry>) -> Self {
        Self {
            title: None,
            performer: None,
            entries,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<Vec<TracklistEntry>> for Tracklist {
    fn from(entries: Vec<TracklistEntry>) -> Self {
        Self::new(entries)
    }
}
