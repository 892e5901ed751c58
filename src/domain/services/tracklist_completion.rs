//! # Tracklist Completion Service
//!
//! キューシートから得たトラックリストの補完

use crate::domain::entities::tracklist::{Tracklist, TracklistEntry};

/// トラックリスト補完サービス
pub struct TracklistCompletionService;

impl TracklistCompletionService {
    /// アーティストが空の場合、タイトルからアーティストを推測する
    ///
    /// `-`（または `–`）、`:`、` by ` の順に区切りを探し、
    /// 最初に見つかった区切りの左側をアーティスト、右側をタイトルとする
    pub fn complete_entry(entry: TracklistEntry) -> TracklistEntry {
        if !entry.artist.is_empty() {
            return entry;
        }

        let split = [
            entry.title.split_once(['-', '–']),
            entry.title.split_once(':'),
            entry.title.split_once(" by "),
        ]
        .into_iter()
        .flatten()
        .map(|(artist, title)| (artist.trim(), title.trim()))
        .find(|(artist, title)| !artist.is_empty() && !title.is_empty())
        .map(|(artist, title)| (artist.to_string(), title.to_string()));

        match split {
            Some((artist, title)) => TracklistEntry {
                artist,
                title,
                start_seconds: entry.start_seconds,
            },
            None => entry,
        }
    }

    /// 全エントリのアーティストを推測する
    pub fn complete(tracklist: Tracklist) -> Tracklist {
        Tracklist {
            entries: tracklist
                .entries
                .into_iter()
                .map(Self::complete_entry)
                .collect(),
            ..tracklist
        }
    }

    /// 音声の長さ以降に始まるエントリを取り除く
    pub fn trim(tracklist: Tracklist, duration_seconds: f64) -> Tracklist {
        Tracklist {
            entries: tracklist
                .entries
                .into_iter()
                .filter(|entry| f64::from(entry.start_seconds) < duration_seconds)
                .collect(),
            ..tracklist
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_entry_keeps_artist() {
        let entry = TracklistEntry::new("Four Tet", "Baby - Edit", 10);
        assert_eq!(TracklistCompletionService::complete_entry(entry.clone()), entry);
    }

    #[test]
    fn test_complete_entry_dash() {
        let entry = TracklistEntry::new("", "Four Tet - Baby", 10);
        let completed = TracklistCompletionService::complete_entry(entry);

        assert_eq!(completed, TracklistEntry::new("Four Tet", "Baby", 10));
    }

    #[test]
    fn test_complete_entry_en_dash() {
        let entry = TracklistEntry::new("", "Floating Points – Silhouettes", 0);
        let completed = TracklistCompletionService::complete_entry(entry);

        assert_eq!(completed.artist, "Floating Points");
        assert_eq!(completed.title, "Silhouettes");
    }

    #[test]
    fn test_complete_entry_colon() {
        let entry = TracklistEntry::new("", "Burial: Archangel", 0);
        let completed = TracklistCompletionService::complete_entry(entry);

        assert_eq!(completed.artist, "Burial");
        assert_eq!(completed.title, "Archangel");
    }

    #[test]
    fn test_complete_entry_by() {
        let entry = TracklistEntry::new("", "Windowlicker by Aphex Twin", 0);
        let completed = TracklistCompletionService::complete_entry(entry);

        assert_eq!(completed.artist, "Windowlicker");
        assert_eq!(completed.title, "Aphex Twin");
    }

    #[test]
    fn test_complete_entry_no_separator() {
        let entry = TracklistEntry::new("", "Untitled", 0);
        assert_eq!(
            TracklistCompletionService::complete_entry(entry.clone()),
            entry
        );
    }

    #[test]
    fn test_complete_entry_ignores_empty_side() {
        // 先頭の "-" では分割せず、次の区切りを使う
        let entry = TracklistEntry::new("", "-Intro: Theme", 0);
        let completed = TracklistCompletionService::complete_entry(entry);

        assert_eq!(completed.artist, "-Intro");
        assert_eq!(completed.title, "Theme");
    }

    #[test]
    fn test_complete_keeps_header() {
        let mut tracklist = Tracklist::new(vec![TracklistEntry::new("", "A - B", 0)]);
        tracklist.title = Some("Live".to_string());

        let completed = TracklistCompletionService::complete(tracklist);

        assert_eq!(completed.title, Some("Live".to_string()));
        assert_eq!(completed.entries[0].artist, "A");
    }

    #[test]
    fn test_trim() {
        let tracklist = Tracklist::new(vec![
            TracklistEntry::new("A", "One", 0),
            TracklistEntry::new("B", "Two", 1800),
            TracklistEntry::new("C", "Three", 3600),
        ]);

        let trimmed = TracklistCompletionService::trim(tracklist, 3600.0);

        assert_eq!(trimmed.len(), 2);
        assert_eq!(trimmed.entries[1].title, "Two");
    }
}
