//! Cue Sheet Parser
//!
//! キューシートをトラックリストに変換する

use log::debug;

use super::CueError;
use crate::domain::entities::tracklist::{Tracklist, TracklistEntry};

/// 1秒あたりのフレーム数（CD規格）
pub const FRAMES_PER_SECOND: u32 = 75;

/// Track being assembled while its commands are read
#[derive(Default)]
struct PendingTrack {
    entry: TracklistEntry,
    pregap: Option<u32>,
    start: Option<u32>,
}

impl PendingTrack {
    fn finish(self) -> TracklistEntry {
        TracklistEntry {
            start_seconds: self.start.or(self.pregap).unwrap_or_default(),
            ..self.entry
        }
    }
}

fn unquote(raw: &str) -> String {
    let raw = raw.trim();
    let raw = raw.strip_prefix('"').unwrap_or(raw);
    let raw = raw.strip_suffix('"').unwrap_or(raw);
    raw.to_string()
}

/// Parses `mm:ss:ff` (or `mm:ss`) into whole seconds, truncating frames
fn parse_time(raw: &str, line: usize) -> Result<u32, CueError> {
    let invalid = || CueError::InvalidTime {
        line,
        value: raw.to_string(),
    };

    let segments = raw
        .split(':')
        .map(|segment| segment.parse::<u32>().map_err(|_| invalid()))
        .collect::<Result<Vec<_>, _>>()?;

    let (minutes, seconds) = match segments.as_slice() {
        [minutes, seconds, frames] if *frames < FRAMES_PER_SECOND => (*minutes, *seconds),
        [minutes, seconds] => (*minutes, *seconds),
        _ => return Err(invalid()),
    };

    minutes
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds))
        .ok_or_else(invalid)
}

/// キューシートをパースする
///
/// `TRACK` ごとにエントリを作り、`TITLE`・`PERFORMER`・`INDEX` を読み取る。
/// 最初の `TRACK` より前の `TITLE`・`PERFORMER` はトラックリスト全体の情報として扱う。
///
/// # Errors
///
/// `INDEX` の時刻が不正な場合にエラーを返す
pub fn parse_cuesheet(content: &str) -> Result<Tracklist, CueError> {
    let mut tracklist = Tracklist::default();
    let mut pending: Option<PendingTrack> = None;

    for (line_num, line) in content.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line.trim().trim_start_matches('\u{feff}');
        if line.is_empty() {
            continue;
        }

        let (command, argument) = line.split_once(' ').unwrap_or((line, ""));

        if command == "TRACK" {
            if let Some(track) = pending.take() {
                tracklist.entries.push(track.finish());
            }
            pending = Some(PendingTrack::default());
            continue;
        }

        match (command, pending.as_mut()) {
            ("TITLE", Some(track)) => track.entry.title = unquote(argument),
            ("PERFORMER", Some(track)) => track.entry.artist = unquote(argument),
            ("INDEX", Some(track)) => {
                let mut parts = argument.split_whitespace();
                let (number, time) = match (parts.next(), parts.next()) {
                    (Some(number), Some(time)) => (number, time),
                    (Some(time), None) => ("01", time),
                    _ => {
                        return Err(CueError::InvalidTime {
                            line: line_num,
                            value: argument.to_string(),
                        })
                    }
                };

                let seconds = parse_time(time, line_num)?;
                match number.parse::<u32>() {
                    Ok(0) => track.pregap = Some(seconds),
                    Ok(1) => track.start = Some(seconds),
                    _ => debug!("Ignoring INDEX {} on line {}", number, line_num),
                }
            }
            ("TITLE", None) => tracklist.title = Some(unquote(argument)),
            ("PERFORMER", None) => tracklist.performer = Some(unquote(argument)),
            _ => {}
        }
    }

    if let Some(track) = pending {
        tracklist.entries.push(track.finish());
    }

    Ok(tracklist)
}
