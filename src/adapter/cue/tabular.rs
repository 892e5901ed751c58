//! Tabular Tracklist Format
//!
//! エディタで編集するための1行1トラックの形式: `artist :: title :: seconds`

use log::warn;

use super::CueError;
use crate::domain::entities::tracklist::{Tracklist, TracklistEntry};

pub const DEFAULT_SEPARATOR: &str = " :: ";

/// Removes the separator token and line breaks from a field
fn sanitize(field: &str, separator: &str) -> String {
    let token = separator.trim();
    let field = if token.is_empty() {
        field.to_string()
    } else {
        field.replace(token, " ")
    };

    field
        .replace('\n', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// トラックリストを1行1トラックの文字列にする
pub fn format_tabular(tracklist: &Tracklist, separator: &str) -> String {
    tracklist
        .entries
        .iter()
        .map(|entry| {
            [
                sanitize(&entry.artist, separator),
                sanitize(&entry.title, separator),
                entry.start_seconds.to_string(),
            ]
            .join(separator)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 編集後の文字列からトラックリストを読み取る
///
/// 空行とフィールドが3つ未満の行は読み飛ばす
///
/// # Errors
///
/// 開始位置が数値でない行がある場合にエラーを返す
pub fn parse_tabular(content: &str, separator: &str) -> Result<Tracklist, CueError> {
    let mut entries = Vec::new();

    for (line_num, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split(separator.trim()).map(str::trim).collect();
        let [artist, title, start, ..] = fields.as_slice() else {
            warn!(
                "Skipping line {}: expected 'artist{}title{}seconds'",
                line_num + 1,
                separator,
                separator
            );
            continue;
        };

        let start_seconds = start.parse().map_err(|_| CueError::InvalidStart {
            line: line_num + 1,
            value: start.to_string(),
        })?;

        entries.push(TracklistEntry::new(*artist, *title, start_seconds));
    }

    Ok(Tracklist::new(entries))
}
