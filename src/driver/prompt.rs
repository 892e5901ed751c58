//! Interactive Prompts
//!
//! エディタでのトラックリスト編集とアップロード前の確認

use anyhow::{bail, Context, Result};
use log::debug;
use std::io::{BufRead, Write};

use crate::adapter::cue::tabular::{format_tabular, parse_tabular, DEFAULT_SEPARATOR};
use crate::domain::entities::tracklist::Tracklist;

const FALLBACK_EDITOR: &str = "vi";

/// `$VISUAL` / `$EDITOR` の値をプログラムと引数に分ける
pub fn editor_command(value: Option<&str>) -> (String, Vec<String>) {
    let mut parts = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .unwrap_or(FALLBACK_EDITOR)
        .split_whitespace()
        .map(str::to_string);

    let program = parts
        .next()
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());
    (program, parts.collect())
}

/// y/n の回答を解釈する（既定は no）
pub fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// 編集結果を受け入れ、元のタイトルと演者を引き継ぐ
///
/// 元のリストが空でない場合のみ、空になった編集結果を中止として扱う
pub fn accept_edit(original: &Tracklist, edited: Tracklist) -> Result<Tracklist> {
    if !original.is_empty() && edited.is_empty() {
        bail!("Tracklist is empty after editing, aborting");
    }

    Ok(Tracklist {
        title: original.title.clone(),
        performer: original.performer.clone(),
        ..edited
    })
}

/// トラックリストをエディタで編集させる
///
/// # Errors
///
/// エディタの起動に失敗した場合、エディタが異常終了した場合、
/// または編集後のトラックリストが不正か、空でなかったリストが空にされた場合にエラーを返す
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn edit_tracklist(tracklist: &Tracklist) -> Result<Tracklist> {
    let mut file = tempfile::Builder::new()
        .prefix("tracklist-")
        .suffix(".txt")
        .tempfile()
        .context("Failed to create temporary tracklist file")?;
    file.write_all(format_tabular(tracklist, DEFAULT_SEPARATOR).as_bytes())
        .context("Failed to write temporary tracklist file")?;
    file.flush()?;

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .ok();
    let (program, args) = editor_command(editor.as_deref());
    debug!("Opening {} with {}", file.path().display(), program);

    let status = tokio::process::Command::new(&program)
        .args(&args)
        .arg(file.path())
        .status()
        .await
        .with_context(|| format!("Failed to start editor '{}'", program))?;
    if !status.success() {
        bail!("Editor '{}' exited with {}", program, status);
    }

    let content = tokio::fs::read_to_string(file.path())
        .await
        .context("Failed to read edited tracklist")?;
    let edited = parse_tabular(&content, DEFAULT_SEPARATOR)?;

    accept_edit(tracklist, edited)
}

/// 標準入力で確認を求める
#[cfg_attr(coverage_nightly, coverage(off))]
pub async fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    std::io::stdout().flush()?;

    let answer = tokio::task::spawn_blocking(|| {
        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).map(|_| line)
    })
    .await
    .map_err(|e| anyhow::anyhow!("Failed to spawn blocking task: {}", e))?
    .context("Failed to read answer")?;

    Ok(is_yes(&answer))
}
