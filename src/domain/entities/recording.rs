//! # Recording Entity
//!
//! Mixxxの録音（音声ファイルとキューシートの組）

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const AUDIO_EXTENSION: &str = "wav";
pub const CUE_EXTENSION: &str = "cue";

/// 録音
///
/// 同じファイル名（拡張子を除く）を持つ `.wav` と `.cue` の組
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recording {
    /// 拡張子を除いたファイル名
    pub name: String,
    /// 録音された音声ファイル
    pub audio_path: PathBuf,
    /// トラックリスト（キューシート）
    pub cue_path: PathBuf,
}

impl Recording {
    /// ディレクトリと名前から録音のパスを組み立てる
    ///
    /// ファイルの存在はチェックしない
    pub fn named(dir: &Path, name: &str) -> Self {
        Self {
            name: name.to_string(),
            audio_path: dir.join(format!("{}.{}", name, AUDIO_EXTENSION)),
            cue_path: dir.join(format!("{}.{}", name, CUE_EXTENSION)),
        }
    }

    /// ファイル一覧から最新の録音を探す
    ///
    /// Mixxxのファイル名はタイムスタンプで始まるため、名前の辞書順が録音順になる。
    /// `.wav` と `.cue` の両方が揃っている名前のみを対象とする。
    ///
    /// # Arguments
    ///
    /// * `paths` - 録音ディレクトリ内のファイルパス
    ///
    /// # Returns
    ///
    /// 最新の録音（見つからない場合は `None`）
    pub fn latest(paths: &[PathBuf]) -> Option<Self> {
        let mut pairs: BTreeMap<String, (Option<PathBuf>, Option<PathBuf>)> = BTreeMap::new();

        for path in paths {
            let (Some(stem), Some(extension)) = (
                path.file_stem().and_then(|s| s.to_str()),
                path.extension().and_then(|s| s.to_str()),
            ) else {
                continue;
            };

            let pair = pairs.entry(stem.to_string()).or_default();
            if extension.eq_ignore_ascii_case(AUDIO_EXTENSION) {
                pair.0 = Some(path.clone());
            } else if extension.eq_ignore_ascii_case(CUE_EXTENSION) {
                pair.1 = Some(path.clone());
            }
        }

        pairs.into_iter().rev().find_map(|(name, pair)| match pair {
            (Some(audio_path), Some(cue_path)) => Some(Self {
                name,
                audio_path,
                cue_path,
            }),
            _ => None,
        })
    }

    /// 変換後のmp3ファイルのパス
    ///
    /// 同じ録音からは常に同じパスになるため、変換済みのファイルを再利用できる
    pub fn transcoded_path(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(format!("transcoded-{}.mp3", self.name))
    }
}
