//! # Upload Options DTO
//!
//! 1回の実行で使う設定（CLIフラグ、プリセット、config.jsonを解決した結果）

use anyhow::{bail, Result};
use std::path::PathBuf;

use crate::domain::entities::preset::{NamePattern, Preset};

/// ミックス名の決め方
#[derive(Debug, Clone)]
pub enum MixName {
    /// 指定された名前をそのまま使う
    Fixed(String),
    /// 既存ミックスの連番から次の名前を決める
    Next(NamePattern),
}

/// プリセットより優先されるミックス情報（CLIフラグ）
#[derive(Debug, Clone, Default)]
pub struct MixOverrides {
    pub name: Option<String>,
    pub artwork: Option<PathBuf>,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

/// アップロードするミックスの情報
#[derive(Debug, Clone)]
pub struct MixMetadata {
    pub name: MixName,
    pub artwork: Option<PathBuf>,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

impl MixMetadata {
    /// フラグとプリセットからミックス情報を解決する
    ///
    /// 各項目はフラグ、プリセットの順に優先される。
    ///
    /// ```
    /// use mixcloud_uploader::application::dto::upload_options::{MixMetadata, MixName, MixOverrides};
    /// use mixcloud_uploader::domain::entities::preset::{NamePattern, Preset};
    ///
    /// let preset = Preset {
    ///     name_pattern: Some(NamePattern::new("Night Session #{}").unwrap()),
    ///     tags: vec!["house".to_string()],
    ///     ..Preset::default()
    /// };
    /// let overrides = MixOverrides {
    ///     tags: vec!["techno".to_string()],
    ///     ..MixOverrides::default()
    /// };
    ///
    /// let metadata = MixMetadata::resolve(overrides, Some(&preset)).unwrap();
    ///
    /// assert!(matches!(metadata.name, MixName::Next(_)));
    /// assert_eq!(metadata.tags, vec!["techno".to_string()]);
    /// ```
    ///
    /// # Errors
    ///
    /// 名前もプリセットの名前パターンもない場合にエラーを返す
    pub fn resolve(overrides: MixOverrides, preset: Option<&Preset>) -> Result<Self> {
        let name = match (
            overrides.name.filter(|name| !name.trim().is_empty()),
            preset.and_then(|preset| preset.name_pattern.clone()),
        ) {
            (Some(name), _) => MixName::Fixed(name.trim().to_string()),
            (None, Some(pattern)) => MixName::Next(pattern),
            (None, None) => {
                bail!("No mix name given: pass --name or use a preset with a name-pattern")
            }
        };

        let tags: Vec<String> = overrides
            .tags
            .iter()
            .map(|tag| tag.trim())
            .filter(|tag| !tag.is_empty())
            .map(str::to_string)
            .collect();
        let tags = if tags.is_empty() {
            preset.map(|preset| preset.tags.clone()).unwrap_or_default()
        } else {
            tags
        };

        Ok(Self {
            name,
            artwork: overrides
                .artwork
                .or_else(|| preset.and_then(|preset| preset.artwork.clone())),
            tags,
            description: overrides
                .description
                .or_else(|| preset.and_then(|preset| preset.description.clone())),
        })
    }
}

/// 実行設定
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// 録音ディレクトリ
    pub recordings_dir: PathBuf,
    /// 録音名（省略時は最新の録音）
    pub recording_name: Option<String>,
    /// mp3の出力先（省略時は一時ディレクトリ）
    pub output_dir: Option<PathBuf>,
    pub metadata: MixMetadata,
    /// エディタでの編集と確認を行うかどうか
    pub interactive: bool,
    /// アップロードを行わないかどうか
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preset() -> Preset {
        Preset {
            name_pattern: Some(NamePattern::new("Night Session #{}").unwrap()),
            artwork: Some(PathBuf::from("/art/night.png")),
            tags: vec!["house".to_string(), "techno".to_string()],
            description: Some("Weekly".to_string()),
        }
    }

    #[test]
    fn test_resolve_from_preset() {
        let metadata = MixMetadata::resolve(MixOverrides::default(), Some(&preset())).unwrap();

        match metadata.name {
            MixName::Next(pattern) => assert_eq!(pattern.template(), "Night Session #{}"),
            MixName::Fixed(name) => panic!("unexpected fixed name {}", name),
        }
        assert_eq!(metadata.artwork, Some(PathBuf::from("/art/night.png")));
        assert_eq!(metadata.tags, vec!["house".to_string(), "techno".to_string()]);
        assert_eq!(metadata.description.as_deref(), Some("Weekly"));
    }

    #[test]
    fn test_resolve_flags_override_preset() {
        let overrides = MixOverrides {
            name: Some("Special Guest Mix".to_string()),
            artwork: Some(PathBuf::from("/art/guest.jpg")),
            tags: vec!["disco".to_string()],
            description: Some("One-off".to_string()),
        };

        let metadata = MixMetadata::resolve(overrides, Some(&preset())).unwrap();

        assert!(matches!(metadata.name, MixName::Fixed(ref name) if name == "Special Guest Mix"));
        assert_eq!(metadata.artwork, Some(PathBuf::from("/art/guest.jpg")));
        assert_eq!(metadata.tags, vec!["disco".to_string()]);
        assert_eq!(metadata.description.as_deref(), Some("One-off"));
    }

    #[test]
    fn test_resolve_blank_tags_fall_back_to_preset() {
        let overrides = MixOverrides {
            tags: vec![" ".to_string(), String::new()],
            ..MixOverrides::default()
        };

        let metadata = MixMetadata::resolve(overrides, Some(&preset())).unwrap();

        assert_eq!(metadata.tags, vec!["house".to_string(), "techno".to_string()]);
    }

    #[test]
    fn test_resolve_without_name() {
        let result = MixMetadata::resolve(MixOverrides::default(), None);

        let err = result.unwrap_err();
        assert!(err.to_string().contains("No mix name given"));
    }

    #[test]
    fn test_resolve_blank_name_uses_pattern() {
        let overrides = MixOverrides {
            name: Some("   ".to_string()),
            ..MixOverrides::default()
        };

        let metadata = MixMetadata::resolve(overrides, Some(&preset())).unwrap();

        assert!(matches!(metadata.name, MixName::Next(_)));
    }
}
