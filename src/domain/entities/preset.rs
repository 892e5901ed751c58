//! # Preset Entity
//!
//! 定期的なミックスシリーズのためのアップロード設定

use regex::Regex;
use std::path::PathBuf;
use thiserror::Error;

/// 名前パターン中の連番プレースホルダ
pub const NUMBER_PLACEHOLDER: &str = "{}";

#[derive(Debug, Error)]
pub enum NamePatternError {
    #[error("name pattern '{0}' has no '{{}}' placeholder")]
    MissingPlaceholder(String),

    #[error("name pattern '{0}' has more than one '{{}}' placeholder")]
    MultiplePlaceholders(String),

    #[error("name pattern '{pattern}' does not compile: {source}")]
    Regex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// 連番付きのミックス名テンプレート
///
/// `{}` を1つだけ含むテンプレート（例: `"Night Session #{}"`）。
/// 既存のミックス名との照合には、テンプレートから生成した
/// キャプチャグループ1つの正規表現を使う。
#[derive(Debug, Clone)]
pub struct NamePattern {
    template: String,
    regex: Regex,
}

impl NamePattern {
    /// テンプレートから名前パターンを作成します。
    ///
    /// # 例
    ///
    /// ```
    /// use mixcloud_uploader::domain::entities::preset::NamePattern;
    ///
    /// let pattern = NamePattern::new("Night Session #{}").unwrap();
    ///
    /// assert_eq!(pattern.format(12), "Night Session #12");
    /// assert_eq!(pattern.capture("Night Session #11"), Some(11));
    /// assert_eq!(pattern.capture("Morning Session #3"), None);
    ///
    /// // プレースホルダがないテンプレートはエラー
    /// assert!(NamePattern::new("Night Session").is_err());
    /// ```
    pub fn new(template: &str) -> Result<Self, NamePatternError> {
        let parts: Vec<&str> = template.split(NUMBER_PLACEHOLDER).collect();
        let (prefix, suffix) = match parts.as_slice() {
            [_] => return Err(NamePatternError::MissingPlaceholder(template.to_string())),
            [prefix, suffix] => (*prefix, *suffix),
            _ => return Err(NamePatternError::MultiplePlaceholders(template.to_string())),
        };

        let source = format!(
            r"^{}(\d+){}$",
            regex::escape(prefix),
            regex::escape(suffix)
        );
        let regex = Regex::new(&source).map_err(|source| NamePatternError::Regex {
            pattern: template.to_string(),
            source,
        })?;

        Ok(Self {
            template: template.to_string(),
            regex,
        })
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    /// 名前がパターンに一致する場合、連番部分を返す
    ///
    /// `u64` に収まらない連番は一致しないものとして扱う
    pub fn capture(&self, name: &str) -> Option<u64> {
        self.regex
            .captures(name.trim())
            .and_then(|captures| captures.get(1))
            .and_then(|number| number.as_str().parse().ok())
    }

    /// 連番を埋め込んだ名前を返す
    pub fn format(&self, number: u64) -> String {
        self.template
            .replacen(NUMBER_PLACEHOLDER, &number.to_string(), 1)
    }
}

/// プリセット
///
/// 名前パターン、アートワーク、タグなど再利用可能なアップロード設定
#[derive(Debug, Clone, Default)]
pub struct Preset {
    pub name_pattern: Option<NamePattern>,
    pub artwork: Option<PathBuf>,
    pub tags: Vec<String>,
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_valid() {
        let pattern = NamePattern::new("Deep Cuts Vol. {}").unwrap();
        assert_eq!(pattern.template(), "Deep Cuts Vol. {}");
    }

    #[test]
    fn test_new_missing_placeholder() {
        let result = NamePattern::new("Deep Cuts");
        assert!(matches!(result, Err(NamePatternError::MissingPlaceholder(_))));
    }

    #[test]
    fn test_new_multiple_placeholders() {
        let result = NamePattern::new("Deep Cuts {} / {}");
        assert!(matches!(
            result,
            Err(NamePatternError::MultiplePlaceholders(_))
        ));
    }

    #[test]
    fn test_capture_escapes_literal_parts() {
        // "." と "(" は正規表現のメタ文字としてではなく文字として扱われる
        let pattern = NamePattern::new("Deep Cuts Vol. {} (live)").unwrap();

        assert_eq!(pattern.capture("Deep Cuts Vol. 7 (live)"), Some(7));
        assert_eq!(pattern.capture("Deep Cuts Vol! 7 (live)"), None);
        assert_eq!(pattern.capture("Deep Cuts Vol. 7 live"), None);
    }

    #[test]
    fn test_capture_is_anchored() {
        let pattern = NamePattern::new("Session {}").unwrap();

        assert_eq!(pattern.capture("Session 4"), Some(4));
        assert_eq!(pattern.capture("Session 4 (rerun)"), None);
        assert_eq!(pattern.capture("Late Session 4"), None);
    }

    #[test]
    fn test_capture_overflow_is_ignored() {
        let pattern = NamePattern::new("Session {}").unwrap();
        assert_eq!(pattern.capture("Session 99999999999999999999999"), None);
    }

    #[test]
    fn test_format() {
        let pattern = NamePattern::new("{} - Weekly Mix").unwrap();
        assert_eq!(pattern.format(3), "3 - Weekly Mix");
    }
}
