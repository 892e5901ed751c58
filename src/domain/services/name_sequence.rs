//! # Name Sequence Service
//!
//! プリセットの名前パターンから次のミックス名を決める

use crate::domain::entities::preset::NamePattern;

/// 連番の初期値（一致する既存ミックスがない場合）
pub const FIRST_NUMBER: u64 = 1;

/// ミックス名の連番サービス
pub struct NameSequenceService;

impl NameSequenceService {
    /// 次の連番を返す
    ///
    /// # Arguments
    ///
    /// * `pattern` - 名前パターン
    /// * `names` - 既存のミックス名
    ///
    /// # Returns
    ///
    /// パターンに一致する名前の最大の連番 + 1（一致しない場合は `FIRST_NUMBER`）
    pub fn next_number<S: AsRef<str>>(pattern: &NamePattern, names: &[S]) -> u64 {
        names
            .iter()
            .filter_map(|name| pattern.capture(name.as_ref()))
            .max()
            .map_or(FIRST_NUMBER, |max| max.saturating_add(1))
    }

    /// 次のミックス名を返す
    pub fn next_name<S: AsRef<str>>(pattern: &NamePattern, names: &[S]) -> String {
        pattern.format(Self::next_number(pattern, names))
    }
}
