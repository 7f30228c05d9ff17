//! トークン化モジュール
//!
//! 商品名・フォルダ名を正規化された単語列に変換する。
//! 照合ではトークンの集合のみを使い、順序と重複は捨てる。

use regex::Regex;
use std::collections::BTreeSet;

lazy_static::lazy_static! {
    /// 文字（L*）・数字（N*）以外の連続。結合文字（M*）も区切りになる
    static ref SEPARATOR_RE: Regex = Regex::new(r"[^\p{L}\p{N}]+").unwrap();
}

/// テキストをトークン列に変換
///
/// - Unicode準拠で小文字化
/// - 英数字（Unicodeの文字・数字）以外はすべて空白に置換
/// - 空白で分割し、空の断片は捨てる
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    SEPARATOR_RE
        .replace_all(&lowered, " ")
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// テキストをトークン集合に変換
pub fn token_set(text: &str) -> BTreeSet<String> {
    tokenize(text).into_iter().collect()
}
