//! 自然順ソート
//!
//! ファイル名を数字の連続部分で区切り、数値部分は整数として、
//! 文字部分は大文字小文字を無視して比較する（img_2 < img_10）。
//! 数字は ASCII に限らず Unicode の10進数字（全角の「１０」など）も数値として扱う。

use regex::Regex;
use std::cmp::Ordering;
use std::path::{Path, PathBuf};

lazy_static::lazy_static! {
    static ref DIGITS_RE: Regex = Regex::new(r"\d+").unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"^\d$").unwrap();
}

#[derive(Debug, PartialEq, Eq)]
enum Chunk {
    Text(String),
    /// ASCII に揃えた数字列
    Number(String),
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}

/// 10進数字1文字の値
///
/// Unicode の10進数字は 0〜9 が連続した符号位置に並ぶため、
/// 直前に続く数字の個数から値が決まる。
fn digit_value(c: char) -> u32 {
    if let Some(d) = c.to_digit(10) {
        return d;
    }
    let mut run = 0;
    let mut cp = c as u32;
    while let Some(prev) = cp.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        run += 1;
        cp -= 1;
    }
    run % 10
}

fn ascii_digits(run: &str) -> String {
    run.chars()
        .filter_map(|c| char::from_digit(digit_value(c), 10))
        .collect()
}

/// テキスト/数値が交互に並ぶチャンク列に分解（先頭は常にテキスト）
fn chunks(name: &str) -> Vec<Chunk> {
    let mut out = Vec::new();
    let mut last = 0;
    for m in DIGITS_RE.find_iter(name) {
        out.push(Chunk::Text(name[last..m.start()].to_lowercase()));
        out.push(Chunk::Number(ascii_digits(m.as_str())));
        last = m.end();
    }
    out.push(Chunk::Text(name[last..].to_lowercase()));
    out
}

/// 桁数に上限のない数値比較（先頭ゼロは無視）
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_chunk(a: &Chunk, b: &Chunk) -> Ordering {
    match (a, b) {
        (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        (Chunk::Number(x), Chunk::Number(y)) => compare_numbers(x, y),
        // 交互に並ぶので同じ位置の種類は常に一致する
        (Chunk::Text(_), Chunk::Number(_)) => Ordering::Less,
        (Chunk::Number(_), Chunk::Text(_)) => Ordering::Greater,
    }
}

/// 自然順で2つの名前を比較
///
/// 同順位（img_01 と img_1 など）は元の文字列で決める。
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (ca, cb) = (chunks(a), chunks(b));
    for (x, y) in ca.iter().zip(cb.iter()) {
        let ord = compare_chunk(x, y);
        if ord != Ordering::Equal {
            return ord;
        }
    }
    ca.len().cmp(&cb.len()).then_with(|| a.cmp(b))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// パス列をファイル名の自然順で並べ替え
pub fn sort_naturally(paths: &mut [PathBuf]) {
    paths.sort_by(|a, b| natural_cmp(&file_name_of(a), &file_name_of(b)));
}
