//! 照合・アップロードの型定義
//!
//! - CatalogEntry: リモートカタログの商品（取得後は不変）
//! - Folder: ローカルの画像フォルダ（スキャン時に一度だけ構築）
//! - UploadOutcome / ProductUploadLog: アップロード結果の記録

use crate::tokenizer::token_set;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// カタログの商品
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// リモート識別子（例: gid://shopify/Product/123）
    pub id: String,
    /// 表示名
    pub title: String,
    #[serde(default)]
    pub handle: String,
}

impl CatalogEntry {
    /// 表示名から導出したトークン集合
    pub fn tokens(&self) -> BTreeSet<String> {
        token_set(&self.title)
    }
}

/// 画像フォルダ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    /// 商品フォルダ名（マーカーサブフォルダ名ではない）
    pub name: String,
    /// 画像が置かれているマーカーサブフォルダのパス
    pub path: PathBuf,
    /// 自然順ソート済みの画像パス
    pub images: Vec<PathBuf>,
    pub tokens: BTreeSet<String>,
}

impl Folder {
    /// フォルダ名からトークン集合を計算して構築
    pub fn new(name: impl Into<String>, path: impl Into<PathBuf>, images: Vec<PathBuf>) -> Self {
        let name = name.into();
        let tokens = token_set(&name);
        Self {
            name,
            path: path.into(),
            images,
            tokens,
        }
    }
}

/// ファイル単位のアップロード状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Failed,
}

/// ファイル単位のアップロード結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub file: String,
    pub status: UploadStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    pub fn success(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            status: UploadStatus::Success,
            error: None,
        }
    }

    pub fn failed(file: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            status: UploadStatus::Failed,
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == UploadStatus::Success
    }
}

/// 商品単位のアップロードログ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUploadLog {
    pub title: String,
    pub folder: String,
    pub results: Vec<UploadOutcome>,
}

impl ProductUploadLog {
    pub fn new(title: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            folder: folder.into(),
            results: Vec::new(),
        }
    }

    /// 結果を追記（アップロード順を保持）
    pub fn record(&mut self, outcome: UploadOutcome) {
        self.results.push(outcome);
    }

    pub fn succeeded(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.succeeded()
    }
}
