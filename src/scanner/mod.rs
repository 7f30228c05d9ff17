//! 商品フォルダのスキャン
//!
//! `root/<商品フォルダ>/<マーカーサブフォルダ>/*.{jpg,jpeg,png,webp}` を走査する。
//! マーカーサブフォルダがない、または画像が1枚もない候補は結果に含めない。

pub mod natural_sort;

pub use natural_sort::{natural_cmp, sort_naturally};

use crate::error::{Result, SyncError};
use shop_image_common::Folder;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// 画像を置くサブフォルダ名（大文字小文字は区別しない）
pub const MARKER_DIR: &str = "etulle shopify";

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp"];

#[derive(Debug, Clone)]
pub struct FolderScanner {
    marker: String,
    extensions: Vec<String>,
}

impl Default for FolderScanner {
    fn default() -> Self {
        Self::new(MARKER_DIR, IMAGE_EXTENSIONS)
    }
}

impl FolderScanner {
    pub fn new(marker: &str, extensions: &[&str]) -> Self {
        Self {
            marker: marker.to_lowercase(),
            extensions: extensions.iter().map(|e| e.to_lowercase()).collect(),
        }
    }

    /// ルート直下の商品フォルダを走査
    pub fn scan(&self, root: &Path) -> Result<Vec<Folder>> {
        if !root.is_dir() {
            return Err(SyncError::FolderNotFound(root.display().to_string()));
        }

        let mut folders = Vec::new();

        for candidate in children(root).filter(|e| e.file_type().is_dir()) {
            let name = candidate.file_name().to_string_lossy().to_string();

            let Some(marker_dir) = self.find_marker_dir(candidate.path()) else {
                tracing::debug!(folder = %name, "マーカーサブフォルダなし");
                continue;
            };

            let images = self.collect_images(&marker_dir);
            if images.is_empty() {
                tracing::debug!(folder = %name, "画像なし");
                continue;
            }

            folders.push(Folder::new(name, marker_dir, images));
        }

        Ok(folders)
    }

    fn find_marker_dir(&self, candidate: &Path) -> Option<PathBuf> {
        children(candidate)
            .filter(|e| e.file_type().is_dir())
            .find(|e| e.file_name().to_string_lossy().to_lowercase() == self.marker)
            .map(|e| e.into_path())
    }

    fn collect_images(&self, dir: &Path) -> Vec<PathBuf> {
        let mut images: Vec<PathBuf> = children(dir)
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| self.is_image(p))
            .collect();

        sort_naturally(&mut images);
        images
    }

    pub fn is_image(&self, path: &Path) -> bool {
        path.extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .is_some_and(|ext| self.extensions.contains(&ext))
    }
}

/// 直下のエントリのみ（再帰しない、名前順、シンボリックリンクは辿る）
///
/// 読めないエントリは警告を出して飛ばす。
fn children(dir: &Path) -> impl Iterator<Item = DirEntry> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| match e {
            Ok(entry) => Some(entry),
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                tracing::warn!(path = %path, error = %err, "読み込めないエントリをスキップ");
                None
            }
        })
}

/// 既定のマーカー・拡張子でスキャン
pub fn scan_folders(root: &Path) -> Result<Vec<Folder>> {
    FolderScanner::default().scan(root)
}
