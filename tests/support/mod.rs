//! テスト用のメモリ上 ShopApi 実装

#![allow(dead_code)]

use shop_image_common::CatalogEntry;
use shop_image_sync::error::{Result, SyncError};
use shop_image_sync::shop::{
    FileUpload, PageInfo, ProductPage, ShopApi, StagedParameter, StagedTarget, StagedUploadInput,
};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

/// 記録されたリモート呼び出し
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ProductsPage { query: String, cursor: Option<String> },
    StagedUpload { filename: String, mime_type: String, file_size: String },
    Transfer { filename: String, bytes: usize },
    RegisterFile { resource_url: String, filename: String },
    AttachMedia { product_id: String, resource_url: String },
}

impl Call {
    pub fn is_upload_protocol(&self) -> bool {
        !matches!(self, Call::ProductsPage { .. })
    }
}

#[derive(Default)]
pub struct FakeShop {
    pages: Vec<ProductPage>,
    fail_stage: HashSet<String>,
    fail_transfer: HashSet<String>,
    fail_register: HashSet<String>,
    fail_attach: HashSet<String>,
    calls: Mutex<Vec<Call>>,
}

impl FakeShop {
    /// 1ページで全商品を返す
    pub fn with_products(entries: Vec<CatalogEntry>) -> Self {
        Self::with_pages(vec![entries])
    }

    /// 複数ページ（カーソル c1, c2, ...）
    pub fn with_pages(pages: Vec<Vec<CatalogEntry>>) -> Self {
        let count = pages.len();
        let pages = pages
            .into_iter()
            .enumerate()
            .map(|(i, entries)| ProductPage {
                entries,
                page_info: PageInfo {
                    has_next_page: i + 1 < count,
                    end_cursor: Some(format!("c{}", i + 1)),
                },
            })
            .collect();
        Self {
            pages,
            ..Default::default()
        }
    }

    pub fn fail_stage_for(mut self, filename: &str) -> Self {
        self.fail_stage.insert(filename.to_string());
        self
    }

    pub fn fail_transfer_for(mut self, filename: &str) -> Self {
        self.fail_transfer.insert(filename.to_string());
        self
    }

    pub fn fail_register_for(mut self, filename: &str) -> Self {
        self.fail_register.insert(filename.to_string());
        self
    }

    /// 紐付けは resourceUrl で届くので、ファイル名から引ける形で持つ
    pub fn fail_attach_for(mut self, filename: &str) -> Self {
        self.fail_attach.insert(resource_url_for(filename));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn upload_calls(&self) -> Vec<Call> {
        self.calls().into_iter().filter(Call::is_upload_protocol).collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

fn resource_url_for(filename: &str) -> String {
    format!("https://staged.example.com/tmp/{}", filename)
}

impl ShopApi for FakeShop {
    async fn products_page(
        &self,
        query: &str,
        cursor: Option<&str>,
        _page_size: u32,
    ) -> Result<ProductPage> {
        self.record(Call::ProductsPage {
            query: query.to_string(),
            cursor: cursor.map(str::to_string),
        });
        let index = match cursor {
            None => 0,
            Some(c) => c.trim_start_matches('c').parse::<usize>().unwrap(),
        };
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    async fn staged_upload(&self, input: &StagedUploadInput) -> Result<StagedTarget> {
        self.record(Call::StagedUpload {
            filename: input.filename.clone(),
            mime_type: input.mime_type.clone(),
            file_size: input.file_size.clone(),
        });
        if self.fail_stage.contains(&input.filename) {
            return Err(SyncError::UserErrors {
                operation: "stagedUploadsCreate",
                errors: "fileSize: File size is too large".into(),
            });
        }
        Ok(StagedTarget {
            url: "https://staged.example.com/upload".into(),
            resource_url: resource_url_for(&input.filename),
            parameters: vec![StagedParameter {
                name: "key".into(),
                value: format!("tmp/{}", input.filename),
            }],
        })
    }

    async fn transfer(&self, _target: &StagedTarget, upload: FileUpload) -> Result<()> {
        self.record(Call::Transfer {
            filename: upload.filename.clone(),
            bytes: upload.bytes.len(),
        });
        if self.fail_transfer.contains(&upload.filename) {
            return Err(SyncError::Transfer("503 Service Unavailable".into()));
        }
        Ok(())
    }

    async fn register_file(&self, resource_url: &str, filename: &str) -> Result<()> {
        self.record(Call::RegisterFile {
            resource_url: resource_url.to_string(),
            filename: filename.to_string(),
        });
        if self.fail_register.contains(filename) {
            return Err(SyncError::UserErrors {
                operation: "fileCreate",
                errors: "originalSource: invalid".into(),
            });
        }
        Ok(())
    }

    async fn attach_media(&self, product_id: &str, resource_url: &str) -> Result<()> {
        self.record(Call::AttachMedia {
            product_id: product_id.to_string(),
            resource_url: resource_url.to_string(),
        });
        if self.fail_attach.contains(resource_url) {
            return Err(SyncError::UserErrors {
                operation: "productCreateMedia",
                errors: "media.originalSource: Image could not be processed".into(),
            });
        }
        Ok(())
    }
}

pub fn entry(id: u32, title: &str) -> CatalogEntry {
    CatalogEntry {
        id: format!("gid://shopify/Product/{}", id),
        title: title.to_string(),
        handle: title.to_lowercase().replace(' ', "-"),
    }
}

/// root/<name>/<marker>/ に画像ファイルを作成
pub fn make_product_folder(root: &Path, name: &str, marker: &str, files: &[&str]) {
    let dir = root.join(name).join(marker);
    fs::create_dir_all(&dir).unwrap();
    for f in files {
        File::create(dir.join(f))
            .unwrap()
            .write_all(format!("data:{}", f).as_bytes())
            .unwrap();
    }
}
