//! カタログ取得
//!
//! タグで絞り込んだ商品を、カーソルでページングしながらすべて取得する。

use crate::error::Result;
use crate::shop::ShopApi;
use indicatif::{ProgressBar, ProgressStyle};
use shop_image_common::CatalogEntry;

pub fn tag_query(tag: &str) -> String {
    format!("tag:{}", tag)
}

pub async fn fetch_products_by_tag<A: ShopApi>(
    api: &A,
    tag: &str,
    page_size: u32,
) -> Result<Vec<CatalogEntry>> {
    let query = tag_query(tag);
    let mut entries = Vec::new();
    let mut cursor: Option<String> = None;

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner} 商品を取得中 {pos}ページ")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    loop {
        let page = api.products_page(&query, cursor.as_deref(), page_size).await?;
        entries.extend(page.entries);
        pb.inc(1);

        match page.page_info {
            info if info.has_next_page && info.end_cursor.is_some() => cursor = info.end_cursor,
            _ => break,
        }
    }

    pb.finish_and_clear();
    Ok(entries)
}
