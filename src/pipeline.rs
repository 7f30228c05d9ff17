//! 一括処理のオーケストレーター
//!
//! カタログ取得 → フォルダスキャン → 照合 → レポート保存 →（ドライランならここで終了）
//! → 照合済み商品の画像アップロード → アップロードログ保存
//!
//! 商品・ファイルは1件ずつ順番に処理する。

use crate::catalog;
use crate::error::Result;
use crate::report;
use crate::scanner::FolderScanner;
use crate::shop::ShopApi;
use crate::uploader;
use indicatif::{ProgressBar, ProgressStyle};
use shop_image_common::{match_entries, ProductUploadLog};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub tag: String,
    pub root: PathBuf,
    pub dry_run: bool,
    /// レポートの出力先
    pub output_dir: PathBuf,
    pub page_size: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadTotals {
    pub succeeded: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub products: usize,
    pub folders: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub collisions: usize,
    /// ドライランまたは早期終了時は None
    pub uploads: Option<UploadTotals>,
}

pub async fn run<A: ShopApi>(
    api: &A,
    scanner: &FolderScanner,
    options: &RunOptions,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();

    // 1. Fetch
    println!("[1/4] タグ '{}' の商品を取得中...", options.tag);
    let products = catalog::fetch_products_by_tag(api, &options.tag, options.page_size).await?;
    summary.products = products.len();
    println!("✔ {}件の商品を検出\n", products.len());

    if products.is_empty() {
        println!("商品が見つかりません。");
        return Ok(summary);
    }

    // 2. Scan
    println!("[2/4] フォルダをスキャン中: {}", options.root.display());
    let folders = scanner.scan(&options.root)?;
    summary.folders = folders.len();
    println!("✔ 画像のあるフォルダ {}件\n", folders.len());

    if folders.is_empty() {
        println!("有効な画像フォルダが見つかりません。");
        return Ok(summary);
    }

    // 3. Match & report
    println!("[3/4] 商品とフォルダを照合中...");
    let matches = match_entries(&products, &folders);
    summary.matched = matches.matched.len();
    summary.unmatched = matches.unmatched.len();
    summary.collisions = matches.collisions.len();

    println!("\n📊 照合結果:");
    println!("   Matched: {}", summary.matched);
    println!("   Unmatched: {}", summary.unmatched);
    println!("   Collisions: {}", summary.collisions);

    report::write_match_reports(&options.output_dir, &matches)?;
    println!(
        "📝 {}, {}, {} を保存",
        report::MATCHED_FILE,
        report::UNMATCHED_FILE,
        report::COLLISIONS_FILE
    );

    if summary.unmatched > 0 {
        println!(
            "⚠️  未照合の商品が{}件あります。{} を確認してください。",
            summary.unmatched,
            report::UNMATCHED_FILE
        );
    }
    if summary.collisions > 0 {
        println!(
            "⚠️  衝突が{}件あります。{} を確認してください。これらはスキップされます。",
            summary.collisions,
            report::COLLISIONS_FILE
        );
    }

    if options.dry_run {
        println!("\n🛑 ドライラン完了。アップロードは行いません。");
        return Ok(summary);
    }

    // 4. Upload
    println!("\n[4/4] 照合済み商品の画像をアップロード中...");
    let pb = ProgressBar::new(matches.matched.len() as u64);
    pb.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} 商品")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut upload_log: Vec<ProductUploadLog> = Vec::with_capacity(matches.matched.len());
    let mut totals = UploadTotals::default();
    for pair in &matches.matched {
        let log = uploader::upload_product_images(api, pair, &pb).await;
        totals.succeeded += log.succeeded();
        totals.failed += log.failed();
        upload_log.push(log);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let path = report::write_upload_log(&options.output_dir, &upload_log)?;
    println!("📝 {} を保存", path.display());
    println!(
        "\n✅ アップロード完了: 成功 {}件 / 失敗 {}件",
        totals.succeeded, totals.failed
    );

    summary.uploads = Some(totals);
    Ok(summary)
}
