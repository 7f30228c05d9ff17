//! 画像アップロード
//!
//! 1ファイルごとに次の順で呼び出す（省略なし）:
//! 1. stagedUploadsCreate: 一時アップロード先を取得
//! 2. マルチパートPOSTでファイル本体を転送
//! 3. fileCreate で登録し、productCreateMedia で商品に紐付け
//!
//! 失敗はファイル単位で記録し、残りのファイル・商品の処理は続行する。再試行はしない。

use crate::error::Result;
use crate::shop::{FileUpload, ShopApi, StagedUploadInput};
use indicatif::ProgressBar;
use shop_image_common::{MatchedPair, ProductUploadLog, UploadOutcome};
use std::path::Path;

/// 拡張子からMIMEタイプを推定（既定は image/jpeg）
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "webp" => "image/webp",
        _ => "image/jpeg",
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// 1ファイルを商品にアップロード
pub async fn upload_image<A: ShopApi>(api: &A, product_id: &str, path: &Path) -> Result<()> {
    let filename = file_name_of(path);
    let mime_type = mime_type_for(path);
    let bytes = tokio::fs::read(path).await?;

    // 1. Stage
    let input = StagedUploadInput::image(&filename, mime_type, bytes.len() as u64);
    let target = api.staged_upload(&input).await?;
    let resource_url = target.resource_url.clone();

    // 2. Transfer
    api.transfer(
        &target,
        FileUpload {
            filename: filename.clone(),
            mime_type: mime_type.to_string(),
            bytes,
        },
    )
    .await?;

    // 3. Register + Attach
    api.register_file(&resource_url, &filename).await?;
    api.attach_media(product_id, &resource_url).await?;

    Ok(())
}

/// 照合済み商品の画像を順にアップロードし、ファイルごとの結果を記録
pub async fn upload_product_images<A: ShopApi>(
    api: &A,
    pair: &MatchedPair,
    pb: &ProgressBar,
) -> ProductUploadLog {
    let entry = &pair.entry;
    let folder = &pair.folder;
    let mut log = ProductUploadLog::new(&entry.title, &folder.name);

    pb.suspend(|| println!("\n処理中: {} ({}枚)", entry.title, folder.images.len()));

    for path in &folder.images {
        let filename = file_name_of(path);
        match upload_image(api, &entry.id, path).await {
            Ok(()) => {
                pb.suspend(|| println!("   ✅ Uploaded: {}", filename));
                log.record(UploadOutcome::success(filename));
            }
            Err(e) => {
                pb.suspend(|| println!("   ❌ Failed: {} - {}", filename, e));
                tracing::debug!(product = %entry.id, file = %filename, error = ?e, "upload failed");
                log.record(UploadOutcome::failed(filename, e.to_string()));
            }
        }
    }

    log
}
