//! 診断ログの初期化
//!
//! 進捗表示は標準出力の println!、詳細は tracing で標準エラーへ出す。
//! `RUST_LOG` で上書きできる。

use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "shop_image_sync=warn,shop_image_common=warn";

pub fn init_logging() -> anyhow::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("ログ初期化に失敗: {}", e))
}
