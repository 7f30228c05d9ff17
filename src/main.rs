use anyhow::Context;
use clap::Parser;
use shop_image_sync::{cli, config, logging, pipeline, scanner, shop};
use cli::Cli;
use config::Config;
use pipeline::RunOptions;
use scanner::FolderScanner;
use shop::{fetch_offline_token, ShopClient};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = logging::init_logging() {
        eprintln!("⚠️  {}", e);
    }

    if let Err(e) = run(cli).await {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    println!("🚀 shop-image-sync - 画像一括アップロード\n");
    if cli.dry_run {
        println!("⚠️  ドライランモード: 変更は行いません\n");
    }

    let config = Config::load().context("設定の読み込みに失敗")?;

    // 認証失敗は即終了
    let session = fetch_offline_token(
        &cli.app_base_url,
        &cli.secret,
        cli.shop.as_deref(),
        config.token_timeout(),
    )
    .await?;
    let client = ShopClient::new(&session, &config)?;

    let options = RunOptions {
        tag: cli.tag,
        root: cli.root_folder,
        dry_run: cli.dry_run,
        output_dir: std::env::current_dir()?,
        page_size: config.page_size,
    };

    pipeline::run(&client, &FolderScanner::default(), &options).await?;
    Ok(())
}
