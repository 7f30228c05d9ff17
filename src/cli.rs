use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "shop-image-sync")]
#[command(about = "商品フォルダを照合して画像を一括アップロードする", long_about = None)]
pub struct Cli {
    /// アプリのベースURL（例: https://yourapp.onrender.com）
    #[arg(long, alias = "app_base_url")]
    pub app_base_url: String,

    /// 内部シークレット
    #[arg(long)]
    pub secret: String,

    /// ショップドメイン（省略時はサーバー側の既定）
    #[arg(long)]
    pub shop: Option<String>,

    /// 対象商品のタグ
    #[arg(long)]
    pub tag: String,

    /// 商品フォルダのルートパス
    #[arg(long, alias = "root_folder")]
    pub root_folder: PathBuf,

    /// ドライラン (true/false)
    #[arg(long, alias = "dry_run", default_value = "false", action = clap::ArgAction::Set, value_parser = parse_bool_text)]
    pub dry_run: bool,
}

/// "true"/"false" を大文字小文字を区別せずに解釈
pub fn parse_bool_text(s: &str) -> Result<bool, String> {
    match s.trim().to_lowercase().as_str() {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(format!("Unknown value: {}. Use true or false", s)),
    }
}
