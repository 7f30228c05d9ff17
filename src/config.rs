use crate::error::{Result, SyncError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Admin GraphQL APIのデフォルトバージョン
pub const DEFAULT_API_VERSION: &str = "2024-10";

/// APIバージョンを上書きする環境変数
pub const API_VERSION_ENV: &str = "SHOP_IMAGE_SYNC_API_VERSION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_version: String,
    pub page_size: u32,
    pub token_timeout_seconds: u64,
    pub graphql_timeout_seconds: u64,
    pub transfer_timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_version: DEFAULT_API_VERSION.into(),
            page_size: 250, // APIの上限
            token_timeout_seconds: 10,
            graphql_timeout_seconds: 30,
            transfer_timeout_seconds: 60,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;

        // 環境変数を優先
        if let Ok(version) = std::env::var(API_VERSION_ENV) {
            if !version.trim().is_empty() {
                config.api_version = version.trim().to_string();
            }
        }

        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            SyncError::Config(format!("{} の解析に失敗: {}", path.display(), e))
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SyncError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("shop-image-sync").join("config.json"))
    }

    pub fn token_timeout(&self) -> Duration {
        Duration::from_secs(self.token_timeout_seconds)
    }

    pub fn graphql_timeout(&self) -> Duration {
        Duration::from_secs(self.graphql_timeout_seconds)
    }

    pub fn transfer_timeout(&self) -> Duration {
        Duration::from_secs(self.transfer_timeout_seconds)
    }
}
