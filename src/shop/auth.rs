//! オフラインアクセストークンの取得
//!
//! アプリの内部エンドポイントから、Admin API用のトークンとショップドメインを受け取る。

use crate::error::{Result, SyncError};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

const TOKEN_PATH: &str = "/api/internal/offline-token";
const SECRET_HEADER: &str = "X-SECRET";

/// 認証済みセッション（トークン + テナント）
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShopSession {
    pub access_token: String,
    pub shop: String,
}

// トークンはログに出さない
impl std::fmt::Debug for ShopSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopSession")
            .field("access_token", &"<redacted>")
            .field("shop", &self.shop)
            .finish()
    }
}

pub fn token_url(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH)
}

/// ステータスコードとボディからセッションを解釈
pub fn session_from_response(status: StatusCode, body: &str) -> Result<ShopSession> {
    match status {
        StatusCode::OK => Ok(serde_json::from_str(body)?),
        StatusCode::UNAUTHORIZED => Err(SyncError::Unauthorized),
        StatusCode::NOT_FOUND => Err(SyncError::NoOfflineSession),
        other => Err(SyncError::TokenEndpoint {
            status: other.as_u16(),
            body: body.to_string(),
        }),
    }
}

pub async fn fetch_offline_token(
    base_url: &str,
    secret: &str,
    shop: Option<&str>,
    timeout: Duration,
) -> Result<ShopSession> {
    let url = token_url(base_url);
    println!("🔑 トークンを取得中: {}", url);

    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| SyncError::Connection(e.to_string()))?;

    let mut request = client.get(&url).header(SECRET_HEADER, secret);
    if let Some(shop) = shop {
        request = request.query(&[("shop", shop)]);
    }

    let response = request
        .send()
        .await
        .map_err(|e| SyncError::Connection(e.to_string()))?;
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| SyncError::Connection(e.to_string()))?;

    tracing::debug!(%status, "offline-token response");

    let session = session_from_response(status, &body)?;
    println!("✔ トークン取得完了 (shop: {})", session.shop);
    Ok(session)
}
