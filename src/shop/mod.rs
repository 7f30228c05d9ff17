//! ショップ Admin API との通信
//!
//! `ShopApi` はカタログ取得・アップロード・オーケストレーターが使う境界。
//! 本番では `ShopClient`（reqwest）、テストではメモリ上の実装を差し込む。

pub mod auth;
pub mod queries;
pub mod types;

pub use auth::{fetch_offline_token, ShopSession};
pub use types::{PageInfo, ProductPage, StagedParameter, StagedTarget, StagedUploadInput};

use crate::config::Config;
use crate::error::{Result, SyncError};
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::time::Duration;
use types::{
    check_user_errors, FileCreateData, GraphqlResponse, ProductCreateMediaData, ProductsData,
    StagedUploadsData,
};

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// 転送するファイル本体
#[derive(Debug, Clone)]
pub struct FileUpload {
    pub filename: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// リモート呼び出しの境界
///
/// 各メソッドは1回のリモート呼び出しに対応し、ユーザーエラーは `Err` で返す。
#[allow(async_fn_in_trait)]
pub trait ShopApi {
    /// カタログを1ページ取得
    async fn products_page(
        &self,
        query: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ProductPage>;

    /// 一時アップロード先を要求
    async fn staged_upload(&self, input: &StagedUploadInput) -> Result<StagedTarget>;

    /// ステージングURLへマルチパート送信
    async fn transfer(&self, target: &StagedTarget, upload: FileUpload) -> Result<()>;

    /// アップロード済みリソースをファイルとして登録
    async fn register_file(&self, resource_url: &str, filename: &str) -> Result<()>;

    /// 商品に画像メディアとして紐付け
    async fn attach_media(&self, product_id: &str, resource_url: &str) -> Result<()>;
}

/// ステージングURLへ送るマルチパートフォーム
///
/// 受け取ったパラメータを順に並べ、ファイル本体は最後のフィールド `file` に置く。
pub fn transfer_form(target: &StagedTarget, upload: FileUpload) -> Result<Form> {
    let form = target
        .parameters
        .iter()
        .fold(Form::new(), |form, p| form.text(p.name.clone(), p.value.clone()));
    let part = Part::bytes(upload.bytes)
        .file_name(upload.filename)
        .mime_str(&upload.mime_type)?;
    Ok(form.part("file", part))
}

pub fn graphql_endpoint(shop: &str, api_version: &str) -> String {
    format!("https://{}/admin/api/{}/graphql.json", shop, api_version)
}

/// reqwest による `ShopApi` 実装
pub struct ShopClient {
    http: reqwest::Client,
    endpoint: String,
    access_token: String,
    transfer_timeout: Duration,
}

impl ShopClient {
    pub fn new(session: &ShopSession, config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.graphql_timeout())
            .build()?;

        Ok(Self {
            http,
            endpoint: graphql_endpoint(&session.shop, &config.api_version),
            access_token: session.access_token.clone(),
            transfer_timeout: config.transfer_timeout(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn graphql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T> {
        tracing::debug!(endpoint = %self.endpoint, "graphql request");

        let response = self
            .http
            .post(&self.endpoint)
            .header(ACCESS_TOKEN_HEADER, &self.access_token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?
            .error_for_status()?;

        let body = response.text().await?;
        GraphqlResponse::<T>::from_body(&body)
    }
}

impl ShopApi for ShopClient {
    async fn products_page(
        &self,
        query: &str,
        cursor: Option<&str>,
        page_size: u32,
    ) -> Result<ProductPage> {
        tracing::debug!(?cursor, "products page");
        let data: ProductsData = self
            .graphql(
                queries::PRODUCTS_BY_QUERY,
                json!({ "query": query, "cursor": cursor, "first": page_size }),
            )
            .await?;
        Ok(data.into())
    }

    async fn staged_upload(&self, input: &StagedUploadInput) -> Result<StagedTarget> {
        let data: StagedUploadsData = self
            .graphql(queries::STAGED_UPLOADS_CREATE, json!({ "input": [input] }))
            .await?;
        let payload = data.staged_uploads_create;
        check_user_errors("stagedUploadsCreate", &payload.user_errors)?;

        payload
            .staged_targets
            .into_iter()
            .next()
            .ok_or_else(|| SyncError::NoStagedTarget(input.filename.clone()))
    }

    async fn transfer(&self, target: &StagedTarget, upload: FileUpload) -> Result<()> {
        tracing::debug!(url = %target.url, file = %upload.filename, "staged transfer");

        let form = transfer_form(target, upload)?;

        let response = self
            .http
            .post(&target.url)
            .multipart(form)
            .timeout(self.transfer_timeout)
            .send()
            .await
            .map_err(|e| SyncError::Transfer(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SyncError::Transfer(format!("{} {}", status, body)));
        }
        Ok(())
    }

    async fn register_file(&self, resource_url: &str, filename: &str) -> Result<()> {
        let data: FileCreateData = self
            .graphql(
                queries::FILE_CREATE,
                json!({ "files": [{ "originalSource": resource_url, "filename": filename }] }),
            )
            .await?;
        check_user_errors("fileCreate", &data.file_create.user_errors)
    }

    async fn attach_media(&self, product_id: &str, resource_url: &str) -> Result<()> {
        let data: ProductCreateMediaData = self
            .graphql(
                queries::PRODUCT_CREATE_MEDIA,
                json!({
                    "productId": product_id,
                    "media": [{ "originalSource": resource_url, "mediaContentType": "IMAGE" }]
                }),
            )
            .await?;
        check_user_errors("productCreateMedia", &data.product_create_media.media_user_errors)
    }
}
