//! GraphQLレスポンスのスキーマ
//!
//! 各呼び出しごとに型を定義し、想定外の形のレスポンスは
//! デコード時点でエラーにする。

use crate::error::{Result, SyncError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shop_image_common::CatalogEntry;

/// GraphQLの共通エンベロープ
#[derive(Debug, Deserialize)]
pub struct GraphqlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Option<serde_json::Value>,
}

impl<T: DeserializeOwned> GraphqlResponse<T> {
    pub fn from_body(body: &str) -> Result<T> {
        let response: GraphqlResponse<T> = serde_json::from_str(body)?;
        response.into_data()
    }
}

impl<T> GraphqlResponse<T> {
    /// トップレベルの errors があればエラー、data がなければエラー
    pub fn into_data(self) -> Result<T> {
        match self.errors {
            Some(serde_json::Value::Null) | None => {}
            Some(serde_json::Value::Array(ref list)) if list.is_empty() => {}
            Some(errors) => return Err(SyncError::GraphQl(errors.to_string())),
        }
        self.data.ok_or(SyncError::MissingData)
    }
}

/// ミューテーションのユーザーエラー
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserError {
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.field {
            Some(field) if !field.is_empty() => write!(f, "{}: {}", field.join("."), self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}

/// ユーザーエラーが1件でもあれば操作名付きのエラーにする
pub fn check_user_errors(operation: &'static str, errors: &[UserError]) -> Result<()> {
    if errors.is_empty() {
        return Ok(());
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    Err(SyncError::UserErrors {
        operation,
        errors: joined,
    })
}

// ---- products ----

#[derive(Debug, Deserialize)]
pub struct ProductsData {
    pub products: ProductConnection,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductConnection {
    pub edges: Vec<ProductEdge>,
    pub page_info: PageInfo,
}

#[derive(Debug, Deserialize)]
pub struct ProductEdge {
    pub node: CatalogEntry,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    #[serde(default)]
    pub end_cursor: Option<String>,
}

/// カタログ1ページ分
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPage {
    pub entries: Vec<CatalogEntry>,
    pub page_info: PageInfo,
}

impl From<ProductsData> for ProductPage {
    fn from(data: ProductsData) -> Self {
        Self {
            entries: data.products.edges.into_iter().map(|e| e.node).collect(),
            page_info: data.products.page_info,
        }
    }
}

// ---- stagedUploadsCreate ----

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedUploadInput {
    pub filename: String,
    pub mime_type: String,
    pub resource: String,
    /// バイト数（APIは10進文字列を要求する）
    pub file_size: String,
    pub http_method: String,
}

impl StagedUploadInput {
    pub fn image(filename: &str, mime_type: &str, size: u64) -> Self {
        Self {
            filename: filename.to_string(),
            mime_type: mime_type.to_string(),
            resource: "IMAGE".into(),
            file_size: size.to_string(),
            http_method: "POST".into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedUploadsData {
    pub staged_uploads_create: StagedUploadsPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedUploadsPayload {
    #[serde(default)]
    pub staged_targets: Vec<StagedTarget>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StagedTarget {
    pub url: String,
    pub resource_url: String,
    #[serde(default)]
    pub parameters: Vec<StagedParameter>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StagedParameter {
    pub name: String,
    pub value: String,
}

// ---- fileCreate ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCreateData {
    pub file_create: FileCreatePayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileCreatePayload {
    #[serde(default)]
    pub files: Option<Vec<CreatedFile>>,
    #[serde(default)]
    pub user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedFile {
    pub id: String,
    #[serde(default)]
    pub file_status: Option<String>,
}

// ---- productCreateMedia ----

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateMediaData {
    pub product_create_media: ProductCreateMediaPayload,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreateMediaPayload {
    #[serde(default)]
    pub media: Option<Vec<CreatedMedia>>,
    #[serde(default)]
    pub media_user_errors: Vec<UserError>,
}

#[derive(Debug, Deserialize)]
pub struct CreatedMedia {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
}
