use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("認証エラー: シークレットが無効です (401 Unauthorized)")]
    Unauthorized,

    #[error("オフラインセッションが見つかりません (404)")]
    NoOfflineSession,

    #[error("トークン取得エラー: {status} {body}")]
    TokenEndpoint { status: u16, body: String },

    #[error("接続エラー: {0}")]
    Connection(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("GraphQLエラー: {0}")]
    GraphQl(String),

    #[error("GraphQLレスポンスにdataがありません")]
    MissingData,

    #[error("{operation} エラー: {errors}")]
    UserErrors { operation: &'static str, errors: String },

    #[error("ステージングターゲットが返されませんでした: {0}")]
    NoStagedTarget(String),

    #[error("転送エラー: {0}")]
    Transfer(String),

    #[error("HTTPエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SyncError>;
