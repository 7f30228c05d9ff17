//! Shop Image Sync Common Library
//!
//! CLIとテストで共有される型と照合ロジック（I/Oなし）

pub mod tokenizer;
pub mod types;
pub mod matcher;

pub use tokenizer::{tokenize, token_set};
pub use types::{CatalogEntry, Folder, ProductUploadLog, UploadOutcome, UploadStatus};
pub use matcher::{
    classify, match_entries, CollisionEntry, MatchReport, MatchResult, MatchedPair,
    UnmatchedEntry, REASON_NO_TOKENS,
};
