//! JSONレポート出力
//!
//! 作業ディレクトリに整形済みUTF-8 JSONとして保存する。

use crate::error::Result;
use serde::Serialize;
use shop_image_common::{MatchReport, ProductUploadLog};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub const MATCHED_FILE: &str = "matched.json";
pub const UNMATCHED_FILE: &str = "unmatched.json";
pub const COLLISIONS_FILE: &str = "collisions.json";
pub const UPLOAD_LOG_FILE: &str = "upload_log.json";

pub fn write_json<T: Serialize + ?Sized>(dir: &Path, name: &str, value: &T) -> Result<PathBuf> {
    let path = dir.join(name);
    let file = File::create(&path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value)?;
    writer.flush()?;
    Ok(path)
}

/// matched / unmatched / collisions の3ファイルを保存
pub fn write_match_reports(dir: &Path, report: &MatchReport) -> Result<()> {
    write_json(dir, MATCHED_FILE, &report.matched)?;
    write_json(dir, UNMATCHED_FILE, &report.unmatched)?;
    write_json(dir, COLLISIONS_FILE, &report.collisions)?;
    Ok(())
}

pub fn write_upload_log(dir: &Path, logs: &[ProductUploadLog]) -> Result<PathBuf> {
    write_json(dir, UPLOAD_LOG_FILE, logs)
}
