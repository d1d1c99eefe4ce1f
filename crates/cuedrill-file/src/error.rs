//! 文件操作错误定义

use cuedrill_core::error::CoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Corrupt document: {0}")]
    CorruptDocument(String),

    #[error("Invalid drill: {0}")]
    InvalidDrill(String),

    #[error("Unsupported version: {0}")]
    UnsupportedVersion(String),

    #[error(transparent)]
    Core(#[from] CoreError),
}
