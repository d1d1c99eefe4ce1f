//! 核心错误定义

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    /// 调用方传入越界参数（如球号不在 0..=15）
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Duplicate entity id: {0}")]
    DuplicateEntity(String),

    /// 零面积或空包围盒；视口引擎内部产生并在本地恢复
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),
}

pub type CoreResult<T> = Result<T, CoreError>;
