//! 数据库错误定义

use crate::handle::Handle;
use arx_core::geometry::GeometryError;
use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// 数据库操作错误
///
/// 可预期的失败（未找到、被引用、受保护）都以错误值返回，
/// 只有前置条件违例（如阵列行列数非正）才会 panic。
#[derive(Debug, Error)]
pub enum DbError {
    #[error("object {0} not found")]
    NotFound(Handle),

    #[error("object {0} has been erased")]
    Erased(Handle),

    #[error("record named '{0}' already exists")]
    AlreadyExists(String),

    #[error("record '{0}' is protected and cannot be removed")]
    Protected(String),

    #[error("'{0}' is referenced by a live object")]
    InUse(String),

    #[error("invalid state: {0}")]
    InvalidState(String),

    #[error("invalid handle string '{0}'")]
    InvalidHandle(String),

    #[error("geometry failure: {0}")]
    Geometry(#[from] GeometryError),
}
