//! 存储错误类型
//!
//! 唯一的错误种类：持久化操作失败（读或写）。调用方负责记录日志并替换为安全默认值。

use thiserror::Error;

pub type Result<T> = std::result::Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// 文件内容或键值无法解析
    #[error("failed to decode stored value: {0}")]
    Decode(#[from] toml::de::Error),

    #[error("failed to encode value: {0}")]
    Encode(#[from] toml::ser::Error),
}
