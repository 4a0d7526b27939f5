use std::path::PathBuf;

use thiserror::Error;

/// 宏存储错误
#[derive(Error, Debug)]
pub enum StoreError {
    /// 读取失败
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 写入失败
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// 内容不是有效的 JSON 或结构不符
    #[error("Invalid macro file {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    /// 序列化失败
    #[error("Failed to serialize macros: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl StoreError {
    /// 是否为文件损坏
    pub fn is_corrupted(&self) -> bool {
        matches!(self, Self::Corrupted { .. })
    }
}

/// 宏存储的结果类型
pub type StoreResult<T> = Result<T, StoreError>;
