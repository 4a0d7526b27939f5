//! 热键相关错误类型

use thiserror::Error;

/// 热键相关错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HotkeyError {
    /// 无效的热键格式
    #[error("Invalid hotkey format: {0}")]
    InvalidFormat(String),

    /// 热键注册失败
    #[error("Failed to register hotkey '{hotkey}': {reason}")]
    RegistrationFailed { hotkey: String, reason: String },

    /// 热键注销失败
    #[error("Failed to unregister hotkey '{hotkey}': {reason}")]
    UnregistrationFailed { hotkey: String, reason: String },

    /// 热键未注册
    #[error("Hotkey '{0}' is not registered")]
    NotRegistered(String),

    /// 热键被系统占用或权限不足
    #[error("Hotkey '{0}' is occupied by system or another application")]
    Occupied(String),

    /// 全局热键后端不可用
    #[error("Global hotkey backend is not available: {0}")]
    BackendUnavailable(String),
}

impl HotkeyError {
    /// 是否为"未注册"错误
    ///
    /// 移除钩子时该错误会被忽略，移除操作是幂等的
    pub fn is_not_registered(&self) -> bool {
        matches!(self, Self::NotRegistered(_))
    }
}

/// 热键模块的结果类型
pub type HotkeyResult<T> = Result<T, HotkeyError>;
