//! 全局错误处理模块
//!
//! 提供统一的应用错误类型和用户友好的错误消息
//!
//! # 功能
//!
//! - 统一的 `AppError` 类型，聚合所有模块错误
//! - 错误代码用于日志
//! - 控制台显示的错误消息和恢复建议
//!
//! # 使用示例
//!
//! ```
//! use keybinder_lib::hotkey::HotkeyError;
//! use keybinder_lib::utils::error::{AppError, ErrorCode};
//!
//! let err = AppError::from(HotkeyError::Occupied("F1".to_string()));
//! assert_eq!(err.code(), ErrorCode::HotkeyOccupied);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::commands::CommandError;
use crate::hotkey::HotkeyError;
use crate::input::InputError;
use crate::state::{ConfigError, StoreError};
use crate::utils::single_instance::InstanceError;

/// 应用错误类型
///
/// 聚合所有模块的错误类型，提供统一的错误处理接口
#[derive(Error, Debug)]
pub enum AppError {
    /// 热键错误
    #[error("Hotkey error: {0}")]
    Hotkey(#[from] HotkeyError),

    /// 输入错误
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// 存储错误
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// 配置错误
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// 单实例锁错误
    #[error("Instance error: {0}")]
    Instance(#[from] InstanceError),

    /// 命令错误
    #[error("Command error: {0}")]
    Command(#[from] CommandError),

    /// 必填字段为空
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    /// 宏不存在
    #[error("Macro not found: {0}")]
    MacroNotFound(String),
}

/// 错误代码
///
/// 用于识别和处理特定错误
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // 热键错误 (1xxx)
    /// 热键格式无效
    HotkeyInvalid,
    /// 热键被占用
    HotkeyOccupied,
    /// 热键注册失败
    HotkeyRegistrationFailed,
    /// 系统热键不可用
    HotkeyBackendUnavailable,

    // 输入错误 (2xxx)
    /// 权限被拒绝
    InputPermissionDenied,
    /// 注入失败
    InputInjectionFailed,

    // 存储错误 (3xxx)
    /// 宏文件读取失败
    StoreReadFailed,
    /// 宏文件写入失败
    StoreWriteFailed,
    /// 宏文件损坏
    StoreCorrupted,

    // 配置错误 (4xxx)
    /// 配置读写失败
    ConfigIoFailed,
    /// 配置无效
    ConfigInvalid,

    // 宏错误 (5xxx)
    /// 必填字段为空
    MacroFieldMissing,
    /// 宏不存在
    MacroNotFound,

    // 通用错误 (9xxx)
    /// 已有实例在运行
    AlreadyRunning,
    /// 单实例锁创建失败
    InstanceLockFailed,
    /// 无法识别的命令
    InvalidCommand,
}

impl AppError {
    /// 获取错误代码
    pub fn code(&self) -> ErrorCode {
        match self {
            // 热键错误
            AppError::Hotkey(HotkeyError::InvalidFormat(_)) => ErrorCode::HotkeyInvalid,
            AppError::Hotkey(HotkeyError::Occupied(_)) => ErrorCode::HotkeyOccupied,
            AppError::Hotkey(HotkeyError::BackendUnavailable(_)) => {
                ErrorCode::HotkeyBackendUnavailable
            }
            AppError::Hotkey(_) => ErrorCode::HotkeyRegistrationFailed,

            // 输入错误
            AppError::Input(InputError::PermissionDenied) => ErrorCode::InputPermissionDenied,
            AppError::Input(_) => ErrorCode::InputInjectionFailed,

            // 存储错误
            AppError::Store(StoreError::Read { .. }) => ErrorCode::StoreReadFailed,
            AppError::Store(StoreError::Corrupted { .. }) => ErrorCode::StoreCorrupted,
            AppError::Store(_) => ErrorCode::StoreWriteFailed,

            // 配置错误
            AppError::Config(ConfigError::Json(_)) => ErrorCode::ConfigInvalid,
            AppError::Config(_) => ErrorCode::ConfigIoFailed,

            // 宏错误
            AppError::MissingField(_) => ErrorCode::MacroFieldMissing,
            AppError::MacroNotFound(_) => ErrorCode::MacroNotFound,

            // 通用错误
            AppError::Instance(InstanceError::AlreadyRunning(_)) => ErrorCode::AlreadyRunning,
            AppError::Instance(_) => ErrorCode::InstanceLockFailed,
            AppError::Command(_) => ErrorCode::InvalidCommand,
        }
    }

    /// 获取用户友好的错误消息
    ///
    /// 返回适合直接显示在控制台上的消息
    pub fn user_message(&self) -> String {
        match self {
            // 热键错误
            AppError::Hotkey(HotkeyError::InvalidFormat(key)) => {
                format!("'{}' is not a valid hotkey", key)
            }
            AppError::Hotkey(HotkeyError::Occupied(key)) => {
                format!("Hotkey {} is already taken by the system or another program", key)
            }
            AppError::Hotkey(HotkeyError::BackendUnavailable(_)) => {
                "Global hotkeys are not available on this system".to_string()
            }
            AppError::Hotkey(_) => "Failed to register the hotkey".to_string(),

            // 输入错误
            AppError::Input(InputError::PermissionDenied) => {
                "Accessibility permission is required to type text".to_string()
            }
            AppError::Input(_) => "Failed to type the text".to_string(),

            // 存储错误
            AppError::Store(StoreError::Read { .. }) => "Could not read the macro file".to_string(),
            AppError::Store(StoreError::Corrupted { .. }) => {
                "The macro file is corrupted, starting with an empty list".to_string()
            }
            AppError::Store(_) => "Could not save the macro file".to_string(),

            // 配置错误
            AppError::Config(ConfigError::Json(_)) => "The settings file is not valid".to_string(),
            AppError::Config(_) => "Could not read or write the settings file".to_string(),

            // 宏错误
            AppError::MissingField(field) => format!("The {} cannot be empty", field),
            AppError::MacroNotFound(key) => format!("No macro is bound to {}", key),

            // 通用错误
            AppError::Instance(InstanceError::AlreadyRunning(_)) => {
                "Keybinder is already running".to_string()
            }
            AppError::Instance(_) => "Could not create the single instance lock".to_string(),
            AppError::Command(e) => format!("Invalid command: {}", e),
        }
    }

    /// 获取恢复建议
    pub fn recovery_hint(&self) -> Option<String> {
        let hint = match self {
            AppError::Hotkey(HotkeyError::InvalidFormat(_)) => {
                "Use formats like F1, F2, ., ctrl+a, shift+F1 or numpad 1 (see 'keys')"
            }
            AppError::Hotkey(HotkeyError::Occupied(_))
            | AppError::Hotkey(HotkeyError::RegistrationFailed { .. }) => {
                "Pick another hotkey or run as administrator"
            }
            AppError::Input(InputError::PermissionDenied) => {
                "Enable accessibility access for Keybinder in the system settings"
            }
            AppError::Store(StoreError::Write { .. }) => {
                "Check that the folder of the macro file is writable"
            }
            AppError::Instance(InstanceError::AlreadyRunning(_)) => {
                "Close the window that is already open first"
            }
            AppError::Command(_) => "Type 'help' to see the available commands",
            _ => return None,
        };
        Some(hint.to_string())
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;
