//! 应用配置模块
//!
//! 提供应用程序配置的加载、保存和管理功能
//!
//! # 配置存储位置
//!
//! 配置文件 `settings.json` 与宏存储 `keybinds.json` 放在同一目录，
//! 见 [`paths`](super::paths)。
//!
//! # 使用示例
//!
//! ```no_run
//! use keybinder_lib::state::{AppConfig, ConfigManager};
//!
//! // 加载配置
//! let mut config = ConfigManager::load("settings.json").unwrap();
//!
//! // 修改配置
//! config.typing.per_char_delay_secs = 0.05;
//!
//! // 保存配置
//! ConfigManager::save("settings.json", &config).unwrap();
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hotkey::HookOptions;
use crate::typing::{
    TypingConfig, DEFAULT_BEFORE_ENTER_DELAY_SECS, DEFAULT_INITIAL_DELAY_SECS,
    DEFAULT_PER_CHAR_DELAY_SECS,
};

/// 单实例锁默认端口
pub const DEFAULT_LOCK_PORT: u16 = 49327;

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// IO 错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化/反序列化错误
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// 配置结果类型
pub type ConfigResult<T> = Result<T, ConfigError>;

/// 应用配置
///
/// 包含所有应用程序设置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 输入节奏配置
    pub typing: TypingConfig,
    /// 热键钩子配置
    pub hotkeys: HookOptions,
    /// 单实例配置
    pub instance: InstanceConfig,
}

/// 单实例配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InstanceConfig {
    /// 本地回环地址上用作实例锁的端口
    pub lock_port: u16,
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            lock_port: DEFAULT_LOCK_PORT,
        }
    }
}

impl AppConfig {
    /// 修正无效值
    ///
    /// 非有限的延迟恢复默认值，负延迟按 0 处理，端口 0 恢复默认端口
    pub fn sanitized(mut self) -> Self {
        let typing = &mut self.typing;
        typing.initial_delay_secs =
            clamp_secs(typing.initial_delay_secs, DEFAULT_INITIAL_DELAY_SECS);
        typing.per_char_delay_secs =
            clamp_secs(typing.per_char_delay_secs, DEFAULT_PER_CHAR_DELAY_SECS);
        typing.before_enter_delay_secs =
            clamp_secs(typing.before_enter_delay_secs, DEFAULT_BEFORE_ENTER_DELAY_SECS);

        if self.instance.lock_port == 0 {
            self.instance.lock_port = DEFAULT_LOCK_PORT;
        }
        self
    }
}

fn clamp_secs(value: f64, default: f64) -> f64 {
    if value.is_finite() {
        value.max(0.0)
    } else {
        default
    }
}

/// 配置管理器
///
/// 提供配置的加载、保存和管理功能
pub struct ConfigManager;

impl ConfigManager {
    /// 加载配置
    ///
    /// 如果文件不存在则返回默认配置，加载后修正无效值
    ///
    /// # Errors
    ///
    /// 文件存在但无法读取或解析时返回错误
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<AppConfig> {
        let path = path.as_ref();

        tracing::debug!(path = %path.display(), "Loading config");

        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: AppConfig = serde_json::from_str(&content)?;
            tracing::info!(path = %path.display(), "Config loaded successfully");
            Ok(config.sanitized())
        } else {
            tracing::info!("Config file not found, using defaults");
            Ok(AppConfig::default())
        }
    }

    /// 加载配置，失败时记录警告并使用默认配置
    pub fn load_or_default(path: impl AsRef<Path>) -> AppConfig {
        let path = path.as_ref();
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "Failed to load config, using defaults"
            );
            AppConfig::default()
        })
    }

    /// 保存配置
    pub fn save(path: impl AsRef<Path>, config: &AppConfig) -> ConfigResult<()> {
        let path = path.as_ref();

        tracing::debug!(path = %path.display(), "Saving config");

        // 确保目录存在
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(config)?;
        std::fs::write(path, content)?;

        tracing::info!(path = %path.display(), "Config saved successfully");
        Ok(())
    }
}
