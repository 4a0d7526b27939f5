//! 存储路径解析
//!
//! # 查找顺序
//!
//! 1. 环境变量 `KEYBINDER_CONFIG`
//! 2. 可执行文件旁的 `keybinds.json`（便携模式，目录可写时）
//! 3. `<文档目录>/SAMP_Keybind/keybinds.json`
//! 4. 当前工作目录下的 `keybinds.json`
//!
//! 旧版本把数据放在 `<配置目录>/SAMP_Keybind/keybinds.json`，仅用于迁移。

use std::env;
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};

/// 覆盖存储路径的环境变量
pub const CONFIG_ENV_VAR: &str = "KEYBINDER_CONFIG";

/// 宏存储文件名
pub const STORE_FILE_NAME: &str = "keybinds.json";

/// 应用配置文件名（与宏存储同目录）
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// 数据目录名
pub const APP_DIR_NAME: &str = "SAMP_Keybind";

/// 解析宏存储文件路径
pub fn store_path() -> PathBuf {
    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|p| !p.is_empty()) {
        let path = PathBuf::from(path);
        tracing::debug!(path = %path.display(), "Using store path from environment");
        return path;
    }

    if let Some(portable) = portable_store_path() {
        if can_write(&portable) {
            return portable;
        }
        tracing::debug!(path = %portable.display(), "Portable location not writable");
    }

    documents_store_path().unwrap_or_else(|| PathBuf::from(STORE_FILE_NAME))
}

/// 旧版本的存储文件路径
pub fn legacy_store_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.config_dir().join(APP_DIR_NAME).join(STORE_FILE_NAME))
}

/// 与宏存储同目录的应用配置文件路径
pub fn settings_path_for(store_path: &Path) -> PathBuf {
    match store_path.parent() {
        Some(parent) => parent.join(SETTINGS_FILE_NAME),
        None => PathBuf::from(SETTINGS_FILE_NAME),
    }
}

fn portable_store_path() -> Option<PathBuf> {
    let exe = env::current_exe().ok()?;
    Some(exe.parent()?.join(STORE_FILE_NAME))
}

fn documents_store_path() -> Option<PathBuf> {
    let root = UserDirs::new().and_then(|dirs| {
        dirs.document_dir()
            .filter(|dir| dir.is_dir())
            .map(Path::to_path_buf)
            .or_else(|| Some(dirs.home_dir().to_path_buf()))
    })?;
    Some(root.join(APP_DIR_NAME).join(STORE_FILE_NAME))
}

/// 检查能否在该位置写文件
///
/// 不会留下空文件：文件不存在时创建后立即删除
pub(crate) fn can_write(path: &Path) -> bool {
    if path.exists() {
        return OpenOptions::new().append(true).open(path).is_ok();
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(file) => {
            drop(file);
            let _ = fs::remove_file(path);
            true
        }
        Err(_) => false,
    }
}
