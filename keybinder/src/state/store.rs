//! 宏存储模块
//!
//! 负责宏绑定的持久化，是重启后绑定关系的唯一来源
//!
//! # 文件格式
//!
//! ```json
//! {
//!   "binds": {
//!     "F1": { "label": "Greeting", "text": "hello" },
//!     "F2": "legacy text"
//!   },
//!   "auto_enter": false
//! }
//! ```
//!
//! 旧版本的值只是字符串，加载时升级为 `{label: "Macro <key>", text}`。
//! 读取失败或内容损坏时返回空绑定集并附带警告，从不中断启动。

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde_json::Value;

use super::error::{StoreError, StoreResult};
use super::record::MacroRecord;

/// 热键到宏记录的绑定集
pub type Bindings = BTreeMap<String, MacroRecord>;

/// 加载结果
#[derive(Debug, Default)]
pub struct LoadedBindings {
    /// 绑定集
    pub bindings: Bindings,
    /// 是否自动回车
    pub auto_enter: bool,
    /// 是否从旧位置迁移而来（调用方应保存到新位置）
    pub migrated: bool,
    /// 读取或解析失败时的警告，需要展示给用户
    pub warning: Option<StoreError>,
    /// 因格式无法识别而跳过的热键
    pub skipped: Vec<String>,
}

impl LoadedBindings {
    fn failed(warning: StoreError) -> Self {
        Self {
            warning: Some(warning),
            ..Self::default()
        }
    }
}

#[derive(Serialize)]
struct StoreFile<'a> {
    binds: &'a Bindings,
    auto_enter: bool,
}

/// 宏存储
///
/// # Examples
///
/// ```no_run
/// use keybinder_lib::state::{MacroRecord, MacroStore, Bindings};
///
/// let store = MacroStore::new("keybinds.json");
/// let loaded = store.load();
///
/// let mut bindings = loaded.bindings;
/// bindings.insert("F1".to_string(), MacroRecord::new("Greeting", "hello"));
/// store.save(&bindings, loaded.auto_enter).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct MacroStore {
    path: PathBuf,
    legacy_path: Option<PathBuf>,
}

impl MacroStore {
    /// 创建新的宏存储
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            legacy_path: None,
        }
    }

    /// 设置旧版本的存储位置，主文件不存在时从该位置迁移
    pub fn with_legacy_path(mut self, legacy_path: Option<PathBuf>) -> Self {
        self.legacy_path = legacy_path;
        self
    }

    /// 存储文件路径
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 旧版本存储文件路径
    pub fn legacy_path(&self) -> Option<&Path> {
        self.legacy_path.as_deref()
    }

    /// 加载绑定集
    ///
    /// 从不返回错误：失败时返回空绑定集，原因放在 `warning` 中
    pub fn load(&self) -> LoadedBindings {
        let (path, migrated) = if self.path.exists() {
            (self.path.as_path(), false)
        } else {
            match self.legacy_path.as_deref() {
                Some(legacy) if legacy.exists() => (legacy, true),
                _ => {
                    tracing::info!(
                        path = %self.path.display(),
                        "Macro file not found, starting empty"
                    );
                    return LoadedBindings::default();
                }
            }
        };

        tracing::debug!(path = %path.display(), migrated, "Loading macros");

        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(source) => {
                let err = StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                };
                tracing::error!(error = %err, "Failed to load macros");
                return LoadedBindings::failed(err);
            }
        };

        match parse_store(&raw) {
            Ok(parsed) => {
                for key in &parsed.skipped {
                    tracing::warn!(hotkey = %key, "Skipping macro with unrecognized format");
                }
                tracing::info!(
                    path = %path.display(),
                    count = parsed.bindings.len(),
                    auto_enter = parsed.auto_enter,
                    "Macros loaded"
                );
                LoadedBindings {
                    bindings: parsed.bindings,
                    auto_enter: parsed.auto_enter,
                    migrated,
                    warning: None,
                    skipped: parsed.skipped,
                }
            }
            Err(reason) => {
                let err = StoreError::Corrupted {
                    path: path.to_path_buf(),
                    reason,
                };
                tracing::warn!(error = %err, "Macro file is corrupted, starting empty");
                LoadedBindings::failed(err)
            }
        }
    }

    /// 保存绑定集
    ///
    /// # Errors
    ///
    /// - `StoreError::Write` - 创建目录或写入文件失败
    /// - `StoreError::Serialize` - 序列化失败
    pub fn save(&self, bindings: &Bindings, auto_enter: bool) -> StoreResult<()> {
        tracing::debug!(
            path = %self.path.display(),
            count = bindings.len(),
            auto_enter,
            "Saving macros"
        );

        // 确保目录存在
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|source| StoreError::Write {
                    path: self.path.clone(),
                    source,
                })?;
            }
        }

        let content = serde_json::to_string_pretty(&StoreFile {
            binds: bindings,
            auto_enter,
        })?;

        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;

        tracing::info!(path = %self.path.display(), "Macros saved");
        Ok(())
    }
}

/// 解析后的存储内容
#[derive(Debug, Default, PartialEq)]
struct ParsedStore {
    bindings: Bindings,
    auto_enter: bool,
    skipped: Vec<String>,
}

/// 解析存储文件内容
///
/// 空文件视为全新安装
fn parse_store(raw: &str) -> Result<ParsedStore, String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(ParsedStore::default());
    }

    let value: Value = serde_json::from_str(raw).map_err(|e| e.to_string())?;
    let Value::Object(root) = value else {
        return Err("top-level value is not an object".to_string());
    };

    let auto_enter = root.get("auto_enter").and_then(Value::as_bool).unwrap_or(false);

    let mut parsed = ParsedStore {
        auto_enter,
        ..ParsedStore::default()
    };

    let entries = match root.get("binds") {
        None | Some(Value::Null) => return Ok(parsed),
        Some(Value::Object(entries)) => entries,
        Some(_) => return Err("\"binds\" is not an object".to_string()),
    };

    for (key, entry) in entries {
        let record = match entry {
            Value::String(text) => Some(MacroRecord::from_legacy(key, text.as_str())),
            Value::Object(_) => serde_json::from_value::<MacroRecord>(entry.clone()).ok(),
            _ => None,
        };

        match record {
            Some(record) => {
                parsed.bindings.insert(key.clone(), record);
            }
            None => parsed.skipped.push(key.clone()),
        }
    }

    Ok(parsed)
}
