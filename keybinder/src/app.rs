//! 应用核心
//!
//! 把注册表、宏存储和运行时设置组合在一起，提供编辑器层面的操作：
//! 保存、移动、删除宏，暂停与恢复，以及状态栏文本。
//!
//! 所有方法都在主线程调用。

use std::path::PathBuf;
use std::sync::Arc;

use crate::hotkey::{HotkeyError, HotkeyRegistry, ResumeReport};
use crate::state::{
    AppConfig, Bindings, ConfigManager, MacroRecord, MacroStore, StoreError, StoreResult,
};
use crate::typing::{LiveSettings, SettingsSource};
use crate::utils::error::{AppError, AppResult};

/// 待保存的宏
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MacroDraft {
    /// 正在编辑的宏原来的热键（新建时为 `None`）
    pub previous_key: Option<String>,
    /// 热键
    pub key: String,
    /// 显示名称
    pub label: String,
    /// 要输入的文本
    pub text: String,
}

impl MacroDraft {
    /// 新建宏
    pub fn new(key: impl Into<String>, label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            previous_key: None,
            key: key.into(),
            label: label.into(),
            text: text.into(),
        }
    }

    /// 编辑已有宏
    pub fn editing(mut self, previous_key: impl Into<String>) -> Self {
        self.previous_key = Some(previous_key.into());
        self
    }
}

/// 保存结果
#[derive(Debug)]
pub struct SaveReport {
    /// 保存后宏所在的热键
    pub key: String,
    /// 显示名称
    pub label: String,
    /// 热键未生效的原因
    pub hotkey_error: Option<HotkeyError>,
    /// 是否因为新热键安装失败而留在了原热键上
    pub kept_previous: bool,
}

impl SaveReport {
    /// 热键是否已生效（暂停期间表示恢复后会生效）
    pub fn is_active(&self) -> bool {
        self.hotkey_error.is_none()
    }
}

/// 暂停状态切换结果
#[derive(Debug)]
pub enum PauseChange {
    /// 已暂停
    Paused,
    /// 已恢复
    Resumed(ResumeReport),
}

/// 启动结果
#[derive(Debug, Default)]
pub struct StartupReport {
    /// 加载的宏数量
    pub loaded: usize,
    /// 热键安装失败的宏
    pub failed: Vec<(String, HotkeyError)>,
    /// 是否从旧位置迁移
    pub migrated: bool,
    /// 加载时的警告
    pub warning: Option<StoreError>,
    /// 迁移后保存失败的原因
    pub persist_error: Option<StoreError>,
}

/// 应用配置文件及其当前内容
struct SettingsFile {
    path: PathBuf,
    config: AppConfig,
}

/// 应用核心
pub struct KeybinderApp {
    registry: HotkeyRegistry,
    store: MacroStore,
    settings: Arc<LiveSettings>,
    settings_file: Option<SettingsFile>,
}

impl KeybinderApp {
    /// 创建应用核心
    ///
    /// `settings` 必须是输入引擎读取的同一个实例
    pub fn new(registry: HotkeyRegistry, store: MacroStore, settings: Arc<LiveSettings>) -> Self {
        Self {
            registry,
            store,
            settings,
            settings_file: None,
        }
    }

    /// 设置应用配置文件
    ///
    /// 修改输入速度时会把 `config` 更新后写回 `path`
    pub fn with_settings_file(mut self, path: impl Into<PathBuf>, config: AppConfig) -> Self {
        self.settings_file = Some(SettingsFile {
            path: path.into(),
            config,
        });
        self
    }

    /// 启动：加载宏并安装所有热键
    ///
    /// 从旧位置迁移时立即保存到新位置
    pub fn startup(&mut self) -> StartupReport {
        let loaded = self.store.load();

        self.settings.set_auto_enter(loaded.auto_enter);

        let mut report = StartupReport {
            loaded: loaded.bindings.len(),
            migrated: loaded.migrated,
            warning: loaded.warning,
            ..StartupReport::default()
        };

        report.failed = self.registry.bind_all(loaded.bindings);

        if report.migrated {
            match self.persist() {
                Ok(()) => tracing::info!(
                    path = %self.store.path().display(),
                    "Migrated macros to new location"
                ),
                Err(e) => {
                    tracing::error!(error = %e, "Failed to save migrated macros");
                    report.persist_error = Some(e);
                }
            }
        }

        tracing::info!(
            loaded = report.loaded,
            failed = report.failed.len(),
            migrated = report.migrated,
            "Startup complete"
        );
        report
    }

    /// 当前绑定集
    pub fn macros(&self) -> &Bindings {
        self.registry.bindings()
    }

    /// 查找宏
    pub fn get(&self, key: &str) -> Option<&MacroRecord> {
        self.registry.get(key)
    }

    /// 热键注册表
    pub fn registry(&self) -> &HotkeyRegistry {
        &self.registry
    }

    /// 运行时设置
    pub fn settings(&self) -> &Arc<LiveSettings> {
        &self.settings
    }

    /// 宏存储
    pub fn store(&self) -> &MacroStore {
        &self.store
    }

    /// 是否处于暂停状态
    pub fn is_paused(&self) -> bool {
        self.registry.is_paused()
    }

    /// 保存宏
    ///
    /// 编辑已有宏且热键改变时移动绑定；新热键安装失败时宏留在原热键上。
    /// 热键安装失败不是错误，结果记录在 [`SaveReport`] 中。
    ///
    /// # Errors
    ///
    /// - `AppError::MissingField` - 名称、热键或文本为空
    /// - `AppError::Store` - 写入宏文件失败（内存中的修改已生效）
    pub fn save_macro(&mut self, draft: MacroDraft) -> AppResult<SaveReport> {
        let label = draft.label.trim();
        let key = draft.key.trim();
        let text = draft.text.trim();

        if label.is_empty() {
            return Err(AppError::MissingField("label"));
        }
        if key.is_empty() {
            return Err(AppError::MissingField("hotkey"));
        }
        if text.is_empty() {
            return Err(AppError::MissingField("text"));
        }

        let record = MacroRecord::new(label, text);
        let previous = draft
            .previous_key
            .as_deref()
            .map(str::trim)
            .filter(|old| !old.is_empty() && *old != key && self.registry.contains(old));

        let mut report = SaveReport {
            key: key.to_string(),
            label: label.to_string(),
            hotkey_error: None,
            kept_previous: false,
        };

        let result = match previous {
            Some(old) => {
                let result = self.registry.rebind(old, key, record);
                if result.is_err() {
                    report.key = old.to_string();
                    report.kept_previous = true;
                }
                result
            }
            None => self.registry.bind(key, record),
        };
        report.hotkey_error = result.err();

        self.persist()?;
        Ok(report)
    }

    /// 把宏移动到新热键
    ///
    /// # Errors
    ///
    /// - `AppError::MacroNotFound` - 原热键没有宏
    /// - `AppError::Hotkey` - 新热键安装失败，宏留在原热键上
    /// - `AppError::Store` - 写入宏文件失败
    pub fn move_macro(&mut self, old_key: &str, new_key: &str) -> AppResult<()> {
        let old_key = old_key.trim();
        let new_key = new_key.trim();

        if new_key.is_empty() {
            return Err(AppError::MissingField("hotkey"));
        }

        let record = self
            .registry
            .get(old_key)
            .cloned()
            .ok_or_else(|| AppError::MacroNotFound(old_key.to_string()))?;

        self.registry.rebind(old_key, new_key, record)?;
        self.persist()?;
        Ok(())
    }

    /// 删除宏
    ///
    /// # Errors
    ///
    /// - `AppError::MissingField` - 热键为空
    /// - `AppError::MacroNotFound` - 热键没有宏
    /// - `AppError::Store` - 写入宏文件失败
    pub fn delete_macro(&mut self, key: &str) -> AppResult<MacroRecord> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::MissingField("hotkey"));
        }

        let removed = self
            .registry
            .unbind(key)
            .ok_or_else(|| AppError::MacroNotFound(key.to_string()))?;

        self.persist()?;
        Ok(removed)
    }

    /// 暂停所有热键
    pub fn pause(&mut self) {
        self.registry.pause_all();
    }

    /// 恢复所有热键
    pub fn resume(&mut self) -> ResumeReport {
        self.registry.resume_all()
    }

    /// 切换暂停状态
    pub fn toggle_pause(&mut self) -> PauseChange {
        if self.is_paused() {
            PauseChange::Resumed(self.resume())
        } else {
            self.pause();
            PauseChange::Paused
        }
    }

    /// 设置逐字符延迟（秒）并保存到配置文件
    ///
    /// 下一个字符即生效；没有配置文件时只修改运行时设置。
    ///
    /// # Errors
    ///
    /// - `AppError::Config` - 写入配置文件失败（运行时设置已生效）
    pub fn set_per_char_delay(&mut self, secs: f64) -> AppResult<()> {
        self.settings.set_per_char_delay(secs);
        tracing::info!(secs, "Typing speed updated");

        if let Some(file) = &mut self.settings_file {
            file.config.typing.per_char_delay_secs = secs;
            ConfigManager::save(&file.path, &file.config)?;
        }
        Ok(())
    }

    /// 设置自动回车并保存
    pub fn set_auto_enter(&self, auto_enter: bool) -> AppResult<()> {
        self.settings.set_auto_enter(auto_enter);
        tracing::info!(auto_enter, "Auto-enter updated");
        self.persist()?;
        Ok(())
    }

    /// 状态栏文本
    pub fn status_line(&self) -> String {
        status_line(self.is_paused(), self.registry.len())
    }

    /// 把当前绑定集写入宏存储
    pub fn persist(&self) -> StoreResult<()> {
        self.store.save(self.registry.bindings(), self.settings.auto_enter())
    }
}

/// 生成状态栏文本
pub fn status_line(paused: bool, count: usize) -> String {
    let noun = if count == 1 { "macro" } else { "macros" };
    if paused {
        format!("⏸ Paused • {} {} loaded", count, noun)
    } else {
        format!("▶ Playing • {} {} loaded", count, noun)
    }
}
