//! 热键注册表
//!
//! 维护逻辑绑定集（原始热键 → 宏记录）和对应的系统钩子
//!
//! # 不变量
//!
//! - 每个规范化热键最多对应一条逻辑绑定，绑定集保留用户输入的写法用于显示
//! - 钩子以规范化后的热键为键，查找和删除接受任意等价写法
//! - `bind` 无论钩子是否安装成功都会记录逻辑绑定
//! - `rebind` 只有在新钩子安装成功后才移除旧绑定
//! - 暂停期间不存在任何钩子，逻辑绑定保持不变
//!
//! 所有修改都在主线程进行，钩子回调只持有不可变的宏文本。

use std::sync::Arc;

use super::backend::{HookBackend, HookCallback};
use super::config::HookOptions;
use super::error::{HotkeyError, HotkeyResult};
use super::normalize::normalize_hotkey;
use crate::state::{Bindings, ControlState, MacroRecord};
use crate::typing::TypingEngine;

/// 恢复钩子的结果
#[derive(Debug, Default)]
pub struct ResumeReport {
    /// 成功安装的钩子数量
    pub installed: usize,
    /// 安装失败的热键及原因
    pub failed: Vec<(String, HotkeyError)>,
}

impl ResumeReport {
    /// 是否全部安装成功
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// 热键注册表
pub struct HotkeyRegistry {
    backend: Box<dyn HookBackend>,
    bindings: Bindings,
    engine: Arc<TypingEngine>,
    options: HookOptions,
}

impl HotkeyRegistry {
    /// 创建新的热键注册表
    ///
    /// # Arguments
    ///
    /// * `backend` - 系统钩子后端
    /// * `engine` - 钩子触发时调用的输入引擎
    /// * `options` - 安装钩子时使用的选项
    pub fn new(
        backend: Box<dyn HookBackend>,
        engine: Arc<TypingEngine>,
        options: HookOptions,
    ) -> Self {
        Self {
            backend,
            bindings: Bindings::new(),
            engine,
            options,
        }
    }

    /// 当前逻辑绑定集
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// 查找绑定，接受任意等价写法
    pub fn get(&self, raw: &str) -> Option<&MacroRecord> {
        self.bound_key(raw).and_then(|key| self.bindings.get(&key))
    }

    /// 是否存在该热键（或等价写法）的绑定
    pub fn contains(&self, raw: &str) -> bool {
        self.bound_key(raw).is_some()
    }

    /// 绑定集中与 `raw` 等价的热键写法
    pub fn bound_key(&self, raw: &str) -> Option<String> {
        if self.bindings.contains_key(raw) {
            return Some(raw.to_string());
        }
        let key = normalize_hotkey(raw);
        self.bindings
            .keys()
            .find(|bound| normalize_hotkey(bound) == key)
            .cloned()
    }

    /// 绑定数量
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// 是否没有任何绑定
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// 是否处于暂停状态
    pub fn is_paused(&self) -> bool {
        self.control().is_paused()
    }

    /// 共享控制状态
    pub fn control(&self) -> &Arc<ControlState> {
        self.engine.control()
    }

    /// 输入引擎
    pub fn engine(&self) -> &Arc<TypingEngine> {
        &self.engine
    }

    /// 绑定热键到宏
    ///
    /// 先尽力移除该热键已有的钩子，再安装新钩子。暂停期间只校验热键格式，
    /// 恢复时才安装。
    ///
    /// 逻辑绑定总会被记录，即使钩子安装失败；失败原因返回给调用方。
    /// 同一热键的其他写法被替换。
    pub fn bind(&mut self, raw: &str, record: MacroRecord) -> HotkeyResult<()> {
        let result = self.install_hook(raw, &record.text);
        self.replace_binding(raw, record);

        match &result {
            Ok(()) => {
                tracing::info!(hotkey = %raw, paused = self.is_paused(), "Macro hotkey bound")
            }
            Err(e) => {
                tracing::warn!(hotkey = %raw, error = %e, "Macro recorded but hotkey not active")
            }
        }
        result
    }

    /// 把宏从旧热键移到新热键
    ///
    /// 新钩子安装失败时旧绑定保持生效，不创建新绑定，返回错误。
    pub fn rebind(
        &mut self,
        old_raw: &str,
        new_raw: &str,
        record: MacroRecord,
    ) -> HotkeyResult<()> {
        if old_raw == new_raw {
            return self.bind(new_raw, record);
        }

        if let Err(e) = self.install_hook(new_raw, &record.text) {
            tracing::warn!(
                old = %old_raw,
                new = %new_raw,
                error = %e,
                "Failed to move macro, keeping old hotkey"
            );
            return Err(e);
        }

        let old_key = normalize_hotkey(old_raw);
        if old_key != normalize_hotkey(new_raw) {
            self.remove_hook(&old_key);
        }

        if let Some(old) = self.bound_key(old_raw) {
            self.bindings.remove(&old);
        }
        self.replace_binding(new_raw, record);

        tracing::info!(old = %old_raw, new = %new_raw, "Macro hotkey moved");
        Ok(())
    }

    /// 删除绑定
    ///
    /// 返回被删除的宏记录
    pub fn unbind(&mut self, raw: &str) -> Option<MacroRecord> {
        self.remove_hook(&normalize_hotkey(raw));
        let removed = self
            .bound_key(raw)
            .and_then(|key| self.bindings.remove(&key));

        if removed.is_some() {
            tracing::info!(hotkey = %raw, "Macro hotkey unbound");
        }
        removed
    }

    /// 批量绑定，返回安装失败的热键
    pub fn bind_all(&mut self, bindings: Bindings) -> Vec<(String, HotkeyError)> {
        let mut failed = Vec::new();
        for (raw, record) in bindings {
            if let Err(e) = self.bind(&raw, record) {
                failed.push((raw, e));
            }
        }
        failed
    }

    /// 暂停：移除所有钩子，保留逻辑绑定
    ///
    /// 可重复调用，返回调用前是否已暂停
    pub fn pause_all(&mut self) -> bool {
        let was_paused = self.control().set_paused(true);
        self.backend.remove_all();

        tracing::info!(bindings = self.bindings.len(), "Macros paused");
        was_paused
    }

    /// 恢复：为每个绑定重新安装钩子
    ///
    /// 单个热键失败不影响其他热键，失败项记录在报告中
    pub fn resume_all(&mut self) -> ResumeReport {
        self.control().set_paused(false);

        let mut report = ResumeReport::default();
        let entries: Vec<(String, Arc<str>)> = self
            .bindings
            .iter()
            .map(|(raw, record)| (raw.clone(), Arc::from(record.text.as_str())))
            .collect();

        for (raw, text) in entries {
            match self.install_text_hook(&raw, text) {
                Ok(()) => report.installed += 1,
                Err(e) => {
                    tracing::warn!(hotkey = %raw, error = %e, "Failed to restore hotkey");
                    report.failed.push((raw, e));
                }
            }
        }

        tracing::info!(
            installed = report.installed,
            failed = report.failed.len(),
            "Macros resumed"
        );
        report
    }

    /// 移除所有钩子和绑定
    pub fn clear(&mut self) {
        self.backend.remove_all();
        self.bindings.clear();
    }

    /// 记录绑定，先移除同一热键的其他写法
    fn replace_binding(&mut self, raw: &str, record: MacroRecord) {
        if let Some(existing) = self.bound_key(raw).filter(|existing| existing != raw) {
            tracing::debug!(old = %existing, new = %raw, "Replacing equivalent hotkey spelling");
            self.bindings.remove(&existing);
        }
        self.bindings.insert(raw.to_string(), record);
    }

    fn install_hook(&mut self, raw: &str, text: &str) -> HotkeyResult<()> {
        self.install_text_hook(raw, Arc::from(text))
    }

    fn install_text_hook(&mut self, raw: &str, text: Arc<str>) -> HotkeyResult<()> {
        let key = normalize_hotkey(raw);
        self.backend.validate(&key)?;
        self.remove_hook(&key);

        if self.is_paused() {
            return Ok(());
        }

        let engine = Arc::clone(&self.engine);
        let hotkey = key.clone();
        let callback: HookCallback = Arc::new(move || {
            let outcome = engine.send(&text);
            tracing::debug!(hotkey = %hotkey, outcome = ?outcome, "Macro hotkey triggered");
        });

        self.backend.install(&key, callback, self.options)
    }

    /// 尽力移除钩子，不存在时忽略
    fn remove_hook(&mut self, key: &str) {
        match self.backend.remove(key) {
            Ok(()) => {}
            Err(e) if e.is_not_registered() => {}
            Err(e) => tracing::warn!(hotkey = %key, error = %e, "Failed to remove hotkey hook"),
        }
    }
}

impl Drop for HotkeyRegistry {
    fn drop(&mut self) {
        self.backend.remove_all();
    }
}
