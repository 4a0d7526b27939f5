//! 热键注册模块
//!
//! 基于 global-hotkey 的系统级热键后端
//!
//! 事件处理器在后端创建时安装一次，之后通过 [`ArcSwap`] 快照查找回调：
//! 主线程负责写入，系统监听线程只读，互不阻塞。

use std::collections::HashMap;
use std::sync::Arc;

use arc_swap::ArcSwap;
use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

use super::backend::{HookBackend, HookCallback};
use super::config::HookOptions;
use super::error::{HotkeyError, HotkeyResult};
use super::keymap::parse_hotkey;

/// 分发表条目
#[derive(Clone)]
pub(crate) struct DispatchEntry {
    pub(crate) callback: HookCallback,
    pub(crate) trigger_on_release: bool,
}

/// 热键 ID 到回调的分发表
pub(crate) type DispatchTable = HashMap<u32, DispatchEntry>;

/// 全局热键后端
///
/// 负责向操作系统注册热键，并把热键事件分发到对应回调
///
/// # 平台说明
///
/// - Windows: 创建线程上必须运行 Win32 消息循环
/// - macOS: 必须在主线程创建，并运行事件循环
/// - Linux (X11): 内部线程处理事件
pub struct GlobalHotkeyBackend {
    manager: GlobalHotKeyManager,
    installed: HashMap<String, HotKey>,
    dispatch: Arc<ArcSwap<DispatchTable>>,
}

impl GlobalHotkeyBackend {
    /// 创建新的全局热键后端
    ///
    /// # Errors
    ///
    /// - `HotkeyError::BackendUnavailable` - 系统热键管理器初始化失败
    pub fn new() -> HotkeyResult<Self> {
        let manager = GlobalHotKeyManager::new()
            .map_err(|e| HotkeyError::BackendUnavailable(e.to_string()))?;

        let dispatch: Arc<ArcSwap<DispatchTable>> = Arc::new(ArcSwap::from_pointee(HashMap::new()));
        let table = Arc::clone(&dispatch);

        GlobalHotKeyEvent::set_event_handler(Some(move |event: GlobalHotKeyEvent| {
            dispatch_event(&table.load(), event.id, event.state);
        }));

        tracing::debug!("Global hotkey backend initialized");

        Ok(Self {
            manager,
            installed: HashMap::new(),
            dispatch,
        })
    }

    fn update_dispatch(&self, update: impl FnOnce(&mut DispatchTable)) {
        let mut table = (*self.dispatch.load_full()).clone();
        update(&mut table);
        self.dispatch.store(Arc::new(table));
    }
}

impl HookBackend for GlobalHotkeyBackend {
    fn install(
        &mut self,
        key: &str,
        callback: HookCallback,
        options: HookOptions,
    ) -> HotkeyResult<()> {
        let hotkey = parse_hotkey(key)?;

        if !options.suppress {
            // 系统注册的热键总是会吞掉原始按键
            tracing::debug!(
                hotkey = %key,
                "Pass-through not supported by OS hotkeys, key will be suppressed"
            );
        }

        self.manager
            .register(hotkey)
            .map_err(|e| HotkeyError::RegistrationFailed {
                hotkey: key.to_string(),
                reason: e.to_string(),
            })?;

        self.installed.insert(key.to_string(), hotkey);
        self.update_dispatch(|table| {
            table.insert(
                hotkey.id(),
                DispatchEntry {
                    callback,
                    trigger_on_release: options.trigger_on_release,
                },
            );
        });

        tracing::debug!(hotkey = %key, id = hotkey.id(), "Hotkey hook installed");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> HotkeyResult<()> {
        let manager = &self.manager;
        let hotkey = unregister_tracked(&mut self.installed, key, |hotkey| {
            manager.unregister(hotkey)
        })?;

        self.update_dispatch(|table| {
            table.remove(&hotkey.id());
        });

        tracing::debug!(hotkey = %key, "Hotkey hook removed");
        Ok(())
    }

    fn remove_all(&mut self) {
        self.dispatch.store(Arc::new(HashMap::new()));

        let manager = &self.manager;
        self.installed.retain(|key, hotkey| match manager.unregister(*hotkey) {
            Ok(()) => false,
            Err(e) => {
                tracing::warn!(hotkey = %key, error = %e, "Failed to unregister hotkey");
                true
            }
        });

        tracing::debug!(remaining = self.installed.len(), "All hotkey hooks removed");
    }

    fn validate(&self, key: &str) -> HotkeyResult<()> {
        parse_hotkey(key).map(|_| ())
    }
}

impl Drop for GlobalHotkeyBackend {
    fn drop(&mut self) {
        GlobalHotKeyEvent::set_event_handler(None::<fn(GlobalHotKeyEvent)>);
        self.remove_all();
    }
}

/// 注销一个已记录的热键
///
/// 只有注销成功才丢弃记录；失败时记录保留，之后的 `remove_all` 会重试
pub(crate) fn unregister_tracked<E: std::fmt::Display>(
    installed: &mut HashMap<String, HotKey>,
    key: &str,
    unregister: impl FnOnce(HotKey) -> Result<(), E>,
) -> HotkeyResult<HotKey> {
    let hotkey = *installed
        .get(key)
        .ok_or_else(|| HotkeyError::NotRegistered(key.to_string()))?;

    unregister(hotkey).map_err(|e| HotkeyError::UnregistrationFailed {
        hotkey: key.to_string(),
        reason: e.to_string(),
    })?;

    installed.remove(key);
    Ok(hotkey)
}

/// 分发一个热键事件
///
/// 返回是否调用了回调
pub(crate) fn dispatch_event(table: &DispatchTable, id: u32, state: HotKeyState) -> bool {
    let Some(entry) = table.get(&id) else {
        return false;
    };

    let fire = match state {
        HotKeyState::Released => entry.trigger_on_release,
        HotKeyState::Pressed => !entry.trigger_on_release,
    };

    if fire {
        (entry.callback)();
    }
    fire
}
