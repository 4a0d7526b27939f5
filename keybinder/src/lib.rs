//! Keybinder - 全局热键文本宏
//!
//! 按下热键后，把预先保存的文本以模拟按键的方式输入到焦点应用。
//!
//! # 模块结构
//!
//! - `app` - 编辑器层面的操作（保存、删除、暂停）
//! - `commands` - 控制台命令
//! - `hotkey` - 热键规范化、解析和注册表
//! - `input` - 按键注入
//! - `state` - 宏数据、存储、配置和共享控制状态
//! - `typing` - 输入引擎
//! - `utils` - 日志、错误处理和单实例锁

use std::sync::Arc;

use tokio::runtime::Handle;

/// Editor-level application core
pub mod app;

/// Console commands
pub mod commands;

/// Hotkey management modules
pub mod hotkey;

/// Keystroke injection modules
pub mod input;

/// State management modules
pub mod state;

/// Typing engine modules
pub mod typing;

/// Utility modules
pub mod utils;

use app::KeybinderApp;
use hotkey::{HookBackend, HotkeyRegistry};
use input::InjectorFactory;
use state::{AppConfig, ControlState, MacroStore};
use typing::{LiveSettings, SettingsSource, TypingEngine};

/// 组装应用核心
///
/// 创建共享控制状态、运行时设置、输入引擎和注册表，并把它们连接起来。
/// 返回的应用尚未加载宏，需要调用 [`KeybinderApp::startup`]。
///
/// # Arguments
///
/// * `backend` - 系统钩子后端
/// * `injector_factory` - 按键注入器工厂
/// * `config` - 应用配置
/// * `store` - 宏存储
/// * `runtime` - 运行输入会话的 tokio 运行时
pub fn build_app(
    backend: Box<dyn HookBackend>,
    injector_factory: InjectorFactory,
    config: &AppConfig,
    store: MacroStore,
    runtime: Handle,
) -> KeybinderApp {
    let control = Arc::new(ControlState::new());
    let settings = Arc::new(LiveSettings::new(config.typing.per_char_delay_secs, false));
    let source: Arc<dyn SettingsSource> = settings.clone();

    let engine = Arc::new(TypingEngine::new(
        control,
        source,
        injector_factory,
        config.typing.clone(),
        runtime,
    ));

    let registry = HotkeyRegistry::new(backend, engine, config.hotkeys);
    KeybinderApp::new(registry, store, settings)
}
