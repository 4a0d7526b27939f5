//! 热键管理模块
//!
//! 提供全局热键的规范化、解析、注册和宏绑定管理功能
//!
//! # 模块结构
//!
//! - `backend` - 系统钩子后端抽象
//! - `config` - 钩子安装选项
//! - `keymap` - 热键字符串到系统按键码的解析
//! - `normalize` - 热键规范化
//! - `register` - 基于 global-hotkey 的后端实现
//! - `registry` - 宏绑定注册表
//!
//! # 使用方法
//!
//! ```ignore
//! use keybinder_lib::hotkey::{GlobalHotkeyBackend, HookOptions, HotkeyRegistry};
//!
//! let backend = GlobalHotkeyBackend::new()?;
//! let mut registry = HotkeyRegistry::new(Box::new(backend), engine, HookOptions::default());
//! registry.bind("F1", MacroRecord::new("Greeting", "hello"))?;
//! ```

mod backend;
mod config;
mod error;
mod keymap;
mod normalize;
mod register;
mod registry;

pub use backend::{HookBackend, HookCallback};
pub use config::HookOptions;
pub use error::{HotkeyError, HotkeyResult};
pub use keymap::{parse_hotkey, SUGGESTED_HOTKEYS};
pub use normalize::normalize_hotkey;
pub use register::GlobalHotkeyBackend;
pub use registry::{HotkeyRegistry, ResumeReport};
