//! 输入模块
//!
//! 提供按键注入功能
//!
//! # 子模块
//!
//! - [`error`] - 错误类型定义
//! - [`injector`] - 注入器接口和工厂类型
//! - [`keyboard`] - 基于 enigo 的键盘模拟
//!
//! # 平台支持
//!
//! | 平台 | 键盘模拟 |
//! |------|----------|
//! | Windows | ✅ |
//! | macOS | ✅ * |
//! | Linux (X11) | ✅ |
//! | Linux (Wayland) | ⚠️ |
//!
//! * macOS 需要辅助功能权限

pub mod error;
pub mod injector;
pub mod keyboard;

// Re-export commonly used types
pub use error::{InputError, InputResult};
pub use injector::{InjectorFactory, KeystrokeInjector, SpecialKey};
pub use keyboard::KeyboardSimulator;
