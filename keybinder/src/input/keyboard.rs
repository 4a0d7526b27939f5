//! 键盘模拟模块
//!
//! 提供键盘输入模拟功能，用于将宏文本注入到焦点应用
//!
//! # 功能
//!
//! - 单字符输入：每个字符一次按键，供输入引擎逐字符控制节奏
//! - 整段输入：逐字符失败时的回退方式
//! - 特殊按键：回车、Tab 等
//!
//! # 使用示例
//!
//! ```ignore
//! use keybinder_lib::input::{KeyboardSimulator, KeystrokeInjector, SpecialKey};
//!
//! let mut keyboard = KeyboardSimulator::new()?;
//! keyboard.inject_char('h')?;
//! keyboard.inject_string("ello")?;
//! keyboard.inject_key(SpecialKey::Enter)?;
//! ```
//!
//! # 平台支持
//!
//! | 平台 | 字符输入 | 特殊按键 | 备注 |
//! |------|----------|----------|------|
//! | Windows | ✅ | ✅ | 无需特殊权限 |
//! | macOS | ✅ | ✅ | 需要辅助功能权限 |
//! | Linux (X11) | ✅ | ✅ | 需要 X11 |
//! | Linux (Wayland) | ⚠️ | ⚠️ | 受限支持 |

use std::sync::Arc;

use super::error::{InputError, InputResult};
use super::injector::{InjectorFactory, KeystrokeInjector, SpecialKey};
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

/// 键盘模拟器
///
/// 封装 enigo 库，提供跨平台的键盘模拟功能
pub struct KeyboardSimulator {
    /// enigo 实例
    enigo: Enigo,
}

impl KeyboardSimulator {
    /// 创建新的键盘模拟器
    ///
    /// # Errors
    ///
    /// - `InputError::KeyboardSimulationFailed` - 初始化失败
    pub fn new() -> InputResult<Self> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| {
            InputError::KeyboardSimulationFailed(format!("Failed to initialize: {}", e))
        })?;

        tracing::debug!("Keyboard simulator initialized");

        Ok(Self { enigo })
    }

    /// 创建注入器工厂
    ///
    /// 每个输入会话在自己的工作线程上创建一个新的模拟器
    pub fn factory() -> InjectorFactory {
        Arc::new(|| -> InputResult<Box<dyn KeystrokeInjector>> {
            let keyboard = KeyboardSimulator::new()?;
            Ok(Box::new(keyboard))
        })
    }

    /// 点击单个按键（按下并释放）
    pub fn click_key(&mut self, key: Key) -> InputResult<()> {
        self.enigo
            .key(key, Direction::Click)
            .map_err(|e| {
                InputError::KeyboardSimulationFailed(format!("Failed to click key: {}", e))
            })
    }
}

impl KeystrokeInjector for KeyboardSimulator {
    /// 输入单个字符
    ///
    /// 换行映射为回车键，`\r` 被忽略（`\r\n` 只产生一次回车）
    fn inject_char(&mut self, ch: char) -> InputResult<()> {
        match ch {
            '\n' => self.click_key(Key::Return),
            '\r' => Ok(()),
            '\t' => self.click_key(Key::Tab),
            _ => {
                let mut buf = [0u8; 4];
                self.enigo.text(ch.encode_utf8(&mut buf)).map_err(|e| {
                    InputError::KeyboardSimulationFailed(format!("Failed to type '{}': {}", ch, e))
                })
            }
        }
    }

    fn inject_string(&mut self, text: &str) -> InputResult<()> {
        if text.is_empty() {
            return Ok(());
        }

        tracing::debug!(text_len = text.len(), "Typing text");

        self.enigo
            .text(text)
            .map_err(|e| InputError::InjectionFailed(format!("Failed to type text: {}", e)))
    }

    fn inject_key(&mut self, key: SpecialKey) -> InputResult<()> {
        match key {
            SpecialKey::Enter => self.click_key(Key::Return),
        }
    }
}
