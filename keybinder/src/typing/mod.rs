//! 输入引擎模块
//!
//! 负责把宏文本安全地、不重叠地输入到焦点应用
//!
//! # 模块结构
//!
//! - `engine` - 输入引擎和单次会话
//! - `gate` - 单槽互斥门
//! - `settings` - 输入节奏配置和运行时设置

mod engine;
mod gate;
mod settings;

pub use engine::{per_char_delay, SendOutcome, TypingEngine};
pub use gate::{Gate, GateGuard};
pub use settings::{
    secs_to_duration, LiveSettings, SettingsSource, TypingConfig, DEFAULT_BEFORE_ENTER_DELAY_SECS,
    DEFAULT_INITIAL_DELAY_SECS, DEFAULT_PER_CHAR_DELAY_SECS,
};
