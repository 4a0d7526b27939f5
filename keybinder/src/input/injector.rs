//! 按键注入接口
//!
//! 输入引擎只依赖 [`KeystrokeInjector`]，不关心具体的模拟实现。
//! 注入器由 [`InjectorFactory`] 在每个输入会话开始时创建，
//! 整个会话都在同一个工作线程上使用它。

use std::sync::Arc;

use super::error::InputResult;

/// 可注入的特殊按键
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialKey {
    /// 回车
    Enter,
}

/// 按键注入器
pub trait KeystrokeInjector {
    /// 以单次按键注入一个字符
    fn inject_char(&mut self, ch: char) -> InputResult<()>;

    /// 一次性注入整段文本
    fn inject_string(&mut self, text: &str) -> InputResult<()>;

    /// 点击一个特殊按键
    fn inject_key(&mut self, key: SpecialKey) -> InputResult<()>;
}

/// 注入器工厂
///
/// 每个输入会话调用一次，在工作线程上执行
pub type InjectorFactory =
    Arc<dyn Fn() -> InputResult<Box<dyn KeystrokeInjector>> + Send + Sync>;
