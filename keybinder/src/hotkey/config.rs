//! 热键配置模块
//!
//! 定义安装钩子时使用的选项和默认值

use serde::{Deserialize, Serialize};

/// 钩子安装选项
///
/// # Examples
///
/// ```
/// use keybinder_lib::hotkey::HookOptions;
///
/// let options = HookOptions::default();
/// assert!(options.suppress);
/// assert!(options.trigger_on_release);
///
/// let options = HookOptions::default().with_trigger_on_release(false);
/// assert!(!options.trigger_on_release);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookOptions {
    /// 吞掉触发热键的原始按键，不传递给焦点应用
    ///
    /// 默认值: true
    pub suppress: bool,

    /// 在按键松开时触发，而不是按下时
    ///
    /// 松开后再开始输入，避免热键自身的按键事件混入输入内容
    /// 默认值: true
    pub trigger_on_release: bool,
}

impl HookOptions {
    /// 设置是否吞掉原始按键
    pub fn with_suppress(mut self, suppress: bool) -> Self {
        self.suppress = suppress;
        self
    }

    /// 设置是否在松开时触发
    pub fn with_trigger_on_release(mut self, trigger_on_release: bool) -> Self {
        self.trigger_on_release = trigger_on_release;
        self
    }
}

impl Default for HookOptions {
    fn default() -> Self {
        Self {
            suppress: true,
            trigger_on_release: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options_default() {
        let options = HookOptions::default();
        assert!(options.suppress);
        assert!(options.trigger_on_release);
    }

    #[test]
    fn test_options_builder_pattern() {
        let options = HookOptions::default()
            .with_suppress(false)
            .with_trigger_on_release(false);

        assert!(!options.suppress);
        assert!(!options.trigger_on_release);
    }

    #[test]
    fn test_options_partial_json() {
        let options: HookOptions = serde_json::from_str(r#"{"suppress": false}"#).unwrap();
        assert!(!options.suppress);
        assert!(options.trigger_on_release); // 默认值
    }
}
