use serde::{Deserialize, Serialize};

/// 宏记录
///
/// `text` 是要输入的原始文本，`label` 仅用于显示，不要求唯一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroRecord {
    /// 显示名称
    #[serde(default)]
    pub label: String,
    /// 要输入的文本
    #[serde(default)]
    pub text: String,
}

impl MacroRecord {
    /// 创建新的宏记录
    pub fn new(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            text: text.into(),
        }
    }

    /// 从旧格式（值只是文本）升级
    ///
    /// 名称使用 `Macro <热键>`
    pub fn from_legacy(key: &str, text: impl Into<String>) -> Self {
        Self::new(format!("Macro {}", key), text)
    }
}
