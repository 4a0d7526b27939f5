//! 热键字符串规范化
//!
//! 用户看到的热键（如 `numpad 1`）与钩子后端使用的形式（`num 1`）不同。
//! 安装和移除钩子时都必须经过同一个转换，否则注册表和后端的钩子表会失去同步。

/// 用户可见的小键盘前缀
const NUMPAD_PREFIX: &str = "numpad ";

/// 后端使用的小键盘前缀
const NUM_PREFIX: &str = "num ";

/// 将用户输入的热键转换为钩子后端使用的形式
///
/// 规则：不区分大小写地匹配 `"numpad "` 前缀，改写为 `"num "` 加上剩余部分
/// （去除首尾空白）；其他字符串原样返回。
///
/// # Examples
///
/// ```
/// use keybinder_lib::hotkey::normalize_hotkey;
///
/// assert_eq!(normalize_hotkey("numpad 1"), "num 1");
/// assert_eq!(normalize_hotkey("NumPad +"), "num +");
/// assert_eq!(normalize_hotkey("ctrl+F1"), "ctrl+F1");
/// ```
pub fn normalize_hotkey(key: &str) -> String {
    match key.get(..NUMPAD_PREFIX.len()) {
        Some(prefix) if prefix.eq_ignore_ascii_case(NUMPAD_PREFIX) => {
            format!("{}{}", NUM_PREFIX, key[NUMPAD_PREFIX.len()..].trim())
        }
        _ => key.to_string(),
    }
}
