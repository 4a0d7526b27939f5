//! 热键字符串解析
//!
//! 将规范化后的热键字符串（`ctrl+F1`、`num 1`、`shift+/`、`:` 等）
//! 转换为 global-hotkey 使用的 [`Modifiers`] 和 [`Code`]。

use global_hotkey::hotkey::{Code, HotKey, Modifiers};

use super::error::{HotkeyError, HotkeyResult};

/// 推荐的热键列表，按键组排列
///
/// 全部可以被 [`parse_hotkey`] 解析（`numpad` 写法需先规范化）
#[rustfmt::skip]
pub const SUGGESTED_HOTKEYS: &[&str] = &[
    // 功能键
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12",
    // 小键盘数字
    "numpad 0", "numpad 1", "numpad 2", "numpad 3", "numpad 4",
    "numpad 5", "numpad 6", "numpad 7", "numpad 8", "numpad 9",
    // 小键盘运算符
    "numpad +", "numpad -", "numpad *", "numpad /", "numpad enter", "numpad .",
    // 符号
    ".", ",", ";", ":", "'", "\"", "[", "]", "{", "}", "\\", "|", "/", "?",
    // 修饰键 + 功能键
    "ctrl+F1", "ctrl+F2", "ctrl+F3", "ctrl+F4", "ctrl+F5",
    "shift+F1", "shift+F2", "shift+F3", "shift+F4", "shift+F5",
    "alt+F1", "alt+F2", "alt+F3", "alt+F4", "alt+F5",
    // 修饰键 + 符号
    "ctrl+.", "ctrl+,", "ctrl+;", "ctrl+:", "ctrl+/",
    "shift+.", "shift+,", "shift+;", "shift+:", "shift+/",
    "alt+.", "alt+,", "alt+;", "alt+:", "alt+/",
    // 修饰键 + 字母
    "ctrl+a", "ctrl+b", "ctrl+c", "ctrl+d", "ctrl+e", "ctrl+f", "ctrl+g", "ctrl+h",
    "ctrl+i", "ctrl+j", "ctrl+k", "ctrl+l", "ctrl+m", "ctrl+n", "ctrl+o", "ctrl+p",
    "ctrl+q", "ctrl+r", "ctrl+s", "ctrl+t", "ctrl+u", "ctrl+v", "ctrl+w", "ctrl+x",
    "ctrl+y", "ctrl+z",
    "shift+a", "shift+b", "shift+c", "shift+d", "shift+e", "shift+f", "shift+g",
    "alt+a", "alt+b", "alt+c", "alt+d", "alt+e", "alt+f", "alt+g",
];

/// 解析热键字符串为 HotKey
///
/// # Examples
///
/// ```
/// use keybinder_lib::hotkey::parse_hotkey;
///
/// assert!(parse_hotkey("ctrl+F1").is_ok());
/// assert!(parse_hotkey("num +").is_ok());
/// assert!(parse_hotkey("bad!!key").is_err());
/// ```
pub fn parse_hotkey(key: &str) -> HotkeyResult<HotKey> {
    let (modifiers, code) = parse_parts(key)?;
    let modifiers = (!modifiers.is_empty()).then_some(modifiers);
    Ok(HotKey::new(modifiers, code))
}

/// 解析热键字符串为修饰键和主键
pub(crate) fn parse_parts(key: &str) -> HotkeyResult<(Modifiers, Code)> {
    let invalid = || HotkeyError::InvalidFormat(key.to_string());

    let trimmed = key.trim();
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let (prefix, main) = split_main_key(trimmed);

    let mut modifiers = Modifiers::empty();
    if let Some(prefix) = prefix {
        for token in prefix.split('+') {
            modifiers |= parse_modifier(token.trim()).ok_or_else(invalid)?;
        }
    }

    let (extra, code) = parse_main_key(main.trim()).ok_or_else(invalid)?;
    Ok((modifiers | extra, code))
}

/// 拆分修饰键前缀和主键
///
/// `+` 本身也可以作为主键（`+`、`ctrl++`、`num +`），需要单独处理
fn split_main_key(key: &str) -> (Option<&str>, &str) {
    if key == "+" {
        return (None, key);
    }

    if let Some(rest) = key.strip_suffix('+') {
        let lower = rest.to_ascii_lowercase();
        if lower.ends_with("num ") {
            let split = rest.len() - "num ".len();
            let prefix = rest[..split].trim_end_matches('+');
            let main = &key[split..];
            return ((!prefix.is_empty()).then_some(prefix), main);
        }
        if let Some(prefix) = rest.strip_suffix('+') {
            return ((!prefix.is_empty()).then_some(prefix), "+");
        }
    }

    match key.rsplit_once('+') {
        Some((prefix, main)) => (Some(prefix), main),
        None => (None, key),
    }
}

fn parse_modifier(token: &str) -> Option<Modifiers> {
    match token.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Some(Modifiers::CONTROL),
        "alt" | "option" => Some(Modifiers::ALT),
        "shift" => Some(Modifiers::SHIFT),
        "win" | "windows" | "cmd" | "command" | "super" | "meta" => Some(Modifiers::SUPER),
        _ => None,
    }
}

/// 解析主键，返回隐含的修饰键（如 `:` 需要 Shift）和键码
fn parse_main_key(token: &str) -> Option<(Modifiers, Code)> {
    let lower = token.to_ascii_lowercase();

    if let Some(rest) = lower.strip_prefix("num ") {
        return parse_numpad(rest.trim()).map(|code| (Modifiers::empty(), code));
    }

    if let Some(code) = parse_named(&lower) {
        return Some((Modifiers::empty(), code));
    }

    let mut chars = lower.chars();
    let ch = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    parse_char(ch)
}

fn parse_numpad(token: &str) -> Option<Code> {
    let code = match token {
        "0" => Code::Numpad0,
        "1" => Code::Numpad1,
        "2" => Code::Numpad2,
        "3" => Code::Numpad3,
        "4" => Code::Numpad4,
        "5" => Code::Numpad5,
        "6" => Code::Numpad6,
        "7" => Code::Numpad7,
        "8" => Code::Numpad8,
        "9" => Code::Numpad9,
        "+" => Code::NumpadAdd,
        "-" => Code::NumpadSubtract,
        "*" => Code::NumpadMultiply,
        "/" => Code::NumpadDivide,
        "." => Code::NumpadDecimal,
        "enter" => Code::NumpadEnter,
        _ => return None,
    };
    Some(code)
}

fn parse_named(token: &str) -> Option<Code> {
    let code = match token {
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "f13" => Code::F13,
        "f14" => Code::F14,
        "f15" => Code::F15,
        "f16" => Code::F16,
        "f17" => Code::F17,
        "f18" => Code::F18,
        "f19" => Code::F19,
        "f20" => Code::F20,
        "f21" => Code::F21,
        "f22" => Code::F22,
        "f23" => Code::F23,
        "f24" => Code::F24,
        "space" => Code::Space,
        "enter" | "return" => Code::Enter,
        "tab" => Code::Tab,
        "esc" | "escape" => Code::Escape,
        "backspace" => Code::Backspace,
        "delete" | "del" => Code::Delete,
        "insert" | "ins" => Code::Insert,
        "home" => Code::Home,
        "end" => Code::End,
        "page up" | "pageup" => Code::PageUp,
        "page down" | "pagedown" => Code::PageDown,
        "up" => Code::ArrowUp,
        "down" => Code::ArrowDown,
        "left" => Code::ArrowLeft,
        "right" => Code::ArrowRight,
        "caps lock" | "capslock" => Code::CapsLock,
        "print screen" | "printscreen" => Code::PrintScreen,
        "pause" => Code::Pause,
        _ => return None,
    };
    Some(code)
}

fn parse_char(ch: char) -> Option<(Modifiers, Code)> {
    let plain = |code| Some((Modifiers::empty(), code));
    let shifted = |code| Some((Modifiers::SHIFT, code));

    match ch {
        'a' => plain(Code::KeyA),
        'b' => plain(Code::KeyB),
        'c' => plain(Code::KeyC),
        'd' => plain(Code::KeyD),
        'e' => plain(Code::KeyE),
        'f' => plain(Code::KeyF),
        'g' => plain(Code::KeyG),
        'h' => plain(Code::KeyH),
        'i' => plain(Code::KeyI),
        'j' => plain(Code::KeyJ),
        'k' => plain(Code::KeyK),
        'l' => plain(Code::KeyL),
        'm' => plain(Code::KeyM),
        'n' => plain(Code::KeyN),
        'o' => plain(Code::KeyO),
        'p' => plain(Code::KeyP),
        'q' => plain(Code::KeyQ),
        'r' => plain(Code::KeyR),
        's' => plain(Code::KeyS),
        't' => plain(Code::KeyT),
        'u' => plain(Code::KeyU),
        'v' => plain(Code::KeyV),
        'w' => plain(Code::KeyW),
        'x' => plain(Code::KeyX),
        'y' => plain(Code::KeyY),
        'z' => plain(Code::KeyZ),
        '0' => plain(Code::Digit0),
        '1' => plain(Code::Digit1),
        '2' => plain(Code::Digit2),
        '3' => plain(Code::Digit3),
        '4' => plain(Code::Digit4),
        '5' => plain(Code::Digit5),
        '6' => plain(Code::Digit6),
        '7' => plain(Code::Digit7),
        '8' => plain(Code::Digit8),
        '9' => plain(Code::Digit9),
        '.' => plain(Code::Period),
        ',' => plain(Code::Comma),
        ';' => plain(Code::Semicolon),
        '\'' => plain(Code::Quote),
        '[' => plain(Code::BracketLeft),
        ']' => plain(Code::BracketRight),
        '\\' => plain(Code::Backslash),
        '/' => plain(Code::Slash),
        '-' => plain(Code::Minus),
        '=' => plain(Code::Equal),
        '`' => plain(Code::Backquote),
        // US 布局下需要 Shift 的符号
        ':' => shifted(Code::Semicolon),
        '"' => shifted(Code::Quote),
        '{' => shifted(Code::BracketLeft),
        '}' => shifted(Code::BracketRight),
        '|' => shifted(Code::Backslash),
        '?' => shifted(Code::Slash),
        '+' => shifted(Code::Equal),
        '_' => shifted(Code::Minus),
        '~' => shifted(Code::Backquote),
        '<' => shifted(Code::Comma),
        '>' => shifted(Code::Period),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parts(key: &str) -> (Modifiers, Code) {
        parse_parts(key).unwrap()
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(parts("F1"), (Modifiers::empty(), Code::F1));
        assert_eq!(parts("f12"), (Modifiers::empty(), Code::F12));
    }

    #[test]
    fn test_modifier_combinations() {
        assert_eq!(parts("ctrl+F1"), (Modifiers::CONTROL, Code::F1));
        assert_eq!(parts("shift+a"), (Modifiers::SHIFT, Code::KeyA));
        assert_eq!(parts("alt+/"), (Modifiers::ALT, Code::Slash));
        assert_eq!(
            parts("ctrl+shift+z"),
            (Modifiers::CONTROL | Modifiers::SHIFT, Code::KeyZ)
        );
    }

    #[test]
    fn test_numpad_keys() {
        assert_eq!(parts("num 1"), (Modifiers::empty(), Code::Numpad1));
        assert_eq!(parts("num +"), (Modifiers::empty(), Code::NumpadAdd));
        assert_eq!(parts("num enter"), (Modifiers::empty(), Code::NumpadEnter));
        assert_eq!(parts("ctrl+num +"), (Modifiers::CONTROL, Code::NumpadAdd));
    }

    #[test]
    fn test_plus_as_main_key() {
        assert_eq!(parts("+"), (Modifiers::SHIFT, Code::Equal));
        assert_eq!(
            parts("ctrl++"),
            (Modifiers::CONTROL | Modifiers::SHIFT, Code::Equal)
        );
    }

    #[test]
    fn test_shifted_symbols() {
        assert_eq!(parts(":"), (Modifiers::SHIFT, Code::Semicolon));
        assert_eq!(parts("?"), (Modifiers::SHIFT, Code::Slash));
        assert_eq!(parts("shift+:"), (Modifiers::SHIFT, Code::Semicolon));
        assert_eq!(parts("ctrl+:"), (Modifiers::CONTROL | Modifiers::SHIFT, Code::Semicolon));
    }

    #[test]
    fn test_plain_symbols() {
        assert_eq!(parts("."), (Modifiers::empty(), Code::Period));
        assert_eq!(parts("\\"), (Modifiers::empty(), Code::Backslash));
        assert_eq!(parts("'"), (Modifiers::empty(), Code::Quote));
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["", "   ", "bad!!key", "numpad 1", "ctrl+", "hyper+a", "num x", "F99"] {
            let result = parse_parts(key);
            assert!(
                matches!(result, Err(HotkeyError::InvalidFormat(_))),
                "expected {:?} to be rejected",
                key
            );
        }
    }

    #[test]
    fn test_suggested_hotkeys_parse() {
        for key in SUGGESTED_HOTKEYS {
            let normalized = crate::hotkey::normalize_hotkey(key);
            assert!(parse_parts(&normalized).is_ok(), "failed to parse {:?}", key);
        }
        assert!(SUGGESTED_HOTKEYS.contains(&"|"));
    }

    #[test]
    fn test_parse_hotkey_ids_match_for_equivalent_spellings() {
        let a = parse_hotkey("ctrl+a").unwrap();
        let b = parse_hotkey("Control+A").unwrap();
        assert_eq!(a.id(), b.id());
    }
}
