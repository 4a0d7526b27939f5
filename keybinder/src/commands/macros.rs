//! 宏相关的控制台命令
//!
//! 提供宏的查看、保存、移动和删除

use crate::app::{KeybinderApp, MacroDraft};
use crate::hotkey::{normalize_hotkey, SUGGESTED_HOTKEYS};
use crate::utils::error::{AppError, AppResult};

use super::parse::escape;

/// 列出所有宏
pub fn list_macros(app: &KeybinderApp) -> String {
    if app.macros().is_empty() {
        return "No macros yet. Use: save <hotkey> | <name> | <text>".to_string();
    }

    app.macros()
        .iter()
        .map(|(key, record)| format!("  [{}] {}", key, record.label))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 列出推荐热键
///
/// 已被宏占用的热键带 `*` 标记
pub fn suggested_hotkeys(app: &KeybinderApp) -> String {
    let keys: Vec<String> = SUGGESTED_HOTKEYS
        .iter()
        .map(|key| {
            if app.registry().contains(key) {
                format!("{}*", key)
            } else {
                (*key).to_string()
            }
        })
        .collect();

    let mut lines = vec!["Suggested hotkeys (* = in use):".to_string()];
    lines.extend(keys.chunks(8).map(|row| format!("  {}", row.join("  "))));
    lines.join("\n")
}

/// 显示一个宏
pub fn show_macro(app: &KeybinderApp, key: &str) -> AppResult<String> {
    let record = app
        .get(key)
        .ok_or_else(|| AppError::MacroNotFound(key.to_string()))?;

    let normalized = normalize_hotkey(key);
    let mut lines = vec![format!("Name:   {}", record.label), format!("Hotkey: {}", key)];
    if normalized != key {
        lines.push(format!("Hook:   {}", normalized));
    }
    lines.push(format!("Text:   {}", escape(&record.text)));
    Ok(lines.join("\n"))
}

/// 保存宏
///
/// 热键安装失败时宏仍然保存，只提示热键未生效
pub fn save_macro(app: &mut KeybinderApp, draft: MacroDraft) -> AppResult<String> {
    let report = app.save_macro(draft)?;

    let message = match &report.hotkey_error {
        None => format!("✓ Macro '{}' saved. Hotkey: {}", report.label, report.key),
        Some(e) if report.kept_previous => format!(
            "Hotkey not active: {}\nMacro '{}' stays on {}.",
            AppError::from(e.clone()).user_message(),
            report.label,
            report.key
        ),
        Some(e) => {
            let err = AppError::from(e.clone());
            let mut message = format!(
                "✓ Macro '{}' saved, but hotkey '{}' is not active: {}",
                report.label,
                report.key,
                err.user_message()
            );
            if let Some(hint) = err.recovery_hint() {
                message.push('\n');
                message.push_str(&hint);
            }
            message
        }
    };
    Ok(message)
}

/// 移动宏到新热键
pub fn move_macro(app: &mut KeybinderApp, from: &str, to: &str) -> AppResult<String> {
    app.move_macro(from, to)?;
    Ok(format!("✓ Macro moved from {} to {}", from, to))
}

/// 删除宏
pub fn delete_macro(app: &mut KeybinderApp, key: &str) -> AppResult<String> {
    let removed = app.delete_macro(key)?;
    Ok(format!("✓ Macro '{}' deleted", removed.label))
}
