//! 控制相关的控制台命令
//!
//! 提供暂停、恢复、输入速度和自动回车的控制

use crate::app::{KeybinderApp, PauseChange};
use crate::hotkey::ResumeReport;
use crate::typing::SettingsSource;
use crate::utils::error::AppResult;

/// 暂停所有热键
pub fn pause(app: &mut KeybinderApp) -> String {
    if app.is_paused() {
        return "Already paused.".to_string();
    }
    app.pause();
    "⏸ All hotkeys disabled.".to_string()
}

/// 恢复所有热键
pub fn resume(app: &mut KeybinderApp) -> String {
    let report = app.resume();
    resumed_message(&report)
}

/// 切换暂停状态
pub fn toggle(app: &mut KeybinderApp) -> String {
    match app.toggle_pause() {
        PauseChange::Paused => "⏸ All hotkeys disabled.".to_string(),
        PauseChange::Resumed(report) => resumed_message(&report),
    }
}

/// 设置逐字符延迟
pub fn set_speed(app: &mut KeybinderApp, secs: f64) -> AppResult<String> {
    app.set_per_char_delay(secs)?;
    Ok(format!("Typing delay set to {} s per character", secs))
}

/// 设置自动回车
pub fn set_auto_enter(app: &KeybinderApp, enabled: bool) -> AppResult<String> {
    app.set_auto_enter(enabled)?;
    Ok(format!("Auto-enter {}", if enabled { "on" } else { "off" }))
}

/// 状态栏和当前设置
pub fn status(app: &KeybinderApp) -> String {
    let settings = app.settings();
    let delay = settings
        .per_char_delay()
        .map(|secs| format!("{} s", secs))
        .unwrap_or_else(|| "default".to_string());

    format!(
        "{}\nTyping delay: {} • Auto-enter: {}\nFile: {}",
        app.status_line(),
        delay,
        if settings.auto_enter() { "on" } else { "off" },
        app.store().path().display()
    )
}

fn resumed_message(report: &ResumeReport) -> String {
    if report.is_complete() {
        return "▶ Hotkeys active again!".to_string();
    }

    let failed: Vec<&str> = report.failed.iter().map(|(key, _)| key.as_str()).collect();
    format!(
        "▶ Hotkeys active again, but {} could not be registered: {}",
        failed.len(),
        failed.join(", ")
    )
}
