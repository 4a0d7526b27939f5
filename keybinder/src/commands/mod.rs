//! 控制台命令模块
//!
//! 从标准输入读取的命令在主线程上作用于 [`KeybinderApp`]
//!
//! # 模块结构
//!
//! - `control` - 暂停、恢复和输入设置命令
//! - `macros` - 宏管理命令
//! - `parse` - 命令解析

pub mod control;
pub mod macros;
mod parse;

pub use parse::{escape, unescape, Command, CommandError, CommandResult};

use crate::app::{KeybinderApp, MacroDraft};
use crate::utils::error::AppResult;

/// 帮助文本
pub const HELP: &str = "\
Commands:
  list                               list all macros
  show <hotkey>                      show one macro
  save <hotkey> | <name> | <text>    add or replace a macro (\\n for new line, \\| for |)
  move <old hotkey> | <new hotkey>   move a macro to another hotkey
  delete <hotkey>                    delete a macro
  pause | resume | toggle            disable or enable all hotkeys
  speed <seconds>                    delay between characters
  enter on|off                       press Enter after typing
  status                             show status
  keys                               list suggested hotkeys
  quit                               exit";

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// 显示给用户的消息
    Message(String),
    /// 退出程序
    Quit,
}

impl Command {
    /// 执行命令
    ///
    /// # Errors
    ///
    /// 返回需要展示给用户的错误，不会影响后续命令
    pub fn apply(self, app: &mut KeybinderApp) -> AppResult<Reply> {
        tracing::debug!(command = ?self, "Applying console command");

        let message = match self {
            Command::List => macros::list_macros(app),
            Command::Show(key) => macros::show_macro(app, &key)?,
            Command::Save { key, label, text } => {
                macros::save_macro(app, MacroDraft::new(key, label, text))?
            }
            Command::Move { from, to } => macros::move_macro(app, &from, &to)?,
            Command::Delete(key) => macros::delete_macro(app, &key)?,
            Command::Pause => control::pause(app),
            Command::Resume => control::resume(app),
            Command::Toggle => control::toggle(app),
            Command::Speed(secs) => control::set_speed(app, secs)?,
            Command::Enter(enabled) => control::set_auto_enter(app, enabled)?,
            Command::Status => control::status(app),
            Command::Keys => macros::suggested_hotkeys(app),
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };

        Ok(Reply::Message(message))
    }
}
