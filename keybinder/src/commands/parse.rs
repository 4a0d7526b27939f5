//! 控制台命令解析

use std::str::FromStr;

use thiserror::Error;

/// 命令解析错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    /// 空行
    #[error("Empty command")]
    Empty,

    /// 无法识别的命令
    #[error("Unknown command '{0}'")]
    Unknown(String),

    /// 缺少参数
    #[error("Missing argument, usage: {usage}")]
    MissingArgument { usage: &'static str },

    /// 参数无效
    #[error("Invalid argument '{value}': {reason}")]
    InvalidArgument { value: String, reason: String },
}

/// 命令解析的结果类型
pub type CommandResult<T> = Result<T, CommandError>;

/// 控制台命令
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// 列出所有宏
    List,
    /// 显示一个宏
    Show(String),
    /// 保存宏（新建或覆盖）
    Save {
        key: String,
        label: String,
        text: String,
    },
    /// 把宏移动到新热键
    Move { from: String, to: String },
    /// 删除宏
    Delete(String),
    /// 暂停所有热键
    Pause,
    /// 恢复所有热键
    Resume,
    /// 切换暂停状态
    Toggle,
    /// 设置逐字符延迟（秒）
    Speed(f64),
    /// 设置自动回车
    Enter(bool),
    /// 显示状态栏
    Status,
    /// 列出推荐热键
    Keys,
    /// 显示帮助
    Help,
    /// 退出
    Quit,
}

pub(crate) const SHOW_USAGE: &str = "show <hotkey>";
pub(crate) const SAVE_USAGE: &str = "save <hotkey> | <name> | <text>";
pub(crate) const MOVE_USAGE: &str = "move <old hotkey> | <new hotkey>";
pub(crate) const DELETE_USAGE: &str = "delete <hotkey>";
pub(crate) const SPEED_USAGE: &str = "speed <seconds per char>";
pub(crate) const ENTER_USAGE: &str = "enter on|off";

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> CommandResult<Self> {
        let line = line.trim();
        if line.is_empty() {
            return Err(CommandError::Empty);
        }

        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };

        match name.to_ascii_lowercase().as_str() {
            "list" | "ls" => Ok(Command::List),
            "show" => Ok(Command::Show(unescape_key(required(rest, SHOW_USAGE)?))),
            "save" => parse_save(rest),
            "move" | "mv" => parse_move(rest),
            "delete" | "del" | "rm" => {
                Ok(Command::Delete(unescape_key(required(rest, DELETE_USAGE)?)))
            }
            "pause" => Ok(Command::Pause),
            "resume" | "play" => Ok(Command::Resume),
            "toggle" => Ok(Command::Toggle),
            "speed" => parse_speed(rest),
            "enter" => parse_enter(rest),
            "status" => Ok(Command::Status),
            "keys" | "hotkeys" => Ok(Command::Keys),
            "help" | "?" => Ok(Command::Help),
            "quit" | "exit" => Ok(Command::Quit),
            _ => Err(CommandError::Unknown(name.to_string())),
        }
    }
}

fn required<'a>(value: &'a str, usage: &'static str) -> CommandResult<&'a str> {
    if value.is_empty() {
        Err(CommandError::MissingArgument { usage })
    } else {
        Ok(value)
    }
}

fn parse_save(rest: &str) -> CommandResult<Command> {
    let [key, label, text] = split_fields(rest, 3)[..] else {
        return Err(CommandError::MissingArgument { usage: SAVE_USAGE });
    };

    // 空字段交给保存流程校验
    Ok(Command::Save {
        key: unescape_key(key),
        label: unescape_key(label),
        text: unescape(text),
    })
}

fn parse_move(rest: &str) -> CommandResult<Command> {
    let rest = required(rest, MOVE_USAGE)?;

    let (from, to) = match split_fields(rest, 2)[..] {
        [from, to] => (from, to),
        _ => {
            let tokens: Vec<&str> = rest.split_whitespace().collect();
            match tokens.as_slice() {
                [from, to] => (*from, *to),
                _ => return Err(CommandError::MissingArgument { usage: MOVE_USAGE }),
            }
        }
    };

    if from.is_empty() || to.is_empty() {
        return Err(CommandError::MissingArgument { usage: MOVE_USAGE });
    }

    Ok(Command::Move {
        from: unescape_key(from),
        to: unescape_key(to),
    })
}

/// 按未转义的 `|` 切分参数，最多 `limit` 段
///
/// `\|` 表示字面的 `|`，保留在字段中由调用方展开
fn split_fields(rest: &str, limit: usize) -> Vec<&str> {
    let mut fields = Vec::with_capacity(limit);
    let mut start = 0;
    let mut escaped = false;

    for (i, ch) in rest.char_indices() {
        if fields.len() + 1 == limit {
            break;
        }
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '|' {
            fields.push(rest[start..i].trim());
            start = i + 1;
        }
    }

    fields.push(rest[start..].trim());
    fields
}

/// 展开热键或名称中的 `\|`
fn unescape_key(field: &str) -> String {
    field.replace("\\|", "|")
}

fn parse_speed(rest: &str) -> CommandResult<Command> {
    let value = required(rest, SPEED_USAGE)?;
    let secs: f64 = value.parse().map_err(|_| CommandError::InvalidArgument {
        value: value.to_string(),
        reason: "not a number".to_string(),
    })?;

    if !secs.is_finite() || secs < 0.0 {
        return Err(CommandError::InvalidArgument {
            value: value.to_string(),
            reason: "must be zero or a positive number of seconds".to_string(),
        });
    }

    Ok(Command::Speed(secs))
}

fn parse_enter(rest: &str) -> CommandResult<Command> {
    match required(rest, ENTER_USAGE)?.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Ok(Command::Enter(true)),
        "off" | "false" | "no" | "0" => Ok(Command::Enter(false)),
        other => Err(CommandError::InvalidArgument {
            value: other.to_string(),
            reason: "expected on or off".to_string(),
        }),
    }
}

/// 展开文本中的转义序列
///
/// 支持 `\n`、`\t`、`\|` 和 `\\`，其他反斜杠原样保留
pub fn unescape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('|') => out.push('|'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// 把文本转回单行形式，与 [`unescape`] 相反
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}
