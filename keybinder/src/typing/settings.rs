//! 输入节奏配置
//!
//! 逐字符延迟和自动回车由界面层在运行时修改，输入引擎在使用时拉取，
//! 因此会话进行中调整速度会在下一个字符生效。

use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use serde::{Deserialize, Serialize};

/// 首个按键前的默认等待时间（秒）
pub const DEFAULT_INITIAL_DELAY_SECS: f64 = 0.05;

/// 默认逐字符延迟（秒）
pub const DEFAULT_PER_CHAR_DELAY_SECS: f64 = 0.03;

/// 回车前的默认等待时间（秒）
pub const DEFAULT_BEFORE_ENTER_DELAY_SECS: f64 = 0.05;

/// 运行时设置来源
///
/// 输入引擎只通过该接口读取设置，与具体界面实现解耦
pub trait SettingsSource: Send + Sync {
    /// 当前逐字符延迟（秒），`None` 表示未设置
    fn per_char_delay(&self) -> Option<f64>;

    /// 是否在输入完成后自动按回车
    fn auto_enter(&self) -> bool;
}

/// 输入节奏配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// 首个按键前的等待时间（秒）
    ///
    /// 等待热键自身的松开事件处理完，目标应用焦点稳定
    pub initial_delay_secs: f64,
    /// 逐字符延迟（秒），启动时的初始值
    pub per_char_delay_secs: f64,
    /// 回车前的等待时间（秒）
    pub before_enter_delay_secs: f64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            initial_delay_secs: DEFAULT_INITIAL_DELAY_SECS,
            per_char_delay_secs: DEFAULT_PER_CHAR_DELAY_SECS,
            before_enter_delay_secs: DEFAULT_BEFORE_ENTER_DELAY_SECS,
        }
    }
}

impl TypingConfig {
    /// 首个按键前的等待时间
    pub fn initial_delay(&self) -> Duration {
        secs_to_duration(self.initial_delay_secs, DEFAULT_INITIAL_DELAY_SECS)
    }

    /// 回车前的等待时间
    pub fn before_enter_delay(&self) -> Duration {
        secs_to_duration(self.before_enter_delay_secs, DEFAULT_BEFORE_ENTER_DELAY_SECS)
    }

    /// 无等待的配置（测试和批处理使用）
    pub fn immediate() -> Self {
        Self {
            initial_delay_secs: 0.0,
            per_char_delay_secs: 0.0,
            before_enter_delay_secs: 0.0,
        }
    }
}

/// 将配置的秒数转换为等待时长
///
/// 非有限值回退到默认值，负数按 0 处理
pub fn secs_to_duration(value: f64, default: f64) -> Duration {
    let secs = if value.is_finite() { value } else { default };
    Duration::try_from_secs_f64(secs.max(0.0))
        .unwrap_or_else(|_| Duration::from_secs_f64(default.max(0.0)))
}

/// 运行时设置快照
#[derive(Debug, Clone, PartialEq)]
struct Snapshot {
    per_char_delay: Option<f64>,
    auto_enter: bool,
}

/// 运行时设置
///
/// 使用 ArcSwap 实现无锁读取
///
/// # Examples
///
/// ```
/// use keybinder_lib::typing::{LiveSettings, SettingsSource};
///
/// let settings = LiveSettings::new(0.03, false);
/// settings.set_per_char_delay(0.1);
/// settings.set_auto_enter(true);
///
/// assert_eq!(settings.per_char_delay(), Some(0.1));
/// assert!(settings.auto_enter());
/// ```
pub struct LiveSettings {
    snapshot: ArcSwap<Snapshot>,
}

impl LiveSettings {
    /// 创建新的运行时设置
    pub fn new(per_char_delay: f64, auto_enter: bool) -> Self {
        Self {
            snapshot: ArcSwap::from_pointee(Snapshot {
                per_char_delay: Some(per_char_delay),
                auto_enter,
            }),
        }
    }

    /// 更新逐字符延迟
    pub fn set_per_char_delay(&self, secs: f64) {
        self.update(|s| s.per_char_delay = Some(secs));
    }

    /// 清除逐字符延迟（回退到默认值）
    pub fn clear_per_char_delay(&self) {
        self.update(|s| s.per_char_delay = None);
    }

    /// 更新自动回车开关
    pub fn set_auto_enter(&self, auto_enter: bool) {
        self.update(|s| s.auto_enter = auto_enter);
    }

    fn update(&self, f: impl FnOnce(&mut Snapshot)) {
        let mut snapshot = (*self.snapshot.load_full()).clone();
        f(&mut snapshot);
        self.snapshot.store(Arc::new(snapshot));
    }
}

impl Default for LiveSettings {
    fn default() -> Self {
        Self::new(DEFAULT_PER_CHAR_DELAY_SECS, false)
    }
}

impl SettingsSource for LiveSettings {
    fn per_char_delay(&self) -> Option<f64> {
        self.snapshot.load().per_char_delay
    }

    fn auto_enter(&self) -> bool {
        self.snapshot.load().auto_enter
    }
}
