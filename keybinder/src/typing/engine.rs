//! 输入引擎
//!
//! 将宏文本以模拟按键的方式输入到焦点应用
//!
//! # 状态机
//!
//! ```text
//! Idle ──send()──▶ Typing ──会话结束──▶ Idle
//! ```
//!
//! - 暂停中或文本为空时 `send` 不做任何事
//! - 互斥门被占用时直接丢弃本次触发，不排队
//! - 会话在 tokio 阻塞线程池上运行，结束时无条件释放互斥门

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio::runtime::Handle;

use super::settings::{secs_to_duration, SettingsSource, TypingConfig, DEFAULT_PER_CHAR_DELAY_SECS};
use crate::input::{InjectorFactory, InputResult, KeystrokeInjector, SpecialKey};
use crate::state::ControlState;

/// `send` 的处理结果
///
/// 只描述是否启动了会话，会话本身的结果不会回传给调用方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendOutcome {
    /// 已启动输入会话
    Started,
    /// 已有会话在进行，本次触发被丢弃
    Busy,
    /// 处于暂停状态
    Paused,
    /// 文本为空
    Empty,
}

impl SendOutcome {
    /// 是否启动了会话
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started)
    }
}

/// 输入引擎
pub struct TypingEngine {
    control: Arc<ControlState>,
    settings: Arc<dyn SettingsSource>,
    injector_factory: InjectorFactory,
    timing: TypingConfig,
    runtime: Handle,
}

impl TypingEngine {
    /// 创建新的输入引擎
    ///
    /// # Arguments
    ///
    /// * `control` - 共享控制状态（暂停标志和互斥门）
    /// * `settings` - 运行时设置来源
    /// * `injector_factory` - 按键注入器工厂
    /// * `timing` - 固定等待时间配置
    /// * `runtime` - 运行输入会话的 tokio 运行时
    pub fn new(
        control: Arc<ControlState>,
        settings: Arc<dyn SettingsSource>,
        injector_factory: InjectorFactory,
        timing: TypingConfig,
        runtime: Handle,
    ) -> Self {
        Self {
            control,
            settings,
            injector_factory,
            timing,
            runtime,
        }
    }

    /// 共享控制状态
    pub fn control(&self) -> &Arc<ControlState> {
        &self.control
    }

    /// 是否有输入会话正在进行
    pub fn is_typing(&self) -> bool {
        self.control.is_typing()
    }

    /// 输入一段文本
    ///
    /// 立即返回，不等待输入完成。可以在系统热键监听线程上调用。
    pub fn send(&self, text: &str) -> SendOutcome {
        if self.control.is_paused() {
            tracing::trace!("Typing paused, ignoring trigger");
            return SendOutcome::Paused;
        }

        if text.is_empty() {
            return SendOutcome::Empty;
        }

        let Some(guard) = self.control.gate().try_acquire() else {
            tracing::debug!("Typing session already active, dropping trigger");
            return SendOutcome::Busy;
        };

        let session = TypingSession {
            text: text.to_string(),
            settings: Arc::clone(&self.settings),
            injector_factory: Arc::clone(&self.injector_factory),
            timing: self.timing.clone(),
        };

        self.runtime.spawn_blocking(move || {
            let _guard = guard;
            let report = session.run();
            tracing::debug!(
                chars = report.chars_typed,
                fallback = report.used_fallback,
                enter = report.pressed_enter,
                "Typing session finished"
            );
        });

        SendOutcome::Started
    }
}

/// 单次输入会话的结果（仅用于日志）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct SessionReport {
    pub(crate) chars_typed: usize,
    pub(crate) used_fallback: bool,
    pub(crate) pressed_enter: bool,
}

/// 单次输入会话
pub(crate) struct TypingSession {
    pub(crate) text: String,
    pub(crate) settings: Arc<dyn SettingsSource>,
    pub(crate) injector_factory: InjectorFactory,
    pub(crate) timing: TypingConfig,
}

impl TypingSession {
    /// 执行输入序列，所有错误都在内部吸收
    pub(crate) fn run(self) -> SessionReport {
        let mut report = SessionReport::default();

        let mut injector = match (self.injector_factory)() {
            Ok(injector) => injector,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to create keystroke injector");
                return report;
            }
        };

        sleep(self.timing.initial_delay());

        tracing::debug!(text_len = self.text.chars().count(), "Typing session started");

        if let Err(e) = self.type_chars(injector.as_mut(), &mut report) {
            tracing::warn!(
                error = %e,
                typed = report.chars_typed,
                "Character injection failed, falling back to whole-string injection"
            );
            report.used_fallback = true;
            if let Err(e) = injector.inject_string(&self.text) {
                tracing::warn!(error = %e, "Whole-string injection failed");
            }
        }

        if self.settings.auto_enter() {
            sleep(self.timing.before_enter_delay());
            match injector.inject_key(SpecialKey::Enter) {
                Ok(()) => report.pressed_enter = true,
                Err(e) => tracing::debug!(error = %e, "Failed to press Enter"),
            }
        }

        report
    }

    fn type_chars(
        &self,
        injector: &mut dyn KeystrokeInjector,
        report: &mut SessionReport,
    ) -> InputResult<()> {
        for ch in self.text.chars() {
            injector.inject_char(ch)?;
            report.chars_typed += 1;
            // 每个字符都重新读取，运行中调整速度立即生效
            sleep(per_char_delay(self.settings.per_char_delay()));
        }
        Ok(())
    }
}

/// 计算逐字符延迟
///
/// 未设置或非有限值回退到默认值，负数按 0 处理
pub fn per_char_delay(configured: Option<f64>) -> Duration {
    secs_to_duration(
        configured.unwrap_or(DEFAULT_PER_CHAR_DELAY_SECS),
        DEFAULT_PER_CHAR_DELAY_SECS,
    )
}

fn sleep(duration: Duration) {
    if !duration.is_zero() {
        thread::sleep(duration);
    }
}
