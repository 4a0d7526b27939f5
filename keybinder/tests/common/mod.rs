//! 集成测试共用的模拟实现
#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use keybinder_lib::hotkey::{
    parse_hotkey, HookBackend, HookCallback, HookOptions, HotkeyError, HotkeyResult,
};
use keybinder_lib::input::{InjectorFactory, InputError, InputResult, KeystrokeInjector, SpecialKey};
use keybinder_lib::state::ControlState;
use keybinder_lib::typing::{SettingsSource, TypingConfig, TypingEngine};

// ── Hook backend ─────────────────────────────────────────────────────────────

#[derive(Default)]
struct HookTable {
    installed: HashMap<String, (HookCallback, HookOptions)>,
    rejected: HashSet<String>,
    install_calls: usize,
}

/// 内存钩子后端
///
/// 克隆体共享同一张钩子表，测试保留一份用于检查和触发
#[derive(Clone, Default)]
pub struct MockBackend {
    table: Arc<Mutex<HookTable>>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// 让该热键的安装失败（模拟被其他程序占用）
    pub fn reject(&self, key: &str) {
        self.table.lock().unwrap().rejected.insert(key.to_string());
    }

    /// 取消安装失败
    pub fn accept(&self, key: &str) {
        self.table.lock().unwrap().rejected.remove(key);
    }

    /// 已安装的热键（排序）
    pub fn installed(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.table.lock().unwrap().installed.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn is_installed(&self, key: &str) -> bool {
        self.table.lock().unwrap().installed.contains_key(key)
    }

    pub fn options(&self, key: &str) -> Option<HookOptions> {
        self.table.lock().unwrap().installed.get(key).map(|(_, options)| *options)
    }

    pub fn install_calls(&self) -> usize {
        self.table.lock().unwrap().install_calls
    }

    /// 模拟按下并松开热键，返回是否有回调
    pub fn trigger(&self, key: &str) -> bool {
        let callback = self
            .table
            .lock()
            .unwrap()
            .installed
            .get(key)
            .map(|(callback, _)| Arc::clone(callback));

        match callback {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    pub fn boxed(&self) -> Box<dyn HookBackend> {
        Box::new(self.clone())
    }
}

impl HookBackend for MockBackend {
    fn install(
        &mut self,
        key: &str,
        callback: HookCallback,
        options: HookOptions,
    ) -> HotkeyResult<()> {
        let mut table = self.table.lock().unwrap();
        table.install_calls += 1;

        if table.rejected.contains(key) {
            return Err(HotkeyError::Occupied(key.to_string()));
        }
        if table.installed.contains_key(key) {
            return Err(HotkeyError::RegistrationFailed {
                hotkey: key.to_string(),
                reason: "already installed".to_string(),
            });
        }

        table.installed.insert(key.to_string(), (callback, options));
        Ok(())
    }

    fn remove(&mut self, key: &str) -> HotkeyResult<()> {
        self.table
            .lock()
            .unwrap()
            .installed
            .remove(key)
            .map(|_| ())
            .ok_or_else(|| HotkeyError::NotRegistered(key.to_string()))
    }

    fn remove_all(&mut self) {
        self.table.lock().unwrap().installed.clear();
    }

    fn validate(&self, key: &str) -> HotkeyResult<()> {
        parse_hotkey(key).map(|_| ())
    }
}

// ── Keystroke injector ──────────────────────────────────────────────────────

/// 注入的按键事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Injected {
    Char(char),
    Text(String),
    Key(SpecialKey),
}

/// 记录注入器的行为
#[derive(Clone, Default)]
pub struct InjectorBehavior {
    /// 每个字符的模拟耗时
    pub char_delay: Option<Duration>,
    /// 注入该字符时返回错误
    pub fail_on: Option<char>,
    /// 注入该字符时 panic
    pub panic_on: Option<char>,
    /// 工厂创建注入器失败
    pub factory_fails: bool,
}

/// 记录所有注入事件的注入器工厂
#[derive(Clone, Default)]
pub struct RecordingInjector {
    events: Arc<Mutex<Vec<Injected>>>,
    sessions: Arc<AtomicUsize>,
    active: Arc<AtomicUsize>,
    max_active: Arc<AtomicUsize>,
    behavior: InjectorBehavior,
}

impl RecordingInjector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_behavior(behavior: InjectorBehavior) -> Self {
        Self {
            behavior,
            ..Self::default()
        }
    }

    pub fn events(&self) -> Vec<Injected> {
        self.events.lock().unwrap().clone()
    }

    /// 注入的字符组成的文本
    pub fn typed(&self) -> String {
        self.events()
            .into_iter()
            .filter_map(|event| match event {
                Injected::Char(ch) => Some(ch),
                _ => None,
            })
            .collect()
    }

    pub fn enter_count(&self) -> usize {
        self.events()
            .iter()
            .filter(|event| **event == Injected::Key(SpecialKey::Enter))
            .count()
    }

    /// 工厂被调用的次数（即会话数）
    pub fn sessions(&self) -> usize {
        self.sessions.load(Ordering::SeqCst)
    }

    /// 同时进行的会话数的最大值
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }

    pub fn factory(&self) -> InjectorFactory {
        let recorder = self.clone();
        Arc::new(move || -> InputResult<Box<dyn KeystrokeInjector>> {
            recorder.sessions.fetch_add(1, Ordering::SeqCst);
            if recorder.behavior.factory_fails {
                return Err(InputError::PermissionDenied);
            }

            let active = recorder.active.fetch_add(1, Ordering::SeqCst) + 1;
            recorder.max_active.fetch_max(active, Ordering::SeqCst);

            Ok(Box::new(SessionInjector {
                recorder: recorder.clone(),
            }))
        })
    }
}

struct SessionInjector {
    recorder: RecordingInjector,
}

impl SessionInjector {
    fn push(&self, event: Injected) {
        self.recorder.events.lock().unwrap().push(event);
    }
}

impl KeystrokeInjector for SessionInjector {
    fn inject_char(&mut self, ch: char) -> InputResult<()> {
        let behavior = &self.recorder.behavior;
        if let Some(delay) = behavior.char_delay {
            std::thread::sleep(delay);
        }
        if behavior.panic_on == Some(ch) {
            panic!("injector panic on {:?}", ch);
        }
        if behavior.fail_on == Some(ch) {
            return Err(InputError::KeyboardSimulationFailed(format!("cannot type {:?}", ch)));
        }
        self.push(Injected::Char(ch));
        Ok(())
    }

    fn inject_string(&mut self, text: &str) -> InputResult<()> {
        self.push(Injected::Text(text.to_string()));
        Ok(())
    }

    fn inject_key(&mut self, key: SpecialKey) -> InputResult<()> {
        self.push(Injected::Key(key));
        Ok(())
    }
}

impl Drop for SessionInjector {
    fn drop(&mut self) {
        self.recorder.active.fetch_sub(1, Ordering::SeqCst);
    }
}

// ── Settings ────────────────────────────────────────────────────────────────

/// 固定的设置来源，记录逐字符延迟被读取的次数
#[derive(Default)]
pub struct StaticSettings {
    pub per_char_delay: Option<f64>,
    pub auto_enter: bool,
    pub delay_reads: AtomicUsize,
}

impl StaticSettings {
    pub fn new(per_char_delay: Option<f64>, auto_enter: bool) -> Self {
        Self {
            per_char_delay,
            auto_enter,
            delay_reads: AtomicUsize::new(0),
        }
    }
}

impl SettingsSource for StaticSettings {
    fn per_char_delay(&self) -> Option<f64> {
        self.delay_reads.fetch_add(1, Ordering::SeqCst);
        self.per_char_delay
    }

    fn auto_enter(&self) -> bool {
        self.auto_enter
    }
}

// ── Helpers ─────────────────────────────────────────────────────────────────

/// 在当前 tokio 运行时上创建无等待的输入引擎
pub fn engine(
    settings: Arc<dyn SettingsSource>,
    injector: &RecordingInjector,
) -> Arc<TypingEngine> {
    engine_with_control(Arc::new(ControlState::new()), settings, injector)
}

pub fn engine_with_control(
    control: Arc<ControlState>,
    settings: Arc<dyn SettingsSource>,
    injector: &RecordingInjector,
) -> Arc<TypingEngine> {
    Arc::new(TypingEngine::new(
        control,
        settings,
        injector.factory(),
        TypingConfig::immediate(),
        tokio::runtime::Handle::current(),
    ))
}

/// 等待条件成立，超时返回 false
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..200 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    condition()
}

/// 等待输入会话结束
pub async fn wait_idle(engine: &TypingEngine) -> bool {
    wait_until(|| !engine.is_typing()).await
}
