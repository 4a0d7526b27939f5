//! 钩子后端抽象
//!
//! 注册表只通过 [`HookBackend`] 与系统级键盘钩子交互，
//! 生产环境使用 [`GlobalHotkeyBackend`](super::GlobalHotkeyBackend)，测试使用内存实现。

use std::sync::Arc;

use super::config::HookOptions;
use super::error::HotkeyResult;

/// 热键触发回调
///
/// 在系统钩子监听上下文中调用，不能阻塞
pub type HookCallback = Arc<dyn Fn() + Send + Sync>;

/// 系统级热键钩子后端
///
/// 所有调用都可能失败；`key` 始终是规范化后的热键字符串。
pub trait HookBackend {
    /// 安装热键钩子
    fn install(
        &mut self,
        key: &str,
        callback: HookCallback,
        options: HookOptions,
    ) -> HotkeyResult<()>;

    /// 移除热键钩子
    ///
    /// 钩子不存在时返回 `HotkeyError::NotRegistered`
    fn remove(&mut self, key: &str) -> HotkeyResult<()>;

    /// 移除所有钩子
    fn remove_all(&mut self);

    /// 检查热键字符串能否被后端接受，不安装钩子
    fn validate(&self, key: &str) -> HotkeyResult<()>;
}
