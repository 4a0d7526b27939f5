//! 共享控制状态
//!
//! 暂停标志和输入互斥门是进程内仅有的两个共享可变单元，
//! 由一个 [`ControlState`] 持有并通过 `Arc` 同时交给注册表和输入引擎。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::typing::Gate;

/// 共享控制状态
#[derive(Debug, Default)]
pub struct ControlState {
    paused: AtomicBool,
    gate: Arc<Gate>,
}

impl ControlState {
    /// 创建新的控制状态（未暂停，互斥门空闲）
    pub fn new() -> Self {
        Self::default()
    }

    /// 是否处于暂停状态
    pub fn is_paused(&self) -> bool {
        self.paused.load(Ordering::Acquire)
    }

    /// 设置暂停状态，返回之前的值
    pub fn set_paused(&self, paused: bool) -> bool {
        self.paused.swap(paused, Ordering::AcqRel)
    }

    /// 输入互斥门
    pub fn gate(&self) -> &Arc<Gate> {
        &self.gate
    }

    /// 是否有输入会话正在进行
    pub fn is_typing(&self) -> bool {
        self.gate.is_held()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_control_state_default() {
        let control = ControlState::new();
        assert!(!control.is_paused());
        assert!(!control.is_typing());
    }

    #[test]
    fn test_set_paused_returns_previous() {
        let control = ControlState::new();
        assert!(!control.set_paused(true));
        assert!(control.is_paused());
        assert!(control.set_paused(true));
        assert!(control.set_paused(false));
        assert!(!control.is_paused());
    }

    #[test]
    fn test_gate_shared_through_control() {
        let control = ControlState::new();
        let guard = control.gate().try_acquire().unwrap();
        assert!(control.is_typing());
        drop(guard);
        assert!(!control.is_typing());
    }
}
