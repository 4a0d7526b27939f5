//! 输入互斥门
//!
//! 进程内所有输入会话共享的单槽互斥标志。获取是非阻塞的，
//! 释放由 [`GateGuard`] 在析构时完成，正常结束、出错或 panic 展开都会释放。

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// 单槽互斥门
#[derive(Debug, Default)]
pub struct Gate {
    held: AtomicBool,
}

impl Gate {
    /// 创建新的互斥门（未占用）
    pub fn new() -> Self {
        Self::default()
    }

    /// 尝试非阻塞地获取互斥门
    ///
    /// 已被占用时返回 `None`，调用方应直接放弃，不排队
    ///
    /// # Examples
    ///
    /// ```
    /// use std::sync::Arc;
    /// use keybinder_lib::typing::Gate;
    ///
    /// let gate = Arc::new(Gate::new());
    /// let guard = gate.try_acquire().unwrap();
    /// assert!(gate.try_acquire().is_none());
    ///
    /// drop(guard);
    /// assert!(gate.try_acquire().is_some());
    /// ```
    pub fn try_acquire(self: &Arc<Self>) -> Option<GateGuard> {
        self.held
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GateGuard {
                gate: Arc::clone(self),
            })
    }

    /// 是否已被占用
    pub fn is_held(&self) -> bool {
        self.held.load(Ordering::Acquire)
    }

    fn release(&self) {
        self.held.store(false, Ordering::Release);
    }
}

/// 互斥门持有凭证
///
/// 析构时释放互斥门
#[derive(Debug)]
pub struct GateGuard {
    gate: Arc<Gate>,
}

impl Drop for GateGuard {
    fn drop(&mut self) {
        self.gate.release();
    }
}
