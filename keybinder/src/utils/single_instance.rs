//! 单实例锁
//!
//! 在本地回环地址上监听固定端口作为锁，第二个实例绑定失败即说明已有实例在运行。
//! 锁随 [`InstanceLock`] 一起释放，进程退出时由系统回收。

use std::io;
use std::net::{Ipv4Addr, SocketAddr, TcpListener};

use thiserror::Error;

/// 单实例锁错误
#[derive(Error, Debug)]
pub enum InstanceError {
    /// 已有实例在运行
    #[error("Another instance is already running (port {0} is taken)")]
    AlreadyRunning(u16),

    /// 绑定端口失败
    #[error("Failed to bind instance lock on port {port}: {source}")]
    Bind {
        port: u16,
        #[source]
        source: io::Error,
    },
}

/// 单实例锁结果类型
pub type InstanceResult<T> = Result<T, InstanceError>;

/// 单实例锁
///
/// # Examples
///
/// ```no_run
/// use keybinder_lib::utils::single_instance::InstanceLock;
///
/// let _lock = InstanceLock::acquire(49327).expect("already running");
/// // 持有 `_lock` 直到进程结束
/// ```
#[derive(Debug)]
pub struct InstanceLock {
    listener: TcpListener,
}

impl InstanceLock {
    /// 获取单实例锁
    ///
    /// # Errors
    ///
    /// - `InstanceError::AlreadyRunning` - 端口已被占用
    /// - `InstanceError::Bind` - 其他绑定失败
    pub fn acquire(port: u16) -> InstanceResult<Self> {
        let addr = SocketAddr::from((Ipv4Addr::LOCALHOST, port));

        let listener = TcpListener::bind(addr).map_err(|source| {
            if source.kind() == io::ErrorKind::AddrInUse {
                InstanceError::AlreadyRunning(port)
            } else {
                InstanceError::Bind { port, source }
            }
        })?;

        tracing::debug!(port, "Instance lock acquired");
        Ok(Self { listener })
    }

    /// 实际监听的端口
    pub fn port(&self) -> Option<u16> {
        self.listener.local_addr().ok().map(|addr| addr.port())
    }
}
