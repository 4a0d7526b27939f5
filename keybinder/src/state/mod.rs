//! 状态管理模块
//!
//! 提供宏数据、持久化存储、应用配置和共享控制状态
//!
//! # 模块结构
//!
//! - `config` - 应用配置和配置管理器
//! - `control` - 暂停标志和输入互斥门
//! - `error` - 存储相关错误类型
//! - `paths` - 存储路径解析
//! - `record` - 宏记录
//! - `store` - 宏存储的加载与保存

pub mod config;
mod control;
mod error;
pub mod paths;
mod record;
mod store;

pub use config::{AppConfig, ConfigError, ConfigManager, ConfigResult, InstanceConfig};
pub use control::ControlState;
pub use error::{StoreError, StoreResult};
pub use record::MacroRecord;
pub use store::{Bindings, LoadedBindings, MacroStore};
