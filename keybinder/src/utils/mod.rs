/// Logging utilities
pub mod logging;

/// Global error handling
pub mod error;

/// Single instance lock
pub mod single_instance;

// Re-export commonly used types
pub use error::{AppError, AppResult, ErrorCode};
pub use single_instance::{InstanceError, InstanceLock};
