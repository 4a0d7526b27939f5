//! 输入模块错误类型
//!
//! 定义按键注入相关的错误类型

use thiserror::Error;

/// 输入操作错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    /// 辅助功能权限被拒绝
    #[error("Accessibility permission denied")]
    PermissionDenied,

    /// 文本注入失败
    #[error("Failed to inject text: {0}")]
    InjectionFailed(String),

    /// 键盘模拟失败
    #[error("Keyboard simulation failed: {0}")]
    KeyboardSimulationFailed(String),
}

/// 输入操作结果类型
pub type InputResult<T> = Result<T, InputError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let error = InputError::PermissionDenied;
        assert!(error.to_string().contains("permission denied"));

        let error = InputError::InjectionFailed("test reason".to_string());
        assert!(error.to_string().contains("test reason"));

        let error = InputError::KeyboardSimulationFailed("enigo error".to_string());
        assert!(error.to_string().contains("enigo error"));
    }

    #[test]
    fn test_input_error_equality() {
        let error1 = InputError::InjectionFailed("test".to_string());
        let error2 = InputError::InjectionFailed("test".to_string());
        assert_eq!(error1, error2);

        let error3 = InputError::InjectionFailed("other".to_string());
        assert_ne!(error1, error3);

        assert_ne!(InputError::PermissionDenied, error1);
    }
}
