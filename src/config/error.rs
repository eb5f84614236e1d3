// ==========================================
// 密封件生产计划系统 - 配置层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::calendar::CalendarError;
use thiserror::Error;

/// 配置层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    // ===== 文件相关错误 =====
    #[error("配置文件读取失败 ({path}): {message}")]
    FileReadError { path: String, message: String },

    #[error("配置解析失败: {0}")]
    ParseError(#[from] serde_json::Error),

    // ===== 值格式错误 =====
    #[error("无法识别的工作日: {0}")]
    InvalidWeekday(String),

    #[error("时间格式错误: {0}（期望 HH:MM 或 HH:MM:SS）")]
    InvalidTime(String),

    #[error("午休配置不完整 ({0}): break_start 与 break_end 必须同时给出")]
    IncompleteBreak(String),

    #[error("配置值错误 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },

    // ===== 日历结构错误 =====
    #[error(transparent)]
    Calendar(#[from] CalendarError),
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
