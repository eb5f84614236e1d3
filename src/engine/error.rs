// ==========================================
// 密封件生产计划系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 日历结构性失败中止本次调用;
//       数据稀疏 (未定价) 不在此处,以明细行标记降级呈现
// ==========================================

use crate::domain::types::Category;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("日历搜索耗尽: category={category}, 已搜索 {days_searched} 天 (上限 {max_days}), 剩余 {remaining_minutes:.2} 分钟未排")]
    CalendarExhausted {
        category: Category,
        days_searched: u32,
        max_days: u32,
        remaining_minutes: f64,
    },

    #[error("工时无效: {0} (必须为非负有限值)")]
    InvalidDuration(f64),

    #[error("订单无效 (序号 {index}): {message}")]
    InvalidOrder { index: usize, message: String },
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
