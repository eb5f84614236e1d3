// ==========================================
// 密封件生产计划系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、值类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod calendar;
pub mod order;
pub mod rate;
pub mod record;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use calendar::{BreakWindow, CalendarError, Eligibility, ShiftRule, WorkSegment};
pub use order::PlannedOrder;
pub use rate::{GroupThroughput, Rate};
pub use record::HistoricalRecord;
pub use schedule::{LineFlag, OrderLine, ScheduleResult, UnpricedReason};
pub use types::{Category, Dimension, ParseLabelError, RateBasis, SealType};
