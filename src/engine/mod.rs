// ==========================================
// 密封件生产计划系统 - 引擎层
// ==========================================
// 职责: 工作日历、工时推算、产能估算、批次排程、记录窗口
// 红线: 纯计算,无 I/O,无共享可变状态
// ==========================================
// 数据流: 历史记录 → ThroughputEstimator → 费率
//         费率 + 订单 → BatchScheduler → WorkProjector → 完工时刻
// ==========================================

pub mod batch;
pub mod calendar;
pub mod error;
pub mod projector;
pub mod statistics;
pub mod throughput;
pub mod window;

// 重导出核心引擎
pub use batch::BatchScheduler;
pub use calendar::{ShiftPosition, WorkCalendar};
pub use error::{EngineError, EngineResult};
pub use projector::{WorkProjector, DEFAULT_MAX_DAYS};
pub use statistics::{DowntimeByReason, ProductionStatistics, RankedGroup};
pub use throughput::ThroughputEstimator;
pub use window::{DatePreset, DayFilter, RecordWindow};
