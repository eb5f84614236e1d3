// ==========================================
// 密封件生产计划系统 - 核心库
// ==========================================
// 系统定位: 工单完工时间估算 (历史产能 × 多班次工作日历)
// 边界: 看板 UI、台账存储、权限、图表、报表由外部负责
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 日历推算与产能估算
pub mod engine;

// 导入层 - 外部台账
pub mod importer;

// 配置层 - 班次日历
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 调用边界
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Category, Dimension, Eligibility, HistoricalRecord, LineFlag, OrderLine, PlannedOrder, Rate,
    RateBasis, ScheduleResult, SealType, ShiftRule, UnpricedReason,
};

// 引擎
pub use engine::{
    BatchScheduler, DatePreset, DayFilter, EngineError, ProductionStatistics, RecordWindow,
    ThroughputEstimator, WorkCalendar, WorkProjector,
};

// API
pub use api::{ApiError, PlanningApi};

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "密封件生产计划系统";
