// ==========================================
// 密封件生产计划系统 - API 层
// ==========================================
// 职责: 面向 UI / 报表层的调用边界
// ==========================================

pub mod error;
pub mod planning_api;

pub use error::{ApiError, ApiResult};
pub use planning_api::{PlanningApi, ProductionSummary};
