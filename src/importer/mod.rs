// ==========================================
// 密封件生产计划系统 - 导入层
// ==========================================
// 职责: 外部订单台账 → 历史记录快照
// 说明: 仅做格式适配,不负责持久化
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod history_csv;

pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use history_csv::{HistoryCsvImporter, ImportReport, RowRejection};
