// ==========================================
// 密封件生产计划系统 - 历史订单记录
// ==========================================
// 职责: 外部数据源提供的订单台账快照行
// 红线: 只读,核心层不持有、不缓存
// ==========================================

use crate::domain::types::{Category, Dimension, RateBasis};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// HistoricalRecord - 历史订单记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    // ===== 分组键 =====
    pub date: NaiveDate,
    pub company: String,
    pub operator: String,
    pub seal_type: String,

    // ===== 产出 =====
    pub unit_count: u32,           // 密封件数量
    pub production_minutes: f64,   // 生产时间 (分钟)

    // ===== 停机 =====
    #[serde(default)]
    pub downtime_minutes: f64,     // 停机时间 (分钟)
    #[serde(default)]
    pub downtime_reason: Option<String>,
}

impl HistoricalRecord {
    pub fn new(
        date: NaiveDate,
        seal_type: impl Into<String>,
        company: impl Into<String>,
        operator: impl Into<String>,
        unit_count: u32,
        production_minutes: f64,
    ) -> Self {
        Self {
            date,
            company: company.into(),
            operator: operator.into(),
            seal_type: seal_type.into(),
            unit_count,
            production_minutes,
            downtime_minutes: 0.0,
            downtime_reason: None,
        }
    }

    /// 附加停机信息
    pub fn with_downtime(mut self, minutes: f64, reason: Option<String>) -> Self {
        self.downtime_minutes = minutes;
        self.downtime_reason = reason.filter(|r| !r.trim().is_empty());
        self
    }

    /// 按维度投影出分组键
    pub fn key(&self, dimension: Dimension) -> &str {
        match dimension {
            Dimension::SealType => self.seal_type.trim(),
            Dimension::Company => self.company.trim(),
            Dimension::Operator => self.operator.trim(),
        }
    }

    /// 记录所属的订单类别（按密封件类型）
    pub fn category(&self) -> Category {
        Category::new(&self.seal_type)
    }

    /// 按工时口径计入的分钟数
    pub fn minutes(&self, basis: RateBasis) -> f64 {
        match basis {
            RateBasis::ProductionOnly => self.production_minutes,
            RateBasis::IncludingDowntime => self.production_minutes + self.downtime_minutes,
        }
    }
}
