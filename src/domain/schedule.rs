// ==========================================
// 密封件生产计划系统 - 批次排程结果
// ==========================================
// 职责: 批次排程的逐单明细与完工时刻
// 红线: 未定价订单以标记行呈现,不折算为 0 分钟
// ==========================================

use crate::domain::order::PlannedOrder;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 未定价原因
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UnpricedReason {
    /// 费率表中没有该类别
    MissingRate,
    /// 该类别历史件数为 0
    UndefinedRate,
    /// 单件工时为负数或非有限值
    InvalidRate,
}

impl fmt::Display for UnpricedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnpricedReason::MissingRate => write!(f, "MISSING_RATE"),
            UnpricedReason::UndefinedRate => write!(f, "UNDEFINED_RATE"),
            UnpricedReason::InvalidRate => write!(f, "INVALID_RATE"),
        }
    }
}

/// 明细行标记
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "flag", content = "reason", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineFlag {
    UnpricedOrder(UnpricedReason),
}

// ==========================================
// OrderLine - 逐单明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub index: usize,                          // 原始顺序位置
    pub order: PlannedOrder,
    pub minutes: Option<f64>,                  // 本单所需分钟 (未定价为 None)
    pub cumulative_minutes: f64,               // 截至本单的累计分钟
    pub started_at: Option<NaiveDateTime>,     // 本单实际开工时刻
    pub completed_at: Option<NaiveDateTime>,   // 本单完工时刻
    pub flag: Option<LineFlag>,
}

impl OrderLine {
    pub fn is_priced(&self) -> bool {
        self.flag.is_none()
    }
}

// ==========================================
// ScheduleResult - 批次排程结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub start_instant: NaiveDateTime,
    pub total_minutes: f64,
    pub completion_instant: NaiveDateTime,
    pub lines: Vec<OrderLine>,
    pub deadline: Option<NaiveDateTime>,
    pub meets_deadline: Option<bool>,
}

impl ScheduleResult {
    pub fn unpriced_count(&self) -> usize {
        self.unpriced_lines().count()
    }

    /// 所有订单均已定价
    pub fn is_complete(&self) -> bool {
        self.unpriced_count() == 0
    }

    pub fn unpriced_lines(&self) -> impl Iterator<Item = &OrderLine> {
        self.lines.iter().filter(|l| !l.is_priced())
    }
}
