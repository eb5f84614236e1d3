// ==========================================
// 密封件生产计划系统 - 单件工时
// ==========================================
// 规则: minutes_per_unit = sum(minutes) / sum(units)
// 红线: sum(units) == 0 时为 Undefined,绝不按 0 分钟处理
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Rate - 单件工时
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "minutes_per_unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Rate {
    /// 每件分钟数
    PerUnit(f64),
    /// 分组内件数为 0,无法定价
    Undefined,
}

impl Rate {
    /// 由分组汇总值计算
    ///
    /// # 参数
    /// - total_minutes: 分组总分钟数
    /// - total_units: 分组总件数
    pub fn from_totals(total_minutes: f64, total_units: u64) -> Self {
        if total_units == 0 || !total_minutes.is_finite() {
            return Rate::Undefined;
        }
        Rate::PerUnit(total_minutes / total_units as f64)
    }

    pub fn minutes_per_unit(&self) -> Option<f64> {
        match self {
            Rate::PerUnit(v) => Some(*v),
            Rate::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, Rate::PerUnit(_))
    }

    /// 可用于排程: 已定义且为非负有限值
    pub fn is_usable(&self) -> bool {
        matches!(self, Rate::PerUnit(v) if v.is_finite() && *v >= 0.0)
    }

    /// 指定数量所需分钟数（未定价返回 None）
    pub fn minutes_for(&self, quantity: u32) -> Option<f64> {
        self.minutes_per_unit().map(|m| m * quantity as f64)
    }
}

// ==========================================
// GroupThroughput - 分组产能汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupThroughput {
    pub record_count: usize,
    pub total_minutes: f64,
    pub total_units: u64,
    pub rate: Rate,
}
