// ==========================================
// 密封件生产计划系统 - 计划订单
// ==========================================
// 数量在进入排程前已由上层确定（包括叠装件的实际件数换算）
// ==========================================

use crate::domain::types::Category;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedOrder {
    pub category: Category,
    pub quantity: u32,
}

impl PlannedOrder {
    pub fn new(category: impl Into<Category>, quantity: u32) -> Self {
        Self {
            category: category.into(),
            quantity,
        }
    }
}
