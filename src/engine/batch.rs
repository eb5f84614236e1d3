// ==========================================
// 密封件生产计划系统 - 批次排程引擎
// ==========================================
// 职责: 按给定顺序为一批计划订单计算总工时与完工时刻
// 输入: 有序订单列表 + 费率表 + 起始时刻 (+ 交期)
// 输出: ScheduleResult
// ==========================================
// 规则:
// 1) 严格按调用方顺序处理,不重排
// 2) 逐单推进工时并串联完工时刻 (不同类别准入日不同)
// 3) 缺费率/费率未定义/费率无效的订单标记 UnpricedOrder,不计入总工时,不中止批次
// 4) CalendarExhausted 中止整个调用
// ==========================================

use crate::domain::order::PlannedOrder;
use crate::domain::rate::Rate;
use crate::domain::schedule::{LineFlag, OrderLine, ScheduleResult, UnpricedReason};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::projector::WorkProjector;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;
use tracing::{instrument, warn};

// ==========================================
// BatchScheduler - 批次排程引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct BatchScheduler<'a> {
    projector: WorkProjector<'a>,
}

impl<'a> BatchScheduler<'a> {
    pub fn new(projector: WorkProjector<'a>) -> Self {
        Self { projector }
    }

    /// 批次排程
    ///
    /// # 参数
    /// - orders: 计划订单（顺序即优先级）
    /// - rates: 类别 -> 单件工时
    /// - start: 起始时刻
    /// - deadline: 目标交期（可选）
    ///
    /// # 返回
    /// - Ok(ScheduleResult): 可能含未定价标记行
    /// - Err: 订单数量为 0,或日历搜索耗尽
    #[instrument(skip(self, orders, rates), fields(orders = orders.len(), rates = rates.len()))]
    pub fn schedule(
        &self,
        orders: &[PlannedOrder],
        rates: &BTreeMap<String, Rate>,
        start: NaiveDateTime,
        deadline: Option<NaiveDateTime>,
    ) -> EngineResult<ScheduleResult> {
        let mut lines = Vec::with_capacity(orders.len());
        let mut total_minutes = 0.0;
        let mut cursor = start;

        for (index, order) in orders.iter().enumerate() {
            if order.quantity == 0 {
                return Err(EngineError::InvalidOrder {
                    index,
                    message: format!("category={} 数量必须为正整数", order.category),
                });
            }

            let priced = match rates.get(order.category.as_str()) {
                None => Err(UnpricedReason::MissingRate),
                Some(Rate::Undefined) => Err(UnpricedReason::UndefinedRate),
                Some(rate) if !rate.is_usable() => Err(UnpricedReason::InvalidRate),
                Some(rate) => rate
                    .minutes_for(order.quantity)
                    .filter(|m| m.is_finite())
                    .ok_or(UnpricedReason::InvalidRate),
            };

            let line = match priced {
                Ok(minutes) => {
                    let started_at = if minutes > 0.0 {
                        self.projector.next_working_instant(cursor, &order.category)?
                    } else {
                        cursor
                    };
                    let completed_at = self.projector.advance(cursor, minutes, &order.category)?;
                    total_minutes += minutes;
                    cursor = completed_at;
                    OrderLine {
                        index,
                        order: order.clone(),
                        minutes: Some(minutes),
                        cumulative_minutes: total_minutes,
                        started_at: Some(started_at),
                        completed_at: Some(completed_at),
                        flag: None,
                    }
                }
                Err(reason) => {
                    warn!(index, category = %order.category, %reason, "订单未定价,已跳过");
                    OrderLine {
                        index,
                        order: order.clone(),
                        minutes: None,
                        cumulative_minutes: total_minutes,
                        started_at: None,
                        completed_at: None,
                        flag: Some(LineFlag::UnpricedOrder(reason)),
                    }
                }
            };
            lines.push(line);
        }

        Ok(ScheduleResult {
            start_instant: start,
            total_minutes,
            completion_instant: cursor,
            lines,
            deadline,
            meets_deadline: deadline.map(|d| cursor <= d),
        })
    }
}

#[cfg(test)]
mod tests;
