// ==========================================
// 密封件生产计划系统 - 生产统计
// ==========================================
// 职责: 看板用的日均产量、排行、停机原因汇总
// 红线: 纯计算,输入为历史记录快照
// ==========================================

use crate::domain::record::HistoricalRecord;
use crate::domain::types::Dimension;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 排行条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedGroup {
    pub key: String,
    pub units: u64,
}

/// 停机原因汇总条目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DowntimeByReason {
    pub reason: String,
    pub minutes: f64,
    pub occurrences: usize,
}

pub struct ProductionStatistics;

impl ProductionStatistics {
    /// 日均产量
    ///
    /// 先按日期汇总件数,再对出现过的日期求均值；无记录返回 None
    pub fn average_daily_units(records: &[HistoricalRecord]) -> Option<f64> {
        let mut per_day: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for record in records {
            *per_day.entry(record.date).or_insert(0) += u64::from(record.unit_count);
        }
        if per_day.is_empty() {
            return None;
        }
        let total: u64 = per_day.values().sum();
        Some(total as f64 / per_day.len() as f64)
    }

    /// 按件数排行
    ///
    /// # 规则
    /// - 件数降序
    /// - 件数相同按分组键升序
    /// - 分组键为空白的记录不参与
    pub fn top_by_units(records: &[HistoricalRecord], dimension: Dimension, n: usize) -> Vec<RankedGroup> {
        let mut sums: BTreeMap<&str, u64> = BTreeMap::new();
        for record in records {
            let key = record.key(dimension);
            if key.is_empty() {
                continue;
            }
            *sums.entry(key).or_insert(0) += u64::from(record.unit_count);
        }

        let mut ranked: Vec<RankedGroup> = sums
            .into_iter()
            .map(|(key, units)| RankedGroup {
                key: key.to_string(),
                units,
            })
            .collect();
        ranked.sort_by(|a, b| b.units.cmp(&a.units).then_with(|| a.key.cmp(&b.key)));
        ranked.truncate(n);
        ranked
    }

    /// 停机原因汇总（分钟数降序）
    pub fn downtime_by_reason(records: &[HistoricalRecord]) -> Vec<DowntimeByReason> {
        let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
        for record in records {
            let Some(reason) = record.downtime_reason.as_deref().map(str::trim) else {
                continue;
            };
            if reason.is_empty() {
                continue;
            }
            let entry = sums.entry(reason.to_string()).or_insert((0.0, 0));
            entry.0 += record.downtime_minutes;
            entry.1 += 1;
        }

        let mut rows: Vec<DowntimeByReason> = sums
            .into_iter()
            .map(|(reason, (minutes, occurrences))| DowntimeByReason {
                reason,
                minutes,
                occurrences,
            })
            .collect();
        rows.sort_by(|a, b| {
            b.minutes
                .partial_cmp(&a.minutes)
                .unwrap_or(Ordering::Equal)
                .then_with(|| a.reason.cmp(&b.reason))
        });
        rows
    }
}
