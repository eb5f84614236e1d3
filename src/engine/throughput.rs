// ==========================================
// 密封件生产计划系统 - 产能估算引擎
// ==========================================
// 职责: 由历史订单记录计算分组单件工时
// 输入: 历史记录快照 + 分组维度
// 输出: 分组键 -> 单件工时
// ==========================================
// 红线: 无状态、无副作用,每次调用都从完整快照重新计算
// ==========================================

use crate::domain::rate::{GroupThroughput, Rate};
use crate::domain::record::HistoricalRecord;
use crate::domain::types::{Dimension, RateBasis};
use std::collections::BTreeMap;
use tracing::{debug, instrument};

// ==========================================
// ThroughputEstimator - 产能估算引擎
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ThroughputEstimator {
    basis: RateBasis,
}

impl ThroughputEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_basis(basis: RateBasis) -> Self {
        Self { basis }
    }

    pub fn basis(&self) -> RateBasis {
        self.basis
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 分组汇总
    ///
    /// # 规则
    /// - 按维度投影分组,分组键为空白的记录不参与
    /// - 每组累计分钟数与件数,件数为 0 的组 rate = Undefined
    /// - 无记录的组不会出现在结果中
    #[instrument(skip(self, records), fields(records = records.len(), basis = %self.basis))]
    pub fn summarize(
        &self,
        records: &[HistoricalRecord],
        dimension: Dimension,
    ) -> BTreeMap<String, GroupThroughput> {
        let mut sums: BTreeMap<String, (usize, f64, u64)> = BTreeMap::new();
        let mut skipped_blank = 0usize;

        for record in records {
            let key = record.key(dimension);
            if key.is_empty() {
                skipped_blank += 1;
                continue;
            }
            let entry = sums.entry(key.to_string()).or_insert((0, 0.0, 0));
            entry.0 += 1;
            entry.1 += record.minutes(self.basis);
            entry.2 += u64::from(record.unit_count);
        }

        if skipped_blank > 0 {
            debug!(skipped_blank, %dimension, "分组键为空的记录已跳过");
        }

        sums.into_iter()
            .map(|(key, (record_count, total_minutes, total_units))| {
                let group = GroupThroughput {
                    record_count,
                    total_minutes,
                    total_units,
                    rate: Rate::from_totals(total_minutes, total_units),
                };
                (key, group)
            })
            .collect()
    }

    /// 分组单件工时
    ///
    /// 只返回可定价的分组；件数为 0 的分组被省略,
    /// 下游排程遇到这些类别时会标记为未定价
    pub fn rate(&self, records: &[HistoricalRecord], dimension: Dimension) -> BTreeMap<String, Rate> {
        self.summarize(records, dimension)
            .into_iter()
            .filter(|(_, group)| group.rate.is_defined())
            .map(|(key, group)| (key, group.rate))
            .collect()
    }
}
