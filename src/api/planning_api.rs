// ==========================================
// 密封件生产计划系统 - 计划 API
// ==========================================
// 职责: 向 UI / 报表层暴露的核心边界
// - estimate_rates: 历史记录 → 单件工时
// - project_completion: 起始时刻 + 工时 → 完工时刻
// - schedule_batch: 有序订单 → 批次排程结果
// - production_summary: 看板统计
// - *_within: 先按记录窗口筛选历史记录
// ==========================================
// 红线: 每次调用使用调用方传入的快照,API 内部不累积订单列表
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, PlannerConfig};
use crate::domain::order::PlannedOrder;
use crate::domain::rate::{GroupThroughput, Rate};
use crate::domain::record::HistoricalRecord;
use crate::domain::schedule::ScheduleResult;
use crate::domain::types::{Category, Dimension, ParseLabelError};
use crate::engine::batch::BatchScheduler;
use crate::engine::calendar::WorkCalendar;
use crate::engine::projector::WorkProjector;
use crate::engine::statistics::{DowntimeByReason, ProductionStatistics, RankedGroup};
use crate::engine::throughput::ThroughputEstimator;
use crate::engine::window::RecordWindow;
use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{info, instrument};

/// 看板排行条数
const TOP_N: usize = 3;

/// 看板统计
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionSummary {
    pub record_count: usize,
    pub average_daily_units: Option<f64>,
    pub top_companies: Vec<RankedGroup>,
    pub top_operators: Vec<RankedGroup>,
    pub downtime_by_reason: Vec<DowntimeByReason>,
}

// ==========================================
// PlanningApi
// ==========================================
pub struct PlanningApi {
    config: ConfigManager,
}

impl PlanningApi {
    pub fn new(config: ConfigManager) -> Self {
        Self { config }
    }

    /// 由配置对象创建
    pub fn from_config(config: PlannerConfig) -> ApiResult<Self> {
        Ok(Self::new(ConfigManager::new(config)?))
    }

    pub fn config(&self) -> &PlannerConfig {
        self.config.config()
    }

    pub fn calendar(&self) -> &WorkCalendar {
        self.config.calendar()
    }

    fn estimator(&self) -> ThroughputEstimator {
        ThroughputEstimator::with_basis(self.config().rate_basis)
    }

    fn projector(&self) -> WorkProjector<'_> {
        WorkProjector::new(self.calendar()).with_max_days(self.config().max_search_days)
    }

    // ==========================================
    // 产能估算
    // ==========================================

    /// 分组单件工时（件数为 0 的分组省略）
    pub fn estimate_rates(&self, records: &[HistoricalRecord], group_by: Dimension) -> BTreeMap<String, Rate> {
        self.estimator().rate(records, group_by)
    }

    /// 按维度名称估算（维度名来自 UI 下拉框）
    pub fn estimate_rates_by_name(
        &self,
        records: &[HistoricalRecord],
        group_by: &str,
    ) -> ApiResult<BTreeMap<String, Rate>> {
        let dimension: Dimension = group_by
            .parse()
            .map_err(|e: ParseLabelError| ApiError::InvalidInput(e.to_string()))?;
        Ok(self.estimate_rates(records, dimension))
    }

    /// 分组明细（含未定义分组）
    pub fn throughput_breakdown(
        &self,
        records: &[HistoricalRecord],
        group_by: Dimension,
    ) -> BTreeMap<String, GroupThroughput> {
        self.estimator().summarize(records, group_by)
    }

    /// 按记录窗口筛选历史记录
    ///
    /// # 返回
    /// - Err(InvalidInput): 区间起点晚于终点
    pub fn filter_records(
        &self,
        records: &[HistoricalRecord],
        window: &RecordWindow,
    ) -> ApiResult<Vec<HistoricalRecord>> {
        if window.is_inverted() {
            return Err(ApiError::InvalidInput(format!(
                "日期区间无效: {:?} 晚于 {:?}",
                window.from, window.to
            )));
        }
        let kept = window.apply(records, self.calendar());
        info!(
            total = records.len(),
            kept = kept.len(),
            days = %window.days,
            "历史记录已按窗口筛选"
        );
        Ok(kept)
    }

    /// 窗口内分组单件工时
    pub fn estimate_rates_within(
        &self,
        records: &[HistoricalRecord],
        group_by: Dimension,
        window: &RecordWindow,
    ) -> ApiResult<BTreeMap<String, Rate>> {
        let kept = self.filter_records(records, window)?;
        Ok(self.estimate_rates(&kept, group_by))
    }

    // ==========================================
    // 工时推算
    // ==========================================

    /// 推算完工时刻
    pub fn project_completion(
        &self,
        start: NaiveDateTime,
        minutes: f64,
        category: &Category,
    ) -> ApiResult<NaiveDateTime> {
        Ok(self.projector().advance(start, minutes, category)?)
    }

    /// 批次排程
    #[instrument(skip(self, orders, rates), fields(orders = orders.len()))]
    pub fn schedule_batch(
        &self,
        orders: &[PlannedOrder],
        rates: &BTreeMap<String, Rate>,
        start: NaiveDateTime,
        deadline: Option<NaiveDateTime>,
    ) -> ApiResult<ScheduleResult> {
        let result = BatchScheduler::new(self.projector()).schedule(orders, rates, start, deadline)?;
        info!(
            total_minutes = result.total_minutes,
            completion = %result.completion_instant,
            unpriced = result.unpriced_count(),
            meets_deadline = ?result.meets_deadline,
            "批次排程完成"
        );
        Ok(result)
    }

    // ==========================================
    // 看板统计
    // ==========================================

    /// 窗口内看板统计
    pub fn production_summary_within(
        &self,
        records: &[HistoricalRecord],
        window: &RecordWindow,
    ) -> ApiResult<ProductionSummary> {
        let kept = self.filter_records(records, window)?;
        Ok(self.production_summary(&kept))
    }

    pub fn production_summary(&self, records: &[HistoricalRecord]) -> ProductionSummary {
        ProductionSummary {
            record_count: records.len(),
            average_daily_units: ProductionStatistics::average_daily_units(records),
            top_companies: ProductionStatistics::top_by_units(records, Dimension::Company, TOP_N),
            top_operators: ProductionStatistics::top_by_units(records, Dimension::Operator, TOP_N),
            downtime_by_reason: ProductionStatistics::downtime_by_reason(records),
        }
    }
}
