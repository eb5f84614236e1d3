// ==========================================
// 密封件生产计划系统 - 工时推算引擎
// ==========================================
// 职责: 从起始时刻推进 N 个工作分钟,得到完工时刻
// 输入: 起始时刻 + 所需分钟 + 订单类别
// 输出: 完工时刻
// ==========================================
// 状态机: 时段内 / 午休 / 班前 / 班后或非工作日
// 红线: 搜索天数受 max_days 限制,超限报 CalendarExhausted,绝不静默截断
// ==========================================

use crate::domain::types::Category;
use crate::engine::calendar::{ShiftPosition, WorkCalendar};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Duration, NaiveDateTime};
use tracing::{debug, instrument, warn};

/// 默认最大搜索天数
pub const DEFAULT_MAX_DAYS: u32 = 365;

pub(crate) fn minutes_to_ms(minutes: f64) -> i64 {
    (minutes * 60_000.0).round() as i64
}

pub(crate) fn ms_to_minutes(ms: i64) -> f64 {
    ms as f64 / 60_000.0
}

// ==========================================
// WorkProjector - 工时推算引擎
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct WorkProjector<'a> {
    calendar: &'a WorkCalendar,
    max_days: u32,
}

impl<'a> WorkProjector<'a> {
    pub fn new(calendar: &'a WorkCalendar) -> Self {
        Self {
            calendar,
            max_days: DEFAULT_MAX_DAYS,
        }
    }

    pub fn with_max_days(mut self, max_days: u32) -> Self {
        self.max_days = max_days;
        self
    }

    pub fn calendar(&self) -> &'a WorkCalendar {
        self.calendar
    }

    pub fn max_days(&self) -> u32 {
        self.max_days
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 推进工时
    ///
    /// # 参数
    /// - start: 起始时刻
    /// - total_minutes: 所需工作分钟（非负）
    /// - category: 订单类别（决定不准入日跳过）
    ///
    /// # 返回
    /// - Ok(完工时刻)；total_minutes 为 0 时原样返回 start
    ///   (正工时的完工时刻必在该类别的工作时段内)
    /// - Err(CalendarExhausted): 超过 max_days 仍未完成
    #[instrument(skip(self, category), fields(category = %category))]
    pub fn advance(
        &self,
        start: NaiveDateTime,
        total_minutes: f64,
        category: &Category,
    ) -> EngineResult<NaiveDateTime> {
        if !total_minutes.is_finite() || total_minutes < 0.0 {
            return Err(EngineError::InvalidDuration(total_minutes));
        }

        if total_minutes == 0.0 {
            return Ok(start);
        }
        // 不足 1 毫秒的正工时按 1 毫秒计,保证完工落在工作时段内
        let mut remaining_ms = minutes_to_ms(total_minutes).max(1);

        let mut days_searched = 0u32;
        let mut current = start;
        loop {
            let (from, segment_end) =
                self.next_segment(current, category, &mut days_searched, remaining_ms)?;
            let available_ms = segment_end.signed_duration_since(from).num_milliseconds();

            // 恰好用满时段: 完工于时段结束,不滚到下一时段
            if remaining_ms <= available_ms {
                let completion = from + Duration::milliseconds(remaining_ms);
                debug!(%completion, days_searched, "工时推算完成");
                return Ok(completion);
            }

            remaining_ms -= available_ms;
            current = segment_end;
        }
    }

    /// 从某时刻起,该类别下一个可开工的时刻
    ///
    /// 已处于工作时段内时原样返回
    pub fn next_working_instant(
        &self,
        instant: NaiveDateTime,
        category: &Category,
    ) -> EngineResult<NaiveDateTime> {
        let mut days_searched = 0u32;
        self.next_segment(instant, category, &mut days_searched, 0)
            .map(|(from, _)| from)
    }

    /// 定位下一个可用工作时段
    ///
    /// # 返回
    /// (时段内起点, 时段结束时刻)
    fn next_segment(
        &self,
        start: NaiveDateTime,
        category: &Category,
        days_searched: &mut u32,
        remaining_ms: i64,
    ) -> EngineResult<(NaiveDateTime, NaiveDateTime)> {
        let mut current = start;
        loop {
            let date = current.date();
            match self.calendar.position(current, category) {
                ShiftPosition::InSegment(end) => return Ok((current, date.and_time(end))),
                ShiftPosition::BeforeShift(resume) | ShiftPosition::InBreak(resume) => {
                    current = date.and_time(resume);
                }
                ShiftPosition::Off | ShiftPosition::AfterShift => {
                    *days_searched += 1;
                    let next_midnight = date.succ_opt().and_then(|d| d.and_hms_opt(0, 0, 0));
                    match next_midnight {
                        Some(next) if *days_searched <= self.max_days => {
                            debug!(from = %date, to = %next.date(), "跳至次日");
                            current = next;
                        }
                        _ => {
                            warn!(
                                category = %category,
                                days_searched = *days_searched,
                                eligible_anywhere = self.calendar.is_eligible_anywhere(category),
                                "日历搜索耗尽"
                            );
                            return Err(EngineError::CalendarExhausted {
                                category: category.clone(),
                                days_searched: *days_searched,
                                max_days: self.max_days,
                                remaining_minutes: ms_to_minutes(remaining_ms),
                            });
                        }
                    }
                }
            }
        }
    }
}
