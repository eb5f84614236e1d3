// ==========================================
// 密封件生产计划系统 - 工作日历
// ==========================================
// 职责: 周班次表查询,判定某时刻是否为工作时间、当日剩余工时
// 红线: 非工作日/不准入返回 None 或 0,属于预期状态而非错误
// ==========================================

use crate::domain::calendar::{CalendarError, ShiftRule, WorkSegment};
use crate::domain::types::Category;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// 某时刻在当日班次中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftPosition {
    /// 非工作日,或当日不允许该类别
    Off,
    /// 早于班次开始,携带班次开始时间
    BeforeShift(NaiveTime),
    /// 处于工作时段内,携带该时段结束时间
    InSegment(NaiveTime),
    /// 处于午休,携带复工时间
    InBreak(NaiveTime),
    /// 已到或超过班次结束
    AfterShift,
}

// ==========================================
// WorkCalendar - 工作日历
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct WorkCalendar {
    rules: [Option<ShiftRule>; 7],
}

impl WorkCalendar {
    /// 由班次规则构建日历
    ///
    /// # 规则
    /// - 每个工作日至多一条规则
    /// - 未出现的工作日视为非工作日
    pub fn new(rules: impl IntoIterator<Item = ShiftRule>) -> Result<Self, CalendarError> {
        let mut table: [Option<ShiftRule>; 7] = Default::default();
        for rule in rules {
            let slot = &mut table[rule.weekday.num_days_from_monday() as usize];
            if slot.is_some() {
                return Err(CalendarError::DuplicateWeekday(rule.weekday));
            }
            *slot = Some(rule);
        }
        Ok(Self { rules: table })
    }

    pub fn rule(&self, weekday: Weekday) -> Option<&ShiftRule> {
        self.rules[weekday.num_days_from_monday() as usize].as_ref()
    }

    pub fn rules(&self) -> impl Iterator<Item = &ShiftRule> {
        self.rules.iter().flatten()
    }

    /// 查询某日班次
    ///
    /// # 参数
    /// - date: 日期
    /// - category: 订单类别；给定时若当日不准入该类别则返回 None
    pub fn shift_for(&self, date: NaiveDate, category: Option<&Category>) -> Option<&ShiftRule> {
        let rule = self.rule(date.weekday())?;
        match category {
            Some(c) if !rule.eligibility.admits(c) => None,
            _ => Some(rule),
        }
    }

    /// 判定时刻在当日班次中的位置
    pub fn position(&self, instant: NaiveDateTime, category: &Category) -> ShiftPosition {
        let Some(rule) = self.shift_for(instant.date(), Some(category)) else {
            return ShiftPosition::Off;
        };
        let segments = rule.segments();
        let Some(first) = segments.first() else {
            return ShiftPosition::Off;
        };

        let t = instant.time();
        if t < first.start {
            return ShiftPosition::BeforeShift(first.start);
        }
        for segment in &segments {
            if t < segment.start {
                return ShiftPosition::InBreak(segment.start);
            }
            if t < segment.end {
                return ShiftPosition::InSegment(segment.end);
            }
        }
        ShiftPosition::AfterShift
    }

    /// 是否为该类别的工作时间
    pub fn is_working_time(&self, instant: NaiveDateTime, category: &Category) -> bool {
        matches!(self.position(instant, category), ShiftPosition::InSegment(_))
    }

    /// 当日剩余工作分钟数
    ///
    /// # 规则
    /// - 早于班次开始: 从班次开始计
    /// - 处于午休: 从午休结束计
    /// - 已到班次结束、非工作日或不准入: 0
    pub fn remaining_minutes(&self, instant: NaiveDateTime, category: &Category) -> f64 {
        self.remaining_ms(instant, category) as f64 / 60_000.0
    }

    pub(crate) fn remaining_ms(&self, instant: NaiveDateTime, category: &Category) -> i64 {
        let Some(rule) = self.shift_for(instant.date(), Some(category)) else {
            return 0;
        };
        let t = instant.time();
        rule.segments()
            .iter()
            .map(|segment| {
                let from = t.max(segment.start);
                if from >= segment.end {
                    0
                } else {
                    WorkSegment { start: from, end: segment.end }.duration_ms()
                }
            })
            .sum()
    }

    /// 某工作日班次净工时（不考虑类别准入）
    pub fn net_shift_minutes(&self, weekday: Weekday) -> f64 {
        self.rule(weekday).map(ShiftRule::net_minutes).unwrap_or(0.0)
    }

    /// 该类别每周可用工时
    pub fn weekly_capacity_minutes(&self, category: &Category) -> f64 {
        self.rules()
            .filter(|r| r.eligibility.admits(category))
            .map(ShiftRule::net_minutes)
            .sum()
    }

    /// 该类别在一周内是否至少有一天可开工
    pub fn is_eligible_anywhere(&self, category: &Category) -> bool {
        self.weekly_capacity_minutes(category) > 0.0
    }
}
