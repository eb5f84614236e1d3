// ==========================================
// 密封件生产计划系统 - 班次规则领域模型
// ==========================================
// 职责: 每个工作日的班次时段、午休、类别准入
// 约定: 时段为左闭右开 [start, end),边界归属于从该点开始的时段
// ==========================================

use crate::domain::types::Category;
use chrono::{NaiveTime, Weekday};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error;

/// 日历配置错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("班次时段无效 ({weekday}): start={start} 必须早于 end={end}")]
    InvalidShiftSpan {
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
    },

    #[error("午休时段无效 ({weekday}): {start}-{end} 必须位于班次 {shift_start}-{shift_end} 之内且 start < end")]
    InvalidBreak {
        weekday: Weekday,
        start: NaiveTime,
        end: NaiveTime,
        shift_start: NaiveTime,
        shift_end: NaiveTime,
    },

    #[error("同一工作日存在多条班次规则: {0}")]
    DuplicateWeekday(Weekday),
}

// ==========================================
// BreakWindow - 午休时段
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BreakWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

// ==========================================
// Eligibility - 类别准入
// ==========================================
// 用途: 部分人员排班日只允许特定类别开工
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Eligibility {
    #[default]
    All,
    Only(BTreeSet<Category>),
}

impl Eligibility {
    pub fn only<I, C>(categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        Eligibility::Only(categories.into_iter().map(Into::into).collect())
    }

    pub fn admits(&self, category: &Category) -> bool {
        match self {
            Eligibility::All => true,
            Eligibility::Only(set) => set.contains(category),
        }
    }
}

/// 连续工作时段 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkSegment {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl WorkSegment {
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }

    pub fn duration_ms(&self) -> i64 {
        self.end.signed_duration_since(self.start).num_milliseconds()
    }
}

// ==========================================
// ShiftRule - 班次规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShiftRule {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub break_window: Option<BreakWindow>,
    pub eligibility: Eligibility,
}

impl ShiftRule {
    /// 创建班次（不含午休、不限类别）
    pub fn new(weekday: Weekday, start: NaiveTime, end: NaiveTime) -> Result<Self, CalendarError> {
        if start >= end {
            return Err(CalendarError::InvalidShiftSpan { weekday, start, end });
        }
        Ok(Self {
            weekday,
            start,
            end,
            break_window: None,
            eligibility: Eligibility::All,
        })
    }

    /// 设置午休时段
    pub fn with_break(mut self, start: NaiveTime, end: NaiveTime) -> Result<Self, CalendarError> {
        if start >= end || start < self.start || end > self.end {
            return Err(CalendarError::InvalidBreak {
                weekday: self.weekday,
                start,
                end,
                shift_start: self.start,
                shift_end: self.end,
            });
        }
        self.break_window = Some(BreakWindow { start, end });
        Ok(self)
    }

    /// 限制可开工类别
    pub fn restricted_to<I, C>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Category>,
    {
        self.eligibility = Eligibility::only(categories);
        self
    }

    /// 当日工作时段（已剔除午休,长度为 0 的时段不返回）
    pub fn segments(&self) -> Vec<WorkSegment> {
        let raw = match self.break_window {
            Some(b) => vec![
                WorkSegment { start: self.start, end: b.start },
                WorkSegment { start: b.end, end: self.end },
            ],
            None => vec![WorkSegment { start: self.start, end: self.end }],
        };
        raw.into_iter().filter(|s| s.start < s.end).collect()
    }

    /// 班次净工作分钟数
    pub fn net_minutes(&self) -> f64 {
        let ms: i64 = self.segments().iter().map(WorkSegment::duration_ms).sum();
        ms as f64 / 60_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_net_minutes_excludes_break() {
        let rule = ShiftRule::new(Weekday::Mon, hm(6, 30), hm(17, 0))
            .unwrap()
            .with_break(hm(12, 0), hm(13, 0))
            .unwrap();
        assert_eq!(rule.net_minutes(), 570.0);
        assert_eq!(rule.segments().len(), 2);
    }

    #[test]
    fn test_break_at_shift_start_leaves_single_segment() {
        let rule = ShiftRule::new(Weekday::Tue, hm(8, 0), hm(16, 0))
            .unwrap()
            .with_break(hm(8, 0), hm(8, 30))
            .unwrap();
        assert_eq!(rule.segments(), vec![WorkSegment { start: hm(8, 30), end: hm(16, 0) }]);
    }

    #[test]
    fn test_invalid_spans_rejected() {
        assert!(ShiftRule::new(Weekday::Mon, hm(17, 0), hm(6, 30)).is_err());
        let rule = ShiftRule::new(Weekday::Mon, hm(6, 30), hm(17, 0)).unwrap();
        assert!(rule.clone().with_break(hm(5, 0), hm(7, 0)).is_err());
        assert!(rule.with_break(hm(13, 0), hm(12, 0)).is_err());
    }

    #[test]
    fn test_eligibility_membership() {
        let only = Eligibility::only(["Stack", "Standard Hard"]);
        assert!(only.admits(&Category::new("Stack")));
        assert!(!only.admits(&Category::new("Custom Soft")));
        assert!(Eligibility::All.admits(&Category::new("anything")));
    }
}
