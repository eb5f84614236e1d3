// ==========================================
// 密封件生产计划系统 - 历史记录窗口
// ==========================================
// 职责: 估算/统计前按日期区间与工作日口径筛选历史记录
// 区间: 闭区间 [from, to],任一端缺省表示不限
// ==========================================

use crate::domain::record::HistoricalRecord;
use crate::domain::types::ParseLabelError;
use crate::engine::calendar::WorkCalendar;
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 常用日期区间（以 today 为终点）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DatePreset {
    LastWeek,  // 7 天
    LastMonth, // 30 天
    LastYear,  // 365 天
}

impl DatePreset {
    pub fn days(&self) -> i64 {
        match self {
            DatePreset::LastWeek => 7,
            DatePreset::LastMonth => 30,
            DatePreset::LastYear => 365,
        }
    }
}

impl FromStr for DatePreset {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = normalize(s);
        match normalized.trim_start_matches("last") {
            "week" => Ok(DatePreset::LastWeek),
            "month" => Ok(DatePreset::LastMonth),
            "year" => Ok(DatePreset::LastYear),
            _ => Err(ParseLabelError {
                kind: "日期区间",
                value: s.to_string(),
            }),
        }
    }
}

/// 工作日口径
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DayFilter {
    /// 全部日期
    #[default]
    AllDays,
    /// 仅周一至周五
    Weekdays,
    /// 仅日历中有班次的日期
    ShiftDays,
}

impl fmt::Display for DayFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DayFilter::AllDays => write!(f, "ALL_DAYS"),
            DayFilter::Weekdays => write!(f, "WEEKDAYS"),
            DayFilter::ShiftDays => write!(f, "SHIFT_DAYS"),
        }
    }
}

impl FromStr for DayFilter {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "all" | "alldays" => Ok(DayFilter::AllDays),
            "weekdays" | "workingdays" => Ok(DayFilter::Weekdays),
            "shift" | "shiftdays" => Ok(DayFilter::ShiftDays),
            _ => Err(ParseLabelError {
                kind: "工作日口径",
                value: s.to_string(),
            }),
        }
    }
}

fn normalize(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .collect::<String>()
        .to_ascii_lowercase()
}

// ==========================================
// RecordWindow - 历史记录窗口
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecordWindow {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    #[serde(default)]
    pub days: DayFilter,
}

impl RecordWindow {
    /// 不限日期、不限工作日
    pub fn all() -> Self {
        Self::default()
    }

    pub fn between(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
            days: DayFilter::AllDays,
        }
    }

    /// 以 today 为终点的常用区间
    pub fn preset(preset: DatePreset, today: NaiveDate) -> Self {
        Self::between(today - Duration::days(preset.days()), today)
    }

    pub fn with_days(mut self, days: DayFilter) -> Self {
        self.days = days;
        self
    }

    /// 区间起点晚于终点
    pub fn is_inverted(&self) -> bool {
        matches!((self.from, self.to), (Some(from), Some(to)) if from > to)
    }

    /// 判定某日期是否落在窗口内
    pub fn admits(&self, date: NaiveDate, calendar: &WorkCalendar) -> bool {
        if self.from.is_some_and(|from| date < from) || self.to.is_some_and(|to| date > to) {
            return false;
        }
        match self.days {
            DayFilter::AllDays => true,
            DayFilter::Weekdays => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            DayFilter::ShiftDays => calendar.rule(date.weekday()).is_some(),
        }
    }

    /// 筛选历史记录（保持原有顺序）
    pub fn apply(&self, records: &[HistoricalRecord], calendar: &WorkCalendar) -> Vec<HistoricalRecord> {
        records
            .iter()
            .filter(|r| self.admits(r.date, calendar))
            .cloned()
            .collect()
    }
}
