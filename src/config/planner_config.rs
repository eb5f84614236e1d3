// ==========================================
// 密封件生产计划系统 - 计划配置
// ==========================================
// 职责: 班次日历与估算参数的文件格式、默认值、校验
// 格式: JSON；时间 HH:MM / HH:MM:SS；工作日 Mon..Sun
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::calendar::ShiftRule;
use crate::domain::types::{Category, Dimension, RateBasis};
use crate::engine::calendar::WorkCalendar;
use crate::engine::projector::DEFAULT_MAX_DAYS;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// 班次规则配置（文件格式）
///
/// 时间格式 `HH:MM` 或 `HH:MM:SS`；`allowed_categories` 缺省表示全部类别
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftRuleConfig {
    pub weekday: String,
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_start: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub break_end: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_categories: Option<Vec<Category>>,
}

impl ShiftRuleConfig {
    fn weekday_shift(weekday: &str, start: &str, end: &str) -> Self {
        Self {
            weekday: weekday.to_string(),
            start: start.to_string(),
            end: end.to_string(),
            break_start: Some("12:00".to_string()),
            break_end: Some("13:00".to_string()),
            allowed_categories: None,
        }
    }

    /// 转换为领域班次规则
    pub fn to_rule(&self) -> ConfigResult<ShiftRule> {
        let weekday: Weekday = self
            .weekday
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidWeekday(self.weekday.clone()))?;

        let mut rule = ShiftRule::new(weekday, parse_time(&self.start)?, parse_time(&self.end)?)?;

        match (&self.break_start, &self.break_end) {
            (Some(bs), Some(be)) => {
                rule = rule.with_break(parse_time(bs)?, parse_time(be)?)?;
            }
            (None, None) => {}
            _ => {
                return Err(ConfigError::IncompleteBreak(self.weekday.clone()));
            }
        }

        if let Some(categories) = &self.allowed_categories {
            rule = rule.restricted_to(categories.iter().cloned());
        }
        Ok(rule)
    }
}

fn parse_time(raw: &str) -> ConfigResult<NaiveTime> {
    let value = raw.trim();
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| ConfigError::InvalidTime(raw.to_string()))
}

// ==========================================
// PlannerConfig - 计划系统配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub calendar: Vec<ShiftRuleConfig>,

    #[serde(default = "default_max_search_days")]
    pub max_search_days: u32,

    #[serde(default)]
    pub rate_basis: RateBasis,

    #[serde(default = "default_group_by")]
    pub default_group_by: Dimension,
}

fn default_max_search_days() -> u32 {
    DEFAULT_MAX_DAYS
}

fn default_group_by() -> Dimension {
    Dimension::SealType
}

impl Default for PlannerConfig {
    /// 车间默认日历
    ///
    /// - 周一至周四 06:30-17:00,午休 12:00-13:00
    /// - 周五 08:30-17:00,午休 12:00-13:00,仅叠装件与标准硬质件
    /// - 周末不开工
    fn default() -> Self {
        let mut calendar: Vec<ShiftRuleConfig> = ["Mon", "Tue", "Wed", "Thu"]
            .iter()
            .map(|d| ShiftRuleConfig::weekday_shift(d, "06:30", "17:00"))
            .collect();

        let mut friday = ShiftRuleConfig::weekday_shift("Fri", "08:30", "17:00");
        friday.allowed_categories = Some(vec![Category::new("Stack"), Category::new("Standard Hard")]);
        calendar.push(friday);

        Self {
            calendar,
            max_search_days: DEFAULT_MAX_DAYS,
            rate_basis: RateBasis::default(),
            default_group_by: default_group_by(),
        }
    }
}

impl PlannerConfig {
    /// 解析 JSON 配置
    pub fn from_json_str(raw: &str) -> ConfigResult<Self> {
        let config: PlannerConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// 校验配置（日历可构建、搜索天数为正）
    pub fn validate(&self) -> ConfigResult<()> {
        if self.max_search_days == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_search_days".to_string(),
                message: "必须大于 0".to_string(),
            });
        }
        self.build_calendar().map(|_| ())
    }

    /// 构建工作日历
    pub fn build_calendar(&self) -> ConfigResult<WorkCalendar> {
        let rules = self
            .calendar
            .iter()
            .map(ShiftRuleConfig::to_rule)
            .collect::<ConfigResult<Vec<_>>>()?;
        Ok(WorkCalendar::new(rules)?)
    }
}
