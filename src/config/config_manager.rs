// ==========================================
// 密封件生产计划系统 - 配置管理器
// ==========================================
// 职责: 启动时加载配置（文件 / 环境变量 / 默认值）
// 说明: 日历在启动时加载一次,不随每次调用重新读取
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::planner_config::PlannerConfig;
use crate::engine::calendar::WorkCalendar;
use std::path::Path;
use tracing::{info, warn};

/// 配置相关环境变量
pub mod config_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "SEAL_PLANNER_CONFIG";
    /// 覆写 max_search_days
    pub const MAX_DAYS: &str = "SEAL_PLANNER_MAX_DAYS";
    /// 日志格式 (`json` 为 JSON 行,其余为文本)
    pub const LOG_FORMAT: &str = "SEAL_PLANNER_LOG_FORMAT";
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: PlannerConfig,
    calendar: WorkCalendar,
}

impl ConfigManager {
    /// 由已有配置创建（会校验并构建日历）
    pub fn new(config: PlannerConfig) -> ConfigResult<Self> {
        config.validate()?;
        let calendar = config.build_calendar()?;
        Ok(Self { config, calendar })
    }

    /// 从 JSON 文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let config = PlannerConfig::from_json_str(&raw)?;
        info!(path = %path.display(), rules = config.calendar.len(), "已加载配置文件");
        Self::new(config)
    }

    /// 从环境变量加载
    ///
    /// # 规则
    /// - SEAL_PLANNER_CONFIG 指定文件时从文件加载,否则使用默认日历
    /// - SEAL_PLANNER_MAX_DAYS 覆写 max_search_days
    pub fn from_env() -> ConfigResult<Self> {
        let mut config = match std::env::var(config_keys::CONFIG_PATH) {
            Ok(path) if !path.trim().is_empty() => Self::load(path.trim())?.config,
            _ => {
                info!("未指定配置文件,使用默认日历");
                PlannerConfig::default()
            }
        };

        if let Ok(raw) = std::env::var(config_keys::MAX_DAYS) {
            config.max_search_days = parse_max_days(&raw)?;
            warn!(max_search_days = config.max_search_days, "max_search_days 已被环境变量覆写");
        }

        Self::new(config)
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    pub fn calendar(&self) -> &WorkCalendar {
        &self.calendar
    }

    /// 获取配置快照（JSON 格式）
    ///
    /// 用途: 上层在保存估算结果时一并记录所用日历
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

fn parse_max_days(raw: &str) -> ConfigResult<u32> {
    match raw.trim().parse::<u32>() {
        Ok(v) if v > 0 => Ok(v),
        _ => Err(ConfigError::InvalidValue {
            key: config_keys::MAX_DAYS.to_string(),
            message: format!("期望正整数,实际 {}", raw),
        }),
    }
}
