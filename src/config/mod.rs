// ==========================================
// 密封件生产计划系统 - 配置层
// ==========================================
// 职责: 班次日历与估算参数的加载、校验
// 存储: JSON 配置文件 / 环境变量 / 内置默认值
// ==========================================

pub mod config_manager;
pub mod error;
pub mod planner_config;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
pub use error::{ConfigError, ConfigResult};
pub use planner_config::{PlannerConfig, ShiftRuleConfig};
