// ==========================================
// 密封件生产计划系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误,向 UI / 报表层提供明确原因
// ==========================================

use crate::config::ConfigError;
use crate::engine::error::EngineError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("排程计算失败: {0}")]
    Engine(#[from] EngineError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("导入失败: {0}")]
    Import(#[from] ImportError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
