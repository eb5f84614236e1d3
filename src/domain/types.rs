// ==========================================
// 密封件生产计划系统 - 领域类型定义
// ==========================================
// 职责: 订单类别、密封件类型、分组维度、工时口径
// 红线: 类别只在日历准入集合上做一次集合判定,不做散落的字符串分支
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// 标签解析失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("无法识别的{kind}: {value}")]
pub struct ParseLabelError {
    pub kind: &'static str,
    pub value: String,
}

// ==========================================
// 订单类别 (Category)
// ==========================================
// 通常是密封件类型标签,也允许历史数据中出现的自由标签
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Category(String);

impl Category {
    /// 创建类别（自动去除首尾空白）
    pub fn new(label: impl AsRef<str>) -> Self {
        Self(label.as_ref().trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Category {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.0
    }
}

impl From<SealType> for Category {
    fn from(value: SealType) -> Self {
        value.category()
    }
}

// ==========================================
// 密封件类型 (Seal Type)
// ==========================================
// 标签与车间订单台账保持一致
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SealType {
    #[serde(rename = "Standard Soft")]
    StandardSoft,
    #[serde(rename = "Standard Hard")]
    StandardHard,
    #[serde(rename = "Custom Soft")]
    CustomSoft,
    #[serde(rename = "Custom Hard")]
    CustomHard,
    #[serde(rename = "V-Rings")]
    VRings,
    #[serde(rename = "Stack")]
    Stack,
    #[serde(rename = "Special")]
    Special,
}

impl SealType {
    pub const ALL: [SealType; 7] = [
        SealType::StandardSoft,
        SealType::StandardHard,
        SealType::CustomSoft,
        SealType::CustomHard,
        SealType::VRings,
        SealType::Stack,
        SealType::Special,
    ];

    /// 台账标签
    pub fn label(&self) -> &'static str {
        match self {
            SealType::StandardSoft => "Standard Soft",
            SealType::StandardHard => "Standard Hard",
            SealType::CustomSoft => "Custom Soft",
            SealType::CustomHard => "Custom Hard",
            SealType::VRings => "V-Rings",
            SealType::Stack => "Stack",
            SealType::Special => "Special",
        }
    }

    pub fn category(&self) -> Category {
        Category::new(self.label())
    }
}

impl fmt::Display for SealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SealType {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SealType::ALL
            .iter()
            .copied()
            .find(|t| t.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseLabelError {
                kind: "密封件类型",
                value: s.to_string(),
            })
    }
}

// ==========================================
// 分组维度 (Dimension)
// ==========================================
// 用途: 产能估算按维度分组
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Dimension {
    SealType,
    Company,
    Operator,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::SealType => "SealType",
            Dimension::Company => "Company",
            Dimension::Operator => "Operator",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = ParseLabelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();

        match normalized.as_str() {
            "sealtype" => Ok(Dimension::SealType),
            "company" => Ok(Dimension::Company),
            "operator" => Ok(Dimension::Operator),
            _ => Err(ParseLabelError {
                kind: "分组维度",
                value: s.to_string(),
            }),
        }
    }
}

// ==========================================
// 工时口径 (Rate Basis)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与配置文件一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RateBasis {
    /// 仅生产时间
    #[default]
    ProductionOnly,
    /// 生产时间 + 停机时间
    IncludingDowntime,
}

impl fmt::Display for RateBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateBasis::ProductionOnly => write!(f, "PRODUCTION_ONLY"),
            RateBasis::IncludingDowntime => write!(f, "INCLUDING_DOWNTIME"),
        }
    }
}
