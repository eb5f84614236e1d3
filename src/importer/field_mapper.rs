// ==========================================
// 密封件生产计划系统 - 字段映射器
// ==========================================
// 职责: 台账列 → HistoricalRecord 字段 + 类型转换
// ==========================================

use crate::domain::record::HistoricalRecord;
use crate::importer::error::{ImportError, ImportResult};
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::HashMap;

// ===== 台账列名 =====
pub const COL_DATE: &str = "Date";
pub const COL_COMPANY: &str = "Company";
pub const COL_SEAL_COUNT: &str = "Seal Count";
pub const COL_OPERATOR: &str = "Operator";
pub const COL_SEAL_TYPE: &str = "Seal Type";
pub const COL_PRODUCTION_TIME: &str = "Production Time";
pub const COL_DOWNTIME: &str = "Downtime";
pub const COL_DOWNTIME_REASON: &str = "Reason for Downtime";

/// 必需列
pub const REQUIRED_COLUMNS: [&str; 4] = [COL_DATE, COL_SEAL_COUNT, COL_SEAL_TYPE, COL_PRODUCTION_TIME];

pub struct FieldMapper;

impl FieldMapper {
    /// 映射一行
    ///
    /// # 参数
    /// - row: 列名 → 单元格文本（已去空白）
    /// - row_number: 文件行号（用于报错）
    pub fn map_to_record(&self, row: &HashMap<String, String>, row_number: u64) -> ImportResult<HistoricalRecord> {
        let date = self.parse_date(row, COL_DATE, row_number)?;
        let seal_type = self.required_string(row, COL_SEAL_TYPE, row_number)?;
        let unit_count = self.parse_count(row, COL_SEAL_COUNT, row_number)?;
        let production_minutes = self
            .parse_minutes(row, COL_PRODUCTION_TIME, row_number)?
            .ok_or_else(|| ImportError::RequiredFieldMissing {
                row: row_number,
                field: COL_PRODUCTION_TIME.to_string(),
            })?;
        let downtime_minutes = self.parse_minutes(row, COL_DOWNTIME, row_number)?.unwrap_or(0.0);

        let record = HistoricalRecord::new(
            date,
            seal_type,
            self.get_string(row, COL_COMPANY).unwrap_or_default(),
            self.get_string(row, COL_OPERATOR).unwrap_or_default(),
            unit_count,
            production_minutes,
        )
        .with_downtime(downtime_minutes, self.get_string(row, COL_DOWNTIME_REASON));

        Ok(record)
    }

    fn get_string(&self, row: &HashMap<String, String>, field: &str) -> Option<String> {
        row.get(field)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn required_string(&self, row: &HashMap<String, String>, field: &str, row_number: u64) -> ImportResult<String> {
        self.get_string(row, field)
            .ok_or_else(|| ImportError::RequiredFieldMissing {
                row: row_number,
                field: field.to_string(),
            })
    }

    /// 解析日期（支持 YYYY-MM-DD 与 YYYY-MM-DD HH:MM:SS）
    fn parse_date(&self, row: &HashMap<String, String>, field: &str, row_number: u64) -> ImportResult<NaiveDate> {
        let value = self.required_string(row, field, row_number)?;
        NaiveDate::parse_from_str(&value, "%Y-%m-%d")
            .or_else(|_| NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
            .map_err(|_| ImportError::DateFormatError {
                row: row_number,
                field: field.to_string(),
                value,
            })
    }

    /// 解析件数（允许 "12.0" 这类整数值浮点写法）
    fn parse_count(&self, row: &HashMap<String, String>, field: &str, row_number: u64) -> ImportResult<u32> {
        let value = self.required_string(row, field, row_number)?;
        if let Ok(v) = value.parse::<u32>() {
            return Ok(v);
        }
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 && v.fract() == 0.0 && v <= u32::MAX as f64 => Ok(v as u32),
            _ => Err(ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("期望非负整数,实际 {}", value),
            }),
        }
    }

    /// 解析分钟数（空值返回 None）
    fn parse_minutes(&self, row: &HashMap<String, String>, field: &str, row_number: u64) -> ImportResult<Option<f64>> {
        let Some(value) = self.get_string(row, field) else {
            return Ok(None);
        };
        match value.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => Ok(Some(v)),
            _ => Err(ImportError::TypeConversionError {
                row: row_number,
                field: field.to_string(),
                message: format!("期望非负数,实际 {}", value),
            }),
        }
    }
}
