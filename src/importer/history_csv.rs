// ==========================================
// 密封件生产计划系统 - 订单台账 CSV 导入
// ==========================================
// 职责: 台账 CSV → HistoricalRecord 快照
// 规则: 行级错误 (含编码错误) 进入导入报告,不中止整体导入；空白行跳过
// ==========================================

use crate::domain::record::HistoricalRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{FieldMapper, REQUIRED_COLUMNS};
use csv::ReaderBuilder;
use serde::Serialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

/// 被拒绝的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    pub row_number: u64,
    pub reason: String,
}

/// 导入报告
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub records: Vec<HistoricalRecord>,
    pub rejected: Vec<RowRejection>,
    pub skipped_blank: usize,
}

impl ImportReport {
    pub fn is_clean(&self) -> bool {
        self.rejected.is_empty()
    }
}

// ==========================================
// HistoryCsvImporter
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct HistoryCsvImporter;

impl HistoryCsvImporter {
    pub fn new() -> Self {
        Self
    }

    /// 从文件导入
    pub fn import_file(&self, path: impl AsRef<Path>) -> ImportResult<ImportReport> {
        let path = path.as_ref();

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(ext.to_string_lossy().to_string()));
            }
        }

        let file = File::open(path)?;
        let report = self.import_reader(file)?;
        info!(
            path = %path.display(),
            records = report.records.len(),
            rejected = report.rejected.len(),
            "台账导入完成"
        );
        Ok(report)
    }

    /// 从任意读取源导入
    pub fn import_reader<R: Read>(&self, reader: R) -> ImportResult<ImportReport> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader.headers()?.iter().map(|h| h.trim().to_string()).collect();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ImportError::MissingColumn(column.to_string()));
            }
        }

        let mapper = FieldMapper;
        let mut report = ImportReport::default();

        for (idx, result) in reader.records().enumerate() {
            let fallback_row = idx as u64 + 2;
            let record = match result {
                Ok(record) => record,
                // 非 UTF-8 行 (如 cp1250 编码的台账) 记入报告,继续读取后续行
                Err(e) if matches!(e.kind(), csv::ErrorKind::Utf8 { .. }) => {
                    let row_number = e.position().map(|p| p.line()).unwrap_or(fallback_row);
                    warn!(row_number, error = %e, "台账行编码无效");
                    report.rejected.push(RowRejection {
                        row_number,
                        reason: format!("行编码不是 UTF-8: {}", e),
                    });
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            let row_number = record
                .position()
                .map(|p| p.line())
                .unwrap_or(fallback_row);

            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }

            // 跳过完全空白的行
            if row_map.values().all(|v| v.is_empty()) {
                report.skipped_blank += 1;
                continue;
            }

            match mapper.map_to_record(&row_map, row_number) {
                Ok(mapped) => report.records.push(mapped),
                Err(e) => {
                    warn!(row_number, error = %e, "台账行被拒绝");
                    report.rejected.push(RowRejection {
                        row_number,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }
}
