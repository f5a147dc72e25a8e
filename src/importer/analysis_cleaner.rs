// ==========================================
// 矿山生产报表 - 产量分析 (Analisa Produksi) 清洗器
// ==========================================
// 工作表: "Analisa Produksi"（第一行为表头）
// 布局: 每个月占 4 列（Tanggal / Plan / Aktual / Ketercapaian）,
//       起始列由配置的月份偏移决定;表头下第 2..=32 行为 31 天数据
// 规则: 四列均转数值（缺失保持缺失）,Tanggal 缺失的行剔除
// ==========================================

use crate::domain::records::ProductionAnalysisRecord;
use crate::domain::table::{CleanOutcome, CleanStats};
use crate::domain::types::{DatasetKind, Month};
use crate::importer::cleaner_trait::DatasetCleaner;
use crate::importer::coerce::to_number;
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::sheet::RawTable;
use tracing::debug;

pub const SHEET_NAME: &str = "Analisa Produksi";

/// 每月块的列数
pub const BLOCK_WIDTH: usize = 4;
/// 表头下首行为子表头,其后 31 行为逐日数据
const SKIP_ROWS: usize = 1;
const DAYS: usize = 31;

#[derive(Debug, Clone)]
pub struct AnalysisCleaner {
    month: Month,
    column_offset: Option<usize>,
}

impl AnalysisCleaner {
    /// # 参数
    /// - month: 月份
    /// - column_offset: 该月数据块的起始列;None 表示该月未配置,结果为空表
    pub fn new(month: Month, column_offset: Option<usize>) -> Self {
        Self {
            month,
            column_offset,
        }
    }

    pub fn column_offset(&self) -> Option<usize> {
        self.column_offset
    }

    fn columns() -> Vec<String> {
        ProductionAnalysisRecord::COLUMNS
            .iter()
            .map(|c| c.to_string())
            .collect()
    }
}

impl DatasetCleaner for AnalysisCleaner {
    type Record = ProductionAnalysisRecord;

    fn dataset(&self) -> DatasetKind {
        DatasetKind::ProductionAnalysis
    }

    fn period(&self) -> Option<Month> {
        Some(self.month)
    }

    fn sheet_name(&self) -> String {
        SHEET_NAME.to_string()
    }

    fn clean(&self, raw: RawTable) -> LoadResult<CleanOutcome<ProductionAnalysisRecord>> {
        let offset = match self.column_offset {
            Some(offset) => offset,
            None => {
                return Ok(CleanOutcome {
                    columns: Self::columns(),
                    rows: Vec::new(),
                    stats: CleanStats::default(),
                })
            }
        };

        if raw.columns().len() < offset + BLOCK_WIDTH {
            return Err(LoadError::MissingColumn(format!(
                "{} 数据块 (起始列 {},需要 {} 列,实际 {} 列)",
                self.month,
                offset,
                offset + BLOCK_WIDTH,
                raw.columns().len()
            )));
        }

        let body: Vec<_> = raw.rows().iter().skip(SKIP_ROWS).take(DAYS).collect();
        let mut stats = CleanStats {
            rows_read: body.len(),
            ..CleanStats::default()
        };

        let rows: Vec<ProductionAnalysisRecord> = body
            .into_iter()
            .filter_map(|row| {
                let day = to_number(row.get(offset))?;
                Some(ProductionAnalysisRecord {
                    month: self.month,
                    day,
                    plan: to_number(row.get(offset + 1)),
                    actual: to_number(row.get(offset + 2)),
                    achievement: to_number(row.get(offset + 3)),
                })
            })
            .collect();

        stats.rows_kept = rows.len();
        debug!(
            month = %self.month,
            offset,
            rows_read = stats.rows_read,
            kept = stats.rows_kept,
            "产量分析清洗完成"
        );

        Ok(CleanOutcome {
            columns: Self::columns(),
            rows,
            stats,
        })
    }
}
