// ==========================================
// 矿山生产报表 - 停机记录清洗器
// ==========================================
// 工作表: "Monitoring <Bulan>"（首行为标题,次行为表头）
// 规则: 前三列固定命名 Row Labels / Frekuensi / Persentase;
//       剔除表头回灌行与 "Grand Total" 汇总行;频次必须 > 0
// 顺序: 保持源表顺序,排序由调用方负责
// ==========================================

use crate::domain::records::DisruptionRecord;
use crate::domain::table::{CleanOutcome, CleanStats};
use crate::domain::types::{DatasetKind, Month};
use crate::importer::cleaner_trait::DatasetCleaner;
use crate::importer::coerce::{to_number, to_text_or_empty};
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::sheet::RawTable;
use tracing::debug;

pub const HEADER_LABEL: &str = "Row Labels";
pub const GRAND_TOTAL_LABEL: &str = "Grand Total";

#[derive(Debug, Clone)]
pub struct DisruptionCleaner {
    month: Month,
    title_rows: usize,
}

impl DisruptionCleaner {
    pub fn new(month: Month) -> Self {
        Self {
            month,
            title_rows: 1,
        }
    }

    pub fn with_title_rows(mut self, title_rows: usize) -> Self {
        self.title_rows = title_rows;
        self
    }
}

impl DatasetCleaner for DisruptionCleaner {
    type Record = DisruptionRecord;

    fn dataset(&self) -> DatasetKind {
        DatasetKind::Disruption
    }

    fn period(&self) -> Option<Month> {
        Some(self.month)
    }

    fn sheet_name(&self) -> String {
        self.month.disruption_sheet()
    }

    fn header_row(&self) -> usize {
        self.title_rows
    }

    fn clean(&self, raw: RawTable) -> LoadResult<CleanOutcome<DisruptionRecord>> {
        if raw.columns().len() < DisruptionRecord::COLUMNS.len() {
            return Err(LoadError::MissingColumn(format!(
                "{} (至少需要 {} 列,实际 {} 列)",
                DisruptionRecord::COLUMNS.join(" / "),
                DisruptionRecord::COLUMNS.len(),
                raw.columns().len()
            )));
        }

        let mut stats = CleanStats {
            rows_read: raw.len(),
            ..CleanStats::default()
        };

        let rows: Vec<DisruptionRecord> = raw
            .rows()
            .iter()
            .filter(|row| {
                let label = row.get(0);
                !label.is_literal(HEADER_LABEL) && !label.is_literal(GRAND_TOTAL_LABEL)
            })
            .filter_map(|row| {
                let frequency = to_number(row.get(1)).filter(|f| *f > 0.0)?;
                Some(DisruptionRecord {
                    month: self.month,
                    label: to_text_or_empty(row.get(0)),
                    frequency,
                    percentage: to_number(row.get(2)),
                })
            })
            .collect();

        stats.rows_kept = rows.len();
        debug!(
            month = %self.month,
            rows_read = stats.rows_read,
            kept = stats.rows_kept,
            "停机记录清洗完成"
        );

        Ok(CleanOutcome {
            columns: DisruptionRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
            stats,
        })
    }
}
