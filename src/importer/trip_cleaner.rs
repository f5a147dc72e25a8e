// ==========================================
// 矿山生产报表 - 运输趟次 (Ritase) 清洗器
// ==========================================
// 工作表: "Ritase"（第一行为表头）
// 规则:
//   - 列限定为白名单 ∩ 实际存在的列（表头匹配忽略首尾空白）
//   - 日期不可解析的行剔除
//   - 班次只接受 1 / 2 / 3（数字或文本）,统一输出文本
//   - 作业面列转数值,缺失记 0
// ==========================================

use crate::domain::records::TripRecord;
use crate::domain::table::{CleanOutcome, CleanStats};
use crate::domain::types::{DatasetKind, TripShift};
use crate::importer::cleaner_trait::DatasetCleaner;
use crate::importer::coerce::{to_date, to_number_or_zero, to_text_or_empty};
use crate::importer::error::LoadResult;
use crate::importer::sheet::{Cell, RawTable};
use tracing::debug;

pub const SHEET_NAME: &str = "Ritase";

const COL_DATE: &str = "Tanggal";
const COL_SHIFT: &str = "Shift";
const COL_SUPERVISOR: &str = "Pengawasan";

/// 作业面列白名单（源表顺序）
pub const FRONT_COLUMNS: [&str; 13] = [
    "Front B LS",
    "Front B Clay",
    "Front B LS MIX",
    "Front C LS",
    "Front C LS MIX",
    "PLB LS",
    "PLB SS",
    "PLT SS",
    "PLT MIX",
    "Timbunan",
    "Stockpile 6  SS",
    "PLT LS MIX",
    "Stockpile 6",
];

#[derive(Debug, Clone)]
pub struct TripCleaner {
    front_columns: Vec<String>,
}

impl Default for TripCleaner {
    fn default() -> Self {
        Self {
            front_columns: FRONT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl TripCleaner {
    pub fn new() -> Self {
        Self::default()
    }

    /// 替换作业面白名单（新增作业面时使用）
    pub fn with_front_columns(mut self, front_columns: Vec<String>) -> Self {
        self.front_columns = front_columns;
        self
    }

    fn shift_of(cell: &Cell) -> Option<TripShift> {
        match cell {
            Cell::Number(n) => TripShift::from_number(*n),
            Cell::Text(s) => TripShift::from_text(s),
            _ => None,
        }
    }
}

impl DatasetCleaner for TripCleaner {
    type Record = TripRecord;

    fn dataset(&self) -> DatasetKind {
        DatasetKind::Trips
    }

    fn sheet_name(&self) -> String {
        SHEET_NAME.to_string()
    }

    fn clean(&self, raw: RawTable) -> LoadResult<CleanOutcome<TripRecord>> {
        let required = raw.require(&[COL_DATE, COL_SHIFT])?;
        let (date_idx, shift_idx) = (required[0], required[1]);
        let supervisor_idx = raw.column_index(COL_SUPERVISOR);

        let fronts: Vec<(usize, &str)> = self
            .front_columns
            .iter()
            .filter_map(|name| raw.column_index(name).map(|idx| (idx, name.trim())))
            .collect();

        let mut columns = vec![COL_DATE.to_string(), COL_SHIFT.to_string()];
        if supervisor_idx.is_some() {
            columns.push(COL_SUPERVISOR.to_string());
        }
        columns.extend(fronts.iter().map(|(_, name)| name.to_string()));

        let mut stats = CleanStats {
            rows_read: raw.len(),
            ..CleanStats::default()
        };

        let rows: Vec<TripRecord> = raw
            .rows()
            .iter()
            .filter_map(|row| {
                let date = to_date(row.get(date_idx))?;
                let shift = Self::shift_of(row.get(shift_idx))?;
                Some(TripRecord {
                    date,
                    shift,
                    supervisor: to_text_or_empty(row.get_opt(supervisor_idx)),
                    fronts: fronts
                        .iter()
                        .map(|(idx, name)| (name.to_string(), to_number_or_zero(row.get(*idx))))
                        .collect(),
                })
            })
            .collect();

        stats.rows_kept = rows.len();
        debug!(
            rows_read = stats.rows_read,
            fronts = fronts.len(),
            kept = stats.rows_kept,
            "运输趟次清洗完成"
        );

        Ok(CleanOutcome {
            columns,
            rows,
            stats,
        })
    }
}
