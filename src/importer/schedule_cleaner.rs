// ==========================================
// 矿山生产报表 - 日计划 / 实绩清洗器
// ==========================================
// 工作表: "W22 Scheduling"（计划） / "W22 realisasi"（实绩）
// 规则:
//   - 跳过标题行,下一行提升为表头（空白 → Unnamed: N,重复 → 名.N）
//   - 列数足够时按位置套用标准列名（源表表头常为合并单元格）
//   - 列限定为白名单 ∩ 实际存在的列
//   - 剔除白名单列全空的行;剔除 Hari 缺失或为字面值 "Hari" 的行
// ==========================================

use crate::domain::records::{PlanRecord, RealizationRecord};
use crate::domain::table::{CleanOutcome, CleanStats, TableRow};
use crate::domain::types::DatasetKind;
use crate::importer::cleaner_trait::DatasetCleaner;
use crate::importer::coerce::{to_date, to_number, to_text};
use crate::importer::error::LoadResult;
use crate::importer::sheet::{Cell, RawTable};
use std::marker::PhantomData;
use tracing::debug;

const COL_DAY: &str = "Hari";

// ==========================================
// ScheduleRecord Trait
// ==========================================
// 用途: 描述一种排程表（列布局 + 字段赋值）
// 实现者: PlanRecord, RealizationRecord
pub trait ScheduleRecord: TableRow + Default + Send + Sync + 'static {
    const DATASET: DatasetKind;
    const DEFAULT_SHEET: &'static str;
    /// 源表按位置排列的标准列名（含序号列 No）
    const POSITIONAL_COLUMNS: &'static [&'static str];
    /// 输出列白名单
    const COLUMNS: &'static [&'static str];

    /// 按列名写入字段
    fn assign(&mut self, column: &str, cell: &Cell);
}

fn assign_text(slot: &mut Option<String>, cell: &Cell) {
    *slot = to_text(cell);
}

impl ScheduleRecord for PlanRecord {
    const DATASET: DatasetKind = DatasetKind::Plan;
    const DEFAULT_SHEET: &'static str = "W22 Scheduling";
    const POSITIONAL_COLUMNS: &'static [&'static str] = &[
        "No",
        "Hari",
        "Tanggal",
        "Shift",
        "Batu Kapur",
        "Silika",
        "Clay",
        "Alat Muat",
        "Alat Angkut",
        "Blok",
        "Grid",
        "ROM",
        "Keterangan",
    ];
    const COLUMNS: &'static [&'static str] = &[
        "Hari",
        "Tanggal",
        "Shift",
        "Batu Kapur",
        "Silika",
        "Clay",
        "Alat Muat",
        "Alat Angkut",
        "Blok",
        "Grid",
        "ROM",
        "Keterangan",
    ];

    fn assign(&mut self, column: &str, cell: &Cell) {
        match column {
            "Hari" => assign_text(&mut self.day, cell),
            "Tanggal" => self.date = to_date(cell),
            "Shift" => assign_text(&mut self.shift, cell),
            "Batu Kapur" => self.limestone = to_number(cell),
            "Silika" => self.silica = to_number(cell),
            "Clay" => self.clay = to_number(cell),
            "Alat Muat" => assign_text(&mut self.loading_equipment, cell),
            "Alat Angkut" => assign_text(&mut self.hauling_equipment, cell),
            "Blok" => assign_text(&mut self.block, cell),
            "Grid" => assign_text(&mut self.grid, cell),
            "ROM" => assign_text(&mut self.rom, cell),
            "Keterangan" => assign_text(&mut self.remarks, cell),
            _ => {}
        }
    }
}

impl ScheduleRecord for RealizationRecord {
    const DATASET: DatasetKind = DatasetKind::Realization;
    const DEFAULT_SHEET: &'static str = "W22 realisasi";
    const POSITIONAL_COLUMNS: &'static [&'static str] = &[
        "No",
        "Hari",
        "Tanggal",
        "Week",
        "Shift",
        "Batu Kapur",
        "Silika",
        "Timbunan",
        "Alat Bor",
        "Alat Muat",
        "Alat Angkut",
        "Blok",
        "Grid",
        "ROM",
        "Keterangan",
    ];
    const COLUMNS: &'static [&'static str] = &[
        "Hari",
        "Tanggal",
        "Week",
        "Shift",
        "Batu Kapur",
        "Silika",
        "Timbunan",
        "Alat Bor",
        "Alat Muat",
        "Alat Angkut",
        "Blok",
        "Grid",
        "ROM",
        "Keterangan",
    ];

    fn assign(&mut self, column: &str, cell: &Cell) {
        match column {
            "Hari" => assign_text(&mut self.day, cell),
            "Tanggal" => self.date = to_date(cell),
            "Week" => assign_text(&mut self.week, cell),
            "Shift" => assign_text(&mut self.shift, cell),
            "Batu Kapur" => self.limestone = to_number(cell),
            "Silika" => self.silica = to_number(cell),
            "Timbunan" => self.overburden = to_number(cell),
            "Alat Bor" => assign_text(&mut self.drilling_equipment, cell),
            "Alat Muat" => assign_text(&mut self.loading_equipment, cell),
            "Alat Angkut" => assign_text(&mut self.hauling_equipment, cell),
            "Blok" => assign_text(&mut self.block, cell),
            "Grid" => assign_text(&mut self.grid, cell),
            "ROM" => assign_text(&mut self.rom, cell),
            "Keterangan" => assign_text(&mut self.remarks, cell),
            _ => {}
        }
    }
}

// ==========================================
// ScheduleCleaner - 计划 / 实绩通用清洗器
// ==========================================
#[derive(Debug, Clone)]
pub struct ScheduleCleaner<R> {
    sheet: String,
    title_rows: usize,
    _record: PhantomData<fn() -> R>,
}

impl<R: ScheduleRecord> Default for ScheduleCleaner<R> {
    fn default() -> Self {
        Self::new(1)
    }
}

impl<R: ScheduleRecord> ScheduleCleaner<R> {
    pub fn new(title_rows: usize) -> Self {
        Self {
            sheet: R::DEFAULT_SHEET.to_string(),
            title_rows,
            _record: PhantomData,
        }
    }

    /// 周次变更时替换工作表名（如 "W23 Scheduling"）
    pub fn with_sheet(mut self, sheet: impl Into<String>) -> Self {
        self.sheet = sheet.into();
        self
    }

    /// 列数足够时按位置套用标准列名,其余列保留原名
    fn apply_positional_names(raw: RawTable) -> RawTable {
        if raw.columns().len() < R::POSITIONAL_COLUMNS.len() {
            return raw;
        }
        let columns: Vec<String> = raw
            .columns()
            .iter()
            .enumerate()
            .map(|(idx, name)| match R::POSITIONAL_COLUMNS.get(idx) {
                Some(canonical) => canonical.to_string(),
                None => name.clone(),
            })
            .collect();
        RawTable::new(columns, raw.into_rows())
    }
}

pub type PlanCleaner = ScheduleCleaner<PlanRecord>;
pub type RealizationCleaner = ScheduleCleaner<RealizationRecord>;

impl<R: ScheduleRecord> DatasetCleaner for ScheduleCleaner<R> {
    type Record = R;

    fn dataset(&self) -> DatasetKind {
        R::DATASET
    }

    fn sheet_name(&self) -> String {
        self.sheet.clone()
    }

    fn header_row(&self) -> usize {
        self.title_rows
    }

    fn clean(&self, raw: RawTable) -> LoadResult<CleanOutcome<R>> {
        let raw = Self::apply_positional_names(raw);

        let kept: Vec<(usize, &'static str)> = R::COLUMNS
            .iter()
            .filter_map(|name| raw.column_index(name).map(|idx| (idx, *name)))
            .collect();
        let kept_indices: Vec<usize> = kept.iter().map(|(idx, _)| *idx).collect();
        let day_idx = raw.column_index(COL_DAY);

        let mut stats = CleanStats {
            rows_read: raw.len(),
            ..CleanStats::default()
        };

        let rows: Vec<R> = raw
            .rows()
            .iter()
            .filter(|row| !row.is_blank_over(&kept_indices))
            .filter(|row| match day_idx {
                Some(idx) => {
                    let day = row.get(idx);
                    !day.is_missing() && !day.is_literal(COL_DAY)
                }
                None => true,
            })
            .map(|row| {
                let mut record = R::default();
                for (idx, name) in &kept {
                    record.assign(name, row.get(*idx));
                }
                record
            })
            .collect();

        stats.rows_kept = rows.len();
        debug!(
            dataset = %R::DATASET,
            sheet = %self.sheet,
            rows_read = stats.rows_read,
            columns = kept.len(),
            kept = stats.rows_kept,
            "排程表清洗完成"
        );

        Ok(CleanOutcome {
            columns: kept.iter().map(|(_, name)| name.to_string()).collect(),
            rows,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::sheet::{RawRow, SheetGrid};
    use chrono::NaiveDate;

    fn plan_header() -> Vec<Cell> {
        PlanRecord::POSITIONAL_COLUMNS
            .iter()
            .map(|c| Cell::text(*c))
            .collect()
    }

    fn plan_sheet() -> SheetGrid {
        let mut data = vec![
            Cell::Number(1.0),
            Cell::text("Senin"),
            Cell::text("2025-05-26"),
            Cell::text("Shift 1"),
            Cell::Number(1200.0),
            Cell::Number(300.0),
            Cell::Empty,
            Cell::text("PC-2000"),
            Cell::text("HD-785"),
            Cell::text("B-12"),
            Cell::text("G7"),
            Cell::text("ROM 1"),
            Cell::text("Produksi"),
        ];
        let mut blank_day = data.clone();
        blank_day[1] = Cell::Empty;
        data.push(Cell::text("ekstra"));

        SheetGrid::new(vec![
            vec![Cell::text("DAILY PLAN W22")],
            plan_header(),
            data,
            plan_header(),
            blank_day,
            vec![Cell::Empty; 13],
        ])
    }

    #[test]
    fn test_plan_clean() {
        let cleaner = PlanCleaner::default();
        let raw = RawTable::from_grid(plan_sheet(), cleaner.header_row());
        let out = cleaner.clean(raw).unwrap();

        assert_eq!(out.rows.len(), 1);
        let row = &out.rows[0];
        assert_eq!(row.day.as_deref(), Some("Senin"));
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 5, 26));
        assert_eq!(row.limestone, Some(1200.0));
        assert_eq!(row.clay, None);
        assert_eq!(row.remarks.as_deref(), Some("Produksi"));
        assert_eq!(out.columns, PlanRecord::COLUMNS.to_vec());
        assert_eq!(out.stats.rows_excluded(), 3);
    }

    #[test]
    fn test_positional_names_applied_to_merged_header() {
        // 合并单元格表头: 只有部分列有名字
        let mut header = vec![Cell::Empty; 13];
        header[1] = Cell::text("HARI / TANGGAL");
        header[4] = Cell::text("TARGET");
        let mut data = vec![Cell::Empty; 13];
        data[1] = Cell::text("Selasa");
        data[4] = Cell::Number(800.0);

        let grid = SheetGrid::new(vec![vec![Cell::text("judul")], header, data]);
        let out = PlanCleaner::default()
            .clean(RawTable::from_grid(grid, 1))
            .unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].day.as_deref(), Some("Selasa"));
        assert_eq!(out.rows[0].limestone, Some(800.0));
    }

    #[test]
    fn test_narrow_sheet_uses_header_names() {
        let raw = RawTable::new(
            vec!["Hari".to_string(), "Unnamed: 1".to_string(), "Keterangan".to_string()],
            vec![
                RawRow::new(3, vec![Cell::text("Rabu"), Cell::Number(5.0), Cell::text("Hujan")]),
                RawRow::new(4, vec![Cell::text("Hari"), Cell::Empty, Cell::text("Keterangan")]),
            ],
        );
        let out = PlanCleaner::default().clean(raw).unwrap();
        assert_eq!(out.columns, vec!["Hari", "Keterangan"]);
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].remarks.as_deref(), Some("Hujan"));
    }

    #[test]
    fn test_without_day_column_only_blank_rows_dropped() {
        let raw = RawTable::new(
            vec!["Tanggal".to_string(), "Keterangan".to_string()],
            vec![
                RawRow::new(3, vec![Cell::text("2025-05-27"), Cell::Empty]),
                RawRow::new(4, vec![Cell::Empty, Cell::text("  ")]),
            ],
        );
        let out = RealizationCleaner::default().clean(raw).unwrap();
        assert_eq!(out.rows.len(), 1);
        assert_eq!(out.rows[0].date, NaiveDate::from_ymd_opt(2025, 5, 27));
    }

    #[test]
    fn test_realization_fields() {
        let header: Vec<Cell> = RealizationRecord::POSITIONAL_COLUMNS
            .iter()
            .map(|c| Cell::text(*c))
            .collect();
        let data = vec![
            Cell::Number(1.0),
            Cell::text("Kamis"),
            Cell::text("2025-05-29"),
            Cell::text("W22"),
            Cell::text("Shift 2"),
            Cell::Number(900.0),
            Cell::Number(120.5),
            Cell::Number(40.0),
            Cell::text("DR-01"),
            Cell::text("PC-1250"),
            Cell::text("HD-465"),
            Cell::text("C-3"),
            Cell::text("G2"),
            Cell::text("ROM 2"),
            Cell::Empty,
        ];
        let grid = SheetGrid::new(vec![vec![Cell::text("REALISASI")], header, data]);
        let cleaner = RealizationCleaner::default();
        let out = cleaner.clean(RawTable::from_grid(grid, 1)).unwrap();

        assert_eq!(cleaner.sheet_name(), "W22 realisasi");
        let row = &out.rows[0];
        assert_eq!(row.week.as_deref(), Some("W22"));
        assert_eq!(row.overburden, Some(40.0));
        assert_eq!(row.drilling_equipment.as_deref(), Some("DR-01"));
        assert_eq!(row.remarks, None);
    }

    #[test]
    fn test_custom_sheet_name() {
        let cleaner = PlanCleaner::new(2).with_sheet("W23 Scheduling");
        assert_eq!(cleaner.sheet_name(), "W23 Scheduling");
        assert_eq!(cleaner.header_row(), 2);
        assert_eq!(cleaner.dataset(), DatasetKind::Plan);
    }
}
