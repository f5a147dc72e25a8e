// ==========================================
// 矿山生产报表 - 油耗 (BBM) 清洗器
// ==========================================
// 工作表: "BBM"（第一行为表头）
// 规则:
//   - Total 列字面值为 "Total" 的行是表头回灌,在数值转换之前剔除
//   - Total 与每日列转数值,缺失记 0（未记录即无消耗）
//   - No 与 Alat Berat 均非缺失才保留
// ==========================================

use crate::domain::records::FuelRecord;
use crate::domain::table::{CleanOutcome, CleanStats};
use crate::domain::types::DatasetKind;
use crate::importer::cleaner_trait::DatasetCleaner;
use crate::importer::coerce::{to_number_or_zero, to_text_or_empty};
use crate::importer::error::LoadResult;
use crate::importer::sheet::RawTable;
use tracing::debug;

pub const SHEET_NAME: &str = "BBM";

const COL_NUMBER: &str = "No";
const COL_CLASS: &str = "Alat Berat";
const COL_TYPE: &str = "Tipe Alat";
const COL_TOTAL: &str = "Total";

const KEY_COLUMNS: [&str; 4] = [COL_NUMBER, COL_CLASS, COL_TYPE, COL_TOTAL];

#[derive(Debug, Clone, Copy, Default)]
pub struct FuelCleaner;

impl FuelCleaner {
    fn is_key_column(name: &str) -> bool {
        KEY_COLUMNS.contains(&name.trim())
    }
}

impl DatasetCleaner for FuelCleaner {
    type Record = FuelRecord;

    fn dataset(&self) -> DatasetKind {
        DatasetKind::Fuel
    }

    fn sheet_name(&self) -> String {
        SHEET_NAME.to_string()
    }

    fn clean(&self, raw: RawTable) -> LoadResult<CleanOutcome<FuelRecord>> {
        let required = raw.require(&[COL_NUMBER, COL_CLASS])?;
        let (number_idx, class_idx) = (required[0], required[1]);
        let type_idx = raw.column_index(COL_TYPE);
        let total_idx = raw.column_index(COL_TOTAL);

        // 每日列: 除关键列与无名占位列外的全部列,保持源表顺序
        let day_columns: Vec<(usize, String)> = raw
            .columns()
            .iter()
            .enumerate()
            .filter(|(_, name)| !Self::is_key_column(name) && !RawTable::is_placeholder_column(name))
            .map(|(idx, name)| (idx, name.clone()))
            .collect();

        let columns: Vec<String> = raw
            .columns()
            .iter()
            .filter(|name| !RawTable::is_placeholder_column(name))
            .cloned()
            .collect();

        let mut stats = CleanStats {
            rows_read: raw.len(),
            ..CleanStats::default()
        };
        let mut header_rows = 0usize;
        let mut rows = Vec::new();

        for row in raw.rows() {
            if let Some(t) = total_idx {
                if row.get(t).is_literal(COL_TOTAL) {
                    header_rows += 1;
                    continue;
                }
            }

            if row.get(number_idx).is_missing() || row.get(class_idx).is_missing() {
                continue;
            }

            rows.push(FuelRecord {
                number: to_text_or_empty(row.get(number_idx)),
                equipment_class: to_text_or_empty(row.get(class_idx)),
                equipment_type: to_text_or_empty(row.get_opt(type_idx)),
                total_liters: total_idx
                    .map(|t| to_number_or_zero(row.get(t)))
                    .unwrap_or(0.0),
                daily_liters: day_columns
                    .iter()
                    .map(|(idx, name)| (name.clone(), to_number_or_zero(row.get(*idx))))
                    .collect(),
            });
        }

        stats.rows_kept = rows.len();
        debug!(
            rows_read = stats.rows_read,
            header_rows,
            day_columns = day_columns.len(),
            kept = stats.rows_kept,
            "油耗记录清洗完成"
        );

        Ok(CleanOutcome {
            columns,
            rows,
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::sheet::{Cell, SheetGrid};

    fn sheet() -> SheetGrid {
        SheetGrid::new(vec![
            vec![
                Cell::text("No"),
                Cell::text("Alat Berat"),
                Cell::text("Tipe Alat"),
                Cell::Number(1.0),
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::text("Total"),
            ],
            vec![
                Cell::Number(1.0),
                Cell::text("Excavator"),
                Cell::text("PC-1250"),
                Cell::Number(120.0),
                Cell::Empty,
                Cell::text("-"),
                Cell::Number(120.0),
            ],
            vec![
                Cell::text("No"),
                Cell::text("Alat Berat"),
                Cell::text("Tipe Alat"),
                Cell::Number(1.0),
                Cell::Number(2.0),
                Cell::Number(3.0),
                Cell::text("Total"),
            ],
            vec![
                Cell::Number(2.0),
                Cell::text("Dump Truck"),
                Cell::text("HD-785"),
                Cell::Number(80.0),
                Cell::Number(75.5),
                Cell::Empty,
                Cell::Empty,
            ],
            vec![
                Cell::Empty,
                Cell::text("Subtotal"),
                Cell::Empty,
                Cell::Number(1.0),
                Cell::Number(1.0),
                Cell::Number(1.0),
                Cell::Number(3.0),
            ],
            vec![
                Cell::Number(3.0),
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
                Cell::Empty,
            ],
        ])
    }

    #[test]
    fn test_clean_fuel_sheet() {
        let out = FuelCleaner.clean(RawTable::from_grid(sheet(), 0)).unwrap();

        assert_eq!(out.rows.len(), 2);
        let first = &out.rows[0];
        assert_eq!(first.number, "1");
        assert_eq!(first.equipment_type, "PC-1250");
        assert_eq!(first.total_liters, 120.0);
        assert_eq!(
            first.daily_liters,
            vec![
                ("1".to_string(), 120.0),
                ("2".to_string(), 0.0),
                ("3".to_string(), 0.0)
            ]
        );

        // 缺失的 Total 记为 0
        assert_eq!(out.rows[1].total_liters, 0.0);
        assert_eq!(out.rows[1].day("2"), Some(75.5));
    }

    #[test]
    fn test_header_row_dropped_before_coercion() {
        let out = FuelCleaner.clean(RawTable::from_grid(sheet(), 0)).unwrap();
        assert!(out.rows.iter().all(|r| r.number != "No"));
        assert_eq!(out.stats.rows_read, 5);
        assert_eq!(out.stats.rows_excluded(), 3);
    }

    #[test]
    fn test_columns_follow_source_order() {
        let out = FuelCleaner.clean(RawTable::from_grid(sheet(), 0)).unwrap();
        assert_eq!(
            out.columns,
            vec!["No", "Alat Berat", "Tipe Alat", "1", "2", "3", "Total"]
        );
    }

    #[test]
    fn test_requires_key_columns() {
        let raw = RawTable::new(vec!["No".to_string(), "Total".to_string()], vec![]);
        assert!(FuelCleaner.clean(raw).is_err());
    }
}
