// ==========================================
// 矿山生产报表 - 工作表读取器
// ==========================================
// 支持: Excel (.xlsx/.xlsm/.xls/.ods，calamine 自动识别)
// 职责: 按名称读取工作表 → SheetGrid（保留绝对行列位置）
// ==========================================

use crate::importer::coerce;
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::sheet::{Cell, SheetGrid};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::NaiveDateTime;
use std::path::Path;
use tracing::debug;

// ==========================================
// SheetReader Trait
// ==========================================
// 用途: 工作表读取接口
// 实现者: ExcelSheetReader
pub trait SheetReader: Send + Sync {
    /// 读取指定工作表为原始网格
    ///
    /// # 返回
    /// - Ok(SheetGrid): 第 0 行对应 Excel 第 1 行
    /// - Err(SheetNotFound): 工作表不存在
    /// - Err(ExcelParseError / FileReadError): 文件损坏或不可读
    fn read_sheet(&self, path: &Path, sheet: &str) -> LoadResult<SheetGrid>;
}

// ==========================================
// Excel Reader 实现
// ==========================================
#[derive(Debug, Clone, Copy, Default)]
pub struct ExcelSheetReader;

impl SheetReader for ExcelSheetReader {
    fn read_sheet(&self, path: &Path, sheet: &str) -> LoadResult<SheetGrid> {
        if !path.exists() {
            return Err(LoadError::SourceNotFound(path.display().to_string()));
        }

        let mut workbook = open_workbook_auto(path)?;

        // 工作表按名称精确匹配
        if !workbook.sheet_names().iter().any(|name| name == sheet) {
            return Err(LoadError::SheetNotFound {
                path: path.display().to_string(),
                sheet: sheet.to_string(),
            });
        }

        let range = workbook
            .worksheet_range(sheet)
            .map_err(|e| LoadError::SheetReadFailure {
                path: path.display().to_string(),
                sheet: sheet.to_string(),
                message: e.to_string(),
            })?;

        // calamine 的 Range 从第一个非空单元格开始,此处补齐前导空行/空列
        let (start_row, start_col) = range
            .start()
            .map(|(r, c)| (r as usize, c as usize))
            .unwrap_or((0, 0));

        let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); start_row];
        for data_row in range.rows() {
            let mut cells = vec![Cell::Empty; start_col];
            cells.extend(data_row.iter().map(cell_from_data));
            rows.push(cells);
        }

        debug!(
            path = %path.display(),
            sheet,
            rows = rows.len(),
            "工作表读取完成"
        );

        Ok(SheetGrid::new(rows))
    }
}

/// calamine 单元格 → Cell
pub fn cell_from_data(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => coerce::excel_serial_to_datetime(dt.as_f64())
            .map(Cell::DateTime)
            .unwrap_or(Cell::Number(dt.as_f64())),
        Data::DateTimeIso(s) => NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .map(Cell::DateTime)
            .unwrap_or_else(|_| Cell::Text(s.clone())),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_cell_from_data_scalars() {
        assert_eq!(cell_from_data(&Data::Empty), Cell::Empty);
        assert_eq!(cell_from_data(&Data::Int(7)), Cell::Number(7.0));
        assert_eq!(cell_from_data(&Data::Float(2.5)), Cell::Number(2.5));
        assert_eq!(
            cell_from_data(&Data::String("PC-1250".to_string())),
            Cell::text("PC-1250")
        );
    }

    #[test]
    fn test_cell_from_iso_datetime() {
        let cell = cell_from_data(&Data::DateTimeIso("2025-02-01T06:00:00".to_string()));
        let expected = NaiveDate::from_ymd_opt(2025, 2, 1)
            .unwrap()
            .and_hms_opt(6, 0, 0)
            .unwrap();
        assert_eq!(cell, Cell::DateTime(expected));
    }

    #[test]
    fn test_missing_file_is_source_not_found() {
        let reader = ExcelSheetReader;
        let err = reader
            .read_sheet(Path::new("tidak_ada.xlsx"), "BBM")
            .unwrap_err();
        assert!(matches!(err, LoadError::SourceNotFound(_)));
    }

    #[test]
    fn test_grid_keeps_absolute_positions() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("posisi.xlsx");

        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name("Ritase").unwrap();
        sheet.write_string(2, 1, "Tanggal").unwrap();
        sheet.write_number(3, 2, 12.0).unwrap();
        workbook.save(&path).unwrap();

        let reader = ExcelSheetReader;
        let grid = reader.read_sheet(&path, "Ritase").unwrap();
        assert_eq!(grid.rows().len(), 4);
        assert_eq!(grid.rows()[2][1], Cell::text("Tanggal"));
        assert_eq!(grid.rows()[3][2], Cell::Number(12.0));

        let err = reader.read_sheet(&path, "ritase").unwrap_err();
        assert!(matches!(err, LoadError::SheetNotFound { .. }));
    }
}
