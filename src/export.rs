// ==========================================
// 矿山生产报表 - CSV 导出
// ==========================================
// 格式: UTF-8,首行为表头（Table.columns）,每条记录一行
// 文件名: <前缀>_<YYYYMMDD>.csv
// ==========================================

use crate::domain::table::{Table, TableRow};
use crate::importer::error::{LoadError, LoadResult};
use chrono::NaiveDate;
use csv::Writer;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// 将数据表写入任意输出流
pub fn write_csv<T, W>(table: &Table<T>, writer: W) -> LoadResult<()>
where
    T: TableRow,
    W: Write,
{
    let mut wtr = Writer::from_writer(writer);

    // 空表也输出表头（若有）
    if !table.columns.is_empty() {
        wtr.write_record(&table.columns)?;
    }

    for row in &table.rows {
        let record: Vec<String> = table.columns.iter().map(|c| row.cell(c)).collect();
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

/// 导出为 CSV 字节（供展示层下载）
pub fn to_csv_bytes<T: TableRow>(table: &Table<T>) -> LoadResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_csv(table, &mut buffer)?;
    Ok(buffer)
}

/// 导出到文件
pub fn write_csv_file<T: TableRow>(table: &Table<T>, path: &Path) -> LoadResult<()> {
    let file = File::create(path).map_err(|e| {
        LoadError::CsvExportError(format!("{}: {}", path.display(), e))
    })?;
    write_csv(table, file)?;

    info!(
        dataset = %table.report.dataset,
        rows = table.len(),
        path = %path.display(),
        "CSV 导出完成"
    );
    Ok(())
}

/// 导出文件名: <prefix>_<YYYYMMDD>.csv
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.csv", prefix, date.format("%Y%m%d"))
}
