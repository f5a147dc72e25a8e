// ==========================================
// CSV 导出 集成测试
// ==========================================
// 测试目标: 加载结果按 Table.columns 顺序导出为 CSV,
//           过滤后的快照与失败的空表同样可导出
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use mining_report::export::{export_file_name, to_csv_bytes, write_csv_file};
use mining_report::{DatasetKind, ProductionShift};
use test_helpers::*;

#[test]
fn test_production_csv_export() -> TestResult {
    let dir = create_data_dir()?;
    write_production_log(dir.path(), production_rows())?;

    let table = create_loader(dir.path()).production();
    let text = String::from_utf8(to_csv_bytes(table.as_ref())?)?;
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[0],
        "Date,Time,Shift,BLOK,Front,Commudity,Excavator,Dump Truck,Dump Loc,Rit,Tonnase"
    );
    assert_eq!(
        lines[1],
        "2025-09-01,07:00,Shift 1,,Front B,Limestone,PC-01,204,ROM 1,3,120.5"
    );
    assert_eq!(
        lines[2],
        "2025-09-02,19:00,Shift 2,BLOK 7,Front C,Clay,PC-02,210,Crusher,4,88"
    );
    assert_eq!(lines.len(), 3);
    Ok(())
}

#[test]
fn test_filtered_snapshot_export_to_file() -> TestResult {
    let dir = create_data_dir()?;
    write_production_log(dir.path(), production_rows())?;

    let table = create_loader(dir.path()).production();
    let night = table.filtered(|r| r.shift == ProductionShift::Shift2);
    assert_eq!(night.len(), 1);
    // 过滤不改变缓存中的原表
    assert_eq!(table.len(), 2);

    let date = NaiveDate::from_ymd_opt(2025, 9, 30).unwrap();
    let path = dir.path().join(export_file_name("produksi", date));
    write_csv_file(&night, &path)?;

    let text = std::fs::read_to_string(&path)?;
    assert!(path.ends_with("produksi_20250930.csv"));
    assert_eq!(text.lines().count(), 2);
    assert!(text.contains("PC-02"));
    Ok(())
}

#[test]
fn test_dataset_table_export_by_kind() -> TestResult {
    let dir = create_data_dir()?;
    write_monitoring_workbook(dir.path())?;

    let loader = create_loader(dir.path());

    let fuel = loader.load(DatasetKind::Fuel, None);
    let text = String::from_utf8(fuel.to_csv_bytes()?)?;
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "No,Alat Berat,Tipe Alat,Total,1,2");
    assert_eq!(lines[2], "2,Dump Truck,HD-204,0,80,0");

    // 失败的加载导出为空内容
    let plan = loader.load(DatasetKind::Plan, None);
    assert!(plan.report().failure.is_some());
    assert!(plan.to_csv_bytes()?.is_empty());
    Ok(())
}
