// ==========================================
// 监控工作簿 (BBM / Ritase) 集成测试
// ==========================================
// 测试目标: 油耗表剔除表头回灌与缺失编号行,运输趟次表按白名单取列
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use mining_report::summary::{summarize_fuel, summarize_trips};
use mining_report::TripShift;
use test_helpers::*;

#[test]
fn test_fuel_drops_header_echo_before_coercion() -> TestResult {
    let dir = create_data_dir()?;
    write_monitoring_workbook(dir.path())?;

    let table = create_loader(dir.path()).fuel();

    assert!(table.report.failure.is_none(), "{:?}", table.report.failure);
    assert_eq!(table.report.sheet.as_deref(), Some("BBM"));
    assert_eq!(table.columns, vec!["No", "Alat Berat", "Tipe Alat", "Total", "1", "2"]);
    assert_eq!(table.len(), 2);
    assert_eq!(table.report.rows_read, 4);

    let excavator = &table.rows[0];
    assert_eq!(excavator.number, "1");
    assert_eq!(excavator.equipment_class, "Excavator");
    assert_eq!(excavator.equipment_type, "PC-01");
    assert_eq!(excavator.total_liters, 350.0);
    assert_eq!(excavator.day("1"), Some(200.0));

    // 缺失的 Total 与每日值记 0
    let truck = &table.rows[1];
    assert_eq!(truck.total_liters, 0.0);
    assert_eq!(truck.day("2"), Some(0.0));
    assert_eq!(truck.day("3"), None);
    Ok(())
}

#[test]
fn test_fuel_summary() -> TestResult {
    let dir = create_data_dir()?;
    write_monitoring_workbook(dir.path())?;

    let table = create_loader(dir.path()).fuel();
    let summary = summarize_fuel(&table.rows);

    assert_eq!(summary.equipment_count, 2);
    assert_eq!(summary.total_liters, 350.0);
    assert_eq!(summary.liters_by_class.get("Dump Truck"), Some(&0.0));
    Ok(())
}

#[test]
fn test_trips_allow_list_and_shift_filter() -> TestResult {
    let dir = create_data_dir()?;
    write_monitoring_workbook(dir.path())?;

    let table = create_loader(dir.path()).trips();

    assert!(table.report.failure.is_none(), "{:?}", table.report.failure);
    assert_eq!(
        table.columns,
        vec![
            "Tanggal",
            "Shift",
            "Pengawasan",
            "Front B LS",
            "Front B Clay",
            "Stockpile 6  SS"
        ]
    );
    // 不可解析日期与班次 4 的行剔除
    assert_eq!(table.len(), 2);

    let first = &table.rows[0];
    assert_eq!(first.date, NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
    assert_eq!(first.shift, TripShift::One);
    assert_eq!(first.supervisor, "Budi");
    assert_eq!(first.front("Front B LS"), Some(12.0));
    assert_eq!(first.front("Stockpile 6  SS"), Some(0.0));

    let second = &table.rows[1];
    assert_eq!(second.shift, TripShift::Two);
    assert_eq!(second.front("Front B LS"), Some(0.0));
    assert_eq!(second.total_trips(), 8.0);
    Ok(())
}

#[test]
fn test_trip_summary() -> TestResult {
    let dir = create_data_dir()?;
    write_monitoring_workbook(dir.path())?;

    let table = create_loader(dir.path()).trips();
    let summary = summarize_trips(&table.rows);

    assert_eq!(summary.total_trips, 24.0);
    assert_eq!(summary.trips_by_shift.get(&TripShift::One), Some(&16.0));
    Ok(())
}

#[test]
fn test_monitoring_sheet_missing_only_affects_its_dataset() -> TestResult {
    let dir = create_data_dir()?;
    write_workbook(
        &dir.path().join(MONITORING_FILE),
        &[sheet("BBM", fuel_rows())],
    )?;

    let loader = create_loader(dir.path());

    assert_eq!(loader.fuel().len(), 2);
    let trips = loader.trips();
    assert!(trips.is_empty());
    assert!(trips.report.failure.is_some());
    Ok(())
}
