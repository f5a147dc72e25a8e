// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 在临时目录中生成测试用 Excel 工作簿,构造加载器
// 工作簿: 产量日志 / 停机日志 / 监控工作簿 / 日计划工作簿
// ==========================================

#![allow(dead_code)]

use mining_report::importer::DatasetSources;
use mining_report::{LoaderSettings, MiningDataLoader};
use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::Path;
use tempfile::TempDir;

pub type TestResult<T = ()> = Result<T, Box<dyn Error>>;

/// 测试工作表中的单元格
#[derive(Debug, Clone, PartialEq)]
pub enum Xl {
    S(String),
    N(f64),
    Blank,
}

pub fn s(value: &str) -> Xl {
    Xl::S(value.to_string())
}

pub fn n(value: f64) -> Xl {
    Xl::N(value)
}

/// 工作表定义: (表名, 行)
pub type SheetDef = (String, Vec<Vec<Xl>>);

pub fn sheet(name: &str, rows: Vec<Vec<Xl>>) -> SheetDef {
    (name.to_string(), rows)
}

/// 写出工作簿（空白单元格不写入）
pub fn write_workbook(path: &Path, sheets: &[SheetDef]) -> TestResult {
    let mut workbook = Workbook::new();

    for (name, rows) in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(name)?;

        for (r, row) in rows.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                match cell {
                    Xl::S(text) => {
                        worksheet.write_string(r as u32, c as u16, text)?;
                    }
                    Xl::N(value) => {
                        worksheet.write_number(r as u32, c as u16, *value)?;
                    }
                    Xl::Blank => {}
                }
            }
        }
    }

    workbook.save(path)?;
    Ok(())
}

/// 创建临时数据目录
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
pub fn create_data_dir() -> TestResult<TempDir> {
    Ok(tempfile::tempdir()?)
}

/// 基于数据目录构造加载器（产量年份固定为 2025）
pub fn create_loader(dir: &Path) -> MiningDataLoader {
    MiningDataLoader::new(
        DatasetSources::new(dir),
        LoaderSettings::default().with_production_year(2025),
    )
}

// ==========================================
// 产量日志: Produksi_UTSG_Harian.xlsx / "Tahun 2025"
// ==========================================

pub const PRODUCTION_FILE: &str = "Produksi_UTSG_Harian.xlsx";

pub fn production_header() -> Vec<Xl> {
    vec![
        s("Date"),
        s("Time"),
        s("Shift"),
        s("Front"),
        s("Commudity"),
        s("Excavator"),
        s("Dump Truck"),
        s("Dump Loc"),
        s("Rit"),
        s("Tonnase"),
        Xl::Blank,
    ]
}

/// 规范布局行
pub fn production_row(shift: &str, excavator: &str, truck: Xl, tonnage: Xl) -> Vec<Xl> {
    vec![
        s("2025-09-01"),
        s("07:00"),
        s(shift),
        s("Front B"),
        s("Limestone"),
        s(excavator),
        truck,
        s("ROM 1"),
        n(3.0),
        tonnage,
        Xl::Blank,
    ]
}

/// 右移一列的错位行（Front 列实为 BLOK,吨位落在表头右侧的无名列）
pub fn shifted_production_row(excavator: &str, truck: &str, tonnage: f64) -> Vec<Xl> {
    vec![
        s("2025-09-02"),
        s("19:00"),
        s("Shift 2"),
        s("BLOK 7"),
        s("Front C"),
        s("Clay"),
        s(excavator),
        s(truck),
        s("Crusher"),
        n(4.0),
        n(tonnage),
    ]
}

/// 典型产量日志:
/// 1 条规范行 / 1 条表头回灌 / 1 条错位行 / 1 条非数字自卸车
/// 1 条非法班次 / 1 条零吨位 / 1 条无法识别布局
pub fn production_rows() -> Vec<Vec<Xl>> {
    vec![
        production_header(),
        production_row("Shift 1", "PC-01", n(204.0), n(120.5)),
        production_header(),
        shifted_production_row("PC-02", "210", 88.0),
        production_row("Shift 1", "PC-01", s("DT-204"), n(75.0)),
        production_row("Shift 4", "PC-01", n(205.0), n(60.0)),
        production_row("Shift 3", "PC-03", n(206.0), n(0.0)),
        production_row("Shift 2", "EX-09", n(300.0), n(40.0)),
    ]
}

pub fn write_production_log(dir: &Path, rows: Vec<Vec<Xl>>) -> TestResult {
    write_workbook(&dir.join(PRODUCTION_FILE), &[sheet("Tahun 2025", rows)])
}

// ==========================================
// 停机日志: Gangguan_Produksi_2025_baru.xlsx / "Monitoring <Bulan>"
// ==========================================

pub const DISRUPTION_FILE: &str = "Gangguan_Produksi_2025_baru.xlsx";

pub fn disruption_rows() -> Vec<Vec<Xl>> {
    vec![
        vec![s("Monitoring Gangguan Produksi")],
        vec![s("Row Labels"), s("Count of Gangguan"), s("Sum of %")],
        vec![s("Hujan"), n(12.0), n(0.5)],
        vec![s("Row Labels"), s("Count of Gangguan"), s("Sum of %")],
        vec![s("Kabut"), n(3.0), n(0.125)],
        vec![s("Jalan Licin"), n(0.0), n(0.0)],
        vec![s("Breakdown"), n(9.0), n(0.375)],
        vec![s("Grand Total"), n(24.0), n(1.0)],
    ]
}

/// 仅写入给定月份的工作表
pub fn write_disruption_log(dir: &Path, months: &[&str]) -> TestResult {
    let sheets: Vec<SheetDef> = months
        .iter()
        .map(|m| sheet(&format!("Monitoring {}", m), disruption_rows()))
        .collect();
    write_workbook(&dir.join(DISRUPTION_FILE), &sheets)
}

// ==========================================
// 监控工作簿: Monitoring_2025_.xlsx / BBM + Ritase + Analisa Produksi
// ==========================================

pub const MONITORING_FILE: &str = "Monitoring_2025_.xlsx";

pub fn fuel_rows() -> Vec<Vec<Xl>> {
    vec![
        vec![s("No"), s("Alat Berat"), s("Tipe Alat"), s("Total"), n(1.0), n(2.0), Xl::Blank],
        vec![s("No"), s("Alat Berat"), s("Tipe Alat"), s("Total"), s("1"), s("2")],
        vec![n(1.0), s("Excavator"), s("PC-01"), n(350.0), n(200.0), n(150.0)],
        vec![n(2.0), s("Dump Truck"), s("HD-204"), Xl::Blank, n(80.0), Xl::Blank],
        vec![Xl::Blank, s("Dozer"), s("D85"), n(50.0), n(50.0), Xl::Blank],
    ]
}

pub fn trip_rows() -> Vec<Vec<Xl>> {
    vec![
        vec![
            s("Tanggal"),
            s("Shift"),
            s("Pengawasan"),
            s("Front B LS"),
            s("Front B Clay"),
            s("Stockpile 6  SS"),
            s("Catatan"),
        ],
        vec![s("2025-09-01"), n(1.0), s("Budi"), n(12.0), n(4.0), Xl::Blank, s("ok")],
        vec![s("2025-09-01"), s("2"), s("Sari"), Xl::Blank, n(6.0), n(2.0), Xl::Blank],
        vec![s("bukan tanggal"), n(1.0), s("Budi"), n(5.0), n(5.0), n(5.0), Xl::Blank],
        vec![s("2025-09-02"), n(4.0), s("Budi"), n(5.0), n(5.0), n(5.0), Xl::Blank],
    ]
}

/// Januari 位于第 0 列,Februari 位于第 5 列（中间隔一列）
pub fn analysis_rows() -> Vec<Vec<Xl>> {
    let mut rows = vec![
        vec![
            s("Januari"),
            Xl::Blank,
            Xl::Blank,
            Xl::Blank,
            Xl::Blank,
            s("Februari"),
        ],
        vec![
            s("Tanggal"),
            s("Plan"),
            s("Aktual"),
            s("Ketercapaian"),
            Xl::Blank,
            s("Tanggal"),
            s("Plan"),
            s("Aktual"),
            s("Ketercapaian"),
        ],
    ];

    for day in 1..=31u32 {
        let d = day as f64;
        let mut row = vec![n(d), n(1000.0), n(900.0 + d), n((900.0 + d) / 1000.0), Xl::Blank];
        if day <= 28 {
            row.extend([n(d), n(800.0), n(820.0), n(820.0 / 800.0)]);
        }
        rows.push(row);
    }

    // 第 33 行之后的汇总不属于逐日数据
    rows.push(vec![s("Total"), n(31000.0), n(28396.0), Xl::Blank]);
    rows
}

pub fn write_monitoring_workbook(dir: &Path) -> TestResult {
    write_workbook(
        &dir.join(MONITORING_FILE),
        &[
            sheet("BBM", fuel_rows()),
            sheet("Ritase", trip_rows()),
            sheet("Analisa Produksi", analysis_rows()),
        ],
    )
}

// ==========================================
// 日计划工作簿: DAILY_PLAN.xlsx / "W22 Scheduling" + "W22 realisasi"
// ==========================================

pub const DAILY_PLAN_FILE: &str = "DAILY_PLAN.xlsx";

pub fn plan_rows() -> Vec<Vec<Xl>> {
    vec![
        vec![s("RENCANA PRODUKSI MINGGU 22")],
        vec![
            s("No"),
            s("Hari "),
            s("Tgl"),
            s("Shift"),
            s("Batu Kapur"),
            s("Silika"),
            s("Clay"),
            s("Alat Muat"),
            s("Alat Angkut"),
            s("Blok"),
            s("Grid"),
            s("ROM"),
            s("Ket"),
        ],
        vec![
            n(1.0),
            s("Senin"),
            s("2025-05-26"),
            s("1"),
            n(1500.0),
            n(300.0),
            n(120.0),
            s("PC-01"),
            s("HD"),
            s("B7"),
            s("G12"),
            s("ROM 1"),
            s("Normal"),
        ],
        vec![
            n(2.0),
            s("Senin"),
            s("2025-05-26"),
            s("2"),
            n(1400.0),
            Xl::Blank,
            n(100.0),
            s("PC-02"),
            s("HD"),
            s("B7"),
            s("G13"),
            s("ROM 1"),
            s("Hujan"),
        ],
        vec![
            Xl::Blank,
            s("Hari"),
            s("Tanggal"),
            s("Shift"),
            s("Batu Kapur"),
        ],
        vec![n(3.0), Xl::Blank, s("2025-05-27"), s("1"), n(900.0)],
    ]
}

pub fn realization_rows() -> Vec<Vec<Xl>> {
    vec![
        vec![s("REALISASI PRODUKSI MINGGU 22")],
        vec![
            s("No"),
            s("Hari"),
            s("Tanggal"),
            s("Week"),
            s("Shift"),
            s("Batu Kapur"),
            s("Silika"),
            s("Timbunan"),
            s("Alat Bor"),
            s("Alat Muat"),
            s("Alat Angkut"),
            s("Blok"),
            s("Grid"),
            s("ROM"),
            s("Keterangan"),
        ],
        vec![
            n(1.0),
            s("Senin"),
            s("2025-05-26"),
            s("W22"),
            s("1"),
            n(1450.0),
            n(310.0),
            n(50.0),
            s("DR-1"),
            s("PC-01"),
            s("HD"),
            s("B7"),
            s("G12"),
            s("ROM 1"),
            s("Normal"),
        ],
        vec![
            n(2.0),
            s("Senin"),
            s("2025-05-26"),
            s("W22"),
            s("3"),
            n(600.0),
            Xl::Blank,
            Xl::Blank,
            Xl::Blank,
            s("PC-03"),
            s("HD"),
            s("B8"),
            s("G01"),
            s("ROM 2"),
            s("Lembur"),
        ],
    ]
}

pub fn write_daily_plan(dir: &Path) -> TestResult {
    write_workbook(
        &dir.join(DAILY_PLAN_FILE),
        &[
            sheet("W22 Scheduling", plan_rows()),
            sheet("W22 realisasi", realization_rows()),
        ],
    )
}

/// 写出全部四个源文件
pub fn write_all_sources(dir: &Path) -> TestResult {
    write_production_log(dir, production_rows())?;
    write_disruption_log(dir, &["Januari", "Februari"])?;
    write_monitoring_workbook(dir)?;
    write_daily_plan(dir)?;
    Ok(())
}
