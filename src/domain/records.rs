// ==========================================
// 矿山生产报表 - 数据集记录类型
// ==========================================
// 职责: 各数据集清洗后的行结构
// 列名: 导出时沿用源表列名,便于与原始工作簿对照
// ==========================================

use crate::domain::table::TableRow;
use crate::domain::types::{Month, ProductionShift, TripShift};
use crate::importer::coerce::format_number;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

fn fmt_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn fmt_opt_number(value: Option<f64>) -> String {
    value.map(format_number).unwrap_or_default()
}

fn fmt_opt_text(value: &Option<String>) -> String {
    value.clone().unwrap_or_default()
}

// ==========================================
// 生产记录 (Produksi Harian)
// ==========================================
// 不变量: tonnage > 0;excavator 以设备类别前缀开头;dump_truck 为纯数字
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub date: Option<NaiveDate>,
    pub time: String,
    pub shift: ProductionShift,
    /// 仅错位布局行有值（来自旧 Front 列）
    pub block: String,
    pub front: String,
    pub commodity: String,
    pub excavator: String,
    pub dump_truck: String,
    pub dump_location: String,
    pub trips: Option<f64>,
    pub tonnage: f64,
}

impl ProductionRecord {
    pub const COLUMNS: [&'static str; 11] = [
        "Date",
        "Time",
        "Shift",
        "BLOK",
        "Front",
        "Commudity",
        "Excavator",
        "Dump Truck",
        "Dump Loc",
        "Rit",
        "Tonnase",
    ];
}

impl TableRow for ProductionRecord {
    fn cell(&self, column: &str) -> String {
        match column {
            "Date" => fmt_date(self.date),
            "Time" => self.time.clone(),
            "Shift" => self.shift.to_string(),
            "BLOK" => self.block.clone(),
            "Front" => self.front.clone(),
            "Commudity" => self.commodity.clone(),
            "Excavator" => self.excavator.clone(),
            "Dump Truck" => self.dump_truck.clone(),
            "Dump Loc" => self.dump_location.clone(),
            "Rit" => fmt_opt_number(self.trips),
            "Tonnase" => format_number(self.tonnage),
            _ => String::new(),
        }
    }
}

// ==========================================
// 停机记录 (Gangguan)
// ==========================================
// 不变量: label != "Grand Total";frequency > 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisruptionRecord {
    pub month: Month,
    pub label: String,
    pub frequency: f64,
    pub percentage: Option<f64>,
}

impl DisruptionRecord {
    pub const COLUMNS: [&'static str; 3] = ["Row Labels", "Frekuensi", "Persentase"];
}

impl TableRow for DisruptionRecord {
    fn cell(&self, column: &str) -> String {
        match column {
            "Row Labels" => self.label.clone(),
            "Frekuensi" => format_number(self.frequency),
            "Persentase" => fmt_opt_number(self.percentage),
            _ => String::new(),
        }
    }
}

// ==========================================
// 油耗记录 (BBM)
// ==========================================
// 每台设备一行;每日列缺失记为 0
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelRecord {
    pub number: String,
    pub equipment_class: String,
    pub equipment_type: String,
    pub total_liters: f64,
    /// (列名, 升数),顺序与源表一致
    pub daily_liters: Vec<(String, f64)>,
}

impl FuelRecord {
    pub fn day(&self, column: &str) -> Option<f64> {
        self.daily_liters
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, liters)| *liters)
    }
}

impl TableRow for FuelRecord {
    fn cell(&self, column: &str) -> String {
        match column {
            "No" => self.number.clone(),
            "Alat Berat" => self.equipment_class.clone(),
            "Tipe Alat" => self.equipment_type.clone(),
            "Total" => format_number(self.total_liters),
            other => self.day(other).map(format_number).unwrap_or_default(),
        }
    }
}

// ==========================================
// 运输趟次记录 (Ritase)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripRecord {
    pub date: NaiveDate,
    pub shift: TripShift,
    pub supervisor: String,
    /// (作业面列名, 趟次),缺失记为 0
    pub fronts: Vec<(String, f64)>,
}

impl TripRecord {
    pub fn front(&self, column: &str) -> Option<f64> {
        self.fronts
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, trips)| *trips)
    }

    pub fn total_trips(&self) -> f64 {
        self.fronts.iter().map(|(_, trips)| trips).sum()
    }
}

impl TableRow for TripRecord {
    fn cell(&self, column: &str) -> String {
        match column {
            "Tanggal" => self.date.format("%Y-%m-%d").to_string(),
            "Shift" => self.shift.to_string(),
            "Pengawasan" => self.supervisor.clone(),
            other => self.front(other).map(format_number).unwrap_or_default(),
        }
    }
}

// ==========================================
// 日计划记录 (W22 Scheduling)
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    pub day: Option<String>,
    pub date: Option<NaiveDate>,
    pub shift: Option<String>,
    pub limestone: Option<f64>,
    pub silica: Option<f64>,
    pub clay: Option<f64>,
    pub loading_equipment: Option<String>,
    pub hauling_equipment: Option<String>,
    pub block: Option<String>,
    pub grid: Option<String>,
    pub rom: Option<String>,
    pub remarks: Option<String>,
}

impl TableRow for PlanRecord {
    fn cell(&self, column: &str) -> String {
        match column {
            "Hari" => fmt_opt_text(&self.day),
            "Tanggal" => fmt_date(self.date),
            "Shift" => fmt_opt_text(&self.shift),
            "Batu Kapur" => fmt_opt_number(self.limestone),
            "Silika" => fmt_opt_number(self.silica),
            "Clay" => fmt_opt_number(self.clay),
            "Alat Muat" => fmt_opt_text(&self.loading_equipment),
            "Alat Angkut" => fmt_opt_text(&self.hauling_equipment),
            "Blok" => fmt_opt_text(&self.block),
            "Grid" => fmt_opt_text(&self.grid),
            "ROM" => fmt_opt_text(&self.rom),
            "Keterangan" => fmt_opt_text(&self.remarks),
            _ => String::new(),
        }
    }
}

// ==========================================
// 实绩记录 (W22 realisasi)
// ==========================================
// 比计划多: 周次 / 钻孔设备;黏土换为剥离 (Timbunan)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RealizationRecord {
    pub day: Option<String>,
    pub date: Option<NaiveDate>,
    pub week: Option<String>,
    pub shift: Option<String>,
    pub limestone: Option<f64>,
    pub silica: Option<f64>,
    pub overburden: Option<f64>,
    pub drilling_equipment: Option<String>,
    pub loading_equipment: Option<String>,
    pub hauling_equipment: Option<String>,
    pub block: Option<String>,
    pub grid: Option<String>,
    pub rom: Option<String>,
    pub remarks: Option<String>,
}

impl TableRow for RealizationRecord {
    fn cell(&self, column: &str) -> String {
        match column {
            "Hari" => fmt_opt_text(&self.day),
            "Tanggal" => fmt_date(self.date),
            "Week" => fmt_opt_text(&self.week),
            "Shift" => fmt_opt_text(&self.shift),
            "Batu Kapur" => fmt_opt_number(self.limestone),
            "Silika" => fmt_opt_number(self.silica),
            "Timbunan" => fmt_opt_number(self.overburden),
            "Alat Bor" => fmt_opt_text(&self.drilling_equipment),
            "Alat Muat" => fmt_opt_text(&self.loading_equipment),
            "Alat Angkut" => fmt_opt_text(&self.hauling_equipment),
            "Blok" => fmt_opt_text(&self.block),
            "Grid" => fmt_opt_text(&self.grid),
            "ROM" => fmt_opt_text(&self.rom),
            "Keterangan" => fmt_opt_text(&self.remarks),
            _ => String::new(),
        }
    }
}

// ==========================================
// 产量分析记录 (Analisa Produksi: 计划 vs 实际)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionAnalysisRecord {
    pub month: Month,
    pub day: f64,
    pub plan: Option<f64>,
    pub actual: Option<f64>,
    pub achievement: Option<f64>,
}

impl ProductionAnalysisRecord {
    pub const COLUMNS: [&'static str; 5] = ["Tanggal", "Plan", "Aktual", "Ketercapaian", "Bulan"];
}

impl TableRow for ProductionAnalysisRecord {
    fn cell(&self, column: &str) -> String {
        match column {
            "Tanggal" => format_number(self.day),
            "Plan" => fmt_opt_number(self.plan),
            "Aktual" => fmt_opt_number(self.actual),
            "Ketercapaian" => fmt_opt_number(self.achievement),
            "Bulan" => self.month.to_string(),
            _ => String::new(),
        }
    }
}
