// ==========================================
// 矿山生产报表 - 领域类型定义
// ==========================================
// 职责: 班次 / 月份 / 数据集种类 / 源文件种类
// 红线: 班次只有三个规范值,其余一律视为无效行
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 生产班次 (Production Shift)
// ==========================================
// 源表标签: "Shift 1" / "Shift 2" / "Shift 3"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ProductionShift {
    #[serde(rename = "Shift 1")]
    Shift1,
    #[serde(rename = "Shift 2")]
    Shift2,
    #[serde(rename = "Shift 3")]
    Shift3,
}

impl ProductionShift {
    pub const ALL: [ProductionShift; 3] = [
        ProductionShift::Shift1,
        ProductionShift::Shift2,
        ProductionShift::Shift3,
    ];

    /// 表头回灌行中班次列的字面值
    pub const HEADER_LABEL: &'static str = "Shift";

    pub fn label(&self) -> &'static str {
        match self {
            ProductionShift::Shift1 => "Shift 1",
            ProductionShift::Shift2 => "Shift 2",
            ProductionShift::Shift3 => "Shift 3",
        }
    }

    /// 按规范标签解析（忽略首尾空白）
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|s| s.label() == value)
    }
}

impl fmt::Display for ProductionShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 运输班次 (Trip Shift)
// ==========================================
// 源表为数字或文本 1/2/3,输出统一为文本
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TripShift {
    #[serde(rename = "1")]
    One,
    #[serde(rename = "2")]
    Two,
    #[serde(rename = "3")]
    Three,
}

impl TripShift {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripShift::One => "1",
            TripShift::Two => "2",
            TripShift::Three => "3",
        }
    }

    pub fn from_text(value: &str) -> Option<Self> {
        match value.trim() {
            "1" => Some(TripShift::One),
            "2" => Some(TripShift::Two),
            "3" => Some(TripShift::Three),
            _ => None,
        }
    }

    /// 数值班次只接受精确的 1 / 2 / 3
    pub fn from_number(value: f64) -> Option<Self> {
        if value == 1.0 {
            Some(TripShift::One)
        } else if value == 2.0 {
            Some(TripShift::Two)
        } else if value == 3.0 {
            Some(TripShift::Three)
        } else {
            None
        }
    }
}

impl fmt::Display for TripShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ==========================================
// 月份 (印尼语月份名,闭集)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Januari,
    Februari,
    Maret,
    April,
    Mei,
    Juni,
    Juli,
    Agustus,
    September,
    Oktober,
    November,
    Desember,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Januari,
        Month::Februari,
        Month::Maret,
        Month::April,
        Month::Mei,
        Month::Juni,
        Month::Juli,
        Month::Agustus,
        Month::September,
        Month::Oktober,
        Month::November,
        Month::Desember,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Month::Januari => "Januari",
            Month::Februari => "Februari",
            Month::Maret => "Maret",
            Month::April => "April",
            Month::Mei => "Mei",
            Month::Juni => "Juni",
            Month::Juli => "Juli",
            Month::Agustus => "Agustus",
            Month::September => "September",
            Month::Oktober => "Oktober",
            Month::November => "November",
            Month::Desember => "Desember",
        }
    }

    /// 1 = Januari
    pub fn number(&self) -> u32 {
        Self::ALL
            .iter()
            .position(|m| m == self)
            .map(|idx| idx as u32 + 1)
            .unwrap_or(1)
    }

    /// 停机监控工作表名: "Monitoring <Bulan>"
    pub fn disruption_sheet(&self) -> String {
        format!("Monitoring {}", self.name())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("未知月份: {}", s))
    }
}

// ==========================================
// 数据集种类 (Dataset Kind)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Production,
    Disruption,
    Fuel,
    Trips,
    Plan,
    Realization,
    ProductionAnalysis,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 7] = [
        DatasetKind::Production,
        DatasetKind::Disruption,
        DatasetKind::Fuel,
        DatasetKind::Trips,
        DatasetKind::Plan,
        DatasetKind::Realization,
        DatasetKind::ProductionAnalysis,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Production => "production",
            DatasetKind::Disruption => "disruption",
            DatasetKind::Fuel => "fuel",
            DatasetKind::Trips => "trips",
            DatasetKind::Plan => "plan",
            DatasetKind::Realization => "realization",
            DatasetKind::ProductionAnalysis => "production_analysis",
        }
    }

    /// 该数据集读取自哪个源文件
    pub fn source(&self) -> SourceFile {
        match self {
            DatasetKind::Production => SourceFile::ProductionLog,
            DatasetKind::Disruption => SourceFile::DisruptionLog,
            DatasetKind::Fuel | DatasetKind::Trips | DatasetKind::ProductionAnalysis => {
                SourceFile::MonitoringWorkbook
            }
            DatasetKind::Plan | DatasetKind::Realization => SourceFile::DailyPlanWorkbook,
        }
    }

    /// 是否需要月份参数
    pub fn is_monthly(&self) -> bool {
        matches!(
            self,
            DatasetKind::Disruption | DatasetKind::ProductionAnalysis
        )
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "production" | "produksi" => Ok(DatasetKind::Production),
            "disruption" | "gangguan" => Ok(DatasetKind::Disruption),
            "fuel" | "bbm" => Ok(DatasetKind::Fuel),
            "trips" | "ritase" => Ok(DatasetKind::Trips),
            "plan" => Ok(DatasetKind::Plan),
            "realization" | "realisasi" => Ok(DatasetKind::Realization),
            "production_analysis" | "analisa" => Ok(DatasetKind::ProductionAnalysis),
            other => Err(format!("未知数据集: {}", other)),
        }
    }
}

// ==========================================
// 源文件种类 (Source File)
// ==========================================
// 同一逻辑文件在不同时期有不同拼写,别名表见 importer::file_resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceFile {
    ProductionLog,
    DisruptionLog,
    MonitoringWorkbook,
    DailyPlanWorkbook,
}

impl SourceFile {
    pub const ALL: [SourceFile; 4] = [
        SourceFile::ProductionLog,
        SourceFile::DisruptionLog,
        SourceFile::MonitoringWorkbook,
        SourceFile::DailyPlanWorkbook,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFile::ProductionLog => "production_log",
            SourceFile::DisruptionLog => "disruption_log",
            SourceFile::MonitoringWorkbook => "monitoring_workbook",
            SourceFile::DailyPlanWorkbook => "daily_plan_workbook",
        }
    }

    /// 读取自该文件的全部数据集
    pub fn datasets(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| kind.source() == *self)
            .collect()
    }
}

impl fmt::Display for SourceFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_production_shift_labels() {
        assert_eq!(
            ProductionShift::from_label("Shift 2"),
            Some(ProductionShift::Shift2)
        );
        assert_eq!(
            ProductionShift::from_label(" Shift 3 "),
            Some(ProductionShift::Shift3)
        );
        assert_eq!(ProductionShift::from_label("Shift"), None);
        assert_eq!(ProductionShift::from_label("Shift 4"), None);
    }

    #[test]
    fn test_trip_shift_parsing() {
        assert_eq!(TripShift::from_number(1.0), Some(TripShift::One));
        assert_eq!(TripShift::from_number(1.5), None);
        assert_eq!(TripShift::from_text("3"), Some(TripShift::Three));
        assert_eq!(TripShift::from_text("Shift 1"), None);
        assert_eq!(TripShift::Two.to_string(), "2");
    }

    #[test]
    fn test_month_round_trip_and_sheet_name() {
        let month: Month = "agustus".parse().unwrap();
        assert_eq!(month, Month::Agustus);
        assert_eq!(month.number(), 8);
        assert_eq!(Month::Mei.disruption_sheet(), "Monitoring Mei");
        assert!("August".parse::<Month>().is_err());
    }

    #[test]
    fn test_source_file_datasets() {
        assert_eq!(
            SourceFile::DailyPlanWorkbook.datasets(),
            vec![DatasetKind::Plan, DatasetKind::Realization]
        );
        assert_eq!(
            SourceFile::MonitoringWorkbook.datasets(),
            vec![
                DatasetKind::Fuel,
                DatasetKind::Trips,
                DatasetKind::ProductionAnalysis
            ]
        );
    }
}
