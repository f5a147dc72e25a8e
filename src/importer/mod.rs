// ==========================================
// 矿山生产报表 - 导入层
// ==========================================
// 职责: 工作簿定位 → 工作表读取 → 各数据集清洗
// 支持: Excel (.xlsx / .xls / .xlsb / .ods,经 calamine)
// ==========================================

// 模块声明
pub mod analysis_cleaner;
pub mod cleaner_trait;
pub mod coerce;
pub mod disruption_cleaner;
pub mod error;
pub mod file_resolver;
pub mod fuel_cleaner;
pub mod production_cleaner;
pub mod schedule_cleaner;
pub mod sheet;
pub mod sheet_reader;
pub mod trip_cleaner;

// 重导出核心类型
pub use analysis_cleaner::AnalysisCleaner;
pub use disruption_cleaner::DisruptionCleaner;
pub use error::{LoadError, LoadResult};
pub use file_resolver::{DatasetSources, FileResolver};
pub use fuel_cleaner::FuelCleaner;
pub use production_cleaner::{ProductionCleaner, RowLayout};
pub use schedule_cleaner::{PlanCleaner, RealizationCleaner, ScheduleCleaner, ScheduleRecord};
pub use sheet::{Cell, RawRow, RawTable, SheetGrid};
pub use sheet_reader::ExcelSheetReader;
pub use trip_cleaner::TripCleaner;

// 重导出 Trait 接口
pub use cleaner_trait::DatasetCleaner;
pub use sheet_reader::SheetReader;
