// ==========================================
// 矿山生产报表 - 领域模型层
// ==========================================
// 职责: 定义数据集记录、表快照、基础类型
// 红线: 不含文件读取逻辑,不含清洗逻辑
// ==========================================

pub mod records;
pub mod table;
pub mod types;

// 重导出核心类型
pub use records::{
    DisruptionRecord, FuelRecord, PlanRecord, ProductionAnalysisRecord, ProductionRecord,
    RealizationRecord, TripRecord,
};
pub use table::{CleanOutcome, CleanStats, LoadReport, Table, TableRow};
pub use types::{DatasetKind, Month, ProductionShift, SourceFile, TripShift};
