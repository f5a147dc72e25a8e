// ==========================================
// 矿山生产报表 - 核心库
// ==========================================
// 职责: 从 Excel 工作簿加载矿山运营数据,清洗为类型化数据表
// 数据集: 产量 / 停机 / 油耗 / 运输趟次 / 日计划 / 实绩 / 产量分析
// 红线: 任何加载失败都只影响对应数据集（返回空表）,不中断整体报表
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与类型
pub mod domain;

// 导入层 - 工作表读取与清洗
pub mod importer;

// 加载层 - 门面与缓存
pub mod loader;

// 配置层 - 加载参数
pub mod config;

// 汇总统计
pub mod summary;

// CSV 导出
pub mod export;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{DatasetKind, Month, ProductionShift, SourceFile, TripShift};

// 数据集记录与快照
pub use domain::{
    DisruptionRecord, FuelRecord, LoadReport, PlanRecord, ProductionAnalysisRecord,
    ProductionRecord, RealizationRecord, Table, TableRow, TripRecord,
};

// 加载门面
pub use loader::{DatasetTable, LoadCache, LoaderSettings, MiningDataLoader};

// 配置
pub use config::{ConfigManager, LoaderConfigReader};

// 错误类型
pub use importer::{LoadError, LoadResult};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "矿山生产报表";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
