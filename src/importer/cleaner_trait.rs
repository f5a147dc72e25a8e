// ==========================================
// 矿山生产报表 - 数据集清洗 Trait
// ==========================================
// 职责: 定义各数据集清洗接口（不包含实现）
// 流程: 读取工作表 → 表头定位 → 清洗 → CleanOutcome
// ==========================================

use crate::domain::table::{CleanOutcome, TableRow};
use crate::domain::types::{DatasetKind, Month};
use crate::importer::error::LoadResult;
use crate::importer::sheet::RawTable;

// ==========================================
// DatasetCleaner Trait
// ==========================================
// 用途: 单个数据集的清洗规则
// 实现者: ProductionCleaner, DisruptionCleaner, FuelCleaner, TripCleaner,
//         ScheduleCleaner<PlanRecord>, ScheduleCleaner<RealizationRecord>,
//         AnalysisCleaner
pub trait DatasetCleaner: Send + Sync {
    type Record: TableRow + Send + Sync + 'static;

    /// 数据集种类（决定源文件与缓存键）
    fn dataset(&self) -> DatasetKind;

    /// 期间参数（按月数据集）
    fn period(&self) -> Option<Month> {
        None
    }

    /// 读取的工作表名（精确匹配）
    fn sheet_name(&self) -> String;

    /// 表头所在行（0 起）;其上各行为标题行,直接丢弃
    fn header_row(&self) -> usize {
        0
    }

    /// 清洗原始表
    ///
    /// # 返回
    /// - Ok(CleanOutcome): 清洗结果（无法修复的行已剔除并计数）
    /// - Err(MissingColumn): 必需列缺失,调用方应尝试下一个候选文件
    fn clean(&self, raw: RawTable) -> LoadResult<CleanOutcome<Self::Record>>;
}
