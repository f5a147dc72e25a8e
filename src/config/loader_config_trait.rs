// ==========================================
// 矿山生产报表 - 加载配置读取 Trait
// ==========================================
// 职责: 定义加载模块所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含清洗逻辑
// ==========================================

use crate::domain::types::{Month, SourceFile};
use crate::importer::error::LoadResult;
use std::collections::BTreeMap;
use std::path::PathBuf;

// ==========================================
// LoaderConfigReader Trait
// ==========================================
// 用途: 加载模块所需的配置读取接口
// 实现者: ConfigManager（默认值 + JSON 文件 + 环境变量）
pub trait LoaderConfigReader: Send + Sync {
    // ===== 数据源配置 =====

    /// 获取数据目录（别名文件名相对此目录解析）
    ///
    /// # 默认值
    /// - "data"
    fn get_data_dir(&self) -> LoadResult<PathBuf>;

    /// 获取源文件的候选文件名（按优先级排列）
    ///
    /// # 默认值
    /// - DatasetSources::default_aliases(source)
    fn get_source_aliases(&self, source: SourceFile) -> LoadResult<Vec<String>>;

    // ===== 产量日志配置 =====

    /// 获取产量日志年份（工作表 "Tahun <year>"）
    ///
    /// # 默认值
    /// - 当前年份
    fn get_production_year(&self) -> LoadResult<i32>;

    /// 获取挖掘机编号前缀（错位判定与最终过滤）
    ///
    /// # 默认值
    /// - "PC"
    fn get_equipment_prefix(&self) -> LoadResult<String>;

    // ===== 工作表布局配置 =====

    /// 停机监控表表头前的标题行数
    ///
    /// # 默认值
    /// - 1
    fn get_disruption_title_rows(&self) -> LoadResult<usize>;

    /// 计划 / 实绩表表头前的标题行数
    ///
    /// # 默认值
    /// - 1
    fn get_schedule_title_rows(&self) -> LoadResult<usize>;

    /// 计划工作表名
    ///
    /// # 默认值
    /// - "W22 Scheduling"
    fn get_plan_sheet(&self) -> LoadResult<String>;

    /// 实绩工作表名
    ///
    /// # 默认值
    /// - "W22 realisasi"
    fn get_realization_sheet(&self) -> LoadResult<String>;

    /// 产量分析表各月数据块的起始列
    ///
    /// # 返回
    /// - 未出现的月份没有数据块,加载结果为空表
    ///
    /// # 默认值
    /// - Januari → 0, Februari → 5
    fn get_analysis_month_offsets(&self) -> LoadResult<BTreeMap<Month, usize>>;
}
