// ==========================================
// 矿山生产报表 - 数据加载门面
// ==========================================
// 职责: 源文件定位 → 工作表读取 → 清洗 → 缓存
// 红线: 所有公开加载入口永不返回错误;
//       任何失败都降级为空表,失败原因写入 LoadReport.failure
// 回退: 工作表缺失 / 损坏 / 缺列时依次尝试下一个候选文件
// ==========================================

use crate::config::loader_config_trait::LoaderConfigReader;
use crate::config::config_manager::defaults;
use crate::domain::records::{
    DisruptionRecord, FuelRecord, PlanRecord, ProductionAnalysisRecord, ProductionRecord,
    RealizationRecord, TripRecord,
};
use crate::domain::table::{CleanOutcome, LoadReport, Table};
use crate::domain::types::{DatasetKind, Month, SourceFile};
use crate::importer::cleaner_trait::DatasetCleaner;
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::file_resolver::DatasetSources;
use crate::importer::sheet::RawTable;
use crate::importer::sheet_reader::{ExcelSheetReader, SheetReader};
use crate::importer::{
    AnalysisCleaner, DisruptionCleaner, FuelCleaner, PlanCleaner, ProductionCleaner,
    RealizationCleaner, TripCleaner,
};
use crate::loader::cache::{CacheKey, LoadCache};
use crate::perf::{record_sheet_read, PerfGuard};
use chrono::{Datelike, Local};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

// ==========================================
// LoaderSettings - 加载参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    pub production_year: i32,
    pub equipment_prefix: String,
    pub disruption_title_rows: usize,
    pub schedule_title_rows: usize,
    pub plan_sheet: String,
    pub realization_sheet: String,
    pub analysis_month_offsets: BTreeMap<Month, usize>,
}

impl Default for LoaderSettings {
    fn default() -> Self {
        Self {
            production_year: Local::now().year(),
            equipment_prefix: defaults::EQUIPMENT_PREFIX.to_string(),
            disruption_title_rows: defaults::TITLE_ROWS,
            schedule_title_rows: defaults::TITLE_ROWS,
            plan_sheet: defaults::PLAN_SHEET.to_string(),
            realization_sheet: defaults::REALIZATION_SHEET.to_string(),
            analysis_month_offsets: [(Month::Januari, 0), (Month::Februari, 5)]
                .into_iter()
                .collect(),
        }
    }
}

impl LoaderSettings {
    pub fn with_production_year(mut self, year: i32) -> Self {
        self.production_year = year;
        self
    }

    /// 从配置读取全部加载参数
    pub fn from_config(config: &dyn LoaderConfigReader) -> LoadResult<Self> {
        Ok(Self {
            production_year: config.get_production_year()?,
            equipment_prefix: config.get_equipment_prefix()?,
            disruption_title_rows: config.get_disruption_title_rows()?,
            schedule_title_rows: config.get_schedule_title_rows()?,
            plan_sheet: config.get_plan_sheet()?,
            realization_sheet: config.get_realization_sheet()?,
            analysis_month_offsets: config.get_analysis_month_offsets()?,
        })
    }
}

// ==========================================
// DatasetTable - 任意数据集的加载结果
// ==========================================
// 命令行按数据集名称分派时使用
#[derive(Debug, Clone)]
pub enum DatasetTable {
    Production(Arc<Table<ProductionRecord>>),
    Disruption(Arc<Table<DisruptionRecord>>),
    Fuel(Arc<Table<FuelRecord>>),
    Trips(Arc<Table<TripRecord>>),
    Plan(Arc<Table<PlanRecord>>),
    Realization(Arc<Table<RealizationRecord>>),
    ProductionAnalysis(Arc<Table<ProductionAnalysisRecord>>),
}

impl DatasetTable {
    pub fn report(&self) -> &LoadReport {
        match self {
            DatasetTable::Production(t) => &t.report,
            DatasetTable::Disruption(t) => &t.report,
            DatasetTable::Fuel(t) => &t.report,
            DatasetTable::Trips(t) => &t.report,
            DatasetTable::Plan(t) => &t.report,
            DatasetTable::Realization(t) => &t.report,
            DatasetTable::ProductionAnalysis(t) => &t.report,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DatasetTable::Production(t) => t.len(),
            DatasetTable::Disruption(t) => t.len(),
            DatasetTable::Fuel(t) => t.len(),
            DatasetTable::Trips(t) => t.len(),
            DatasetTable::Plan(t) => t.len(),
            DatasetTable::Realization(t) => t.len(),
            DatasetTable::ProductionAnalysis(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 导出为 CSV 字节
    pub fn to_csv_bytes(&self) -> LoadResult<Vec<u8>> {
        use crate::export::to_csv_bytes;
        match self {
            DatasetTable::Production(t) => to_csv_bytes(t.as_ref()),
            DatasetTable::Disruption(t) => to_csv_bytes(t.as_ref()),
            DatasetTable::Fuel(t) => to_csv_bytes(t.as_ref()),
            DatasetTable::Trips(t) => to_csv_bytes(t.as_ref()),
            DatasetTable::Plan(t) => to_csv_bytes(t.as_ref()),
            DatasetTable::Realization(t) => to_csv_bytes(t.as_ref()),
            DatasetTable::ProductionAnalysis(t) => to_csv_bytes(t.as_ref()),
        }
    }
}

// ==========================================
// MiningDataLoader - 加载门面
// ==========================================
pub struct MiningDataLoader {
    sources: DatasetSources,
    settings: LoaderSettings,
    reader: Box<dyn SheetReader>,
    cache: LoadCache,
}

impl std::fmt::Debug for MiningDataLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MiningDataLoader")
            .field("sources", &self.sources)
            .field("settings", &self.settings)
            .field("cache", &self.cache)
            .finish()
    }
}

impl MiningDataLoader {
    /// 创建加载器（Excel 读取器 + 空缓存）
    pub fn new(sources: DatasetSources, settings: LoaderSettings) -> Self {
        Self::with_reader(sources, settings, Box::new(ExcelSheetReader))
    }

    /// 使用自定义工作表读取器（测试注入）
    pub fn with_reader(
        sources: DatasetSources,
        settings: LoaderSettings,
        reader: Box<dyn SheetReader>,
    ) -> Self {
        Self {
            sources,
            settings,
            reader,
            cache: LoadCache::new(),
        }
    }

    /// 从配置构造: 数据目录 + 别名表 + 加载参数
    pub fn from_config(config: &dyn LoaderConfigReader) -> LoadResult<Self> {
        let mut sources = DatasetSources::new(config.get_data_dir()?);
        for source in SourceFile::ALL {
            sources = sources.with_aliases(source, config.get_source_aliases(source)?);
        }
        let settings = LoaderSettings::from_config(config)?;

        info!(
            data_dir = %sources.data_dir().display(),
            production_year = settings.production_year,
            equipment_prefix = %settings.equipment_prefix,
            "加载器初始化完成"
        );
        Ok(Self::new(sources, settings))
    }

    pub fn sources(&self) -> &DatasetSources {
        &self.sources
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    pub fn cache(&self) -> &LoadCache {
        &self.cache
    }

    // ===== 数据集加载入口 =====

    /// 产量日志（工作表 "Tahun <year>"）
    pub fn production(&self) -> Arc<Table<ProductionRecord>> {
        let cleaner = ProductionCleaner::new(
            self.settings.production_year,
            self.settings.equipment_prefix.clone(),
        );
        self.load_with(&cleaner, "load_production")
    }

    /// 某月停机记录（源表顺序,排序由调用方负责）
    pub fn disruptions(&self, month: Month) -> Arc<Table<DisruptionRecord>> {
        let cleaner =
            DisruptionCleaner::new(month).with_title_rows(self.settings.disruption_title_rows);
        self.load_with(&cleaner, "load_disruptions")
    }

    pub fn fuel(&self) -> Arc<Table<FuelRecord>> {
        self.load_with(&FuelCleaner, "load_fuel")
    }

    pub fn trips(&self) -> Arc<Table<TripRecord>> {
        self.load_with(&TripCleaner::new(), "load_trips")
    }

    pub fn plan(&self) -> Arc<Table<PlanRecord>> {
        let cleaner = PlanCleaner::new(self.settings.schedule_title_rows)
            .with_sheet(self.settings.plan_sheet.clone());
        self.load_with(&cleaner, "load_plan")
    }

    pub fn realization(&self) -> Arc<Table<RealizationRecord>> {
        let cleaner = RealizationCleaner::new(self.settings.schedule_title_rows)
            .with_sheet(self.settings.realization_sheet.clone());
        self.load_with(&cleaner, "load_realization")
    }

    /// 某月计划 vs 实际（未配置列偏移的月份直接返回空表,不读文件）
    pub fn production_analysis(&self, month: Month) -> Arc<Table<ProductionAnalysisRecord>> {
        let offset = self.settings.analysis_month_offsets.get(&month).copied();
        let cleaner = AnalysisCleaner::new(month, offset);

        if offset.is_none() {
            let key = CacheKey::new(DatasetKind::ProductionAnalysis, Some(month));
            return self.cache.get_or_load(key, || {
                debug!(month = %month, "月份未配置分析列偏移,返回空表");
                Table::empty(
                    LoadReport::new(DatasetKind::ProductionAnalysis, Some(month))
                        .with_failure(format!("月份 {} 未配置分析列偏移", month)),
                )
            });
        }

        self.load_with(&cleaner, "load_production_analysis")
    }

    /// 按数据集名称加载（月度数据集缺少月份时返回空表）
    pub fn load(&self, kind: DatasetKind, month: Option<Month>) -> DatasetTable {
        match (kind, month) {
            (DatasetKind::Production, _) => DatasetTable::Production(self.production()),
            (DatasetKind::Fuel, _) => DatasetTable::Fuel(self.fuel()),
            (DatasetKind::Trips, _) => DatasetTable::Trips(self.trips()),
            (DatasetKind::Plan, _) => DatasetTable::Plan(self.plan()),
            (DatasetKind::Realization, _) => DatasetTable::Realization(self.realization()),
            (DatasetKind::Disruption, Some(m)) => DatasetTable::Disruption(self.disruptions(m)),
            (DatasetKind::ProductionAnalysis, Some(m)) => {
                DatasetTable::ProductionAnalysis(self.production_analysis(m))
            }
            (DatasetKind::Disruption, None) => {
                DatasetTable::Disruption(Arc::new(Self::missing_period(kind)))
            }
            (DatasetKind::ProductionAnalysis, None) => {
                DatasetTable::ProductionAnalysis(Arc::new(Self::missing_period(kind)))
            }
        }
    }

    // ===== 缓存失效 =====

    pub fn invalidate(&self, kind: DatasetKind) -> usize {
        self.cache.invalidate(kind)
    }

    /// 源文件被替换后调用
    pub fn invalidate_source(&self, source: SourceFile) -> usize {
        self.cache.invalidate_source(source)
    }

    pub fn clear_cache(&self) -> usize {
        self.cache.clear()
    }

    // ===== 内部流程 =====

    fn missing_period<T>(kind: DatasetKind) -> Table<T> {
        Table::empty(LoadReport::new(kind, None).with_failure(format!("数据集 {} 需要月份参数", kind)))
    }

    fn load_with<C>(&self, cleaner: &C, op: &'static str) -> Arc<Table<C::Record>>
    where
        C: DatasetCleaner,
    {
        let key = CacheKey::new(cleaner.dataset(), cleaner.period());
        self.cache
            .get_or_load(key, || self.load_uncached(cleaner, op))
    }

    fn load_uncached<C>(&self, cleaner: &C, op: &'static str) -> Table<C::Record>
    where
        C: DatasetCleaner,
    {
        let _perf = PerfGuard::new(op);
        let dataset = cleaner.dataset();
        let period = cleaner.period();
        let sheet = cleaner.sheet_name();
        let report = LoadReport::new(dataset, period);

        match self.read_and_clean(cleaner, &sheet) {
            Ok((path, outcome)) => {
                let table = Table::from_outcome(outcome, report.with_source(path, &sheet));
                info!(
                    load_id = %table.report.load_id,
                    dataset = %dataset,
                    period = ?period,
                    source = ?table.report.source,
                    rows_read = table.report.rows_read,
                    rows_kept = table.report.rows_kept,
                    rows_excluded = table.report.rows_excluded,
                    rows_repaired = table.report.rows_repaired,
                    unsupported_layout = table.report.unsupported_layout,
                    "数据集加载完成"
                );
                table
            }
            Err(err) => {
                warn!(
                    load_id = %report.load_id,
                    dataset = %dataset,
                    period = ?period,
                    sheet = %sheet,
                    error = %err,
                    "数据集加载失败,返回空表"
                );
                Table::empty(report.with_failure(err.to_string()))
            }
        }
    }

    /// 依次尝试全部存在的候选文件
    fn read_and_clean<C>(
        &self,
        cleaner: &C,
        sheet: &str,
    ) -> LoadResult<(PathBuf, CleanOutcome<C::Record>)>
    where
        C: DatasetCleaner,
    {
        let resolver = self.sources.resolver(cleaner.dataset().source());
        let mut last_err: Option<LoadError> = None;

        for path in resolver.existing() {
            let started = Instant::now();
            let grid = self.reader.read_sheet(&path, sheet);
            record_sheet_read(&path, sheet, started.elapsed());

            let attempt = grid
                .map(|grid| RawTable::from_grid(grid, cleaner.header_row()))
                .and_then(|raw| cleaner.clean(raw));

            match attempt {
                Ok(outcome) => return Ok((path, outcome)),
                Err(err) if err.is_recoverable_by_next_source() => {
                    debug!(
                        path = %path.display(),
                        sheet,
                        error = %err,
                        "候选文件不可用,尝试下一个"
                    );
                    last_err = Some(err);
                }
                Err(err) => return Err(err),
            }
        }

        Err(last_err.unwrap_or_else(|| LoadError::SourceNotFound(resolver.describe())))
    }
}
