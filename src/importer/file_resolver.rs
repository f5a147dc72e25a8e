// ==========================================
// 矿山生产报表 - 源文件解析器
// ==========================================
// 职责: 逻辑文件 → 按顺序排列的候选路径 → 第一个存在的路径
// 背景: 同一文件历史上存在空格 / 下划线 / 尾随空格等多种拼写
// ==========================================

use crate::domain::types::SourceFile;
use crate::importer::error::{LoadError, LoadResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ==========================================
// FileResolver - 候选路径解析
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileResolver {
    candidates: Vec<PathBuf>,
}

impl FileResolver {
    pub fn new(candidates: Vec<PathBuf>) -> Self {
        Self { candidates }
    }

    pub fn candidates(&self) -> &[PathBuf] {
        &self.candidates
    }

    /// 返回第一个存在的候选路径
    pub fn resolve(&self) -> LoadResult<PathBuf> {
        self.existing()
            .next()
            .ok_or_else(|| LoadError::SourceNotFound(self.describe()))
    }

    /// 按顺序遍历全部存在的候选路径（工作表缺失时回退到下一个）
    pub fn existing(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.candidates.iter().filter(|p| p.is_file()).cloned()
    }

    pub fn describe(&self) -> String {
        self.candidates
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

// ==========================================
// DatasetSources - 各源文件的别名表
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetSources {
    data_dir: PathBuf,
    aliases: BTreeMap<SourceFile, Vec<String>>,
}

impl DatasetSources {
    /// 历史文件名（按优先级排列）
    pub fn default_aliases(source: SourceFile) -> Vec<String> {
        let names: &[&str] = match source {
            SourceFile::ProductionLog => &[
                "Produksi_UTSG_Harian.xlsx",
                "Produksi UTSG Harian.xlsx",
                "Produksi_UTSG_Harian .xlsx",
            ],
            SourceFile::DisruptionLog => &[
                "Gangguan_Produksi_2025_baru.xlsx",
                "Gangguan Produksi 2025 baru.xlsx",
            ],
            SourceFile::MonitoringWorkbook => &["Monitoring_2025_.xlsx", "Monitoring 2025_.xlsx"],
            SourceFile::DailyPlanWorkbook => &["DAILY_PLAN.xlsx"],
        };
        names.iter().map(|s| s.to_string()).collect()
    }

    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        let aliases = SourceFile::ALL
            .into_iter()
            .map(|source| (source, Self::default_aliases(source)))
            .collect();
        Self {
            data_dir: data_dir.into(),
            aliases,
        }
    }

    /// 覆写某个源文件的别名表
    pub fn with_aliases(mut self, source: SourceFile, aliases: Vec<String>) -> Self {
        self.aliases.insert(source, aliases);
        self
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn aliases(&self, source: SourceFile) -> &[String] {
        self.aliases.get(&source).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 构造该源文件的解析器（别名相对 data_dir;绝对路径原样使用）
    pub fn resolver(&self, source: SourceFile) -> FileResolver {
        let candidates = self
            .aliases(source)
            .iter()
            .map(|name| self.data_dir.join(name))
            .collect();
        FileResolver::new(candidates)
    }
}
