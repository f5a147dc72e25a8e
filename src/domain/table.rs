// ==========================================
// 矿山生产报表 - 数据表快照与加载报告
// ==========================================
// 职责: 每次加载生成一份不可变快照 Table<T>
// 红线: 被剔除的行只计数,不报错（剔除行为本身不变）
// ==========================================

use crate::domain::types::{DatasetKind, Month};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// 可导出为表格的行
pub trait TableRow {
    /// 按列名渲染单元格文本（未知列返回空字符串）
    fn cell(&self, column: &str) -> String;
}

// ==========================================
// CleanStats - 清洗统计
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanStats {
    pub rows_read: usize,
    pub rows_kept: usize,
    /// 由错位布局修复而保留的行
    pub rows_repaired: usize,
    /// 两种已知布局都无法匹配的行
    pub unsupported_layout: usize,
}

impl CleanStats {
    pub fn rows_excluded(&self) -> usize {
        self.rows_read.saturating_sub(self.rows_kept)
    }
}

/// 清洗结果（列名 + 行 + 统计）
#[derive(Debug, Clone, PartialEq)]
pub struct CleanOutcome<T> {
    pub columns: Vec<String>,
    pub rows: Vec<T>,
    pub stats: CleanStats,
}

// ==========================================
// LoadReport - 加载报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub load_id: String,
    pub dataset: DatasetKind,
    pub period: Option<Month>,
    pub source: Option<PathBuf>,
    pub sheet: Option<String>,
    pub rows_read: usize,
    pub rows_kept: usize,
    pub rows_excluded: usize,
    pub rows_repaired: usize,
    pub unsupported_layout: usize,
    /// 加载失败原因（表为空时供展示层提示）
    pub failure: Option<String>,
    pub loaded_at: DateTime<Utc>,
}

impl LoadReport {
    pub fn new(dataset: DatasetKind, period: Option<Month>) -> Self {
        Self {
            load_id: Uuid::new_v4().to_string(),
            dataset,
            period,
            source: None,
            sheet: None,
            rows_read: 0,
            rows_kept: 0,
            rows_excluded: 0,
            rows_repaired: 0,
            unsupported_layout: 0,
            failure: None,
            loaded_at: Utc::now(),
        }
    }

    pub fn with_stats(mut self, stats: CleanStats) -> Self {
        self.rows_read = stats.rows_read;
        self.rows_kept = stats.rows_kept;
        self.rows_excluded = stats.rows_excluded();
        self.rows_repaired = stats.rows_repaired;
        self.unsupported_layout = stats.unsupported_layout;
        self
    }

    pub fn with_source(mut self, source: PathBuf, sheet: &str) -> Self {
        self.source = Some(source);
        self.sheet = Some(sheet.to_string());
        self
    }

    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.failure = Some(failure.into());
        self
    }
}

// ==========================================
// Table<T> - 数据表快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table<T> {
    pub columns: Vec<String>,
    pub rows: Vec<T>,
    pub report: LoadReport,
}

impl<T> Table<T> {
    /// 空表（加载失败或无数据）
    pub fn empty(report: LoadReport) -> Self {
        Self {
            columns: Vec::new(),
            rows: Vec::new(),
            report,
        }
    }

    pub fn from_outcome(outcome: CleanOutcome<T>, report: LoadReport) -> Self {
        Self {
            columns: outcome.columns,
            rows: outcome.rows,
            report: report.with_stats(outcome.stats),
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.rows.iter()
    }

    /// 按条件筛选后的新快照（报告沿用原表）
    pub fn filtered<F>(&self, mut predicate: F) -> Table<T>
    where
        T: Clone,
        F: FnMut(&T) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().filter(|r| predicate(r)).cloned().collect(),
            report: self.report.clone(),
        }
    }
}

impl<'a, T> IntoIterator for &'a Table<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_counts_from_stats() {
        let stats = CleanStats {
            rows_read: 10,
            rows_kept: 7,
            rows_repaired: 2,
            unsupported_layout: 1,
        };
        let report = LoadReport::new(DatasetKind::Production, None).with_stats(stats);
        assert_eq!(report.rows_excluded, 3);
        assert_eq!(report.rows_repaired, 2);
        assert_eq!(report.unsupported_layout, 1);
        assert!(!report.load_id.is_empty());
    }

    #[test]
    fn test_filtered_keeps_columns() {
        let table = Table {
            columns: vec!["n".to_string()],
            rows: vec![1, 2, 3, 4],
            report: LoadReport::new(DatasetKind::Fuel, None),
        };
        let even = table.filtered(|n| n % 2 == 0);
        assert_eq!(even.rows, vec![2, 4]);
        assert_eq!(even.columns, table.columns);
    }
}
