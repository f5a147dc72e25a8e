// ==========================================
// 矿山生产报表 - 工作表原始结构
// ==========================================
// 职责: 单元格模型 / 原始网格 / 带表头的原始表
// 表头规则: 空白表头 → "Unnamed: <列号>",重复表头 → "<名>.<n>"
// ==========================================

use crate::importer::coerce;
use chrono::NaiveDateTime;
use std::collections::{HashMap, HashSet};

/// 单元格值（与 Excel 存储类型对应）
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    DateTime(NaiveDateTime),
    Error(String),
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// 缺失值判定: 空单元格、错误单元格、空白文本、NA 占位文本
    pub fn is_missing(&self) -> bool {
        match self {
            Cell::Empty | Cell::Error(_) => true,
            Cell::Text(s) => coerce::is_na_token(s),
            Cell::Number(n) => n.is_nan(),
            Cell::Bool(_) | Cell::DateTime(_) => false,
        }
    }

    /// 文本单元格与字面值比较（忽略首尾空白）
    pub fn is_literal(&self, literal: &str) -> bool {
        matches!(self, Cell::Text(s) if s.trim() == literal)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

// ==========================================
// SheetGrid - 工作表原始网格
// ==========================================
// 行号从 0 开始,对应 Excel 第 1 行
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SheetGrid {
    rows: Vec<Vec<Cell>>,
}

impl SheetGrid {
    pub fn new(rows: Vec<Vec<Cell>>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ==========================================
// RawRow / RawTable - 带表头的原始表
// ==========================================

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// Excel 行号（从 1 开始）
    pub sheet_row: usize,
    cells: Vec<Cell>,
}

impl RawRow {
    pub fn new(sheet_row: usize, cells: Vec<Cell>) -> Self {
        Self { sheet_row, cells }
    }

    /// 越界返回空单元格
    pub fn get(&self, idx: usize) -> &Cell {
        self.cells.get(idx).unwrap_or(&EMPTY_CELL)
    }

    /// 列不存在时返回空单元格
    pub fn get_opt(&self, idx: Option<usize>) -> &Cell {
        idx.map(|i| self.get(i)).unwrap_or(&EMPTY_CELL)
    }

    /// 指定列是否全部缺失
    pub fn is_blank_over(&self, indices: &[usize]) -> bool {
        indices.iter().all(|&i| self.get(i).is_missing())
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<RawRow>,
}

impl RawTable {
    pub fn new(columns: Vec<String>, rows: Vec<RawRow>) -> Self {
        Self { columns, rows }
    }

    /// 以 header_row 行为表头构造原始表,其后各行为数据
    ///
    /// header_row 之前的行（标题行）被丢弃;表头行不存在时返回空表
    pub fn from_grid(grid: SheetGrid, header_row: usize) -> Self {
        let width = grid.width();
        let mut rows = grid.rows.into_iter().enumerate().skip(header_row);

        let header = match rows.next() {
            Some((_, cells)) => cells,
            None => return Self::default(),
        };
        let columns = header_names(&header, width);

        let rows = rows
            .map(|(idx, cells)| RawRow::new(idx + 1, cells))
            .collect();

        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[RawRow] {
        &self.rows
    }

    pub fn into_rows(self) -> Vec<RawRow> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 按列名查找列号（忽略首尾空白,取第一个匹配）
    pub fn column_index(&self, name: &str) -> Option<usize> {
        let wanted = name.trim();
        self.columns.iter().position(|c| c.trim() == wanted)
    }

    /// 必需列查找,任一缺失即报错
    pub fn require(&self, names: &[&str]) -> Result<Vec<usize>, crate::importer::LoadError> {
        names
            .iter()
            .map(|name| {
                self.column_index(name)
                    .ok_or_else(|| crate::importer::LoadError::MissingColumn(name.to_string()))
            })
            .collect()
    }

    /// 占位列（空白表头生成的 "Unnamed: N"）
    pub fn is_placeholder_column(name: &str) -> bool {
        name.starts_with("Unnamed: ")
    }
}

/// 由表头行生成列名: 空白 → "Unnamed: <idx>",重复 → "<name>.<n>"
pub fn header_names(cells: &[Cell], width: usize) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::new();
    let mut counters: HashMap<String, usize> = HashMap::new();
    let mut names = Vec::with_capacity(width);

    for idx in 0..width {
        let base = cells
            .get(idx)
            .and_then(coerce::to_text)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("Unnamed: {}", idx));

        let mut name = base.clone();
        while used.contains(&name) {
            let n = counters.entry(base.clone()).or_insert(1);
            name = format!("{}.{}", base, n);
            *n += 1;
        }

        used.insert(name.clone());
        names.push(name);
    }

    names
}
