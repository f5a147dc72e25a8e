// ==========================================
// 矿山生产报表 - 生产日报清洗器
// ==========================================
// 工作表: "Tahun <年份>"（第一行为表头）
// 步骤:
//   1. 剔除表头回灌行（Shift == "Shift"）
//   2. 仅保留 Shift 1 / 2 / 3
//   3. 解析日期;时段保留为文本
//   4. 布局判定: 规范布局 / 右移一列的错位布局 / 不支持的布局
//   5. 挖机前缀作为最终校验
//   6. Rit / Tonnase 转数值;自卸车编号必须为纯数字
//   7. 剔除缺失或非正的吨位
//   8. BLOK / Dump Loc 列始终存在（默认空串）
// ==========================================

use crate::domain::records::ProductionRecord;
use crate::domain::table::{CleanOutcome, CleanStats};
use crate::domain::types::{DatasetKind, ProductionShift};
use crate::importer::cleaner_trait::DatasetCleaner;
use crate::importer::coerce::{
    is_numeric_id, to_date, to_number, to_text, to_text_or_empty, to_time_text,
};
use crate::importer::error::LoadResult;
use crate::importer::sheet::{Cell, RawRow, RawTable};
use tracing::debug;

/// 默认挖机设备类别前缀
pub const DEFAULT_EQUIPMENT_PREFIX: &str = "PC";

/// 行布局
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowLayout {
    /// 字段位于各自列
    Canonical,
    /// 字段整体右移一列（Front 列实为 BLOK）
    Shifted,
    /// 两种布局都不匹配,不做修复
    Unsupported,
}

/// 源表列号
#[derive(Debug, Clone, Copy)]
struct ProductionColumns {
    date: usize,
    time: Option<usize>,
    shift: usize,
    front: Option<usize>,
    commodity: Option<usize>,
    excavator: usize,
    dump_truck: usize,
    dump_location: Option<usize>,
    trips: usize,
    tonnage: usize,
    /// Tonnase 右侧的无名列（错位布局的吨位）
    overflow: Option<usize>,
}

impl ProductionColumns {
    fn locate(raw: &RawTable) -> LoadResult<Self> {
        let required = raw.require(&["Date", "Shift", "Excavator", "Dump Truck", "Rit", "Tonnase"])?;
        let tonnage = required[5];

        let overflow = raw
            .columns()
            .iter()
            .enumerate()
            .skip(tonnage + 1)
            .find(|(_, name)| RawTable::is_placeholder_column(name))
            .map(|(idx, _)| idx);

        Ok(Self {
            date: required[0],
            time: raw.column_index("Time"),
            shift: required[1],
            front: raw.column_index("Front"),
            commodity: raw.column_index("Commudity"),
            excavator: required[2],
            dump_truck: required[3],
            dump_location: raw.column_index("Dump Loc"),
            trips: required[4],
            tonnage,
            overflow,
        })
    }
}

/// 按布局取出的字段（尚未校验）
struct LaidOutFields<'a> {
    block: &'a Cell,
    front: &'a Cell,
    commodity: &'a Cell,
    excavator: &'a Cell,
    dump_truck: &'a Cell,
    dump_location: &'a Cell,
    trips: &'a Cell,
    tonnage: &'a Cell,
}

// ==========================================
// ProductionCleaner
// ==========================================
#[derive(Debug, Clone)]
pub struct ProductionCleaner {
    year: i32,
    equipment_prefix: String,
}

impl ProductionCleaner {
    pub fn new(year: i32, equipment_prefix: impl Into<String>) -> Self {
        Self {
            year,
            equipment_prefix: equipment_prefix.into(),
        }
    }

    pub fn equipment_prefix(&self) -> &str {
        &self.equipment_prefix
    }

    fn has_prefix(&self, cell: &Cell) -> bool {
        to_text(cell)
            .map(|s| s.starts_with(&self.equipment_prefix))
            .unwrap_or(false)
    }

    /// 判定行布局: 挖机列带前缀 → 规范;自卸车列带前缀 → 右移一列;否则不支持
    pub fn layout_of(&self, excavator: &Cell, dump_truck: &Cell) -> RowLayout {
        if self.has_prefix(excavator) {
            RowLayout::Canonical
        } else if self.has_prefix(dump_truck) {
            RowLayout::Shifted
        } else {
            RowLayout::Unsupported
        }
    }

    fn lay_out<'a>(
        &self,
        row: &'a RawRow,
        cols: &ProductionColumns,
        layout: RowLayout,
    ) -> Option<LaidOutFields<'a>> {
        match layout {
            RowLayout::Canonical => Some(LaidOutFields {
                block: row.get_opt(None),
                front: row.get_opt(cols.front),
                commodity: row.get_opt(cols.commodity),
                excavator: row.get(cols.excavator),
                dump_truck: row.get(cols.dump_truck),
                dump_location: row.get_opt(cols.dump_location),
                trips: row.get(cols.trips),
                tonnage: row.get(cols.tonnage),
            }),
            // 每个字段取其左侧一列的表头位置
            RowLayout::Shifted => Some(LaidOutFields {
                block: row.get_opt(cols.front),
                front: row.get_opt(cols.commodity),
                commodity: row.get(cols.excavator),
                excavator: row.get(cols.dump_truck),
                dump_truck: row.get_opt(cols.dump_location),
                dump_location: row.get(cols.trips),
                trips: row.get(cols.tonnage),
                tonnage: row.get_opt(cols.overflow),
            }),
            RowLayout::Unsupported => None,
        }
    }
}

impl DatasetCleaner for ProductionCleaner {
    type Record = ProductionRecord;

    fn dataset(&self) -> DatasetKind {
        DatasetKind::Production
    }

    fn sheet_name(&self) -> String {
        format!("Tahun {}", self.year)
    }

    fn clean(&self, raw: RawTable) -> LoadResult<CleanOutcome<ProductionRecord>> {
        let cols = ProductionColumns::locate(&raw)?;
        let mut stats = CleanStats {
            rows_read: raw.len(),
            ..CleanStats::default()
        };

        let mut header_rows = 0usize;
        let mut rows = Vec::new();

        for row in raw.rows() {
            // === 步骤 1-2: 班次过滤 ===
            let shift_cell = row.get(cols.shift);
            if shift_cell.is_literal(ProductionShift::HEADER_LABEL) {
                header_rows += 1;
                continue;
            }
            let shift = match to_text(shift_cell).and_then(|s| ProductionShift::from_label(&s)) {
                Some(shift) => shift,
                None => continue,
            };

            // === 步骤 4: 布局判定与修复 ===
            let layout = self.layout_of(row.get(cols.excavator), row.get(cols.dump_truck));
            let fields = match self.lay_out(row, &cols, layout) {
                Some(fields) => fields,
                None => {
                    stats.unsupported_layout += 1;
                    debug!(sheet_row = row.sheet_row, "无法识别的行布局,已剔除");
                    continue;
                }
            };

            // === 步骤 5: 最终前缀校验 ===
            let excavator = to_text_or_empty(fields.excavator);
            if !excavator.starts_with(&self.equipment_prefix) {
                continue;
            }

            // === 步骤 6: 自卸车编号 ===
            let dump_truck = to_text_or_empty(fields.dump_truck);
            if !is_numeric_id(&dump_truck) {
                continue;
            }

            // === 步骤 7: 吨位 ===
            let tonnage = match to_number(fields.tonnage) {
                Some(t) if t > 0.0 => t,
                _ => continue,
            };

            if layout == RowLayout::Shifted {
                stats.rows_repaired += 1;
            }

            rows.push(ProductionRecord {
                date: to_date(row.get(cols.date)),
                time: to_time_text(row.get_opt(cols.time)),
                shift,
                block: to_text_or_empty(fields.block),
                front: to_text_or_empty(fields.front),
                commodity: to_text_or_empty(fields.commodity),
                excavator,
                dump_truck,
                dump_location: to_text_or_empty(fields.dump_location),
                trips: to_number(fields.trips),
                tonnage,
            });
        }

        stats.rows_kept = rows.len();
        debug!(
            rows_read = stats.rows_read,
            header_rows,
            repaired = stats.rows_repaired,
            unsupported = stats.unsupported_layout,
            kept = stats.rows_kept,
            "生产日报清洗完成"
        );

        Ok(CleanOutcome {
            columns: ProductionRecord::COLUMNS.iter().map(|c| c.to_string()).collect(),
            rows,
            stats,
        })
    }
}
