// ==========================================
// 矿山生产报表 - 汇总统计
// ==========================================
// 职责: 对清洗后的记录做基础聚合（合计 / 分组合计 / 排名）
// 红线: 只读,不修改记录;输入为空时返回全零汇总
// ==========================================

use crate::domain::records::{
    DisruptionRecord, FuelRecord, PlanRecord, ProductionAnalysisRecord, ProductionRecord,
    RealizationRecord, TripRecord,
};
use crate::domain::types::{ProductionShift, TripShift};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;

fn add(map: &mut BTreeMap<String, f64>, key: &str, value: f64) {
    *map.entry(key.to_string()).or_insert(0.0) += value;
}

// ==========================================
// 产量汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductionSummary {
    pub record_count: usize,
    pub total_trips: f64,
    pub total_tonnage: f64,
    /// 日期缺失的记录不计入按日合计
    pub tonnage_by_date: BTreeMap<NaiveDate, f64>,
    pub tonnage_by_shift: BTreeMap<ProductionShift, f64>,
    pub tonnage_by_excavator: BTreeMap<String, f64>,
    pub tonnage_by_dump_truck: BTreeMap<String, f64>,
    pub tonnage_by_commodity: BTreeMap<String, f64>,
    pub tonnage_by_front: BTreeMap<String, f64>,
}

pub fn summarize_production(records: &[ProductionRecord]) -> ProductionSummary {
    let mut summary = ProductionSummary {
        record_count: records.len(),
        ..ProductionSummary::default()
    };

    for r in records {
        summary.total_trips += r.trips.unwrap_or(0.0);
        summary.total_tonnage += r.tonnage;

        if let Some(date) = r.date {
            *summary.tonnage_by_date.entry(date).or_insert(0.0) += r.tonnage;
        }
        *summary.tonnage_by_shift.entry(r.shift).or_insert(0.0) += r.tonnage;
        add(&mut summary.tonnage_by_excavator, &r.excavator, r.tonnage);
        add(&mut summary.tonnage_by_dump_truck, &r.dump_truck, r.tonnage);
        add(&mut summary.tonnage_by_commodity, &r.commodity, r.tonnage);
        add(&mut summary.tonnage_by_front, &r.front, r.tonnage);
    }

    summary
}

// ==========================================
// 停机汇总（帕累托排名）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParetoEntry {
    pub label: String,
    pub frequency: f64,
    /// 占总频次比例 (0..=1)
    pub share: f64,
    pub cumulative_share: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DisruptionSummary {
    pub category_count: usize,
    pub total_frequency: f64,
    /// 按频次降序;同频次保持源表顺序
    pub ranked: Vec<ParetoEntry>,
}

impl DisruptionSummary {
    pub fn top(&self) -> Option<&ParetoEntry> {
        self.ranked.first()
    }

    /// 累计占比达到 threshold 所需的最少类别（经典 80/20 取 0.8）
    pub fn vital_few(&self, threshold: f64) -> &[ParetoEntry] {
        let count = self
            .ranked
            .iter()
            .position(|e| e.cumulative_share >= threshold)
            .map(|idx| idx + 1)
            .unwrap_or(self.ranked.len());
        &self.ranked[..count]
    }
}

pub fn summarize_disruptions(records: &[DisruptionRecord]) -> DisruptionSummary {
    // 同名类别合并（保持首次出现顺序）
    let mut merged: Vec<(String, f64)> = Vec::new();
    for r in records {
        match merged.iter_mut().find(|(label, _)| *label == r.label) {
            Some((_, freq)) => *freq += r.frequency,
            None => merged.push((r.label.clone(), r.frequency)),
        }
    }

    let total: f64 = merged.iter().map(|(_, f)| f).sum();
    merged.sort_by(|a, b| b.1.total_cmp(&a.1));

    let ratio = |value: f64| if total > 0.0 { value / total } else { 0.0 };
    let mut cumulative = 0.0;
    let ranked = merged
        .into_iter()
        .map(|(label, frequency)| {
            cumulative += frequency;
            ParetoEntry {
                label,
                frequency,
                share: ratio(frequency),
                cumulative_share: ratio(cumulative),
            }
        })
        .collect::<Vec<_>>();

    DisruptionSummary {
        category_count: ranked.len(),
        total_frequency: total,
        ranked,
    }
}

// ==========================================
// 油耗汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FuelSummary {
    pub equipment_count: usize,
    pub total_liters: f64,
    pub liters_by_class: BTreeMap<String, f64>,
    /// 每日合计（保持源表列顺序）
    pub liters_by_day: Vec<(String, f64)>,
}

pub fn summarize_fuel(records: &[FuelRecord]) -> FuelSummary {
    let mut summary = FuelSummary {
        equipment_count: records.len(),
        ..FuelSummary::default()
    };

    for r in records {
        summary.total_liters += r.total_liters;
        add(&mut summary.liters_by_class, &r.equipment_class, r.total_liters);

        for (day, liters) in &r.daily_liters {
            match summary.liters_by_day.iter_mut().find(|(d, _)| d == day) {
                Some((_, total)) => *total += liters,
                None => summary.liters_by_day.push((day.clone(), *liters)),
            }
        }
    }

    summary
}

// ==========================================
// 运输趟次汇总
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TripSummary {
    pub total_trips: f64,
    /// 各作业面合计（保持白名单顺序）
    pub trips_by_front: Vec<(String, f64)>,
    pub trips_by_shift: BTreeMap<TripShift, f64>,
    pub trips_by_date: BTreeMap<NaiveDate, f64>,
}

pub fn summarize_trips(records: &[TripRecord]) -> TripSummary {
    let mut summary = TripSummary::default();

    for r in records {
        let row_total = r.total_trips();
        summary.total_trips += row_total;
        *summary.trips_by_shift.entry(r.shift).or_insert(0.0) += row_total;
        *summary.trips_by_date.entry(r.date).or_insert(0.0) += row_total;

        for (front, trips) in &r.fronts {
            match summary.trips_by_front.iter_mut().find(|(f, _)| f == front) {
                Some((_, total)) => *total += trips,
                None => summary.trips_by_front.push((front.clone(), *trips)),
            }
        }
    }

    summary
}

// ==========================================
// 计划 vs 实绩（按备注计数）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemarkComparison {
    pub remark: String,
    pub plan: usize,
    pub realization: usize,
    /// realization - plan
    pub difference: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlanComparison {
    pub plan_rows: usize,
    pub realization_rows: usize,
    /// 外连接: 只出现在一侧的备注另一侧计 0;按备注排序
    pub by_remark: Vec<RemarkComparison>,
}

pub fn compare_plan(plan: &[PlanRecord], realization: &[RealizationRecord]) -> PlanComparison {
    let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();

    for remark in plan.iter().filter_map(|r| r.remarks.as_deref()) {
        counts.entry(remark.to_string()).or_default().0 += 1;
    }
    for remark in realization.iter().filter_map(|r| r.remarks.as_deref()) {
        counts.entry(remark.to_string()).or_default().1 += 1;
    }

    PlanComparison {
        plan_rows: plan.len(),
        realization_rows: realization.len(),
        by_remark: counts
            .into_iter()
            .map(|(remark, (p, r))| RemarkComparison {
                remark,
                plan: p,
                realization: r,
                difference: r as i64 - p as i64,
            })
            .collect(),
    }
}

// ==========================================
// 产量分析汇总（计划 vs 实际）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AnalysisSummary {
    pub total_plan: f64,
    pub total_actual: f64,
    /// total_actual / total_plan（计划合计 <= 0 时为 0）
    pub achievement: f64,
    /// total_actual - total_plan
    pub gap: f64,
    /// 实际 >= 计划的天数（任一缺失不计）
    pub days_achieved: usize,
    pub days_missed: usize,
}

pub fn summarize_analysis(records: &[ProductionAnalysisRecord]) -> AnalysisSummary {
    let total_plan: f64 = records.iter().filter_map(|r| r.plan).sum();
    let total_actual: f64 = records.iter().filter_map(|r| r.actual).sum();

    let (mut days_achieved, mut days_missed) = (0, 0);
    for r in records {
        if let (Some(plan), Some(actual)) = (r.plan, r.actual) {
            if plan > 0.0 && actual >= plan {
                days_achieved += 1;
            } else if plan > 0.0 {
                days_missed += 1;
            }
        }
    }

    AnalysisSummary {
        total_plan,
        total_actual,
        achievement: if total_plan > 0.0 {
            total_actual / total_plan
        } else {
            0.0
        },
        gap: total_actual - total_plan,
        days_achieved,
        days_missed,
    }
}
