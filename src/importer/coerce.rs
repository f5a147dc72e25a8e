// ==========================================
// 矿山生产报表 - 类型转换工具
// ==========================================
// 职责: 数值 / 日期 / 文本转换
// 红线: 转换失败永不报错,一律降级为缺失值 (None)
// 两种数值变体:
//   - to_number:          缺失保持缺失（后续按需剔除）
//   - to_number_or_zero:  缺失视为 0（可加字段,如每日油耗）
// ==========================================

use crate::importer::sheet::Cell;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// 视为缺失的文本占位符
const NA_TOKENS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-NaN", "-nan", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null", "<NA>",
];

/// Excel 1900 日期系统基准日（已补偿 1900-02-29 缺陷）
fn excel_epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap_or_default()
}

const TEXT_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
];

const TEXT_DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d", "%d %B %Y", "%d %b %Y", "%m/%d/%Y",
    "%Y%m%d",
];

pub fn is_na_token(value: &str) -> bool {
    let trimmed = value.trim();
    NA_TOKENS.contains(&trimmed)
}

/// Excel 序列日期 → 日期时间（超出 0001..9999 年范围返回 None）
pub fn excel_serial_to_datetime(serial: f64) -> Option<NaiveDateTime> {
    if !serial.is_finite() || !(0.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let millis = (serial * 86_400_000.0).round() as i64;
    excel_epoch().checked_add_signed(Duration::milliseconds(millis))
}

/// 时间部分为纯时间值（Excel 序列 < 1）
pub fn is_time_only(value: &NaiveDateTime) -> bool {
    value.date() == excel_epoch().date()
}

/// 数值转换（缺失保持缺失）
pub fn to_number(cell: &Cell) -> Option<f64> {
    match cell {
        Cell::Number(n) if n.is_finite() => Some(*n),
        Cell::Text(s) if !is_na_token(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

/// 数值转换（缺失视为 0）
pub fn to_number_or_zero(cell: &Cell) -> f64 {
    to_number(cell).unwrap_or(0.0)
}

/// 日期转换: 日期单元格 / Excel 序列值 / 常见文本格式
pub fn to_date(cell: &Cell) -> Option<NaiveDate> {
    match cell {
        Cell::DateTime(dt) => Some(dt.date()),
        Cell::Number(n) if *n >= 1.0 => excel_serial_to_datetime(*n).map(|dt| dt.date()),
        Cell::Text(s) if !is_na_token(s) => parse_date_text(s.trim()),
        _ => None,
    }
}

fn parse_date_text(value: &str) -> Option<NaiveDate> {
    TEXT_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            TEXT_DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        })
}

/// 文本转换（缺失返回 None,首尾空白去除）
pub fn to_text(cell: &Cell) -> Option<String> {
    match cell {
        Cell::Empty | Cell::Error(_) => None,
        Cell::Text(s) => {
            if is_na_token(s) {
                None
            } else {
                Some(s.trim().to_string())
            }
        }
        Cell::Number(n) => {
            if n.is_nan() {
                None
            } else {
                Some(format_number(*n))
            }
        }
        Cell::Bool(b) => Some(if *b { "True" } else { "False" }.to_string()),
        Cell::DateTime(dt) => {
            if is_time_only(dt) {
                Some(dt.time().format("%H:%M:%S").to_string())
            } else {
                Some(dt.format("%Y-%m-%d %H:%M:%S").to_string())
            }
        }
    }
}

/// 文本转换（缺失为空字符串）
pub fn to_text_or_empty(cell: &Cell) -> String {
    to_text(cell).unwrap_or_default()
}

/// 整数值去掉小数部分: 204.0 → "204"
pub fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// 时间文本（时段字段）: 纯时间值 → HH:MM:SS
pub fn to_time_text(cell: &Cell) -> String {
    match cell {
        Cell::Number(n) if (0.0..1.0).contains(n) => excel_serial_to_datetime(*n)
            .map(|dt| dt.time())
            .unwrap_or(NaiveTime::MIN)
            .format("%H:%M:%S")
            .to_string(),
        other => to_text_or_empty(other),
    }
}

/// 纯数字编号判定: ^[0-9]+$
pub fn is_numeric_id(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
