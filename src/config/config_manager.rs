// ==========================================
// 矿山生产报表 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 来源（后者覆盖前者）: 内置默认值 → JSON 配置文件 → 环境变量 MINING_REPORT_<KEY>
// 存储: 内存 key-value 表
// ==========================================

use crate::config::loader_config_trait::LoaderConfigReader;
use crate::domain::types::{Month, SourceFile};
use crate::importer::error::{LoadError, LoadResult};
use crate::importer::file_resolver::DatasetSources;
use chrono::{Datelike, Local};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "MINING_REPORT_";

/// 默认配置文件名（位于用户配置目录下的 mining-report/）
pub const CONFIG_FILE_NAME: &str = "config.json";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Default)]
pub struct ConfigManager {
    values: Mutex<HashMap<String, String>>,
}

impl ConfigManager {
    /// 创建空配置（全部使用默认值）
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 文件加载配置
    ///
    /// # 参数
    /// - path: JSON 文件路径,顶层必须为对象
    ///
    /// # 说明
    /// 字符串/数字/布尔值按文本保存;字符串数组以逗号连接（用于别名表）
    pub fn from_json_file(path: &Path) -> LoadResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|e| {
            LoadError::ConfigReadError(format!("{}: {}", path.display(), e))
        })?;
        let manager = Self::from_json_str(&raw)?;
        debug!(path = %path.display(), "配置文件已加载");
        Ok(manager)
    }

    pub fn from_json_str(raw: &str) -> LoadResult<Self> {
        let value: Value = serde_json::from_str(raw)?;
        let object = value.as_object().ok_or_else(|| {
            LoadError::ConfigReadError("配置文件顶层必须为 JSON 对象".to_string())
        })?;

        let mut values = HashMap::new();
        for (key, value) in object {
            match json_to_text(value) {
                Some(text) => {
                    values.insert(key.clone(), text);
                }
                None => warn!(config_key = %key, "不支持的配置值类型,已忽略"),
            }
        }

        Ok(Self {
            values: Mutex::new(values),
        })
    }

    /// 标准加载流程: 配置文件（显式指定或用户配置目录下存在时）+ 环境变量覆写
    pub fn load(explicit_path: Option<&Path>) -> LoadResult<Self> {
        let manager = match explicit_path {
            Some(path) => Self::from_json_file(path)?,
            None => match default_config_path().filter(|p| p.is_file()) {
                Some(path) => Self::from_json_file(&path)?,
                None => Self::new(),
            },
        };
        manager.apply_overrides(std::env::vars())?;
        Ok(manager)
    }

    /// 应用 MINING_REPORT_<KEY> 形式的覆写（KEY 大写,点号写作下划线）
    ///
    /// # 返回
    /// - Ok(usize): 生效的覆写数量
    pub fn apply_overrides<I>(&self, vars: I) -> LoadResult<usize>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let known: HashMap<String, String> = config_keys::all_keys()
            .into_iter()
            .map(|key| (env_var_name(&key), key))
            .collect();

        let mut applied = 0;
        for (name, value) in vars {
            if let Some(key) = known.get(&name) {
                debug!(config_key = %key, env = %name, "环境变量覆写配置");
                self.set_config_value(key, &value)?;
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// 读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, key: &str) -> LoadResult<Option<String>> {
        let values = self
            .values
            .lock()
            .map_err(|e| LoadError::InternalError(format!("锁获取失败: {}", e)))?;
        Ok(values.get(key).cloned())
    }

    /// 读取配置值,带默认值
    pub fn get_config_or_default(&self, key: &str, default: &str) -> LoadResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入配置值（覆盖已有值）
    pub fn set_config_value(&self, key: &str, value: &str) -> LoadResult<()> {
        let mut values = self
            .values
            .lock()
            .map_err(|e| LoadError::InternalError(format!("锁获取失败: {}", e)))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    /// 获取所有配置的快照（JSON 格式,键有序）
    pub fn get_config_snapshot(&self) -> LoadResult<String> {
        let values = self
            .values
            .lock()
            .map_err(|e| LoadError::InternalError(format!("锁获取失败: {}", e)))?;
        let ordered: BTreeMap<&String, &String> = values.iter().collect();
        Ok(serde_json::to_string(&ordered)?)
    }

    fn parse_or_default<T: std::str::FromStr>(&self, key: &str, default: T) -> LoadResult<T> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(value) => Ok(value),
                Err(_) => {
                    warn!(config_key = key, raw_value = %raw, "配置值格式错误,使用默认值");
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }
}

/// 用户配置目录下的默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("mining-report").join(CONFIG_FILE_NAME))
}

/// 配置键 → 环境变量名
pub fn env_var_name(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key.replace('.', "_").to_uppercase())
}

fn json_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => items
            .iter()
            .map(|item| item.as_str().map(str::to_string))
            .collect::<Option<Vec<_>>>()
            .map(|items| items.join(",")),
        Value::Null | Value::Object(_) => None,
    }
}

/// 解析 "Januari:0,Februari:5" 形式的月份偏移表,格式错误的项跳过
pub fn parse_month_offsets(raw: &str) -> BTreeMap<Month, usize> {
    raw.split(',')
        .filter_map(|entry| {
            let (month, offset) = entry.split_once(':')?;
            let month = month.trim().parse::<Month>().ok()?;
            let offset = offset.trim().parse::<usize>().ok()?;
            Some((month, offset))
        })
        .collect()
}

// ==========================================
// LoaderConfigReader Trait 实现
// ==========================================
impl LoaderConfigReader for ConfigManager {
    fn get_data_dir(&self) -> LoadResult<PathBuf> {
        let value = self.get_config_or_default(config_keys::DATA_DIR, defaults::DATA_DIR)?;
        Ok(PathBuf::from(value))
    }

    fn get_production_year(&self) -> LoadResult<i32> {
        self.parse_or_default(config_keys::PRODUCTION_YEAR, Local::now().year())
    }

    fn get_equipment_prefix(&self) -> LoadResult<String> {
        let value =
            self.get_config_or_default(config_keys::EQUIPMENT_PREFIX, defaults::EQUIPMENT_PREFIX)?;
        let value = value.trim();
        if value.is_empty() {
            Ok(defaults::EQUIPMENT_PREFIX.to_string())
        } else {
            Ok(value.to_string())
        }
    }

    fn get_disruption_title_rows(&self) -> LoadResult<usize> {
        self.parse_or_default(config_keys::DISRUPTION_TITLE_ROWS, defaults::TITLE_ROWS)
    }

    fn get_schedule_title_rows(&self) -> LoadResult<usize> {
        self.parse_or_default(config_keys::SCHEDULE_TITLE_ROWS, defaults::TITLE_ROWS)
    }

    fn get_plan_sheet(&self) -> LoadResult<String> {
        self.get_config_or_default(config_keys::PLAN_SHEET, defaults::PLAN_SHEET)
    }

    fn get_realization_sheet(&self) -> LoadResult<String> {
        self.get_config_or_default(config_keys::REALIZATION_SHEET, defaults::REALIZATION_SHEET)
    }

    fn get_analysis_month_offsets(&self) -> LoadResult<BTreeMap<Month, usize>> {
        let value = self.get_config_or_default(
            config_keys::ANALYSIS_MONTH_OFFSETS,
            defaults::ANALYSIS_MONTH_OFFSETS,
        )?;
        let offsets = parse_month_offsets(&value);
        if offsets.is_empty() && !value.trim().is_empty() {
            warn!(raw_value = %value, "月份偏移配置无有效项");
        }
        Ok(offsets)
    }

    fn get_source_aliases(&self, source: SourceFile) -> LoadResult<Vec<String>> {
        let key = config_keys::source_aliases(source);
        let aliases: Vec<String> = match self.get_config_value(&key)? {
            Some(raw) => raw
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            None => Vec::new(),
        };

        if aliases.is_empty() {
            Ok(DatasetSources::default_aliases(source))
        } else {
            Ok(aliases)
        }
    }
}

// ==========================================
// 默认值
// ==========================================
pub mod defaults {
    pub const DATA_DIR: &str = "data";
    pub const EQUIPMENT_PREFIX: &str = "PC";
    pub const TITLE_ROWS: usize = 1;
    pub const PLAN_SHEET: &str = "W22 Scheduling";
    pub const REALIZATION_SHEET: &str = "W22 realisasi";
    pub const ANALYSIS_MONTH_OFFSETS: &str = "Januari:0,Februari:5";
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    use crate::domain::types::SourceFile;

    // 数据源
    pub const DATA_DIR: &str = "data_dir";
    pub const SOURCE_ALIASES_PREFIX: &str = "source_aliases";

    // 产量日志
    pub const PRODUCTION_YEAR: &str = "production_year";
    pub const EQUIPMENT_PREFIX: &str = "equipment_prefix";

    // 标题行数
    pub const DISRUPTION_TITLE_ROWS: &str = "disruption_title_rows";
    pub const SCHEDULE_TITLE_ROWS: &str = "schedule_title_rows";

    // 排程表
    pub const PLAN_SHEET: &str = "plan_sheet";
    pub const REALIZATION_SHEET: &str = "realization_sheet";

    // 产量分析
    pub const ANALYSIS_MONTH_OFFSETS: &str = "analysis_month_offsets";

    /// 源文件别名表的键: source_aliases.<source>
    pub fn source_aliases(source: SourceFile) -> String {
        format!("{}.{}", SOURCE_ALIASES_PREFIX, source.as_str())
    }

    /// 全部已知键（环境变量覆写只识别这些键）
    pub fn all_keys() -> Vec<String> {
        let mut keys: Vec<String> = [
            DATA_DIR,
            PRODUCTION_YEAR,
            EQUIPMENT_PREFIX,
            DISRUPTION_TITLE_ROWS,
            SCHEDULE_TITLE_ROWS,
            PLAN_SHEET,
            REALIZATION_SHEET,
            ANALYSIS_MONTH_OFFSETS,
        ]
        .iter()
        .map(|k| k.to_string())
        .collect();
        keys.extend(SourceFile::ALL.into_iter().map(source_aliases));
        keys
    }
}
