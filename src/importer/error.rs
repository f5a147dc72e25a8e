// ==========================================
// 矿山生产报表 - 加载模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 约定: 加载入口从不向调用方抛出这些错误,统一降级为空表;
//       仅配置读取与 CSV 导出会把错误返回给调用方
// ==========================================

use thiserror::Error;

/// 加载模块错误类型
#[derive(Error, Debug)]
pub enum LoadError {
    // ===== 文件相关错误 =====
    #[error("源文件不存在: 候选路径均不存在 ({0})")]
    SourceNotFound(String),

    #[error("工作表不存在: {sheet} (文件 {path})")]
    SheetNotFound { path: String, sheet: String },

    #[error("工作表读取失败: {sheet} (文件 {path}): {message}")]
    SheetReadFailure {
        path: String,
        sheet: String,
        message: String,
    },

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    // ===== 结构错误 =====
    #[error("缺少必需列: {0}")]
    MissingColumn(String),

    // ===== 配置错误 =====
    #[error("配置值格式错误 (key: {key}, value: {value}): {message}")]
    ConfigValueError {
        key: String,
        value: String,
        message: String,
    },

    #[error("配置文件读取失败: {0}")]
    ConfigReadError(String),

    // ===== 导出错误 =====
    #[error("CSV 导出失败: {0}")]
    CsvExportError(String),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl LoadError {
    /// 是否应继续尝试下一个候选文件
    pub fn is_recoverable_by_next_source(&self) -> bool {
        matches!(
            self,
            LoadError::SheetNotFound { .. }
                | LoadError::SheetReadFailure { .. }
                | LoadError::ExcelParseError(_)
                | LoadError::FileReadError(_)
                | LoadError::MissingColumn(_)
        )
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::FileReadError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for LoadError {
    fn from(err: calamine::Error) -> Self {
        LoadError::ExcelParseError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::CsvExportError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::ConfigReadError(err.to_string())
    }
}

/// Result 类型别名
pub type LoadResult<T> = Result<T, LoadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recoverable_classification() {
        assert!(LoadError::MissingColumn("Shift".to_string()).is_recoverable_by_next_source());
        assert!(LoadError::SheetNotFound {
            path: "a.xlsx".to_string(),
            sheet: "BBM".to_string(),
        }
        .is_recoverable_by_next_source());
        assert!(!LoadError::SourceNotFound("a.xlsx".to_string()).is_recoverable_by_next_source());
    }

    #[test]
    fn test_error_message_contains_sheet() {
        let err = LoadError::SheetNotFound {
            path: "data/Monitoring_2025_.xlsx".to_string(),
            sheet: "Ritase".to_string(),
        };
        assert!(err.to_string().contains("Ritase"));
    }
}
