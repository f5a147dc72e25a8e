// ==========================================
// 矿山生产报表 - 配置层
// ==========================================
// 职责: 加载参数管理,支持文件 + 环境变量覆写
// 存储: 内存 key-value 表
// ==========================================

pub mod config_manager;
pub mod loader_config_trait;

// 重导出核心配置管理器
pub use config_manager::{config_keys, defaults, ConfigManager};
pub use loader_config_trait::LoaderConfigReader;
