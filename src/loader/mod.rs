// ==========================================
// 矿山生产报表 - 加载层
// ==========================================
// 职责: 对外暴露按数据集加载的入口与结果缓存
// ==========================================

pub mod cache;
pub mod data_loader;

pub use cache::{CacheKey, LoadCache};
pub use data_loader::{DatasetTable, LoaderSettings, MiningDataLoader};
