// ==========================================
// 矿山生产报表 - 加载结果缓存
// ==========================================
// 键: (数据集种类, 月份)
// 值: Arc<Table<T>> 快照（类型擦除后存放,读取时按类型还原）
// 失效: invalidate(kind) / invalidate_source(source) / clear()
// 说明: 不主动失效时结果在进程生命周期内保持不变;
//       并发加载同一键时后写入者覆盖先写入者
// ==========================================

use crate::domain::table::Table;
use crate::domain::types::{DatasetKind, Month, SourceFile};
use std::any::Any;
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

/// 缓存键
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CacheKey {
    pub dataset: DatasetKind,
    pub period: Option<Month>,
}

impl CacheKey {
    pub fn new(dataset: DatasetKind, period: Option<Month>) -> Self {
        Self { dataset, period }
    }
}

type Entry = Arc<dyn Any + Send + Sync>;

#[derive(Default)]
pub struct LoadCache {
    entries: Mutex<BTreeMap<CacheKey, Entry>>,
}

impl std::fmt::Debug for LoadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadCache")
            .field("keys", &self.keys())
            .finish()
    }
}

impl LoadCache {
    pub fn new() -> Self {
        Self::default()
    }

    // 缓存内容在任何时刻都是完整快照,锁中毒时直接沿用
    fn lock(&self) -> MutexGuard<'_, BTreeMap<CacheKey, Entry>> {
        self.entries.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// 读取缓存（类型不符视为未命中）
    pub fn get<T>(&self, key: CacheKey) -> Option<Arc<Table<T>>>
    where
        T: Send + Sync + 'static,
    {
        let entry = self.lock().get(&key).cloned()?;
        entry.downcast::<Table<T>>().ok()
    }

    pub fn insert<T>(&self, key: CacheKey, table: Arc<Table<T>>)
    where
        T: Send + Sync + 'static,
    {
        self.lock().insert(key, table);
    }

    /// 命中则返回缓存,否则执行 load 并写入
    ///
    /// load 在锁外执行,避免一次慢读取阻塞其他数据集
    pub fn get_or_load<T, F>(&self, key: CacheKey, load: F) -> Arc<Table<T>>
    where
        T: Send + Sync + 'static,
        F: FnOnce() -> Table<T>,
    {
        if let Some(hit) = self.get::<T>(key) {
            debug!(dataset = %key.dataset, period = ?key.period, "缓存命中");
            return hit;
        }

        let table = Arc::new(load());
        self.insert(key, Arc::clone(&table));
        table
    }

    pub fn contains(&self, key: CacheKey) -> bool {
        self.lock().contains_key(&key)
    }

    pub fn keys(&self) -> Vec<CacheKey> {
        self.lock().keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// 失效某数据集的全部期间
    ///
    /// # 返回
    /// - 移除的条目数
    pub fn invalidate(&self, dataset: DatasetKind) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| key.dataset != dataset);
        let removed = before - entries.len();
        debug!(dataset = %dataset, removed, "缓存失效");
        removed
    }

    /// 失效读取自某源文件的全部数据集（文件被替换后调用）
    pub fn invalidate_source(&self, source: SourceFile) -> usize {
        let mut entries = self.lock();
        let before = entries.len();
        entries.retain(|key, _| key.dataset.source() != source);
        let removed = before - entries.len();
        debug!(source = %source, removed, "按源文件失效缓存");
        removed
    }

    pub fn clear(&self) -> usize {
        let mut entries = self.lock();
        let removed = entries.len();
        entries.clear();
        removed
    }
}
