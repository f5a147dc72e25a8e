// ==========================================
// 性能统计
// ==========================================
// PerfGuard: 记录一次加载的 elapsed_ms + 工作表读取数 + 慢读取数
// 慢读取: 单次工作表读取超过阈值时输出 warn（target: slow_read）
// ==========================================

use std::cell::Cell;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::{Duration, Instant};

static PERF_ENABLED: AtomicBool = AtomicBool::new(true);
static SLOW_READ_THRESHOLD_MS: AtomicU64 = AtomicU64::new(0);

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
    static READ_COUNT: Cell<u64> = Cell::new(0);
    static SLOW_READ_COUNT: Cell<u64> = Cell::new(0);
}

pub(crate) fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 从环境变量安装性能统计开关
///
/// 开关：
/// - Debug 默认开启；Release 默认关闭（可通过环境变量开启）
/// - `MINING_REPORT_PERF=1` 强制开启
/// - `MINING_REPORT_SLOW_READ_MS=500` 配置慢读取阈值（毫秒）
pub fn install_from_env() {
    let enabled = match std::env::var("MINING_REPORT_PERF") {
        Ok(v) => is_true(&v),
        Err(_) => cfg!(debug_assertions),
    };
    PERF_ENABLED.store(enabled, Ordering::Relaxed);

    let slow_ms = std::env::var("MINING_REPORT_SLOW_READ_MS")
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(if cfg!(debug_assertions) { 500 } else { 2000 });
    SLOW_READ_THRESHOLD_MS.store(slow_ms, Ordering::Relaxed);
}

/// 记录一次工作表读取（由加载器在每次读取后调用）
pub fn record_sheet_read(path: &Path, sheet: &str, duration: Duration) {
    if !PERF_ENABLED.load(Ordering::Relaxed) {
        return;
    }

    let active = PERF_DEPTH.with(|d| d.get() > 0);
    if active {
        READ_COUNT.with(|c| c.set(c.get().saturating_add(1)));
    }

    let ms = duration.as_millis() as u64;
    let threshold = SLOW_READ_THRESHOLD_MS.load(Ordering::Relaxed);
    if threshold > 0 && ms >= threshold {
        tracing::warn!(
            target: "slow_read",
            duration_ms = ms,
            path = %path.display(),
            sheet,
            "slow sheet read"
        );
        if active {
            SLOW_READ_COUNT.with(|c| c.set(c.get().saturating_add(1)));
        }
    }
}

/// 性能统计 Guard：记录 elapsed_ms + 工作表读取数 + 慢读取数
///
/// 使用方式：
/// ```ignore
/// let _perf = mining_report::perf::PerfGuard::new("load_production");
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    read_start: u64,
    slow_read_start: u64,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        PERF_DEPTH.with(|d| d.set(d.get().saturating_add(1)));
        let read_start = READ_COUNT.with(|c| c.get());
        let slow_read_start = SLOW_READ_COUNT.with(|c| c.get());
        Self {
            op,
            start: Instant::now(),
            read_start,
            slow_read_start,
        }
    }

    /// 本 Guard 生效以来的工作表读取数
    pub fn sheet_reads(&self) -> u64 {
        READ_COUNT
            .with(|c| c.get())
            .saturating_sub(self.read_start)
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;
        let sheet_reads = self.sheet_reads();
        let slow_reads = SLOW_READ_COUNT
            .with(|c| c.get())
            .saturating_sub(self.slow_read_start);

        if PERF_ENABLED.load(Ordering::Relaxed) {
            tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                sheet_reads,
                slow_reads,
                "done"
            );
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
