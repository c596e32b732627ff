use std::cell::Cell;
use std::time::Instant;

thread_local! {
    static PERF_DEPTH: Cell<u32> = Cell::new(0);
}

/// 性能统计 Guard：记录 elapsed_ms + 处理行数 + 嵌套深度
///
/// 使用方式：
/// ```ignore
/// let _perf = sales_insight::perf::PerfGuard::new("aggregate").with_rows(records.len());
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: Option<usize>,
    depth: u32,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        let depth = PERF_DEPTH.with(|d| {
            let next = d.get().saturating_add(1);
            d.set(next);
            next
        });
        Self {
            op,
            start: Instant::now(),
            rows: None,
            depth,
        }
    }

    /// 附带本阶段处理的行数
    pub fn with_rows(mut self, rows: usize) -> Self {
        self.rows = Some(rows);
        self
    }

    pub fn op(&self) -> &'static str {
        self.op
    }
}

impl Drop for PerfGuard {
    fn drop(&mut self) {
        let elapsed_ms = self.start.elapsed().as_millis() as u64;

        match self.rows {
            Some(rows) => tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                rows,
                depth = self.depth,
                "done"
            ),
            None => tracing::info!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                depth = self.depth,
                "done"
            ),
        }

        PERF_DEPTH.with(|d| d.set(d.get().saturating_sub(1)));
    }
}
