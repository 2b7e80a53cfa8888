use std::time::Instant;

/// Timing guard: logs elapsed_ms (and rows, when known) under target "perf" on drop
///
/// ```ignore
/// let _perf = lesson_audit::perf::PerfGuard::new("normalize").with_rows(table.len());
/// // do work...
/// ```
pub struct PerfGuard {
    op: &'static str,
    start: Instant,
    rows: Option<usize>,
}

impl PerfGuard {
    pub fn new(op: &'static str) -> Self {
        Self {
            op,
            start: Instant::now(),
            rows: None,
        }
    }

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
            Some(rows) => tracing::debug!(
                target: "perf",
                op = self.op,
                elapsed_ms,
                rows,
                "done"
            ),
            None => tracing::debug!(target: "perf", op = self.op, elapsed_ms, "done"),
        }
    }
}
