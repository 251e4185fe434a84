// ==========================================
// 月度排班系统 - 阶段计时
// ==========================================
// 职责: 记录每个引擎阶段的耗时
// 红线: 计时只用于日志与报告元数据,不影响排班结果
// ==========================================

use std::sync::OnceLock;
use std::time::Instant;

static SLOW_PHASE_THRESHOLD_MS: OnceLock<u64> = OnceLock::new();
static PERF_VERBOSE: OnceLock<bool> = OnceLock::new();

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

/// 慢阶段阈值（毫秒）
///
/// - `SHIFT_ROSTER_SLOW_PHASE_MS=50` 配置阈值
/// - 未配置时: Debug 50ms, Release 200ms
pub fn slow_phase_threshold_ms() -> u64 {
    *SLOW_PHASE_THRESHOLD_MS.get_or_init(|| {
        std::env::var("SHIFT_ROSTER_SLOW_PHASE_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
            .unwrap_or(if cfg!(debug_assertions) { 50 } else { 200 })
    })
}

/// `SHIFT_ROSTER_PERF=1` 时阶段耗时以 info 级别输出
fn perf_verbose() -> bool {
    *PERF_VERBOSE.get_or_init(|| {
        std::env::var("SHIFT_ROSTER_PERF")
            .map(|v| is_true(&v))
            .unwrap_or(false)
    })
}

/// 阶段计时 Guard: 析构时记录 elapsed_ms
///
/// 使用方式：
/// ```ignore
/// let _timer = shift_roster::perf::PhaseTimer::start("shift_filler");
/// // do work...
/// ```
pub struct PhaseTimer {
    phase: &'static str,
    start: Instant,
}

impl PhaseTimer {
    pub fn start(phase: &'static str) -> Self {
        Self {
            phase,
            start: Instant::now(),
        }
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}

impl Drop for PhaseTimer {
    fn drop(&mut self) {
        let elapsed_ms = self.elapsed_ms();
        if elapsed_ms >= slow_phase_threshold_ms() {
            tracing::warn!(target: "perf", phase = self.phase, elapsed_ms, "slow phase");
        } else if perf_verbose() {
            tracing::info!(target: "perf", phase = self.phase, elapsed_ms, "done");
        } else {
            tracing::debug!(target: "perf", phase = self.phase, elapsed_ms, "done");
        }
    }
}
