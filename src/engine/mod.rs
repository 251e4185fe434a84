// ==========================================
// 月度排班系统 - 引擎层
// ==========================================
// 职责: 网格构建、预分配、资格判定、多轮填充、汇总、规则校验
// 红线: 引擎不做 I/O; 规则违规与未填充单元格只作为数据记录
// ==========================================

pub mod calendar_builder;
pub mod context;
pub mod eligibility_core;
pub mod orchestrator;
pub mod pre_assignment;
pub mod shift_filler;
pub mod streak;
pub mod totals;
pub mod validator;

// 重导出核心引擎
pub use calendar_builder::CalendarBuilder;
pub use context::RosterContext;
pub use eligibility_core::{EligibilityCore, EligibilityDecision};
pub use orchestrator::{RosterOrchestrator, RosterOutcome};
pub use pre_assignment::{PreAssignmentApplier, PreAssignmentSummary};
pub use shift_filler::{FillPass, FillSummary, PassOutcome, ShiftFiller, Shortfall};
pub use streak::StreakTracker;
pub use totals::{TotalsAggregator, TotalsDiagnostic};
pub use validator::RuleValidator;
