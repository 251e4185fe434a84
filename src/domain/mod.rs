// ==========================================
// 月度排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体与类型
// 红线: 不含引擎逻辑,不含 I/O
// ==========================================

pub mod calendar;
pub mod employee;
pub mod report;
pub mod roster;
pub mod types;

// 重导出核心类型
pub use calendar::{Absence, Holiday};
pub use employee::{Employee, Preferences, SoftPreferences, WeeklyPattern};
pub use report::{
    sort_results, ReportMeta, RuleGroup, RuleId, ValidationReport, ValidationResult,
};
pub use roster::{DayTotals, EmployeeTotals, RosterGrid, ScheduleDay};
pub use types::{LeaveType, ShiftCode, StreakClass};
