// ==========================================
// 月度排班系统 - 核心库
// ==========================================
// 职责: 按规则生成月度排班表,并独立校验合规性
// 系统定位: 决策支持（违规以报告呈现,由人工最终处理）
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 排班规则
pub mod engine;

// 导入层 - 外部请求
pub mod importer;

// 配置层 - 规则参数
pub mod config;

// 错误类型
pub mod error;

// 日志系统
pub mod logging;

// 阶段计时
pub mod perf;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{LeaveType, ShiftCode, StreakClass};

// 领域实体
pub use domain::{
    Absence, DayTotals, Employee, EmployeeTotals, Holiday, Preferences, ReportMeta, RosterGrid,
    RuleGroup, RuleId, ScheduleDay, SoftPreferences, ValidationReport, ValidationResult,
    WeeklyPattern,
};

// 引擎
pub use engine::{
    CalendarBuilder, EligibilityCore, PreAssignmentApplier, RosterContext, RosterOrchestrator,
    RosterOutcome, RuleValidator, ShiftFiller, StreakTracker, TotalsAggregator,
};

// 配置
pub use config::{RuleConfig, RuleConfigManager, RuleConfigReader};

// 导入
pub use importer::{ImportWarning, RequestMapper, RosterRequest};

// 错误
pub use error::{RosterError, RosterResult};

// ==========================================
// 入口函数
// ==========================================

/// 使用默认规则参数生成一个月的排班
///
/// # 返回
/// - Ok(RosterOutcome): 网格 + 合规报告
/// - Err(InvalidPeriod): 年/月组合不存在
pub fn generate(
    year: i32,
    month: u32,
    employees: &[Employee],
    absences: &[Absence],
    holidays: &[Holiday],
) -> RosterResult<RosterOutcome> {
    RosterOrchestrator::new(std::sync::Arc::new(RuleConfig::default()))
        .generate(year, month, employees, absences, holidays)
}

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "月度排班系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
