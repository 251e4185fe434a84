// ==========================================
// 月度排班系统 - 合规报告领域模型
// ==========================================
// 职责: 规则标识、规则分组、校验结果、报告元数据
// 红线: 违规只作为数据记录,不抛出
// ==========================================

use crate::i18n;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// RuleId - 规则标识
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RuleId {
    // ===== 完整性 =====
    SlotCompleteness,

    // ===== 优先级 1 =====
    FixedAssignmentsHonored,

    // ===== 优先级 2 =====
    MinimumCoverage,
    MorningMajority,

    // ===== 优先级 3 =====
    RestDayTarget,
    NoRestTagOnHoliday,

    // ===== 优先级 4 =====
    FullRestWeekend,

    // ===== 优先级 5 =====
    MaxConsecutiveWorkDays,
    MaxConsecutiveRestDays,

    // ===== 软规则 =====
    TwelveHourRest,
    TargetStaffing,
    ShiftBalance,
    IndividualPreferences,
}

impl RuleId {
    pub const ALL: [RuleId; 13] = [
        RuleId::SlotCompleteness,
        RuleId::FixedAssignmentsHonored,
        RuleId::MinimumCoverage,
        RuleId::MorningMajority,
        RuleId::RestDayTarget,
        RuleId::NoRestTagOnHoliday,
        RuleId::FullRestWeekend,
        RuleId::MaxConsecutiveWorkDays,
        RuleId::MaxConsecutiveRestDays,
        RuleId::TwelveHourRest,
        RuleId::TargetStaffing,
        RuleId::ShiftBalance,
        RuleId::IndividualPreferences,
    ];

    /// 规则所属分组
    pub fn group(self) -> RuleGroup {
        match self {
            RuleId::SlotCompleteness => RuleGroup::Completeness,
            RuleId::FixedAssignmentsHonored => RuleGroup::Mandatory(1),
            RuleId::MinimumCoverage | RuleId::MorningMajority => RuleGroup::Mandatory(2),
            RuleId::RestDayTarget | RuleId::NoRestTagOnHoliday => RuleGroup::Mandatory(3),
            RuleId::FullRestWeekend => RuleGroup::Mandatory(4),
            RuleId::MaxConsecutiveWorkDays | RuleId::MaxConsecutiveRestDays => {
                RuleGroup::Mandatory(5)
            }
            RuleId::TwelveHourRest
            | RuleId::TargetStaffing
            | RuleId::ShiftBalance
            | RuleId::IndividualPreferences => RuleGroup::Soft,
        }
    }

    /// i18n 键
    pub fn label_key(self) -> &'static str {
        match self {
            RuleId::SlotCompleteness => "rules.slot_completeness",
            RuleId::FixedAssignmentsHonored => "rules.fixed_assignments_honored",
            RuleId::MinimumCoverage => "rules.minimum_coverage",
            RuleId::MorningMajority => "rules.morning_majority",
            RuleId::RestDayTarget => "rules.rest_day_target",
            RuleId::NoRestTagOnHoliday => "rules.no_rest_tag_on_holiday",
            RuleId::FullRestWeekend => "rules.full_rest_weekend",
            RuleId::MaxConsecutiveWorkDays => "rules.max_consecutive_work_days",
            RuleId::MaxConsecutiveRestDays => "rules.max_consecutive_rest_days",
            RuleId::TwelveHourRest => "rules.twelve_hour_rest",
            RuleId::TargetStaffing => "rules.target_staffing",
            RuleId::ShiftBalance => "rules.shift_balance",
            RuleId::IndividualPreferences => "rules.individual_preferences",
        }
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            RuleId::SlotCompleteness => "SLOT_COMPLETENESS",
            RuleId::FixedAssignmentsHonored => "FIXED_ASSIGNMENTS_HONORED",
            RuleId::MinimumCoverage => "MINIMUM_COVERAGE",
            RuleId::MorningMajority => "MORNING_MAJORITY",
            RuleId::RestDayTarget => "REST_DAY_TARGET",
            RuleId::NoRestTagOnHoliday => "NO_REST_TAG_ON_HOLIDAY",
            RuleId::FullRestWeekend => "FULL_REST_WEEKEND",
            RuleId::MaxConsecutiveWorkDays => "MAX_CONSECUTIVE_WORK_DAYS",
            RuleId::MaxConsecutiveRestDays => "MAX_CONSECUTIVE_REST_DAYS",
            RuleId::TwelveHourRest => "TWELVE_HOUR_REST",
            RuleId::TargetStaffing => "TARGET_STAFFING",
            RuleId::ShiftBalance => "SHIFT_BALANCE",
            RuleId::IndividualPreferences => "INDIVIDUAL_PREFERENCES",
        };
        write!(f, "{}", code)
    }
}

// ==========================================
// RuleGroup - 规则分组
// ==========================================
// 排序: 完整性 → 强制 1..5 → 软规则
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleGroup {
    Completeness,
    Mandatory(u8),
    Soft,
}

impl RuleGroup {
    pub fn rank(self) -> u8 {
        match self {
            RuleGroup::Completeness => 0,
            RuleGroup::Mandatory(p) => p,
            RuleGroup::Soft => u8::MAX,
        }
    }

    /// 完整性与强制规则都计入"未解决的强制违规"
    pub fn is_mandatory(self) -> bool {
        !matches!(self, RuleGroup::Soft)
    }
}

// ==========================================
// ValidationResult - 单条校验结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub rule: RuleId,
    pub label: String,
    pub passed: bool,
    pub detail: String,
}

impl ValidationResult {
    pub fn pass(rule: RuleId, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            rule,
            label: label.into(),
            passed: true,
            detail: detail.into(),
        }
    }

    pub fn fail(rule: RuleId, label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            rule,
            label: label.into(),
            passed: false,
            detail: detail.into(),
        }
    }
}

/// 报告排序: 分组 → 失败优先 → 规则
///
/// 稳定排序; 同一规则内保持校验器的输出顺序（名册顺序或日期顺序）,与语言无关
pub fn sort_results(results: &mut [ValidationResult]) {
    results.sort_by(|a, b| {
        a.rule
            .group()
            .rank()
            .cmp(&b.rule.group().rank())
            .then(a.passed.cmp(&b.passed))
            .then(a.rule.cmp(&b.rule))
    });
}

// ==========================================
// ValidationReport - 合规报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    pub results: Vec<ValidationResult>,
    pub meta: ReportMeta,
}

/// 报告元数据（不参与结果比对）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub run_id: Uuid,

    /// 排班月份 (YYYY-MM)
    pub period: String,

    pub elapsed_ms: u64,
}

impl ValidationReport {
    /// 未解决的强制规则违规数
    pub fn unresolved_mandatory_violations(&self) -> usize {
        self.results
            .iter()
            .filter(|r| !r.passed && r.rule.group().is_mandatory())
            .count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    pub fn results_for(&self, rule: RuleId) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(move |r| r.rule == rule)
    }

    /// 某规则是否全部通过（无结果视为通过）
    pub fn rule_passed(&self, rule: RuleId) -> bool {
        self.results_for(rule).all(|r| r.passed)
    }

    /// 对调用方展示的摘要
    pub fn summary(&self) -> String {
        let unresolved = self.unresolved_mandatory_violations();
        if unresolved == 0 {
            i18n::t_with_args("report.summary_ok", &[("period", self.meta.period.as_str())])
        } else {
            let count = unresolved.to_string();
            i18n::t_with_args(
                "report.summary_violations",
                &[("period", self.meta.period.as_str()), ("count", count.as_str())],
            )
        }
    }
}
