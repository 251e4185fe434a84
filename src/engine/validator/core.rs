use crate::domain::{sort_results, RosterGrid, RuleId, ValidationResult};
use crate::engine::context::RosterContext;
use crate::i18n;
use std::fmt::Display;
use tracing::{info, instrument};

/// 全体通过时使用的主体
pub(super) const ALL_SUBJECT: &str = "ALL";

// ==========================================
// RuleValidator - 规则校验器
// ==========================================
pub struct RuleValidator {
    // 无状态
}

impl RuleValidator {
    pub fn new() -> Self {
        Self {}
    }

    /// 校验全部规则并排序
    ///
    /// 每条规则: 逐个列出失败主体（员工或日期）; 无失败时给出一条 ALL 通过记录
    #[instrument(skip(self, ctx, grid), fields(year = grid.year, month = grid.month))]
    pub fn validate(&self, ctx: &RosterContext, grid: &RosterGrid) -> Vec<ValidationResult> {
        let mut results = Vec::new();

        // 完整性
        results.extend(self.check_completeness(grid));

        // 优先级 1..5
        results.extend(self.check_fixed_honored(ctx, grid));
        results.extend(self.check_minimum_coverage(ctx, grid));
        results.extend(self.check_morning_majority(ctx, grid));
        results.extend(self.check_rest_day_target(ctx, grid));
        results.extend(self.check_no_rest_tag_on_holiday(grid));
        results.extend(self.check_full_rest_weekend(ctx, grid));
        results.extend(self.check_consecutive_days(ctx, grid));

        // 软规则
        results.extend(self.check_twelve_hour_rest(ctx, grid));
        results.extend(self.check_target_staffing(ctx, grid));
        results.extend(self.check_shift_balance(ctx, grid));
        results.extend(self.check_individual_preferences(ctx, grid));

        sort_results(&mut results);

        let failed = results.iter().filter(|r| !r.passed).count();
        info!(total = results.len(), failed, "规则校验完成");
        results
    }
}

impl Default for RuleValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// 报告标签: "<规则名>: <主体>"
pub(super) fn label(rule: RuleId, subject: impl Display) -> String {
    format!("{}: {}", i18n::rule_label(rule), subject)
}

/// 失败列表为空时补一条 ALL 通过记录
pub(super) fn or_all_passed(
    failures: Vec<ValidationResult>,
    rule: RuleId,
    detail: impl Into<String>,
) -> Vec<ValidationResult> {
    if failures.is_empty() {
        vec![ValidationResult::pass(rule, label(rule, ALL_SUBJECT), detail)]
    } else {
        failures
    }
}
