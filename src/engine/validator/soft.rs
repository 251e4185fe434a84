// ==========================================
// 软规则: 尽量满足,失败不计入强制违规
// ==========================================

use super::core::{label, or_all_passed, RuleValidator};
use super::mandatory::{count_work, timeline_of};
use crate::domain::{RosterGrid, RuleId, ShiftCode, ValidationResult};
use crate::engine::context::RosterContext;

impl RuleValidator {
    /// 12 小时间隔: 午班次日不接早班（含上月最后一天）
    pub(super) fn check_twelve_hour_rest(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::TwelveHourRest;
        let first_day = grid.first_date();

        let failures = ctx
            .employees()
            .iter()
            .filter_map(|e| {
                let timeline = timeline_of(ctx, grid, &e.id);
                let turnarounds: Vec<_> = timeline
                    .windows(2)
                    .filter(|w| {
                        w[0].1 == Some(ShiftCode::Afternoon) && w[1].1 == Some(ShiftCode::Morning)
                    })
                    .map(|w| w[1].0)
                    .filter(|date| first_day.map(|f| *date >= f).unwrap_or(false))
                    .collect();
                let first = turnarounds.first()?;
                Some(ValidationResult::fail(
                    rule,
                    label(rule, &e.id),
                    format!("TURNAROUND: count={}, first={}", turnarounds.len(), first),
                ))
            })
            .collect();

        or_all_passed(failures, rule, "TURNAROUND: count=0")
    }

    /// 目标人数偏差（按日）
    pub(super) fn check_target_staffing(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::TargetStaffing;

        let failures = grid
            .days
            .iter()
            .filter_map(|day| {
                let target = ctx.rules.target_for(day.is_regular_weekday());
                let (morning, afternoon) = count_work(grid, day.date);
                let on_target = morning == target.morning && afternoon == target.afternoon;
                (!on_target).then(|| {
                    ValidationResult::fail(
                        rule,
                        label(rule, day.date),
                        format!(
                            "STAFFING: morning={}/{}, afternoon={}/{}",
                            morning, target.morning, afternoon, target.afternoon
                        ),
                    )
                })
            })
            .collect();

        or_all_passed(failures, rule, "STAFFING: all days on target")
    }

    /// 早午班均衡: 员工的早/午班数与按可用天数折算的全员均值之差不超过容差
    pub(super) fn check_shift_balance(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::ShiftBalance;
        let tolerance = f64::from(ctx.rules.shift_balance_tolerance);

        let crew: Vec<&str> = ctx
            .employees()
            .iter()
            .map(|e| e.id.as_str())
            .filter(|id| !grid.is_on_leave_all_month(id))
            .collect();
        let available_total: u32 = crew.iter().map(|&id| grid.available_days(id)).sum();
        if available_total == 0 {
            return or_all_passed(Vec::new(), rule, "BALANCE: no available crew");
        }

        let count = |id: &str, shift: ShiftCode| {
            grid.days
                .iter()
                .filter(|d| d.shift_of(id) == Some(shift))
                .count() as u32
        };
        let morning_total: u32 = crew.iter().map(|&id| count(id, ShiftCode::Morning)).sum();
        let afternoon_total: u32 = crew.iter().map(|&id| count(id, ShiftCode::Afternoon)).sum();
        let morning_rate = f64::from(morning_total) / f64::from(available_total);
        let afternoon_rate = f64::from(afternoon_total) / f64::from(available_total);

        let failures = crew
            .iter()
            .filter_map(|&id| {
                let available = f64::from(grid.available_days(id));
                let morning = count(id, ShiftCode::Morning);
                let afternoon = count(id, ShiftCode::Afternoon);
                let expected_morning = morning_rate * available;
                let expected_afternoon = afternoon_rate * available;

                let balanced = (f64::from(morning) - expected_morning).abs() <= tolerance
                    && (f64::from(afternoon) - expected_afternoon).abs() <= tolerance;
                (!balanced).then(|| {
                    ValidationResult::fail(
                        rule,
                        label(rule, id),
                        format!(
                            "BALANCE: morning={}, expected_morning={:.1}, afternoon={}, expected_afternoon={:.1}, tolerance={}",
                            morning, expected_morning, afternoon, expected_afternoon, tolerance
                        ),
                    )
                })
            })
            .collect();

        or_all_passed(
            failures,
            rule,
            format!("BALANCE: crew={}, tolerance={}", crew.len(), tolerance),
        )
    }

    /// 个人软偏好
    pub(super) fn check_individual_preferences(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::IndividualPreferences;

        let failures = ctx
            .employees()
            .iter()
            .filter(|e| !e.preferences.soft.is_empty())
            .filter_map(|e| {
                let conflicts: Vec<_> = grid
                    .days
                    .iter()
                    .filter(|d| {
                        d.shift_of(&e.id)
                            .map(|s| e.preferences.soft.conflicts_with(s, d.is_weekend))
                            .unwrap_or(false)
                    })
                    .map(|d| d.date)
                    .collect();
                let first = conflicts.first()?;
                Some(ValidationResult::fail(
                    rule,
                    label(rule, &e.id),
                    format!("PREFERENCE_CONFLICTS: count={}, first={}", conflicts.len(), first),
                ))
            })
            .collect();

        let with_prefs = ctx
            .employees()
            .iter()
            .filter(|e| !e.preferences.soft.is_empty())
            .count();
        or_all_passed(
            failures,
            rule,
            format!("PREFERENCE_CONFLICTS: count=0, employees={}", with_prefs),
        )
    }
}
