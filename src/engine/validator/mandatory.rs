// ==========================================
// 完整性 + 强制规则 (优先级 1..5)
// ==========================================

use super::core::{label, or_all_passed, RuleValidator};
use crate::domain::{RosterGrid, RuleId, ShiftCode, StreakClass, ValidationResult};
use crate::engine::context::RosterContext;
use chrono::{Datelike, NaiveDate};

impl RuleValidator {
    // ==========================================
    // 完整性: 每个单元格都有标签
    // ==========================================
    pub(super) fn check_completeness(&self, grid: &RosterGrid) -> Vec<ValidationResult> {
        let rule = RuleId::SlotCompleteness;
        let failures = grid
            .employee_ids
            .iter()
            .filter_map(|id| {
                let empty: Vec<String> = grid
                    .days
                    .iter()
                    .filter(|d| matches!(d.assignments.get(id), Some(None)))
                    .map(|d| d.date.to_string())
                    .collect();
                (!empty.is_empty()).then(|| {
                    ValidationResult::fail(
                        rule,
                        label(rule, id),
                        format!("UNASSIGNED: count={}, dates={}", empty.len(), empty.join(",")),
                    )
                })
            })
            .collect();

        let cells = grid.days_in_month() as usize * grid.employee_ids.len();
        or_all_passed(failures, rule, format!("UNASSIGNED: count=0, cells={}", cells))
    }

    // ==========================================
    // 优先级 1: 假期与固定安排得到遵守
    // ==========================================
    pub(super) fn check_fixed_honored(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::FixedAssignmentsHonored;
        let mut failures = Vec::new();
        let mut checked = 0usize;

        for employee in ctx.employees() {
            let id = employee.id.as_str();
            let prefs = &employee.preferences;
            // (日期, 期望, 实际)
            let mut mismatches: Vec<(NaiveDate, String, Option<ShiftCode>)> = Vec::new();

            for absence in ctx
                .absences()
                .iter()
                .filter(|a| a.employee_id == id && a.is_well_formed())
            {
                for date in absence.dates().filter(|d| grid.contains(*d)) {
                    checked += 1;
                    let actual = grid.shift_of(id, date);
                    if !actual.map(ShiftCode::is_leave).unwrap_or(false) {
                        let expected = absence.leave_type.shift_code().to_string();
                        mismatches.push((date, expected, actual));
                    }
                }
            }

            for (&date, &expected) in &prefs.fixed_assignments {
                if !grid.contains(date) || expected.is_leave() {
                    continue;
                }
                checked += 1;
                let actual = grid.shift_of(id, date);
                let on_leave = actual.map(ShiftCode::is_leave).unwrap_or(false);
                if !on_leave && actual != Some(expected) {
                    mismatches.push((date, expected.to_string(), actual));
                }
            }

            for &date in prefs.fixed_days_off.iter().filter(|d| grid.contains(**d)) {
                if prefs.fixed_assignments.contains_key(&date) {
                    continue;
                }
                checked += 1;
                let actual = grid.shift_of(id, date);
                if actual.map(ShiftCode::is_work).unwrap_or(true) {
                    mismatches.push((date, "DAY_OFF".to_string(), actual));
                }
            }

            if let Some(pattern) = prefs
                .fixed_weekly_pattern
                .as_ref()
                .filter(|p| !p.shift.is_leave())
            {
                for day in grid
                    .days
                    .iter()
                    .filter(|d| !d.is_holiday && pattern.weekdays.contains(&d.date.weekday()))
                {
                    if prefs.fixed_assignments.contains_key(&day.date)
                        || prefs.fixed_days_off.contains(&day.date)
                    {
                        continue;
                    }
                    checked += 1;
                    let actual = day.shift_of(id);
                    let on_leave = actual.map(ShiftCode::is_leave).unwrap_or(false);
                    if !on_leave && actual != Some(pattern.shift) {
                        mismatches.push((day.date, pattern.shift.to_string(), actual));
                    }
                }
            }

            if let Some((date, expected, actual)) = mismatches.first() {
                failures.push(ValidationResult::fail(
                    rule,
                    label(rule, id),
                    format!(
                        "MISMATCH: count={}, first={}, expected={}, actual={}",
                        mismatches.len(),
                        date,
                        expected,
                        display_cell(*actual)
                    ),
                ));
            }
        }

        or_all_passed(failures, rule, format!("HONORED: checked={}", checked))
    }

    // ==========================================
    // 优先级 2: 最低在岗人数 / 早班多数
    // ==========================================
    pub(super) fn check_minimum_coverage(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::MinimumCoverage;
        let min = ctx.rules.min_on_duty;

        let failures = grid
            .days
            .iter()
            .filter_map(|day| {
                let (morning, afternoon) = count_work(grid, day.date);
                let ok = morning >= 1 && afternoon >= 1 && morning + afternoon >= min;
                (!ok).then(|| {
                    ValidationResult::fail(
                        rule,
                        label(rule, day.date),
                        format!(
                            "COVERAGE: morning={}, afternoon={}, on_duty={}, min={}",
                            morning,
                            afternoon,
                            morning + afternoon,
                            min
                        ),
                    )
                })
            })
            .collect();

        or_all_passed(
            failures,
            rule,
            format!("COVERAGE: days={}, min={}", grid.days_in_month(), min),
        )
    }

    pub(super) fn check_morning_majority(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::MorningMajority;
        let min = ctx.rules.min_on_duty;

        let failures = grid
            .days
            .iter()
            .filter(|day| day.is_regular_weekday())
            .filter_map(|day| {
                let (morning, afternoon) = count_work(grid, day.date);
                let violated = morning + afternoon > min && morning <= afternoon;
                violated.then(|| {
                    ValidationResult::fail(
                        rule,
                        label(rule, day.date),
                        format!("MAJORITY: morning={}, afternoon={}", morning, afternoon),
                    )
                })
            })
            .collect();

        let regular = grid.days.iter().filter(|d| d.is_regular_weekday()).count();
        or_all_passed(failures, rule, format!("MAJORITY: regular_days={}", regular))
    }

    // ==========================================
    // 优先级 3: 周休目标 / 节假日不排周休
    // ==========================================
    pub(super) fn check_rest_day_target(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::RestDayTarget;

        let failures = ctx
            .employees()
            .iter()
            .filter(|e| !grid.is_on_leave_all_month(&e.id))
            .filter_map(|e| {
                let actual = grid
                    .days
                    .iter()
                    .filter(|d| {
                        d.shift_of(&e.id)
                            .map(|s| StreakClass::WeeklyRest.matches(s))
                            .unwrap_or(false)
                    })
                    .count() as u32;
                let target = grid.rest_day_target(&e.id);
                (actual < target).then(|| {
                    ValidationResult::fail(
                        rule,
                        label(rule, &e.id),
                        format!("REST_DAYS: actual={}, target={}", actual, target),
                    )
                })
            })
            .collect();

        or_all_passed(
            failures,
            rule,
            format!("REST_DAYS: weekend_days={}", grid.rest_eligible_weekend_days()),
        )
    }

    pub(super) fn check_no_rest_tag_on_holiday(&self, grid: &RosterGrid) -> Vec<ValidationResult> {
        let rule = RuleId::NoRestTagOnHoliday;

        let failures = grid
            .days
            .iter()
            .filter(|d| d.is_holiday)
            .filter_map(|day| {
                let offenders: Vec<&str> = grid
                    .employee_ids
                    .iter()
                    .filter(|id| {
                        day.shift_of(id)
                            .map(|s| StreakClass::WeeklyRest.matches(s))
                            .unwrap_or(false)
                    })
                    .map(String::as_str)
                    .collect();
                (!offenders.is_empty()).then(|| {
                    ValidationResult::fail(
                        rule,
                        label(rule, day.date),
                        format!("REST_ON_HOLIDAY: employees={}", offenders.join(",")),
                    )
                })
            })
            .collect();

        let holidays = grid.days.iter().filter(|d| d.is_holiday).count();
        or_all_passed(failures, rule, format!("REST_ON_HOLIDAY: holidays={}", holidays))
    }

    // ==========================================
    // 优先级 4: 完整休息周末
    // ==========================================
    pub(super) fn check_full_rest_weekend(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rule = RuleId::FullRestWeekend;
        let pairs = grid.weekend_pairs();
        let is_rest = |id: &str, date: NaiveDate| {
            grid.shift_of(id, date)
                .map(ShiftCode::is_rest)
                .unwrap_or(false)
        };

        let failures = ctx
            .employees()
            .iter()
            .filter(|e| e.eligible_for_full_rest_weekend && !grid.is_on_leave_all_month(&e.id))
            .filter(|e| {
                let id = e.id.as_str();
                !pairs
                    .iter()
                    .any(|(sat, sun)| is_rest(id, *sat) && is_rest(id, *sun))
            })
            .map(|e| {
                ValidationResult::fail(
                    rule,
                    label(rule, &e.id),
                    format!("FULL_REST_WEEKEND: none, weekends={}", pairs.len()),
                )
            })
            .collect();

        or_all_passed(failures, rule, format!("FULL_REST_WEEKEND: weekends={}", pairs.len()))
    }

    // ==========================================
    // 优先级 5: 连续工作 / 连续休息上限（含上月历史）
    // ==========================================
    pub(super) fn check_consecutive_days(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
    ) -> Vec<ValidationResult> {
        let rules = &ctx.rules;
        let mut work_failures = Vec::new();
        let mut rest_failures = Vec::new();

        for employee in ctx.employees() {
            let timeline = timeline_of(ctx, grid, &employee.id);

            let work_limit = rules.max_consecutive_work_days;
            let work = over_limit_runs(&timeline, StreakClass::Work, work_limit);
            if !work.is_empty() {
                work_failures.push(ValidationResult::fail(
                    RuleId::MaxConsecutiveWorkDays,
                    label(RuleId::MaxConsecutiveWorkDays, &employee.id),
                    format!("RUNS: {}, limit={}", format_runs(&work), work_limit),
                ));
            }

            let mut rest = Vec::new();
            for (class, limit) in [
                (StreakClass::WeeklyRest, rules.max_consecutive_weekly_rest_days),
                (StreakClass::HolidayRest, rules.max_consecutive_holiday_free_days),
            ] {
                let runs = over_limit_runs(&timeline, class, limit);
                if !runs.is_empty() {
                    rest.push(format!("{}[{}], limit={}", class, format_runs(&runs), limit));
                }
            }
            if !rest.is_empty() {
                rest_failures.push(ValidationResult::fail(
                    RuleId::MaxConsecutiveRestDays,
                    label(RuleId::MaxConsecutiveRestDays, &employee.id),
                    format!("RUNS: {}", rest.join("; ")),
                ));
            }
        }

        let mut results = or_all_passed(
            work_failures,
            RuleId::MaxConsecutiveWorkDays,
            format!("RUNS: none, limit={}", rules.max_consecutive_work_days),
        );
        results.extend(or_all_passed(
            rest_failures,
            RuleId::MaxConsecutiveRestDays,
            format!(
                "RUNS: none, weekly_rest_limit={}, holiday_free_limit={}",
                rules.max_consecutive_weekly_rest_days, rules.max_consecutive_holiday_free_days
            ),
        ));
        results
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// (早班人数, 午班人数), 直接从单元格计数
pub(super) fn count_work(grid: &RosterGrid, date: NaiveDate) -> (u32, u32) {
    let Some(day) = grid.day(date) else {
        return (0, 0);
    };
    day.assignments
        .values()
        .fold((0, 0), |(m, a), cell| match cell {
            Some(ShiftCode::Morning) => (m + 1, a),
            Some(ShiftCode::Afternoon) => (m, a + 1),
            _ => (m, a),
        })
}

fn display_cell(cell: Option<ShiftCode>) -> String {
    cell.map(|s| s.to_string())
        .unwrap_or_else(|| "UNASSIGNED".to_string())
}

/// 员工的连续时间线: 紧邻月初的上月历史（连续,窗口内） + 当月单元格
pub(super) fn timeline_of(
    ctx: &RosterContext,
    grid: &RosterGrid,
    employee_id: &str,
) -> Vec<(NaiveDate, Option<ShiftCode>)> {
    let mut history = Vec::new();
    if let (Some(employee), Some(first)) = (ctx.employee(employee_id), grid.first_date()) {
        let mut cursor = first.pred_opt();
        while let Some(day) = cursor {
            if history.len() as u32 >= ctx.rules.history_window_days {
                break;
            }
            match employee.history.get(&day) {
                Some(cell) => history.push((day, *cell)),
                None => break,
            }
            cursor = day.pred_opt();
        }
    }
    history.reverse();

    history
        .into_iter()
        .chain(grid.days.iter().map(|d| (d.date, d.shift_of(employee_id))))
        .collect()
}

/// 超过上限的连续段 (起始日, 结束日, 长度)
pub(super) fn over_limit_runs(
    timeline: &[(NaiveDate, Option<ShiftCode>)],
    class: StreakClass,
    limit: u32,
) -> Vec<(NaiveDate, NaiveDate, u32)> {
    let mut runs = Vec::new();
    let mut current: Option<(NaiveDate, NaiveDate, u32)> = None;

    for &(date, cell) in timeline {
        let matches = cell.map(|s| class.matches(s)).unwrap_or(false);
        current = match (current, matches) {
            (Some((start, _, len)), true) => Some((start, date, len + 1)),
            (None, true) => Some((date, date, 1)),
            (Some(run), false) => {
                if run.2 > limit {
                    runs.push(run);
                }
                None
            }
            (None, false) => None,
        };
    }
    if let Some(run) = current.filter(|r| r.2 > limit) {
        runs.push(run);
    }
    runs
}

fn format_runs(runs: &[(NaiveDate, NaiveDate, u32)]) -> String {
    runs.iter()
        .map(|(start, end, len)| format!("{}..{}({})", start, end, len))
        .collect::<Vec<_>>()
        .join(",")
}
