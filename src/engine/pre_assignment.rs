// ==========================================
// 月度排班系统 - 预置赋值引擎
// ==========================================
// 职责: 在启发式填充前写入假期与固定安排
// 顺序: 假期 → 单日固定班次 → 固定休息日 → 固定周模式
// 红线: 假期单元格一旦写入,不再被任何步骤改写
// 红线: 幂等,重复执行结果相同
// ==========================================

use crate::domain::{RosterGrid, ShiftCode};
use crate::engine::context::RosterContext;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// 预置赋值统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreAssignmentSummary {
    pub leave_cells: u32,
    pub fixed_assignments: u32,
    pub fixed_days_off: u32,
    pub weekly_pattern_cells: u32,
    pub skipped_absences: u32,
}

// ==========================================
// PreAssignmentApplier - 预置赋值引擎
// ==========================================
pub struct PreAssignmentApplier {
    // 无状态
}

impl PreAssignmentApplier {
    pub fn new() -> Self {
        Self {}
    }

    /// 写入全部预置赋值
    ///
    /// 统计值只计本次实际改变的单元格,第二次执行全部为 0
    #[instrument(skip(self, ctx, grid), fields(year = grid.year, month = grid.month))]
    pub fn apply(&self, ctx: &RosterContext, grid: &mut RosterGrid) -> PreAssignmentSummary {
        let mut summary = PreAssignmentSummary::default();

        self.apply_absences(ctx, grid, &mut summary);
        self.apply_fixed_assignments(ctx, grid, &mut summary);
        self.apply_fixed_days_off(ctx, grid, &mut summary);
        self.apply_weekly_patterns(ctx, grid, &mut summary);

        debug!(
            leave_cells = summary.leave_cells,
            fixed_assignments = summary.fixed_assignments,
            fixed_days_off = summary.fixed_days_off,
            weekly_pattern_cells = summary.weekly_pattern_cells,
            skipped_absences = summary.skipped_absences,
            "预置赋值完成"
        );
        summary
    }

    // (a) 假期区间,月外日期忽略
    fn apply_absences(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
        summary: &mut PreAssignmentSummary,
    ) {
        for absence in ctx.absences() {
            if !absence.is_well_formed() {
                warn!(
                    employee_id = %absence.employee_id,
                    start = %absence.start,
                    end = %absence.end,
                    "假期区间起止颠倒,已跳过"
                );
                summary.skipped_absences += 1;
                continue;
            }
            if ctx.employee(&absence.employee_id).is_none() {
                warn!(employee_id = %absence.employee_id, "假期对应的员工不存在,已跳过");
                summary.skipped_absences += 1;
                continue;
            }

            let tag = absence.leave_type.shift_code();
            for date in absence.dates() {
                if !grid.contains(date) {
                    continue;
                }
                match grid.shift_of(&absence.employee_id, date) {
                    Some(existing) if existing.is_leave() => {}
                    _ => {
                        grid.set_shift(&absence.employee_id, date, Some(tag));
                        summary.leave_cells += 1;
                    }
                }
            }
        }
    }

    // (b) 单日固定班次,不覆盖假期
    fn apply_fixed_assignments(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
        summary: &mut PreAssignmentSummary,
    ) {
        for employee in ctx.employees() {
            for (&date, &shift) in &employee.preferences.fixed_assignments {
                if !grid.contains(date) {
                    continue;
                }
                if shift.is_leave() {
                    warn!(
                        employee_id = %employee.id,
                        date = %date,
                        shift = %shift,
                        "固定班次不能是假期标签,已跳过"
                    );
                    continue;
                }
                match grid.shift_of(&employee.id, date) {
                    Some(existing) if existing.is_leave() || existing == shift => {}
                    _ => {
                        grid.set_shift(&employee.id, date, Some(shift));
                        summary.fixed_assignments += 1;
                    }
                }
            }
        }
    }

    // (c) 固定休息日,仅填空单元格
    fn apply_fixed_days_off(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
        summary: &mut PreAssignmentSummary,
    ) {
        for employee in ctx.employees() {
            for &date in &employee.preferences.fixed_days_off {
                let Some(day) = grid.day(date) else {
                    continue;
                };
                let tag = if day.is_holiday {
                    ShiftCode::HolidayFree
                } else {
                    ShiftCode::WeeklyRest
                };
                if grid.is_empty_cell(&employee.id, date) {
                    grid.set_shift(&employee.id, date, Some(tag));
                    summary.fixed_days_off += 1;
                }
            }
        }
    }

    // (d) 固定周模式,节假日除外,仅填空单元格
    fn apply_weekly_patterns(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
        summary: &mut PreAssignmentSummary,
    ) {
        for employee in ctx.employees() {
            let Some(pattern) = &employee.preferences.fixed_weekly_pattern else {
                continue;
            };
            if pattern.shift.is_leave() {
                warn!(
                    employee_id = %employee.id,
                    shift = %pattern.shift,
                    "固定周模式不能是假期标签,已跳过"
                );
                continue;
            }
            let dates: Vec<_> = grid
                .days
                .iter()
                .filter(|d| !d.is_holiday && pattern.weekdays.contains(&d.date.weekday()))
                .map(|d| d.date)
                .collect();

            for date in dates {
                if grid.is_empty_cell(&employee.id, date) {
                    grid.set_shift(&employee.id, date, Some(pattern.shift));
                    summary.weekly_pattern_cells += 1;
                }
            }
        }
    }
}

impl Default for PreAssignmentApplier {
    fn default() -> Self {
        Self::new()
    }
}
