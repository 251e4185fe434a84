// ==========================================
// 月度排班系统 - 连续天数回溯
// ==========================================
// 职责: 统计某日之前紧邻的、属于某类别的连续天数
// 范围: 先回溯当月网格,越过月初后回溯上月历史
// 红线: 只读,不修改网格
// 红线: 历史日期必须严格连续,出现缺口即终止
// ==========================================

use crate::domain::{RosterGrid, StreakClass};
use crate::engine::context::RosterContext;
use chrono::NaiveDate;

// ==========================================
// StreakTracker - 连续天数回溯器
// ==========================================
pub struct StreakTracker;

impl StreakTracker {
    /// 统计 date 前一天起向前的连续天数
    ///
    /// # 终止条件
    /// - 单元格为空、为其他类别标签或为假期
    /// - 历史中缺少某一天（缺口）
    /// - 超出历史回看窗口
    ///
    /// # 返回
    /// 连续天数（未知员工返回 0）
    pub fn streak_before(
        ctx: &RosterContext,
        grid: &RosterGrid,
        employee_id: &str,
        date: NaiveDate,
        class: StreakClass,
    ) -> u32 {
        let Some(employee) = ctx.employee(employee_id) else {
            return 0;
        };
        let Some(month_start) = grid.first_date() else {
            return 0;
        };

        let mut count = 0;
        let mut cursor = date.pred_opt();

        // 1) 当月网格
        while let Some(day) = cursor {
            if !grid.contains(day) {
                break;
            }
            match grid.shift_of(employee_id, day) {
                Some(shift) if class.matches(shift) => count += 1,
                _ => return count,
            }
            cursor = day.pred_opt();
        }

        // 2) 上月历史（仅当已越过月初）
        let mut remaining = ctx.rules.history_window_days;
        while let Some(day) = cursor {
            if day >= month_start || remaining == 0 {
                break;
            }
            match employee.history.get(&day) {
                Some(Some(shift)) if class.matches(*shift) => count += 1,
                _ => break,
            }
            remaining -= 1;
            cursor = day.pred_opt();
        }

        count
    }

    /// 统计 date 后一天起向后的连续天数（仅当月网格）
    ///
    /// 后续轮次会回填较早的日期,需要同时看到已填好的后继单元格
    pub fn streak_after(
        grid: &RosterGrid,
        employee_id: &str,
        date: NaiveDate,
        class: StreakClass,
    ) -> u32 {
        let mut count = 0;
        let mut cursor = date.succ_opt();
        while let Some(day) = cursor {
            match grid.shift_of(employee_id, day) {
                Some(shift) if class.matches(shift) => count += 1,
                _ => break,
            }
            cursor = day.succ_opt();
        }
        count
    }

    /// 若在 date 放入该类别标签,所形成的连续段长度
    pub fn run_through(
        ctx: &RosterContext,
        grid: &RosterGrid,
        employee_id: &str,
        date: NaiveDate,
        class: StreakClass,
    ) -> u32 {
        Self::streak_before(ctx, grid, employee_id, date, class)
            + 1
            + Self::streak_after(grid, employee_id, date, class)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RuleConfig;
    use crate::domain::{Employee, ShiftCode};
    use crate::engine::CalendarBuilder;

    fn d(month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, month, day).unwrap()
    }

    fn setup(history: &[(NaiveDate, Option<ShiftCode>)]) -> (RosterContext, RosterGrid) {
        let mut emp = Employee::new("E01", "Ana");
        emp.history = history.iter().copied().collect();
        let ctx = RosterContext::new(RuleConfig::default(), &[emp], &[], &[]);
        let grid = CalendarBuilder::new().build(2026, 4, &ctx).unwrap();
        (ctx, grid)
    }

    #[test]
    fn test_streak_within_month() {
        let (ctx, mut grid) = setup(&[]);
        for day in 3..=5 {
            grid.set_shift("E01", d(4, day), Some(ShiftCode::Morning));
        }
        grid.set_shift("E01", d(4, 6), Some(ShiftCode::Afternoon));

        let work = StreakTracker::streak_before(&ctx, &grid, "E01", d(4, 7), StreakClass::Work);
        assert_eq!(work, 4);

        let rest =
            StreakTracker::streak_before(&ctx, &grid, "E01", d(4, 7), StreakClass::WeeklyRest);
        assert_eq!(rest, 0);
    }

    #[test]
    fn test_streak_bridges_history() {
        let history = [
            (d(3, 29), Some(ShiftCode::Morning)),
            (d(3, 30), Some(ShiftCode::Morning)),
            (d(3, 31), Some(ShiftCode::Afternoon)),
        ];
        let (ctx, mut grid) = setup(&history);
        grid.set_shift("E01", d(4, 1), Some(ShiftCode::Morning));

        let work = StreakTracker::streak_before(&ctx, &grid, "E01", d(4, 2), StreakClass::Work);
        assert_eq!(work, 4);
    }

    #[test]
    fn test_history_gap_terminates_scan() {
        // 3-29 缺失
        let history = [
            (d(3, 28), Some(ShiftCode::Morning)),
            (d(3, 30), Some(ShiftCode::Morning)),
            (d(3, 31), Some(ShiftCode::Morning)),
        ];
        let (ctx, grid) = setup(&history);

        let work = StreakTracker::streak_before(&ctx, &grid, "E01", d(4, 1), StreakClass::Work);
        assert_eq!(work, 2);
    }

    #[test]
    fn test_null_history_entry_terminates_scan() {
        let history = [
            (d(3, 29), Some(ShiftCode::Morning)),
            (d(3, 30), None),
            (d(3, 31), Some(ShiftCode::Morning)),
        ];
        let (ctx, grid) = setup(&history);

        let work = StreakTracker::streak_before(&ctx, &grid, "E01", d(4, 1), StreakClass::Work);
        assert_eq!(work, 1);
    }

    #[test]
    fn test_empty_cell_does_not_reach_history() {
        let history = [(d(3, 31), Some(ShiftCode::Morning))];
        let (ctx, grid) = setup(&history);

        // 4-01 为空 → 从 4-02 回溯立即终止
        let work = StreakTracker::streak_before(&ctx, &grid, "E01", d(4, 2), StreakClass::Work);
        assert_eq!(work, 0);
    }

    #[test]
    fn test_run_through_joins_both_sides() {
        let (ctx, mut grid) = setup(&[]);
        grid.set_shift("E01", d(4, 1), Some(ShiftCode::WeeklyRest));
        grid.set_shift("E01", d(4, 3), Some(ShiftCode::CompensatoryRest));
        grid.set_shift("E01", d(4, 4), Some(ShiftCode::Morning));

        let after = StreakTracker::streak_after(&grid, "E01", d(4, 2), StreakClass::WeeklyRest);
        assert_eq!(after, 1);
        let run = StreakTracker::run_through(&ctx, &grid, "E01", d(4, 2), StreakClass::WeeklyRest);
        assert_eq!(run, 3);
    }

    #[test]
    fn test_unknown_employee_is_zero() {
        let (ctx, grid) = setup(&[]);
        assert_eq!(
            StreakTracker::streak_before(&ctx, &grid, "E99", d(4, 10), StreakClass::Work),
            0
        );
    }
}
