// ==========================================
// 多轮填充集成测试
// ==========================================
// 场景: 第 1 轮基本覆盖、全部轮次后的覆盖与早班多数、人手不足
// ==========================================


use shift_roster::engine::FillPass;
use shift_roster::{
    Absence, EligibilityCore, LeaveType, ShiftCode, ShiftFiller, StreakClass, StreakTracker,
};
use test_helpers::*;

#[test]
fn test_pass_one_with_five_available_employees() {
    let ctx = context(&crew(5), &[], &[]);
    let mut grid = prepared_grid(&ctx);

    let outcome = ShiftFiller::new().run_pass(FillPass::EssentialCoverage, &ctx, &mut grid);

    assert!(outcome.shortfalls.is_empty());
    for day in &grid.days {
        let morning = day.totals.morning;
        let afternoon = day.totals.afternoon;
        assert!(morning >= 1, "date={}", day.date);
        assert!(afternoon >= 1, "date={}", day.date);
        assert!(morning + afternoon >= ctx.rules.min_on_duty);
        if day.is_regular_weekday() && morning + afternoon > 2 {
            assert!(morning > afternoon, "date={}", day.date);
        }
    }
}

#[test]
fn test_full_fill_keeps_coverage_and_majority() {
    let absences = vec![Absence::new("E02", LeaveType::Annual, april(6), april(12))];
    let ctx = context(&crew(7), &absences, &[]);
    let mut grid = prepared_grid(&ctx);

    let summary = ShiftFiller::new().fill(&ctx, &mut grid);

    assert_eq!(summary.passes.len(), 4);
    assert_single_state_per_cell(&grid);
    for day in &grid.days {
        let (morning, afternoon) = (day.totals.morning, day.totals.afternoon);
        assert!(morning >= 1 && afternoon >= 1, "date={}", day.date);
        if day.is_regular_weekday() && morning + afternoon > 2 {
            assert!(morning > afternoon, "date={}", day.date);
        }
    }
    // 假期窗口内无工作班次
    for day in 6..=12 {
        assert_eq!(grid.shift_of("E02", april(day)), Some(ShiftCode::AnnualLeave));
    }
}

#[test]
fn test_no_engine_streak_exceeds_limits() {
    let employees = vec![
        EmployeeBuilder::new("E01").history_tail(4, ShiftCode::Morning).build(),
        EmployeeBuilder::new("E02").history_tail(2, ShiftCode::WeeklyRest).build(),
        EmployeeBuilder::new("E03").build(),
        EmployeeBuilder::new("E04").build(),
        EmployeeBuilder::new("E05").build(),
    ];
    let ctx = context(&employees, &[], &[]);
    let mut grid = prepared_grid(&ctx);

    ShiftFiller::new().fill(&ctx, &mut grid);

    // 每个已填单元格在放入时都通过了判定,整月回看也不应越限
    for id in &grid.employee_ids {
        for day in &grid.days {
            let Some(shift) = day.shift_of(id) else {
                continue;
            };
            let (class, limit) = if shift.is_work() {
                (StreakClass::Work, ctx.rules.max_consecutive_work_days)
            } else if shift == ShiftCode::HolidayFree {
                (StreakClass::HolidayRest, ctx.rules.max_consecutive_holiday_free_days)
            } else {
                (StreakClass::WeeklyRest, ctx.rules.max_consecutive_weekly_rest_days)
            };
            let before = StreakTracker::streak_before(&ctx, &grid, id, day.date, class);
            assert!(before < limit, "{} {} streak={}", id, day.date, before + 1);
        }
    }
}

#[test]
fn test_single_employee_reports_shortfalls() {
    let ctx = context(&crew(1), &[], &[]);
    let mut grid = prepared_grid(&ctx);

    let summary = ShiftFiller::new().fill(&ctx, &mut grid);

    let pass_one = summary.pass(FillPass::EssentialCoverage).unwrap();
    assert!(!pass_one.shortfalls.is_empty());
    // 一人无法同时覆盖早午两班
    assert!(grid.days.iter().all(|d| d.totals.afternoon == 0 || d.totals.morning == 0));
}

#[test]
fn test_fill_is_deterministic() {
    let employees = vec![
        EmployeeBuilder::new("E01").fixed(april(9), ShiftCode::Afternoon).build(),
        EmployeeBuilder::new("E02").day_off(april(18)).build(),
        EmployeeBuilder::new("E03").build(),
        EmployeeBuilder::new("E04").build(),
        EmployeeBuilder::new("E05").build(),
        EmployeeBuilder::new("E06").build(),
    ];
    let ctx = context(&employees, &[], &[]);

    let mut first = prepared_grid(&ctx);
    let mut second = prepared_grid(&ctx);
    let filler = ShiftFiller::new();
    let first_summary = filler.fill(&ctx, &mut first);
    let second_summary = filler.fill(&ctx, &mut second);

    assert_eq!(first, second);
    assert_eq!(first_summary, second_summary);
}

#[test]
fn test_placed_cells_pass_eligibility_in_place() {
    let ctx = context(&crew(6), &[], &[]);
    let mut grid = prepared_grid(&ctx);
    ShiftFiller::new().fill(&ctx, &mut grid);

    // 已有同值标签时判定恒为允许
    for day in &grid.days {
        for id in &grid.employee_ids {
            let cell = day.shift_of(id);
            assert!(EligibilityCore::can_assign(&ctx, &grid, id, day.date, cell));
        }
    }
}
