// ==========================================
// 可排判定集成测试
// ==========================================
// 职责: 通过公开 API 验证跨月历史、假期锁定、固定安排对判定的影响
// ==========================================


use chrono::Weekday;
use shift_roster::{Absence, CalendarBuilder, EligibilityCore, Holiday, LeaveType, ShiftCode};
use test_helpers::*;

#[test]
fn test_history_work_streak_blocks_first_day() {
    let employees = vec![EmployeeBuilder::new("E01")
        .history_tail(6, ShiftCode::Morning)
        .build()];
    let ctx = context(&employees, &[], &[]);
    let grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();

    let decision =
        EligibilityCore::evaluate(&ctx, &grid, "E01", april(1), Some(ShiftCode::Afternoon));
    assert!(!decision.allowed);
    assert!(decision.reason.unwrap().starts_with("MAX_WORK_STREAK"));

    assert!(EligibilityCore::can_assign(&ctx, &grid, "E01", april(1), Some(ShiftCode::WeeklyRest)));
    // 第二天不受上月历史影响
    assert!(EligibilityCore::can_assign(&ctx, &grid, "E01", april(2), Some(ShiftCode::Morning)));
}

#[test]
fn test_history_gap_breaks_streak() {
    let employees = vec![EmployeeBuilder::new("E01")
        .history_tail(7, ShiftCode::Morning)
        .history(march(30), None)
        .build()];
    let ctx = context(&employees, &[], &[]);
    let grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();

    assert!(EligibilityCore::can_assign(&ctx, &grid, "E01", april(1), Some(ShiftCode::Morning)));
}

#[test]
fn test_rest_classes_counted_separately() {
    let employees = vec![EmployeeBuilder::new("E01")
        .history_tail(2, ShiftCode::WeeklyRest)
        .build()];
    let ctx = context(&employees, &[], &[]);
    let grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();

    let decision =
        EligibilityCore::evaluate(&ctx, &grid, "E01", april(1), Some(ShiftCode::WeeklyRest));
    assert!(!decision.allowed);
    assert!(decision.reason.unwrap().starts_with("MAX_REST_STREAK"));

    assert!(EligibilityCore::can_assign(
        &ctx,
        &grid,
        "E01",
        april(1),
        Some(ShiftCode::HolidayFree)
    ));
}

#[test]
fn test_leave_cell_locked_after_pre_assignment() {
    let employees = crew(2);
    let absences = vec![Absence::new("E01", LeaveType::Medical, april(1), april(3))];
    let ctx = context(&employees, &absences, &[]);
    let grid = prepared_grid(&ctx);

    let decision =
        EligibilityCore::evaluate(&ctx, &grid, "E01", april(2), Some(ShiftCode::Morning));
    assert!(!decision.allowed);
    assert!(decision.reason.unwrap().starts_with("LEAVE_LOCKED"));

    // 取消赋值与同值赋值总是允许
    assert!(EligibilityCore::can_assign(&ctx, &grid, "E01", april(2), None));
    assert!(EligibilityCore::can_assign(
        &ctx,
        &grid,
        "E01",
        april(2),
        Some(ShiftCode::MedicalLeave)
    ));
}

#[test]
fn test_turnaround_from_history_is_a_note() {
    let employees = vec![EmployeeBuilder::new("E01")
        .history(march(31), Some(ShiftCode::Afternoon))
        .build()];
    let ctx = context(&employees, &[], &[]);
    let grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();

    let decision =
        EligibilityCore::evaluate(&ctx, &grid, "E01", april(1), Some(ShiftCode::Morning));

    assert!(decision.allowed);
    assert_eq!(decision.notes, vec!["TURNAROUND_12H: date=2026-04-01".to_string()]);
}

#[test]
fn test_weekly_pattern_binding_except_holidays() {
    // 4/6 与 4/13 均为周一, 4/13 为节假日
    let employees = vec![EmployeeBuilder::new("E01")
        .weekly(&[Weekday::Mon], ShiftCode::Afternoon)
        .build()];
    let holidays = vec![Holiday::new(april(13), "Holiday")];
    let ctx = context(&employees, &[], &holidays);
    let grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();

    let decision =
        EligibilityCore::evaluate(&ctx, &grid, "E01", april(6), Some(ShiftCode::Morning));
    assert!(!decision.allowed);
    assert!(decision.reason.unwrap().starts_with("WEEKLY_PATTERN"));
    assert!(EligibilityCore::can_assign(&ctx, &grid, "E01", april(6), Some(ShiftCode::Afternoon)));

    assert!(EligibilityCore::can_assign(&ctx, &grid, "E01", april(13), Some(ShiftCode::Morning)));
}

#[test]
fn test_weekly_rest_never_on_holiday() {
    let holidays = vec![Holiday::new(april(3), "Holiday")];
    let ctx = context(&crew(1), &[], &holidays);
    let grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();

    assert!(!EligibilityCore::can_assign(
        &ctx,
        &grid,
        "E01",
        april(3),
        Some(ShiftCode::WeeklyRest)
    ));
    assert!(EligibilityCore::can_assign(
        &ctx,
        &grid,
        "E01",
        april(3),
        Some(ShiftCode::HolidayFree)
    ));
}
