// ==========================================
// 规则校验集成测试
// ==========================================
// 职责: 校验器独立于填充过程,对任意网格重新计算结果
// ==========================================


use shift_roster::{
    CalendarBuilder, Holiday, RuleGroup, RuleId, RuleValidator, ShiftCode, TotalsAggregator,
    ValidationResult,
};
use test_helpers::*;

fn failures(results: &[ValidationResult], rule: RuleId) -> Vec<&ValidationResult> {
    results.iter().filter(|r| r.rule == rule && !r.passed).collect()
}

#[test]
fn test_tampered_generated_grid_is_flagged() {
    let employees = crew(6);
    let outcome = shift_roster::generate(YEAR, MONTH, &employees, &[], &[]).unwrap();
    let ctx = context(&employees, &[], &[]);
    let validator = RuleValidator::new();

    // 未改动时重新校验与生成时的结果一致
    assert_eq!(validator.validate(&ctx, &outcome.grid), outcome.report.results);

    let mut grid = outcome.grid.clone();
    for id in grid.employee_ids.clone() {
        grid.set_shift(&id, april(8), Some(ShiftCode::WeeklyRest));
    }
    grid.set_shift("E01", april(15), None);
    TotalsAggregator::new().recompute(&mut grid);

    let results = validator.validate(&ctx, &grid);

    let coverage = failures(&results, RuleId::MinimumCoverage);
    assert!(coverage.iter().any(|r| r.label.ends_with("2026-04-08")));

    let completeness = failures(&results, RuleId::SlotCompleteness);
    let e01 = completeness
        .iter()
        .find(|r| r.label.ends_with("E01"))
        .expect("E01 应有未分配单元格");
    assert!(e01.detail.contains("2026-04-15"));

    assert_eq!(results[0].rule.group(), RuleGroup::Completeness);
    assert!(!results[0].passed);
}

#[test]
fn test_hand_built_streak_violation() {
    let ctx = context(&crew(2), &[], &[]);
    let mut grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();
    for day in grid.days.iter_mut() {
        let date = day.date;
        let e01 = if date <= april(8) {
            ShiftCode::Morning
        } else {
            ShiftCode::Afternoon
        };
        day.assignments.insert("E01".to_string(), Some(e01));
        day.assignments.insert("E02".to_string(), Some(ShiftCode::WeeklyRest));
    }
    TotalsAggregator::new().recompute(&mut grid);

    let results = RuleValidator::new().validate(&ctx, &grid);

    let work = failures(&results, RuleId::MaxConsecutiveWorkDays);
    assert_eq!(work.len(), 1);
    assert!(work[0].detail.contains("2026-04-01..2026-04-30(30)"));

    let rest = failures(&results, RuleId::MaxConsecutiveRestDays);
    assert_eq!(rest.len(), 1);
    assert!(rest[0].label.ends_with("E02"));
}

#[test]
fn test_rest_tag_on_holiday_names_offenders() {
    let holidays = vec![Holiday::new(april(3), "Holiday")];
    let ctx = context(&crew(3), &[], &holidays);
    let mut grid = CalendarBuilder::new().build(YEAR, MONTH, &ctx).unwrap();
    grid.set_shift("E01", april(3), Some(ShiftCode::CompensatoryRest));
    grid.set_shift("E02", april(3), Some(ShiftCode::HolidayFree));
    grid.set_shift("E03", april(3), Some(ShiftCode::WeeklyRest));

    let results = RuleValidator::new().validate(&ctx, &grid);
    let holiday = failures(&results, RuleId::NoRestTagOnHoliday);

    assert_eq!(holiday.len(), 1);
    assert!(holiday[0].detail.contains("E01"));
    assert!(holiday[0].detail.contains("E03"));
    assert!(!holiday[0].detail.contains("E02"));
}

#[test]
fn test_every_result_labelled_and_sorted() {
    let outcome = shift_roster::generate(YEAR, MONTH, &crew(5), &[], &[]).unwrap();
    let results = &outcome.report.results;

    for rule in RuleId::ALL {
        assert!(results.iter().any(|r| r.rule == rule), "缺少规则 {}", rule);
    }
    let ranks: Vec<u8> = results.iter().map(|r| r.rule.group().rank()).collect();
    assert!(ranks.windows(2).all(|w| w[0] <= w[1]));
    assert!(results.iter().all(|r| !r.label.is_empty() && !r.detail.is_empty()));
}
