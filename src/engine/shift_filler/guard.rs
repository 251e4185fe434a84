// ==========================================
// 工作班次落位守卫
// ==========================================
// 职责: 判断在某日排工作班是否会占用强制休息规则所需的单元格
// 规则: 周休目标（优先级 3）、完整休息周末（优先级 4）
// 用法: 第 1 轮只用于候选排序; 第 2 轮直接排除
// ==========================================

use crate::domain::{Employee, RosterGrid, StreakClass};
use crate::engine::context::RosterContext;
use chrono::NaiveDate;
use std::cmp::Reverse;

/// 候选排序键: (触发的强制守卫数, 是否新拆一个可休周末, 剩余可休周末数)
///
/// 键值越小越优先; 拆周末时优先选剩余可休周末多的员工
pub(super) type PlacementRank = (u8, bool, Reverse<usize>);

pub(super) fn placement_rank(
    ctx: &RosterContext,
    grid: &RosterGrid,
    employee: &Employee,
    date: NaiveDate,
) -> PlacementRank {
    let open = open_rest_weekends(grid, employee);
    let breaks_open = open.iter().any(|(sat, sun)| *sat == date || *sun == date);
    let breaks_last = breaks_open && open.len() == 1;
    let starves = starves_rest_target(ctx, grid, employee, date);

    (
        u8::from(breaks_last) + u8::from(starves),
        breaks_open,
        Reverse(if breaks_open { open.len() } else { 0 }),
    )
}

/// 在 date 排工作班是否会拆掉员工最后一个可休的完整周末
///
/// 仅对参与完整周末规则、且尚无完整休息周末的员工生效
pub(super) fn breaks_last_rest_weekend(
    grid: &RosterGrid,
    employee: &Employee,
    date: NaiveDate,
) -> bool {
    matches!(
        open_rest_weekends(grid, employee).as_slice(),
        [(sat, sun)] if *sat == date || *sun == date
    )
}

/// 在 date 排工作班后,剩余单元格是否不足以补齐周休目标
pub(super) fn starves_rest_target(
    ctx: &RosterContext,
    grid: &RosterGrid,
    employee: &Employee,
    date: NaiveDate,
) -> bool {
    let id = employee.id.as_str();
    let deficit = grid
        .rest_day_target(id)
        .saturating_sub(grid.totals_of(id).rest_days());
    deficit > 0 && rest_capacity(ctx, grid, id, date) < deficit
}

/// 仍可成为完整休息周末的 (周六, 周日) 对
///
/// 不参与规则或已有完整休息周末时为空
fn open_rest_weekends(grid: &RosterGrid, employee: &Employee) -> Vec<(NaiveDate, NaiveDate)> {
    if !employee.eligible_for_full_rest_weekend || grid.has_full_rest_weekend(&employee.id) {
        return Vec::new();
    }

    let open_for_rest = |day: NaiveDate| match grid
        .day(day)
        .and_then(|d| d.assignments.get(&employee.id))
    {
        Some(None) => true,
        Some(Some(shift)) => shift.is_rest(),
        None => false,
    };

    grid.weekend_pairs()
        .into_iter()
        .filter(|(sat, sun)| open_for_rest(*sat) && open_for_rest(*sun))
        .collect()
}

/// 除 skip 外还能再排的周休数
///
/// 连续的 (空的非节假日单元格 | 已有周休) 组成一段; 每段受连续周休上限约束
fn rest_capacity(
    ctx: &RosterContext,
    grid: &RosterGrid,
    employee_id: &str,
    skip: NaiveDate,
) -> u32 {
    let limit = ctx.rules.max_consecutive_weekly_rest_days;
    let mut capacity = 0;
    let (mut length, mut existing) = (0, 0);

    for day in &grid.days {
        let cell = day.assignments.get(employee_id);
        let open = day.date != skip && !day.is_holiday && cell == Some(&None);
        let rest = cell
            .copied()
            .flatten()
            .map(|s| StreakClass::WeeklyRest.matches(s))
            .unwrap_or(false);

        if open || rest {
            length += 1;
            existing += u32::from(rest);
        } else {
            capacity += segment_capacity(length, existing, limit);
            length = 0;
            existing = 0;
        }
    }

    capacity + segment_capacity(length, existing, limit)
}

/// 长度为 length 的段最多容纳的周休数,扣除已有周休
fn segment_capacity(length: u32, existing: u32, limit: u32) -> u32 {
    let max_rest = length - length / (limit + 1);
    max_rest.saturating_sub(existing)
}
