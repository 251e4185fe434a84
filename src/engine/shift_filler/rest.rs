// ==========================================
// 第 3 轮: 周休分配 / 第 3.5 轮: 兜底填充
// ==========================================

use super::core::{FillPass, PassOutcome, ShiftFiller};
use crate::domain::{RosterGrid, ShiftCode};
use crate::engine::context::RosterContext;
use crate::engine::eligibility_core::EligibilityCore;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use tracing::{debug, warn};

impl ShiftFiller {
    /// 第 3 轮: 按个人周休目标分配周休
    ///
    /// 规则:
    /// 1) 目标 = 非节假日周末天数 × 可用天数占比,四舍五入
    /// 2) 非节假日: 仅给未达目标的员工排周休,缺口大的优先,平局按名册顺序
    /// 3) 节假日: 所有空单元格尝试排节假日休
    /// 4) 每次落位后重新读取汇总
    pub(super) fn rest_distribution(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::new(FillPass::RestDistribution);

        let targets: BTreeMap<String, u32> = ctx
            .employees()
            .iter()
            .map(|e| (e.id.clone(), grid.rest_day_target(&e.id)))
            .collect();
        debug!(?targets, "周休目标");

        let days: Vec<_> = grid.days.iter().map(|d| (d.date, d.is_holiday)).collect();
        for (date, is_holiday) in days {
            if is_holiday {
                let shift = ShiftCode::HolidayFree;
                for employee in ctx.employees() {
                    if grid.is_empty_cell(&employee.id, date)
                        && EligibilityCore::can_assign(ctx, grid, &employee.id, date, Some(shift))
                    {
                        self.place(grid, &mut outcome, &employee.id, date, shift);
                    }
                }
                continue;
            }

            loop {
                let next = ctx
                    .employees()
                    .iter()
                    .enumerate()
                    .filter(|(_, e)| grid.is_empty_cell(&e.id, date))
                    .filter_map(|(idx, e)| {
                        let target = targets.get(&e.id).copied().unwrap_or(0);
                        let deficit = target.saturating_sub(grid.totals_of(&e.id).rest_days());
                        (deficit > 0).then_some((Reverse(deficit), idx, e))
                    })
                    .filter(|(_, _, e)| {
                        let rest = Some(ShiftCode::WeeklyRest);
                        EligibilityCore::can_assign(ctx, grid, &e.id, date, rest)
                    })
                    .min_by_key(|(deficit, idx, _)| (*deficit, *idx))
                    .map(|(_, _, e)| e.id.clone());

                match next {
                    Some(employee_id) => {
                        self.place(grid, &mut outcome, &employee_id, date, ShiftCode::WeeklyRest)
                    }
                    None => break,
                }
            }
        }

        outcome
    }

    /// 第 3.5 轮: 剩余空单元格强制排休息类标签
    ///
    /// 非节假日依次尝试 周休 → 节假日休; 节假日只尝试节假日休
    /// 仍无法填充的单元格保持为空
    pub(super) fn fallback_fill(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::new(FillPass::FallbackFill);

        let days: Vec<_> = grid.days.iter().map(|d| (d.date, d.is_holiday)).collect();
        for (date, is_holiday) in days {
            let options: &[ShiftCode] = if is_holiday {
                &[ShiftCode::HolidayFree]
            } else {
                &[ShiftCode::WeeklyRest, ShiftCode::HolidayFree]
            };

            for employee in ctx.employees() {
                if !grid.is_empty_cell(&employee.id, date) {
                    continue;
                }
                let chosen = options.iter().copied().find(|&shift| {
                    EligibilityCore::can_assign(ctx, grid, &employee.id, date, Some(shift))
                });

                match chosen {
                    Some(shift) => self.place(grid, &mut outcome, &employee.id, date, shift),
                    None => {
                        warn!(
                            employee_id = %employee.id,
                            date = %date,
                            "兜底填充失败: 无可用休息类标签,单元格保持为空"
                        );
                        outcome.record_shortfall(date, options[0], Some(&employee.id));
                    }
                }
            }
        }

        outcome
    }
}
