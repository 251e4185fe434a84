// ==========================================
// 第 1 轮: 基本覆盖 / 第 2 轮: 目标人数
// ==========================================

use super::core::{FillPass, PassOutcome, ShiftFiller};
use super::guard::{breaks_last_rest_weekend, starves_rest_target};
use crate::domain::{Employee, RosterGrid, ShiftCode};
use crate::engine::context::RosterContext;
use chrono::NaiveDate;
use tracing::{debug, warn};

impl ShiftFiller {
    /// 第 1 轮: 每日至少一早一午、合计不低于最低在岗人数,
    /// 工作日合计超过最低人数时补早班直至早班多于午班
    ///
    /// 不考虑软偏好; 休息守卫只参与候选排序,覆盖优先
    pub(super) fn essential_coverage(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::new(FillPass::EssentialCoverage);
        let min = ctx.rules.min_on_duty;
        let any = |_: &RosterGrid, _: &Employee| true;

        for (date, regular) in day_flags(grid) {
            // 1) 至少一早一午
            for shift in [ShiftCode::Morning, ShiftCode::Afternoon] {
                if Self::day_totals(grid, date).count(shift) > 0 {
                    continue;
                }
                if !self.assign_least_loaded(ctx, grid, &mut outcome, date, shift, any) {
                    warn!(date = %date, shift = %shift, "基本覆盖缺员: 无可排员工");
                    outcome.record_shortfall(date, shift, None);
                }
            }

            // 2) 合计达到最低在岗人数
            loop {
                let totals = Self::day_totals(grid, date);
                if totals.total_on_duty >= min {
                    break;
                }
                let preferred = if regular || totals.morning <= totals.afternoon {
                    ShiftCode::Morning
                } else {
                    ShiftCode::Afternoon
                };
                let alternate = other(preferred);
                if self.assign_least_loaded(ctx, grid, &mut outcome, date, preferred, any)
                    || self.assign_least_loaded(ctx, grid, &mut outcome, date, alternate, any)
                {
                    continue;
                }
                warn!(
                    date = %date,
                    on_duty = totals.total_on_duty,
                    min_on_duty = min,
                    "最低在岗人数缺员: 无可排员工"
                );
                outcome.record_shortfall(date, preferred, None);
                break;
            }

            // 3) 工作日早班多数
            if regular {
                loop {
                    let totals = Self::day_totals(grid, date);
                    if totals.total_on_duty <= min || totals.morning > totals.afternoon {
                        break;
                    }
                    let morning = ShiftCode::Morning;
                    if !self.assign_least_loaded(ctx, grid, &mut outcome, date, morning, any) {
                        warn!(
                            date = %date,
                            morning = totals.morning,
                            afternoon = totals.afternoon,
                            "早班多数无法满足: 无可排员工"
                        );
                        outcome.record_shortfall(date, ShiftCode::Morning, None);
                        break;
                    }
                }
            }
        }

        outcome
    }

    /// 第 2 轮: 向目标人数靠拢
    ///
    /// 规则:
    /// 1) 先补早班,再补午班
    /// 2) 工作日补午班不得破坏早班多数
    /// 3) 跳过与软偏好冲突的员工
    /// 4) 不拆掉员工最后一个可成为完整休息周末的周末
    /// 5) 不占用员工补齐周休目标所需的单元格
    pub(super) fn target_staffing(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
    ) -> PassOutcome {
        let mut outcome = PassOutcome::new(FillPass::TargetStaffing);
        let min = ctx.rules.min_on_duty;

        for (date, regular) in day_flags(grid) {
            let target = ctx.rules.target_for(regular);
            let is_weekend = grid.day(date).map(|d| d.is_weekend).unwrap_or(false);

            while Self::day_totals(grid, date).morning < target.morning {
                let shift = ShiftCode::Morning;
                let allowed = |g: &RosterGrid, e: &Employee| {
                    !e.preferences.soft.conflicts_with(shift, is_weekend)
                        && !breaks_last_rest_weekend(g, e, date)
                        && !starves_rest_target(ctx, g, e, date)
                };
                if !self.assign_least_loaded(ctx, grid, &mut outcome, date, shift, allowed) {
                    outcome.record_shortfall(date, shift, None);
                    break;
                }
            }

            loop {
                let totals = Self::day_totals(grid, date);
                if totals.afternoon >= target.afternoon {
                    break;
                }
                let keeps_majority = !regular
                    || totals.total_on_duty + 1 <= min
                    || totals.morning > totals.afternoon + 1;
                if !keeps_majority {
                    debug!(date = %date, "补午班会破坏早班多数,停止");
                    break;
                }
                let shift = ShiftCode::Afternoon;
                let allowed = |g: &RosterGrid, e: &Employee| {
                    !e.preferences.soft.conflicts_with(shift, is_weekend)
                        && !breaks_last_rest_weekend(g, e, date)
                        && !starves_rest_target(ctx, g, e, date)
                };
                if !self.assign_least_loaded(ctx, grid, &mut outcome, date, shift, allowed) {
                    outcome.record_shortfall(date, shift, None);
                    break;
                }
            }
        }

        outcome
    }
}

/// (日期, 是否非节假日工作日)
pub(super) fn day_flags(grid: &RosterGrid) -> Vec<(NaiveDate, bool)> {
    grid.days
        .iter()
        .map(|d| (d.date, d.is_regular_weekday()))
        .collect()
}

fn other(shift: ShiftCode) -> ShiftCode {
    match shift {
        ShiftCode::Morning => ShiftCode::Afternoon,
        _ => ShiftCode::Morning,
    }
}
