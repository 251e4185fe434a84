use super::guard::placement_rank;
use crate::domain::{DayTotals, Employee, RosterGrid, ShiftCode};
use crate::engine::context::RosterContext;
use crate::engine::eligibility_core::EligibilityCore;
use crate::engine::totals::TotalsAggregator;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, instrument};

// ==========================================
// FillPass - 填充轮次
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillPass {
    EssentialCoverage, // 第 1 轮: 基本覆盖
    TargetStaffing,    // 第 2 轮: 目标人数
    RestDistribution,  // 第 3 轮: 周休分配
    FallbackFill,      // 第 3.5 轮: 兜底填充
}

impl fmt::Display for FillPass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FillPass::EssentialCoverage => write!(f, "ESSENTIAL_COVERAGE"),
            FillPass::TargetStaffing => write!(f, "TARGET_STAFFING"),
            FillPass::RestDistribution => write!(f, "REST_DISTRIBUTION"),
            FillPass::FallbackFill => write!(f, "FALLBACK_FILL"),
        }
    }
}

/// 未能落位的需求
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shortfall {
    pub date: NaiveDate,
    pub shift: ShiftCode,

    /// 兜底轮次中未能填充的员工
    pub employee_id: Option<String>,
}

/// 单轮结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassOutcome {
    pub pass: FillPass,
    pub placements: u32,
    pub shortfalls: Vec<Shortfall>,
}

impl PassOutcome {
    pub(super) fn new(pass: FillPass) -> Self {
        Self {
            pass,
            placements: 0,
            shortfalls: Vec::new(),
        }
    }

    pub(super) fn record_shortfall(
        &mut self,
        date: NaiveDate,
        shift: ShiftCode,
        employee_id: Option<&str>,
    ) {
        self.shortfalls.push(Shortfall {
            date,
            shift,
            employee_id: employee_id.map(str::to_string),
        });
    }
}

/// 全部轮次结果
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSummary {
    pub passes: Vec<PassOutcome>,
}

impl FillSummary {
    pub fn total_placements(&self) -> u32 {
        self.passes.iter().map(|p| p.placements).sum()
    }

    pub fn pass(&self, pass: FillPass) -> Option<&PassOutcome> {
        self.passes.iter().find(|p| p.pass == pass)
    }
}

// ==========================================
// ShiftFiller - 多轮填充引擎
// ==========================================
pub struct ShiftFiller {
    aggregator: TotalsAggregator,
}

impl ShiftFiller {
    pub fn new() -> Self {
        Self {
            aggregator: TotalsAggregator::new(),
        }
    }

    /// 依次执行全部轮次
    ///
    /// # 参数
    /// - `ctx`: 生成上下文
    /// - `grid`: 已完成预置赋值的网格（会被修改）
    #[instrument(skip(self, ctx, grid), fields(year = grid.year, month = grid.month))]
    pub fn fill(&self, ctx: &RosterContext, grid: &mut RosterGrid) -> FillSummary {
        self.aggregator.recompute(grid);

        let mut summary = FillSummary::default();
        for pass in [
            FillPass::EssentialCoverage,
            FillPass::TargetStaffing,
            FillPass::RestDistribution,
            FillPass::FallbackFill,
        ] {
            let outcome = self.run_pass(pass, ctx, grid);
            self.aggregator.recompute(grid);

            info!(
                pass = %outcome.pass,
                placements = outcome.placements,
                shortfalls = outcome.shortfalls.len(),
                "填充轮次完成"
            );
            summary.passes.push(outcome);
        }

        summary
    }

    /// 执行单个轮次
    pub fn run_pass(
        &self,
        pass: FillPass,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
    ) -> PassOutcome {
        match pass {
            FillPass::EssentialCoverage => self.essential_coverage(ctx, grid),
            FillPass::TargetStaffing => self.target_staffing(ctx, grid),
            FillPass::RestDistribution => self.rest_distribution(ctx, grid),
            FillPass::FallbackFill => self.fallback_fill(ctx, grid),
        }
    }

    // ==========================================
    // 轮次共用的辅助方法
    // ==========================================

    /// 写入单元格并全量重算汇总
    pub(super) fn place(
        &self,
        grid: &mut RosterGrid,
        outcome: &mut PassOutcome,
        employee_id: &str,
        date: NaiveDate,
        shift: ShiftCode,
    ) {
        if grid.set_shift(employee_id, date, Some(shift)) {
            outcome.placements += 1;
            self.aggregator.recompute(grid);
        }
    }

    /// 选出可排员工
    ///
    /// 排序: 强制休息守卫 → 周末拆分 → 该班次当前计数 → 名册顺序
    pub(super) fn least_loaded<F>(
        &self,
        ctx: &RosterContext,
        grid: &RosterGrid,
        date: NaiveDate,
        shift: ShiftCode,
        filter: F,
    ) -> Option<String>
    where
        F: Fn(&RosterGrid, &Employee) -> bool,
    {
        ctx.employees()
            .iter()
            .enumerate()
            .filter(|(_, e)| grid.is_empty_cell(&e.id, date))
            .filter(|(_, e)| filter(grid, e))
            .filter(|(_, e)| EligibilityCore::can_assign(ctx, grid, &e.id, date, Some(shift)))
            .min_by_key(|(idx, e)| {
                (
                    placement_rank(ctx, grid, e, date),
                    grid.totals_of(&e.id).count(shift),
                    *idx,
                )
            })
            .map(|(_, e)| e.id.clone())
    }

    /// 选人并落位,成功返回 true
    pub(super) fn assign_least_loaded<F>(
        &self,
        ctx: &RosterContext,
        grid: &mut RosterGrid,
        outcome: &mut PassOutcome,
        date: NaiveDate,
        shift: ShiftCode,
        filter: F,
    ) -> bool
    where
        F: Fn(&RosterGrid, &Employee) -> bool,
    {
        match self.least_loaded(ctx, grid, date, shift, filter) {
            Some(employee_id) => {
                self.place(grid, outcome, &employee_id, date, shift);
                true
            }
            None => false,
        }
    }

    /// 当日汇总（汇总已在每次落位后刷新）
    pub(super) fn day_totals(grid: &RosterGrid, date: NaiveDate) -> DayTotals {
        grid.day(date).map(|d| d.totals).unwrap_or_default()
    }
}

impl Default for ShiftFiller {
    fn default() -> Self {
        Self::new()
    }
}
