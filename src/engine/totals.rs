// ==========================================
// 月度排班系统 - 汇总聚合器
// ==========================================
// 职责: 从网格重算日汇总与员工汇总
// 红线: 每次清零后全量重算,不做增量修补
// ==========================================

use crate::domain::{DayTotals, EmployeeTotals, RosterGrid};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

/// 员工已赋值天数与月天数不一致的诊断（非致命）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalsDiagnostic {
    pub employee_id: String,
    pub assigned_days: u32,
    pub days_in_month: u32,
}

// ==========================================
// TotalsAggregator - 汇总聚合器
// ==========================================
pub struct TotalsAggregator {
    // 无状态
}

impl TotalsAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 全量重算日汇总与员工汇总
    pub fn recompute(&self, grid: &mut RosterGrid) {
        let mut employee_totals: BTreeMap<String, EmployeeTotals> = grid
            .employee_ids
            .iter()
            .map(|id| (id.clone(), EmployeeTotals::default()))
            .collect();

        for day in grid.days.iter_mut() {
            let weekday = day.weekday();
            let mut totals = DayTotals::default();
            for id in &grid.employee_ids {
                let cell = day.assignments.get(id).copied().flatten();
                totals.record(cell);
                if let Some(t) = employee_totals.get_mut(id) {
                    t.record(cell, weekday);
                }
            }
            day.totals = totals;
        }

        grid.employee_totals = employee_totals;
    }

    /// 核对员工已赋值天数 == 月天数
    ///
    /// 整月假期的员工豁免
    pub fn audit(&self, grid: &RosterGrid) -> Vec<TotalsDiagnostic> {
        let days_in_month = grid.days_in_month();
        let mut diagnostics = Vec::new();

        for id in &grid.employee_ids {
            if grid.is_on_leave_all_month(id) {
                continue;
            }
            let assigned_days = grid.totals_of(id).assigned_days();
            if assigned_days != days_in_month {
                warn!(
                    employee_id = %id,
                    assigned_days,
                    days_in_month,
                    "员工已赋值天数与月天数不一致"
                );
                diagnostics.push(TotalsDiagnostic {
                    employee_id: id.clone(),
                    assigned_days,
                    days_in_month,
                });
            }
        }

        diagnostics
    }
}

impl Default for TotalsAggregator {
    fn default() -> Self {
        Self::new()
    }
}
