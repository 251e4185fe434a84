// ==========================================
// 月度排班系统 - 日历与网格构建
// ==========================================
// 职责: 枚举目标月份每一天,分配空单元格
// 输入: 年/月 + 名册 + 节假日
// 输出: 全空 RosterGrid
// ==========================================

use crate::domain::{EmployeeTotals, RosterGrid, ScheduleDay};
use crate::engine::context::RosterContext;
use crate::error::{RosterError, RosterResult};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// CalendarBuilder - 网格构建器
// ==========================================
pub struct CalendarBuilder {
    // 无状态
}

impl CalendarBuilder {
    pub fn new() -> Self {
        Self {}
    }

    /// 构建空网格
    ///
    /// # 返回
    /// - Ok(RosterGrid): 每天一条记录,每名员工一个空单元格
    /// - Err(InvalidPeriod): 年/月组合不存在
    pub fn build(&self, year: i32, month: u32, ctx: &RosterContext) -> RosterResult<RosterGrid> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(RosterError::InvalidPeriod { year, month })?;

        let employee_ids: Vec<String> = ctx.employees().iter().map(|e| e.id.clone()).collect();

        let days: Vec<ScheduleDay> = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| ScheduleDay {
                date,
                is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
                is_holiday: ctx.is_holiday(date),
                assignments: employee_ids.iter().map(|id| (id.clone(), None)).collect(),
                totals: Default::default(),
            })
            .collect();

        let employee_totals: BTreeMap<String, EmployeeTotals> = employee_ids
            .iter()
            .map(|id| (id.clone(), EmployeeTotals::default()))
            .collect();

        debug!(
            year,
            month,
            days = days.len(),
            employees = employee_ids.len(),
            "空网格构建完成"
        );

        Ok(RosterGrid {
            year,
            month,
            employee_ids,
            days,
            employee_totals,
        })
    }
}

impl Default for CalendarBuilder {
    fn default() -> Self {
        Self::new()
    }
}
