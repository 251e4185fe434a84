// ==========================================
// 月度排班系统 - 排班表领域模型
// ==========================================
// 职责: 日 × 员工 网格、日汇总、员工汇总
// 红线: 汇总只是网格的投影,不作为事实来源
// ==========================================

use crate::domain::types::ShiftCode;
use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// DayTotals - 日汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotals {
    pub morning: u32,
    pub afternoon: u32,
    pub weekly_rest: u32,
    pub compensatory_rest: u32,
    pub holiday_free: u32,
    pub medical_leave: u32,
    pub annual_leave: u32,
    pub unassigned: u32,

    /// 在岗人数 = 早班 + 午班
    pub total_on_duty: u32,
}

impl DayTotals {
    /// 记录一个单元格
    pub fn record(&mut self, cell: Option<ShiftCode>) {
        match cell {
            Some(ShiftCode::Morning) => self.morning += 1,
            Some(ShiftCode::Afternoon) => self.afternoon += 1,
            Some(ShiftCode::WeeklyRest) => self.weekly_rest += 1,
            Some(ShiftCode::CompensatoryRest) => self.compensatory_rest += 1,
            Some(ShiftCode::HolidayFree) => self.holiday_free += 1,
            Some(ShiftCode::MedicalLeave) => self.medical_leave += 1,
            Some(ShiftCode::AnnualLeave) => self.annual_leave += 1,
            None => self.unassigned += 1,
        }
        self.total_on_duty = self.morning + self.afternoon;
    }

    /// 某标签的计数
    pub fn count(&self, shift: ShiftCode) -> u32 {
        match shift {
            ShiftCode::Morning => self.morning,
            ShiftCode::Afternoon => self.afternoon,
            ShiftCode::WeeklyRest => self.weekly_rest,
            ShiftCode::CompensatoryRest => self.compensatory_rest,
            ShiftCode::HolidayFree => self.holiday_free,
            ShiftCode::MedicalLeave => self.medical_leave,
            ShiftCode::AnnualLeave => self.annual_leave,
        }
    }
}

// ==========================================
// EmployeeTotals - 员工月度汇总
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeTotals {
    pub days_worked: u32,
    pub morning: u32,
    pub afternoon: u32,
    pub weekly_rest: u32,
    pub compensatory_rest: u32,
    pub holiday_free: u32,
    pub medical_leave: u32,
    pub annual_leave: u32,
    pub unassigned: u32,
    pub free_saturdays: u32,
    pub free_sundays: u32,
}

impl EmployeeTotals {
    /// 记录一个单元格（weekday 用于统计空闲周六/周日）
    pub fn record(&mut self, cell: Option<ShiftCode>, weekday: Weekday) {
        match cell {
            Some(ShiftCode::Morning) => self.morning += 1,
            Some(ShiftCode::Afternoon) => self.afternoon += 1,
            Some(ShiftCode::WeeklyRest) => self.weekly_rest += 1,
            Some(ShiftCode::CompensatoryRest) => self.compensatory_rest += 1,
            Some(ShiftCode::HolidayFree) => self.holiday_free += 1,
            Some(ShiftCode::MedicalLeave) => self.medical_leave += 1,
            Some(ShiftCode::AnnualLeave) => self.annual_leave += 1,
            None => self.unassigned += 1,
        }
        self.days_worked = self.morning + self.afternoon;

        let works = cell.map(ShiftCode::is_work).unwrap_or(false);
        if !works {
            match weekday {
                Weekday::Sat => self.free_saturdays += 1,
                Weekday::Sun => self.free_sundays += 1,
                _ => {}
            }
        }
    }

    /// 休息天数（周休 + 调休）
    pub fn rest_days(&self) -> u32 {
        self.weekly_rest + self.compensatory_rest
    }

    /// 已赋值天数: 工作 + 休息 + 节假日休 + 病假 + 年假
    pub fn assigned_days(&self) -> u32 {
        self.days_worked
            + self.rest_days()
            + self.holiday_free
            + self.medical_leave
            + self.annual_leave
    }

    /// 某标签的计数
    pub fn count(&self, shift: ShiftCode) -> u32 {
        match shift {
            ShiftCode::Morning => self.morning,
            ShiftCode::Afternoon => self.afternoon,
            ShiftCode::WeeklyRest => self.weekly_rest,
            ShiftCode::CompensatoryRest => self.compensatory_rest,
            ShiftCode::HolidayFree => self.holiday_free,
            ShiftCode::MedicalLeave => self.medical_leave,
            ShiftCode::AnnualLeave => self.annual_leave,
        }
    }
}

// ==========================================
// ScheduleDay - 单日记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleDay {
    pub date: NaiveDate,
    pub is_weekend: bool,
    pub is_holiday: bool,

    /// 员工ID -> 标签 (None = 未分配)
    pub assignments: BTreeMap<String, Option<ShiftCode>>,

    pub totals: DayTotals,
}

impl ScheduleDay {
    pub fn shift_of(&self, employee_id: &str) -> Option<ShiftCode> {
        self.assignments.get(employee_id).copied().flatten()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    /// 非节假日的工作日（早班多数规则适用日）
    pub fn is_regular_weekday(&self) -> bool {
        !self.is_weekend && !self.is_holiday
    }
}

// ==========================================
// RosterGrid - 月度排班表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterGrid {
    pub year: i32,
    pub month: u32,

    /// 员工顺序（名册顺序,用于平局裁决）
    pub employee_ids: Vec<String>,

    pub days: Vec<ScheduleDay>,

    pub employee_totals: BTreeMap<String, EmployeeTotals>,
}

impl RosterGrid {
    pub fn days_in_month(&self) -> u32 {
        self.days.len() as u32
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.days.first().map(|d| d.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.days.last().map(|d| d.date)
    }

    /// 日期在网格中的下标
    pub fn day_index(&self, date: NaiveDate) -> Option<usize> {
        if date.year() != self.year || date.month() != self.month {
            return None;
        }
        let idx = date.day0() as usize;
        (idx < self.days.len()).then_some(idx)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.day_index(date).is_some()
    }

    pub fn day(&self, date: NaiveDate) -> Option<&ScheduleDay> {
        self.day_index(date).map(|i| &self.days[i])
    }

    /// 单元格标签（网格外或未分配均返回 None）
    pub fn shift_of(&self, employee_id: &str, date: NaiveDate) -> Option<ShiftCode> {
        self.day(date).and_then(|d| d.shift_of(employee_id))
    }

    /// 单元格是否存在且为空
    pub fn is_empty_cell(&self, employee_id: &str, date: NaiveDate) -> bool {
        self.day(date)
            .and_then(|d| d.assignments.get(employee_id))
            .map(|cell| cell.is_none())
            .unwrap_or(false)
    }

    /// 写入单元格（网格外日期或未知员工返回 false）
    pub fn set_shift(
        &mut self,
        employee_id: &str,
        date: NaiveDate,
        shift: Option<ShiftCode>,
    ) -> bool {
        let Some(idx) = self.day_index(date) else {
            return false;
        };
        match self.days[idx].assignments.get_mut(employee_id) {
            Some(cell) => {
                *cell = shift;
                true
            }
            None => false,
        }
    }

    /// 仍为空的单元格 (员工ID, 日期)
    pub fn unassigned_cells(&self) -> Vec<(String, NaiveDate)> {
        let mut cells = Vec::new();
        for day in &self.days {
            for id in &self.employee_ids {
                if matches!(day.assignments.get(id), Some(None)) {
                    cells.push((id.clone(), day.date));
                }
            }
        }
        cells
    }

    /// 员工在整月是否全部为假期
    pub fn is_on_leave_all_month(&self, employee_id: &str) -> bool {
        !self.days.is_empty()
            && self.days.iter().all(|d| {
                d.shift_of(employee_id)
                    .map(ShiftCode::is_leave)
                    .unwrap_or(false)
            })
    }

    /// 非节假日的周末天数
    pub fn rest_eligible_weekend_days(&self) -> u32 {
        self.days
            .iter()
            .filter(|d| d.is_weekend && !d.is_holiday)
            .count() as u32
    }

    /// 员工非假期天数
    pub fn available_days(&self, employee_id: &str) -> u32 {
        self.days
            .iter()
            .filter(|d| !d.shift_of(employee_id).map(ShiftCode::is_leave).unwrap_or(false))
            .count() as u32
    }

    /// 周休目标 = 周末天数 × 可用天数占比,四舍五入
    pub fn rest_day_target(&self, employee_id: &str) -> u32 {
        let days = self.days_in_month();
        if days == 0 {
            return 0;
        }
        let scaled = f64::from(self.rest_eligible_weekend_days())
            * f64::from(self.available_days(employee_id))
            / f64::from(days);
        scaled.round() as u32
    }

    /// 当月完整的 (周六, 周日) 对
    pub fn weekend_pairs(&self) -> Vec<(NaiveDate, NaiveDate)> {
        self.days
            .iter()
            .filter(|d| d.weekday() == Weekday::Sat)
            .filter_map(|d| {
                let sun = d.date.succ_opt()?;
                self.contains(sun).then_some((d.date, sun))
            })
            .collect()
    }

    /// 是否已有周六、周日都为休息类标签的周末
    pub fn has_full_rest_weekend(&self, employee_id: &str) -> bool {
        let is_rest = |date| {
            self.shift_of(employee_id, date)
                .map(ShiftCode::is_rest)
                .unwrap_or(false)
        };
        self.weekend_pairs()
            .into_iter()
            .any(|(sat, sun)| is_rest(sat) && is_rest(sun))
    }

    pub fn totals_of(&self, employee_id: &str) -> EmployeeTotals {
        self.employee_totals
            .get(employee_id)
            .copied()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_totals_on_duty() {
        let mut totals = DayTotals::default();
        totals.record(Some(ShiftCode::Morning));
        totals.record(Some(ShiftCode::Morning));
        totals.record(Some(ShiftCode::Afternoon));
        totals.record(Some(ShiftCode::WeeklyRest));
        totals.record(None);

        assert_eq!(totals.total_on_duty, 3);
        assert_eq!(totals.unassigned, 1);
    }

    fn empty_grid(year: i32, month: u32) -> RosterGrid {
        let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
        let ids = vec!["E01".to_string()];
        let days = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| ScheduleDay {
                date,
                is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
                is_holiday: false,
                assignments: ids.iter().map(|id| (id.clone(), None)).collect(),
                totals: DayTotals::default(),
            })
            .collect();
        RosterGrid {
            year,
            month,
            employee_ids: ids,
            days,
            employee_totals: BTreeMap::new(),
        }
    }

    #[test]
    fn test_weekend_pairs_skip_split_weekend() {
        // 2026-10-31 是周六,周日落在 11 月
        let grid = empty_grid(2026, 10);
        let pairs = grid.weekend_pairs();

        assert_eq!(pairs.len(), 4);
        assert!(pairs.iter().all(|(sat, _)| sat.day() != 31));
    }

    #[test]
    fn test_full_rest_weekend_detection() {
        let mut grid = empty_grid(2026, 4);
        let sat = NaiveDate::from_ymd_opt(2026, 4, 11).unwrap();
        let sun = NaiveDate::from_ymd_opt(2026, 4, 12).unwrap();
        grid.set_shift("E01", sat, Some(ShiftCode::WeeklyRest));
        assert!(!grid.has_full_rest_weekend("E01"));

        grid.set_shift("E01", sun, Some(ShiftCode::HolidayFree));
        assert!(grid.has_full_rest_weekend("E01"));
    }

    #[test]
    fn test_employee_totals_free_weekend_days() {
        let mut totals = EmployeeTotals::default();
        totals.record(Some(ShiftCode::WeeklyRest), Weekday::Sat);
        totals.record(Some(ShiftCode::Morning), Weekday::Sun);
        totals.record(Some(ShiftCode::AnnualLeave), Weekday::Sun);

        assert_eq!(totals.free_saturdays, 1);
        assert_eq!(totals.free_sundays, 1);
        assert_eq!(totals.assigned_days(), 3);
    }
}
