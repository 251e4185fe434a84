// ==========================================
// 月度排班系统 - 请求映射器
// ==========================================
// 职责: 原始请求 → 领域对象（日期/标签/假期类型解析）
// 输出: MappedRequest + 跳过记录清单
// 红线: 格式错误的记录跳过并告警,不中断生成
// ==========================================

use crate::domain::{
    Absence, Employee, Holiday, LeaveType, Preferences, ShiftCode, WeeklyPattern,
};
use crate::importer::request::{RawAbsence, RawEmployee, RawPreferences, RosterRequest};
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

/// 支持的日期格式（按顺序尝试）
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%Y%m%d"];

// ==========================================
// ImportWarning - 跳过记录
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarningKind {
    EmptyEmployeeId,
    DuplicateEmployee,
    UnknownEmployee,
    InvalidDate,
    InvertedRange,
    UnknownShift,
    UnknownLeaveType,
    UnknownWeekday,
    LeaveTagNotAllowed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    pub kind: WarningKind,
    pub employee_id: Option<String>,

    /// 出错字段（如 absences[2].start）
    pub field: String,

    /// 原始值
    pub value: String,
}

/// 映射结果
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedRequest {
    pub employees: Vec<Employee>,
    pub absences: Vec<Absence>,
    pub holidays: Vec<Holiday>,
    pub warnings: Vec<ImportWarning>,
}

/// 解析日期文本
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

// ==========================================
// RequestMapper - 请求映射器
// ==========================================
pub struct RequestMapper {
    // 无状态
}

impl RequestMapper {
    pub fn new() -> Self {
        Self {}
    }

    /// 映射整份请求
    pub fn map(&self, request: &RosterRequest) -> MappedRequest {
        let mut warnings = Vec::new();

        let employees = self.map_employees(&request.employees, &mut warnings);
        let known: HashSet<&str> = employees.iter().map(|e| e.id.as_str()).collect();
        let absences = self.map_absences(&request.absences, &known, &mut warnings);

        let holidays = request
            .holidays
            .iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                let field = format!("holidays[{}].date", i);
                let date = parse_or_warn(&raw.date, None, field, &mut warnings)?;
                Some(Holiday::new(date, raw.description.trim()))
            })
            .collect::<Vec<_>>();

        info!(
            employees = employees.len(),
            absences = absences.len(),
            holidays = holidays.len(),
            skipped = warnings.len(),
            "请求映射完成"
        );

        MappedRequest {
            employees,
            absences,
            holidays,
            warnings,
        }
    }

    fn map_employees(
        &self,
        raws: &[RawEmployee],
        warnings: &mut Vec<ImportWarning>,
    ) -> Vec<Employee> {
        let mut seen = HashSet::new();
        let mut employees = Vec::with_capacity(raws.len());

        for (i, raw) in raws.iter().enumerate() {
            let id = raw.id.trim();
            if id.is_empty() {
                skip(
                    warnings,
                    WarningKind::EmptyEmployeeId,
                    None,
                    format!("employees[{}].id", i),
                    &raw.id,
                );
                continue;
            }
            if !seen.insert(id.to_string()) {
                skip(
                    warnings,
                    WarningKind::DuplicateEmployee,
                    Some(id),
                    format!("employees[{}].id", i),
                    id,
                );
                continue;
            }

            let mut employee = Employee::new(id, raw.name.trim());
            employee.eligible_for_full_rest_weekend = raw.eligible_for_full_rest_weekend;
            employee.preferences = self.map_preferences(id, &raw.preferences, warnings);
            employee.history = self.map_history(id, &raw.history, warnings);
            employees.push(employee);
        }

        employees
    }

    fn map_preferences(
        &self,
        employee_id: &str,
        raw: &RawPreferences,
        warnings: &mut Vec<ImportWarning>,
    ) -> Preferences {
        let mut fixed_assignments = BTreeMap::new();
        for (raw_date, raw_shift) in &raw.fixed_assignments {
            let field = format!("fixed_assignments[{}]", raw_date);
            let Some(date) = parse_or_warn(raw_date, Some(employee_id), field.clone(), warnings)
            else {
                continue;
            };
            let Some(shift) = shift_or_warn(raw_shift, employee_id, field.clone(), warnings) else {
                continue;
            };
            fixed_assignments.insert(date, shift);
        }

        let fixed_days_off = raw
            .fixed_days_off
            .iter()
            .enumerate()
            .filter_map(|(i, raw_date)| {
                let field = format!("fixed_days_off[{}]", i);
                parse_or_warn(raw_date, Some(employee_id), field, warnings)
            })
            .collect();

        let fixed_weekly_pattern = raw.fixed_weekly_pattern.as_ref().and_then(|pattern| {
            let field = "fixed_weekly_pattern.shift".to_string();
            let shift = shift_or_warn(&pattern.shift, employee_id, field, warnings)?;
            let mut weekdays = Vec::new();
            for raw_day in &pattern.weekdays {
                match raw_day.trim().parse::<Weekday>() {
                    Ok(day) if !weekdays.contains(&day) => weekdays.push(day),
                    Ok(_) => {}
                    Err(_) => skip(
                        warnings,
                        WarningKind::UnknownWeekday,
                        Some(employee_id),
                        "fixed_weekly_pattern.weekdays".to_string(),
                        raw_day,
                    ),
                }
            }
            (!weekdays.is_empty()).then_some(WeeklyPattern { weekdays, shift })
        });

        Preferences {
            fixed_assignments,
            fixed_days_off,
            fixed_weekly_pattern,
            soft: raw.soft,
        }
    }

    fn map_history(
        &self,
        employee_id: &str,
        raw: &BTreeMap<String, Option<String>>,
        warnings: &mut Vec<ImportWarning>,
    ) -> BTreeMap<NaiveDate, Option<ShiftCode>> {
        let mut history = BTreeMap::new();
        for (raw_date, raw_shift) in raw {
            let field = format!("history[{}]", raw_date);
            let Some(date) = parse_or_warn(raw_date, Some(employee_id), field.clone(), warnings)
            else {
                continue;
            };
            // 历史允许假期标签
            let shift = match raw_shift.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
                None => None,
                Some(text) => match ShiftCode::parse(text) {
                    Some(code) => Some(code),
                    None => {
                        skip(warnings, WarningKind::UnknownShift, Some(employee_id), field, text);
                        continue;
                    }
                },
            };
            history.insert(date, shift);
        }
        history
    }

    fn map_absences(
        &self,
        raws: &[RawAbsence],
        known: &HashSet<&str>,
        warnings: &mut Vec<ImportWarning>,
    ) -> Vec<Absence> {
        raws.iter()
            .enumerate()
            .filter_map(|(i, raw)| {
                let employee_id = raw.employee_id.trim();
                if !known.contains(employee_id) {
                    skip(
                        warnings,
                        WarningKind::UnknownEmployee,
                        Some(employee_id),
                        format!("absences[{}].employee_id", i),
                        employee_id,
                    );
                    return None;
                }

                let Some(leave_type) = LeaveType::parse(&raw.leave_type) else {
                    skip(
                        warnings,
                        WarningKind::UnknownLeaveType,
                        Some(employee_id),
                        format!("absences[{}].leave_type", i),
                        &raw.leave_type,
                    );
                    return None;
                };

                let start_field = format!("absences[{}].start", i);
                let end_field = format!("absences[{}].end", i);
                let start = parse_or_warn(&raw.start, Some(employee_id), start_field, warnings)?;
                let end = parse_or_warn(&raw.end, Some(employee_id), end_field, warnings)?;
                if start > end {
                    skip(
                        warnings,
                        WarningKind::InvertedRange,
                        Some(employee_id),
                        format!("absences[{}]", i),
                        &format!("{}..{}", start, end),
                    );
                    return None;
                }

                Some(Absence::new(employee_id, leave_type, start, end))
            })
            .collect()
    }
}

impl Default for RequestMapper {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 辅助函数
// ==========================================

fn skip(
    warnings: &mut Vec<ImportWarning>,
    kind: WarningKind,
    employee_id: Option<&str>,
    field: String,
    value: &str,
) {
    warn!(
        kind = ?kind,
        employee_id = employee_id.unwrap_or("-"),
        field = %field,
        value,
        "跳过无效输入"
    );
    warnings.push(ImportWarning {
        kind,
        employee_id: employee_id.map(str::to_string),
        field,
        value: value.to_string(),
    });
}

fn parse_or_warn(
    raw: &str,
    employee_id: Option<&str>,
    field: String,
    warnings: &mut Vec<ImportWarning>,
) -> Option<NaiveDate> {
    let date = parse_date(raw);
    if date.is_none() {
        skip(warnings, WarningKind::InvalidDate, employee_id, field, raw);
    }
    date
}

/// 固定班次与周模式只接受非假期标签
fn shift_or_warn(
    raw: &str,
    employee_id: &str,
    field: String,
    warnings: &mut Vec<ImportWarning>,
) -> Option<ShiftCode> {
    match ShiftCode::parse(raw) {
        None => {
            skip(warnings, WarningKind::UnknownShift, Some(employee_id), field, raw);
            None
        }
        Some(code) if code.is_leave() => {
            skip(warnings, WarningKind::LeaveTagNotAllowed, Some(employee_id), field, raw);
            None
        }
        Some(code) => Some(code),
    }
}
