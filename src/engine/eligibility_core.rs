// ==========================================
// 月度排班系统 - 可排判定纯函数库
// ==========================================
// 职责: 判定某员工在某日能否被赋予某标签
// 红线: 无状态、无副作用、无 I/O,每次尝试都重新计算（不缓存）
// ==========================================

use crate::domain::{RosterGrid, ShiftCode, StreakClass};
use crate::engine::context::RosterContext;
use crate::engine::streak::StreakTracker;
use chrono::{Datelike, NaiveDate};

/// 判定结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EligibilityDecision {
    pub allowed: bool,

    /// 拒绝原因（allowed=false 时存在）
    pub reason: Option<String>,

    /// 仅提示、不阻断的记录（如 12 小时间隔偏好）
    pub notes: Vec<String>,
}

impl EligibilityDecision {
    fn allow(notes: Vec<String>) -> Self {
        Self {
            allowed: true,
            reason: None,
            notes,
        }
    }

    fn reject(reason: String) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
            notes: Vec::new(),
        }
    }
}

// ==========================================
// EligibilityCore - 纯函数工具类
// ==========================================
pub struct EligibilityCore;

impl EligibilityCore {
    /// 是否可赋值（evaluate 的布尔简写）
    pub fn can_assign(
        ctx: &RosterContext,
        grid: &RosterGrid,
        employee_id: &str,
        date: NaiveDate,
        candidate: Option<ShiftCode>,
    ) -> bool {
        Self::evaluate(ctx, grid, employee_id, date, candidate).allowed
    }

    /// 逐条检查可排规则
    ///
    /// # 规则（按顺序）
    /// 1. 单元格为空 / 已是同一标签 / 候选为"取消赋值" → 继续
    /// 2. 单元格为假期且候选不同 → 拒绝
    /// 3. 工作班次: 放入后形成的连续工作段 > 上限 → 拒绝
    /// 4. 周休: 放入后的连续周休段 > 上限 或 当日为节假日 → 拒绝
    /// 5. 节假日休: 放入后的连续节假日休段 > 上限 → 拒绝
    /// 6. 单日固定班次与候选不同 → 拒绝; 固定休息日不接受工作班次
    /// 7. 固定周模式要求的班次与候选不同（节假日除外）→ 拒绝
    /// 8. 午班后次日早班 → 仅记录提示
    pub fn evaluate(
        ctx: &RosterContext,
        grid: &RosterGrid,
        employee_id: &str,
        date: NaiveDate,
        candidate: Option<ShiftCode>,
    ) -> EligibilityDecision {
        // 规则 1: 取消赋值总是允许
        let Some(shift) = candidate else {
            return EligibilityDecision::allow(Vec::new());
        };

        let Some(day) = grid.day(date) else {
            return EligibilityDecision::reject(format!("OUT_OF_PERIOD: date={}", date));
        };
        let Some(current) = day.assignments.get(employee_id).copied() else {
            return EligibilityDecision::reject(format!(
                "UNKNOWN_EMPLOYEE: employee_id={}",
                employee_id
            ));
        };

        match current {
            None => {}
            Some(existing) if existing == shift => {
                return EligibilityDecision::allow(Vec::new());
            }
            // 规则 2: 假期不可改写
            Some(existing) if existing.is_leave() => {
                return EligibilityDecision::reject(format!(
                    "LEAVE_LOCKED: current={}, candidate={}",
                    existing, shift
                ));
            }
            Some(existing) => {
                return EligibilityDecision::reject(format!(
                    "CELL_OCCUPIED: current={}, candidate={}",
                    existing, shift
                ));
            }
        }

        let rules = &ctx.rules;
        let run = |class| StreakTracker::run_through(ctx, grid, employee_id, date, class);

        // 规则 3-5: 连续天数上限（含已填好的后继日期）
        if shift.is_work() {
            let length = run(StreakClass::Work);
            if length > rules.max_consecutive_work_days {
                return EligibilityDecision::reject(format!(
                    "MAX_WORK_STREAK: run={}, limit={}",
                    length, rules.max_consecutive_work_days
                ));
            }
        }

        if shift == ShiftCode::WeeklyRest {
            if day.is_holiday {
                return EligibilityDecision::reject(
                    "WEEKLY_REST_ON_HOLIDAY: holidays take HOLIDAY_FREE".to_string(),
                );
            }
            let length = run(StreakClass::WeeklyRest);
            if length > rules.max_consecutive_weekly_rest_days {
                return EligibilityDecision::reject(format!(
                    "MAX_REST_STREAK: run={}, limit={}",
                    length, rules.max_consecutive_weekly_rest_days
                ));
            }
        }

        if shift == ShiftCode::HolidayFree {
            let length = run(StreakClass::HolidayRest);
            if length > rules.max_consecutive_holiday_free_days {
                return EligibilityDecision::reject(format!(
                    "MAX_HOLIDAY_FREE_STREAK: run={}, limit={}",
                    length, rules.max_consecutive_holiday_free_days
                ));
            }
        }

        // 规则 6-7: 固定安排（单元格为空,不可能是假期）
        if let Some(employee) = ctx.employee(employee_id) {
            // 假期只能由缺勤区间写入,以假期为目标的固定安排不构成约束
            if let Some(fixed) = employee.fixed_shift_on(date).filter(|s| !s.is_leave()) {
                if fixed != shift {
                    return EligibilityDecision::reject(format!(
                        "FIXED_ASSIGNMENT: required={}, candidate={}",
                        fixed, shift
                    ));
                }
            } else if employee.has_fixed_day_off(date) && !shift.is_rest() {
                return EligibilityDecision::reject(format!(
                    "FIXED_DAY_OFF: candidate={}",
                    shift
                ));
            }

            if !day.is_holiday {
                if let Some(required) = employee
                    .weekly_pattern_shift(date.weekday())
                    .filter(|s| !s.is_leave())
                {
                    if required != shift {
                        return EligibilityDecision::reject(format!(
                            "WEEKLY_PATTERN: weekday={}, required={}, candidate={}",
                            date.weekday(),
                            required,
                            shift
                        ));
                    }
                }
            }
        }

        // 规则 8: 午班后接早班,仅提示
        let mut notes = Vec::new();
        if shift == ShiftCode::Morning
            && Self::previous_shift(ctx, grid, employee_id, date) == Some(ShiftCode::Afternoon)
        {
            notes.push(format!("TURNAROUND_12H: date={}", date));
        }

        EligibilityDecision::allow(notes)
    }

    /// 前一日的标签（月初时读取历史）
    pub fn previous_shift(
        ctx: &RosterContext,
        grid: &RosterGrid,
        employee_id: &str,
        date: NaiveDate,
    ) -> Option<ShiftCode> {
        let prev = date.pred_opt()?;
        if grid.contains(prev) {
            return grid.shift_of(employee_id, prev);
        }
        ctx.employee(employee_id)
            .and_then(|e| e.history.get(&prev).copied().flatten())
    }
}
