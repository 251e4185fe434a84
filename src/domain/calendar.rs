// ==========================================
// 月度排班系统 - 假期与节假日
// ==========================================
// 职责: 缺勤区间、节假日查表
// 红线: 缺勤在任何启发式填充之前生效,之后不再回看
// ==========================================

use crate::domain::types::LeaveType;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Absence - 缺勤区间（闭区间）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Absence {
    pub employee_id: String,
    pub leave_type: LeaveType,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Absence {
    pub fn new(
        employee_id: impl Into<String>,
        leave_type: LeaveType,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Self {
        Self {
            employee_id: employee_id.into(),
            leave_type,
            start,
            end,
        }
    }

    /// 区间是否有效（start <= end）
    pub fn is_well_formed(&self) -> bool {
        self.start <= self.end
    }

    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// 区间内所有日期（无效区间返回空）
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start
            .iter_days()
            .take_while(move |d| *d <= self.end)
    }
}

// ==========================================
// Holiday - 节假日（只读）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            date,
            description: description.into(),
        }
    }
}
