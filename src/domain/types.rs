// ==========================================
// 月度排班系统 - 领域类型定义
// ==========================================
// 职责: 班次标签、连续天数类别、假期类型
// 红线: 班次标签为封闭集合,不允许自由文本
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 班次标签 (Shift Code)
// ==========================================
// 每个 (员工, 日期) 单元格至多持有一个标签; None 表示待填充
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ShiftCode {
    Morning,          // 早班
    Afternoon,        // 午班
    WeeklyRest,       // 周休
    CompensatoryRest, // 调休
    HolidayFree,      // 节假日休
    MedicalLeave,     // 病假
    AnnualLeave,      // 年假
}

impl ShiftCode {
    /// 全部标签（按报表列顺序）
    pub const ALL: [ShiftCode; 7] = [
        ShiftCode::Morning,
        ShiftCode::Afternoon,
        ShiftCode::WeeklyRest,
        ShiftCode::CompensatoryRest,
        ShiftCode::HolidayFree,
        ShiftCode::MedicalLeave,
        ShiftCode::AnnualLeave,
    ];

    /// 是否为工作班次（早班/午班）
    pub fn is_work(self) -> bool {
        matches!(self, ShiftCode::Morning | ShiftCode::Afternoon)
    }

    /// 是否为休息类标签（周休/调休/节假日休）
    pub fn is_rest(self) -> bool {
        matches!(
            self,
            ShiftCode::WeeklyRest | ShiftCode::CompensatoryRest | ShiftCode::HolidayFree
        )
    }

    /// 是否为假期标签（外部录入,引擎不可改写）
    pub fn is_leave(self) -> bool {
        matches!(self, ShiftCode::MedicalLeave | ShiftCode::AnnualLeave)
    }

    /// 从外部文本解析（兼容枚举名与报表短码,大小写不敏感）
    pub fn parse(raw: &str) -> Option<Self> {
        let normalized = raw.trim().to_uppercase();
        ShiftCode::ALL.into_iter().find(|code| {
            code.to_string() == normalized || code.short_code() == normalized
        })
    }

    /// 报表短码
    pub fn short_code(self) -> &'static str {
        match self {
            ShiftCode::Morning => "M",
            ShiftCode::Afternoon => "T",
            ShiftCode::WeeklyRest => "DS",
            ShiftCode::CompensatoryRest => "DC",
            ShiftCode::HolidayFree => "F",
            ShiftCode::MedicalLeave => "LM",
            ShiftCode::AnnualLeave => "V",
        }
    }
}

impl fmt::Display for ShiftCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShiftCode::Morning => write!(f, "MORNING"),
            ShiftCode::Afternoon => write!(f, "AFTERNOON"),
            ShiftCode::WeeklyRest => write!(f, "WEEKLY_REST"),
            ShiftCode::CompensatoryRest => write!(f, "COMPENSATORY_REST"),
            ShiftCode::HolidayFree => write!(f, "HOLIDAY_FREE"),
            ShiftCode::MedicalLeave => write!(f, "MEDICAL_LEAVE"),
            ShiftCode::AnnualLeave => write!(f, "ANNUAL_LEAVE"),
        }
    }
}

// ==========================================
// 假期类型 (Leave Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    Medical, // 病假
    Annual,  // 年假
}

impl LeaveType {
    /// 对应的单元格标签
    pub fn shift_code(self) -> ShiftCode {
        match self {
            LeaveType::Medical => ShiftCode::MedicalLeave,
            LeaveType::Annual => ShiftCode::AnnualLeave,
        }
    }

    /// 从外部文本解析（大小写不敏感,兼容常见别名）
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "MEDICAL" | "MEDICAL_LEAVE" | "SICK" | "LM" => Some(LeaveType::Medical),
            "ANNUAL" | "ANNUAL_LEAVE" | "VACATION" | "V" => Some(LeaveType::Annual),
            _ => None,
        }
    }
}

impl fmt::Display for LeaveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LeaveType::Medical => write!(f, "MEDICAL"),
            LeaveType::Annual => write!(f, "ANNUAL"),
        }
    }
}

// ==========================================
// 连续天数类别 (Streak Class)
// ==========================================
// 用途: 连续工作/连续休息的回溯统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StreakClass {
    Work,        // 早班 + 午班
    WeeklyRest,  // 周休 + 调休
    HolidayRest, // 节假日休
}

impl StreakClass {
    /// 判断标签是否属于该类别
    pub fn matches(self, shift: ShiftCode) -> bool {
        match self {
            StreakClass::Work => shift.is_work(),
            StreakClass::WeeklyRest => {
                matches!(shift, ShiftCode::WeeklyRest | ShiftCode::CompensatoryRest)
            }
            StreakClass::HolidayRest => shift == ShiftCode::HolidayFree,
        }
    }
}

impl fmt::Display for StreakClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreakClass::Work => write!(f, "WORK"),
            StreakClass::WeeklyRest => write!(f, "WEEKLY_REST"),
            StreakClass::HolidayRest => write!(f, "HOLIDAY_REST"),
        }
    }
}
