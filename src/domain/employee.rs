// ==========================================
// 月度排班系统 - 员工领域模型
// ==========================================
// 职责: 员工身份、偏好包、上月历史
// 红线: 每次生成前深拷贝,运行之间不共享可变状态
// ==========================================

use crate::domain::types::ShiftCode;
use chrono::{NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// Employee - 员工
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,

    /// 是否参与"完整周末休息"规则
    #[serde(default = "default_true")]
    pub eligible_for_full_rest_weekend: bool,

    #[serde(default)]
    pub preferences: Preferences,

    /// 上月末若干天的历史 (日期 -> 标签; None 表示当天无记录)
    #[serde(default)]
    pub history: BTreeMap<NaiveDate, Option<ShiftCode>>,
}

fn default_true() -> bool {
    true
}

impl Employee {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            eligible_for_full_rest_weekend: true,
            preferences: Preferences::default(),
            history: BTreeMap::new(),
        }
    }

    /// 指定日期的固定班次（单日覆写）
    pub fn fixed_shift_on(&self, date: NaiveDate) -> Option<ShiftCode> {
        self.preferences.fixed_assignments.get(&date).copied()
    }

    /// 指定日期是否为固定休息日
    pub fn has_fixed_day_off(&self, date: NaiveDate) -> bool {
        self.preferences.fixed_days_off.contains(&date)
    }

    /// 固定周模式在该星期几要求的班次
    pub fn weekly_pattern_shift(&self, weekday: Weekday) -> Option<ShiftCode> {
        self.preferences
            .fixed_weekly_pattern
            .as_ref()
            .filter(|p| p.weekdays.contains(&weekday))
            .map(|p| p.shift)
    }
}

// ==========================================
// Preferences - 偏好包
// ==========================================
// 个人特例统一收敛到这里,不按姓名硬编码
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// 单日固定班次
    #[serde(default)]
    pub fixed_assignments: BTreeMap<NaiveDate, ShiftCode>,

    /// 固定休息日
    #[serde(default)]
    pub fixed_days_off: Vec<NaiveDate>,

    /// 固定周模式
    #[serde(default)]
    pub fixed_weekly_pattern: Option<WeeklyPattern>,

    /// 软偏好（尽量满足,不作为硬约束）
    #[serde(default)]
    pub soft: SoftPreferences,
}

/// 固定周模式: 每逢指定星期几上指定班次（节假日除外）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPattern {
    pub weekdays: Vec<Weekday>,
    pub shift: ShiftCode,
}

/// 软偏好开关
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftPreferences {
    #[serde(default)]
    pub prefers_morning: bool,

    #[serde(default)]
    pub prefers_afternoon: bool,

    #[serde(default)]
    pub prefers_weekends_off: bool,
}

impl SoftPreferences {
    pub fn is_empty(&self) -> bool {
        !self.prefers_morning && !self.prefers_afternoon && !self.prefers_weekends_off
    }

    /// 该班次是否与偏好冲突
    pub fn conflicts_with(&self, shift: ShiftCode, is_weekend: bool) -> bool {
        if !shift.is_work() {
            return false;
        }
        if self.prefers_weekends_off && is_weekend {
            return true;
        }
        match shift {
            ShiftCode::Morning => self.prefers_afternoon && !self.prefers_morning,
            ShiftCode::Afternoon => self.prefers_morning && !self.prefers_afternoon,
            _ => false,
        }
    }
}
