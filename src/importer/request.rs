// ==========================================
// 月度排班系统 - 排班请求 DTO
// ==========================================
// 职责: 单次生成请求的原始结构（日期/标签均为文本）
// 输入: JSON 文件 / JSON 文本
// 红线: 只做反序列化,不做业务校验（交给 RequestMapper）
// ==========================================

use crate::domain::SoftPreferences;
use crate::error::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

// ==========================================
// RosterRequest - 排班请求
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RosterRequest {
    pub year: i32,
    pub month: u32,

    #[serde(default)]
    pub employees: Vec<RawEmployee>,

    #[serde(default)]
    pub absences: Vec<RawAbsence>,

    #[serde(default)]
    pub holidays: Vec<RawHoliday>,
}

impl RosterRequest {
    /// 从 JSON 文件加载
    pub fn from_json_file(path: impl AsRef<Path>) -> RosterResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| RosterError::RequestIo {
            path: path.display().to_string(),
            source,
        })?;
        let request = Self::from_json_str(&content)?;

        debug!(
            path = %path.display(),
            year = request.year,
            month = request.month,
            employees = request.employees.len(),
            "排班请求已加载"
        );
        Ok(request)
    }

    pub fn from_json_str(content: &str) -> RosterResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_json_pretty(&self) -> RosterResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

// ==========================================
// RawEmployee - 原始员工记录
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEmployee {
    pub id: String,

    #[serde(default)]
    pub name: String,

    #[serde(default = "default_true")]
    pub eligible_for_full_rest_weekend: bool,

    #[serde(default)]
    pub preferences: RawPreferences,

    /// 日期文本 -> 标签文本（null 表示当天无记录）
    #[serde(default)]
    pub history: BTreeMap<String, Option<String>>,
}

fn default_true() -> bool {
    true
}

/// 原始偏好包
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawPreferences {
    /// 日期文本 -> 标签文本
    #[serde(default)]
    pub fixed_assignments: BTreeMap<String, String>,

    #[serde(default)]
    pub fixed_days_off: Vec<String>,

    #[serde(default)]
    pub fixed_weekly_pattern: Option<RawWeeklyPattern>,

    #[serde(default)]
    pub soft: SoftPreferences,
}

/// 原始周模式（星期几接受 "Mon" / "monday" 等写法）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawWeeklyPattern {
    pub weekdays: Vec<String>,
    pub shift: String,
}

/// 原始缺勤区间（闭区间）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawAbsence {
    pub employee_id: String,
    pub leave_type: String,
    pub start: String,
    pub end: String,
}

/// 原始节假日
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawHoliday {
    pub date: String,

    #[serde(default)]
    pub description: String,
}
