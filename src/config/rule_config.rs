// ==========================================
// 月度排班系统 - 规则参数
// ==========================================
// 职责: 引擎与校验器使用的全部数值阈值
// 红线: 所有字段都有默认值,缺省配置即可运行
// ==========================================

use crate::error::{RosterError, RosterResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 目标在岗人数（早班/午班）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaffingTarget {
    pub morning: u32,
    pub afternoon: u32,
}

impl StaffingTarget {
    pub fn total(&self) -> u32 {
        self.morning + self.afternoon
    }
}

// ==========================================
// RuleConfig - 规则参数集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleConfig {
    /// 最大连续工作天数
    pub max_consecutive_work_days: u32,

    /// 最大连续周休天数
    pub max_consecutive_weekly_rest_days: u32,

    /// 最大连续节假日休天数
    pub max_consecutive_holiday_free_days: u32,

    /// 每日最低在岗人数
    pub min_on_duty: u32,

    /// 非节假日工作日的目标人数
    pub weekday_target: StaffingTarget,

    /// 周末/节假日的目标人数
    pub other_day_target: StaffingTarget,

    /// 上月历史回看窗口（天）
    pub history_window_days: u32,

    /// 员工早/午班次数与全员均值的允许偏差（天）
    pub shift_balance_tolerance: u32,
}

impl Default for RuleConfig {
    fn default() -> Self {
        Self {
            max_consecutive_work_days: 6,
            max_consecutive_weekly_rest_days: 2,
            max_consecutive_holiday_free_days: 2,
            min_on_duty: 2,
            weekday_target: StaffingTarget {
                morning: 3,
                afternoon: 1,
            },
            other_day_target: StaffingTarget {
                morning: 2,
                afternoon: 1,
            },
            history_window_days: 7,
            shift_balance_tolerance: 3,
        }
    }
}

impl RuleConfig {
    /// 按日类型取目标人数
    pub fn target_for(&self, is_regular_weekday: bool) -> StaffingTarget {
        if is_regular_weekday {
            self.weekday_target
        } else {
            self.other_day_target
        }
    }

    /// 验证配置有效性
    ///
    /// # 验证规则
    /// 1. 连续天数上限必须 >= 1
    /// 2. 最低在岗人数必须 >= 2（至少一早一午）
    /// 3. 目标人数的早班/午班均 >= 1,且总数不低于最低在岗人数
    /// 4. 工作日目标必须满足早班多数
    pub fn validate(&self) -> RosterResult<()> {
        let limits = [
            ("max_consecutive_work_days", self.max_consecutive_work_days),
            (
                "max_consecutive_weekly_rest_days",
                self.max_consecutive_weekly_rest_days,
            ),
            (
                "max_consecutive_holiday_free_days",
                self.max_consecutive_holiday_free_days,
            ),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(RosterError::invalid_config(field, "连续天数上限必须 >= 1"));
            }
        }

        if self.min_on_duty < 2 {
            return Err(RosterError::invalid_config(
                "min_on_duty",
                format!("最低在岗人数 {} 小于 2", self.min_on_duty),
            ));
        }

        for (field, target) in [
            ("weekday_target", self.weekday_target),
            ("other_day_target", self.other_day_target),
        ] {
            if target.morning == 0 || target.afternoon == 0 {
                return Err(RosterError::invalid_config(field, "早班与午班目标均需 >= 1"));
            }
            if target.total() < self.min_on_duty {
                return Err(RosterError::invalid_config(
                    field,
                    format!(
                        "目标总人数 {} 低于最低在岗人数 {}",
                        target.total(),
                        self.min_on_duty
                    ),
                ));
            }
        }

        if self.weekday_target.total() > 2
            && self.weekday_target.morning <= self.weekday_target.afternoon
        {
            return Err(RosterError::invalid_config(
                "weekday_target",
                "工作日目标违反早班多数规则",
            ));
        }

        debug!(config = ?self, "规则配置验证通过");
        Ok(())
    }
}
