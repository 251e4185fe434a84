// ==========================================
// 月度排班系统 - 生成上下文
// ==========================================
// 职责: 单次生成所需的名册快照、规则参数、节假日查表
// 红线: 显式传入每个引擎,不使用全局状态
// 红线: 构造时深拷贝输入,运行之间互不影响
// ==========================================

use crate::config::RuleConfig;
use crate::domain::{Absence, Employee, Holiday};
use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

// ==========================================
// RosterContext - 生成上下文
// ==========================================
#[derive(Debug, Clone)]
pub struct RosterContext {
    pub rules: RuleConfig,
    employees: Vec<Employee>,
    index: HashMap<String, usize>,
    absences: Vec<Absence>,
    holidays: BTreeMap<NaiveDate, Holiday>,
}

impl RosterContext {
    /// 创建上下文（深拷贝全部输入）
    ///
    /// 重复的员工ID只保留第一次出现
    pub fn new(
        rules: RuleConfig,
        employees: &[Employee],
        absences: &[Absence],
        holidays: &[Holiday],
    ) -> Self {
        let mut roster = Vec::with_capacity(employees.len());
        let mut index = HashMap::with_capacity(employees.len());
        for employee in employees {
            if index.contains_key(&employee.id) {
                warn!(employee_id = %employee.id, "员工ID重复,忽略后续记录");
                continue;
            }
            index.insert(employee.id.clone(), roster.len());
            roster.push(employee.clone());
        }

        let holidays = holidays
            .iter()
            .map(|h| (h.date, h.clone()))
            .collect::<BTreeMap<_, _>>();

        Self {
            rules,
            employees: roster,
            index,
            absences: absences.to_vec(),
            holidays,
        }
    }

    /// 名册（按录入顺序）
    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.index.get(employee_id).map(|&i| &self.employees[i])
    }

    /// 名册顺序（未知员工排在最后）
    pub fn roster_index(&self, employee_id: &str) -> usize {
        self.index.get(employee_id).copied().unwrap_or(usize::MAX)
    }

    pub fn absences(&self) -> &[Absence] {
        &self.absences
    }

    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains_key(&date)
    }

    pub fn holidays(&self) -> impl Iterator<Item = &Holiday> {
        self.holidays.values()
    }
}
