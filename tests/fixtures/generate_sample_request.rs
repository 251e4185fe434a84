// ==========================================
// 示例请求生成器
// ==========================================
// 用途: 生成一份可直接运行的排班请求 JSON
// 输出: tests/fixtures/datasets/sample_request.json（或第一个参数指定的路径）
//
// 用法:
//   cargo run --bin generate_sample_request -- [output_path]
// ==========================================

use anyhow::Context;
use shift_roster::importer::{
    RawAbsence, RawEmployee, RawHoliday, RawPreferences, RawWeeklyPattern, RosterRequest,
};
use shift_roster::SoftPreferences;
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

const DEFAULT_OUTPUT: &str = "tests/fixtures/datasets/sample_request.json";

fn main() -> anyhow::Result<()> {
    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    println!("开始生成示例排班请求...");

    let request = sample_request();
    let json = request.to_json_pretty()?;

    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("无法创建目录: {}", parent.display()))?;
        }
    }
    fs::write(&output, json).with_context(|| format!("无法写入: {}", output.display()))?;

    println!(
        "✓ 已生成 {} (员工 {} 名, 缺勤 {} 条, 节假日 {} 天)",
        output.display(),
        request.employees.len(),
        request.absences.len(),
        request.holidays.len()
    );
    Ok(())
}

/// 2026 年 4 月, 7 名员工
///
/// - E01: 上月末连续 5 天早班
/// - E02: 每周一固定午班
/// - E03: 4/1-4/10 年假
/// - E04: 偏好早班 + 固定休息 4/20
/// - E05: 不参与完整周末规则
/// - E06: 4/9 固定早班
/// - E07: 4/27-4/28 病假
fn sample_request() -> RosterRequest {
    let mut employees: Vec<RawEmployee> = (1..=7)
        .map(|i| RawEmployee {
            id: format!("E{:02}", i),
            name: format!("Employee {}", i),
            eligible_for_full_rest_weekend: true,
            preferences: RawPreferences::default(),
            history: BTreeMap::new(),
        })
        .collect();

    employees[0].history = (27..=31)
        .map(|day| (format!("2026-03-{:02}", day), Some("M".to_string())))
        .collect();

    employees[1].preferences.fixed_weekly_pattern = Some(RawWeeklyPattern {
        weekdays: vec!["Mon".to_string()],
        shift: "AFTERNOON".to_string(),
    });

    employees[3].preferences.soft = SoftPreferences {
        prefers_morning: true,
        ..Default::default()
    };
    employees[3].preferences.fixed_days_off = vec!["2026-04-20".to_string()];

    employees[4].eligible_for_full_rest_weekend = false;

    employees[5]
        .preferences
        .fixed_assignments
        .insert("2026-04-09".to_string(), "MORNING".to_string());

    RosterRequest {
        year: 2026,
        month: 4,
        employees,
        absences: vec![
            RawAbsence {
                employee_id: "E03".to_string(),
                leave_type: "ANNUAL".to_string(),
                start: "2026-04-01".to_string(),
                end: "2026-04-10".to_string(),
            },
            RawAbsence {
                employee_id: "E07".to_string(),
                leave_type: "MEDICAL".to_string(),
                start: "27/04/2026".to_string(),
                end: "28/04/2026".to_string(),
            },
        ],
        holidays: vec![
            RawHoliday {
                date: "2026-04-03".to_string(),
                description: "Good Friday".to_string(),
            },
            RawHoliday {
                date: "2026-04-25".to_string(),
                description: "Freedom Day".to_string(),
            },
        ],
    }
}
