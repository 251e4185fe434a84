// ==========================================
// 请求导入集成测试
// ==========================================
// 流程: JSON 文件 → RosterRequest → RequestMapper → 编排器
// ==========================================


use shift_roster::importer::WarningKind;
use shift_roster::{RosterError, RosterOrchestrator, RosterRequest, RuleConfig, RuleId, ShiftCode};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use test_helpers::*;

const REQUEST_JSON: &str = r#"{
  "year": 2026,
  "month": 4,
  "employees": [
    {"id": "E01", "name": "Ana", "history": {"2026-03-31": "T"}},
    {"id": "E02", "name": "Bruno",
     "preferences": {"fixed_weekly_pattern": {"weekdays": ["Mon"], "shift": "AFTERNOON"}}},
    {"id": "E03", "name": "Carla",
     "preferences": {"fixed_assignments": {"09/04/2026": "M"}, "soft": {"prefers_morning": true}}},
    {"id": "E04", "name": "Duarte", "eligible_for_full_rest_weekend": false},
    {"id": "E05", "name": "Eva"},
    {"id": "E05", "name": "Duplicate"},
    {"id": "E06", "name": "Filipe"}
  ],
  "absences": [
    {"employee_id": "E01", "leave_type": "annual", "start": "2026-04-01", "end": "2026-04-10"},
    {"employee_id": "E09", "leave_type": "annual", "start": "2026-04-01", "end": "2026-04-03"},
    {"employee_id": "E06", "leave_type": "medical", "start": "2026-04-20", "end": "2026-04-18"}
  ],
  "holidays": [
    {"date": "2026-04-03", "description": "Good Friday"},
    {"date": "not-a-date"}
  ]
}"#;

fn write_request(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_request_file_generates_with_warnings() {
    let file = write_request(REQUEST_JSON);
    let request = RosterRequest::from_json_file(file.path()).unwrap();
    let orchestrator = RosterOrchestrator::new(Arc::new(RuleConfig::default()));

    let outcome = orchestrator.generate_request(&request).unwrap();

    let kinds: Vec<_> = outcome.import_warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![
            WarningKind::DuplicateEmployee,
            WarningKind::UnknownEmployee,
            WarningKind::InvertedRange,
            WarningKind::InvalidDate,
        ]
    );

    let grid = &outcome.grid;
    assert_eq!(grid.employee_ids.len(), 6);
    assert_eq!(grid.totals_of("E01").count(ShiftCode::AnnualLeave), 10);
    assert_eq!(grid.shift_of("E02", april(6)), Some(ShiftCode::Afternoon));
    assert_eq!(grid.shift_of("E03", april(9)), Some(ShiftCode::Morning));
    assert!(grid.days.iter().find(|d| d.date == april(3)).unwrap().is_holiday);
    assert!(outcome.report.rule_passed(RuleId::FixedAssignmentsHonored));
}

#[test]
fn test_outcome_serializes_for_callers() {
    let file = write_request(REQUEST_JSON);
    let request = RosterRequest::from_json_file(file.path()).unwrap();
    let outcome = RosterOrchestrator::new(Arc::new(RuleConfig::default()))
        .generate_request(&request)
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["grid"]["days"].as_array().unwrap().len(), 30);
    assert_eq!(json["report"]["meta"]["period"], "2026-04");
    assert_eq!(json["import_warnings"][0]["kind"], "DUPLICATE_EMPLOYEE");
    assert_eq!(json["grid"]["days"][0]["assignments"]["E01"], "ANNUAL_LEAVE");
}

#[test]
fn test_unparsable_request_is_an_error() {
    let file = write_request("{ not json");

    let result = RosterRequest::from_json_file(file.path());

    assert!(matches!(result, Err(RosterError::RequestParse(_))));
}

#[test]
fn test_request_invalid_period_is_an_error() {
    let request = RosterRequest {
        year: 2026,
        month: 13,
        ..Default::default()
    };

    let orchestrator = RosterOrchestrator::new(Arc::new(RuleConfig::default()));
    let result = orchestrator.generate_request(&request);

    assert!(matches!(result, Err(RosterError::InvalidPeriod { month: 13, .. })));
}
