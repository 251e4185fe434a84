// ==========================================
// 月度排班系统 - 导入层
// ==========================================
// 职责: 外部请求（JSON）→ 领域对象
// 红线: 无效记录跳过并记录,生成流程照常进行
// ==========================================

pub mod mapper;
pub mod request;

// 重导出核心类型
pub use mapper::{parse_date, ImportWarning, MappedRequest, RequestMapper, WarningKind};
pub use request::{
    RawAbsence, RawEmployee, RawHoliday, RawPreferences, RawWeeklyPattern, RosterRequest,
};
