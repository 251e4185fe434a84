// ==========================================
// 月度排班系统 - 引擎编排器
// ==========================================
// 用途: 协调各引擎的执行顺序
// 流程: 规则快照 → 网格构建 → 预分配 → 多轮填充 → 汇总 → 规则校验
// 红线: 每次生成独立上下文,不跨运行共享可变状态
// ==========================================

use crate::config::RuleConfigReader;
use crate::domain::{Absence, Employee, Holiday, ReportMeta, RosterGrid, ValidationReport};
use crate::engine::{
    CalendarBuilder, FillSummary, PreAssignmentApplier, PreAssignmentSummary, RosterContext,
    RuleValidator, ShiftFiller, TotalsAggregator, TotalsDiagnostic,
};
use crate::error::RosterResult;
use crate::importer::{ImportWarning, RequestMapper, RosterRequest};
use crate::perf::PhaseTimer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// RosterOutcome - 生成结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterOutcome {
    pub grid: RosterGrid,
    pub report: ValidationReport,

    /// 导入阶段跳过的记录
    #[serde(default)]
    pub import_warnings: Vec<ImportWarning>,

    // 各阶段诊断
    pub pre_assignment: PreAssignmentSummary,
    pub fill: FillSummary,
    #[serde(default)]
    pub totals_diagnostics: Vec<TotalsDiagnostic>,
}

impl RosterOutcome {
    /// 未解决的强制规则违规数
    pub fn unresolved_mandatory_violations(&self) -> usize {
        self.report.unresolved_mandatory_violations()
    }
}

// ==========================================
// RosterOrchestrator - 引擎编排器
// ==========================================
pub struct RosterOrchestrator<C>
where
    C: RuleConfigReader,
{
    config: Arc<C>,
    calendar: CalendarBuilder,
    pre_assignment: PreAssignmentApplier,
    filler: ShiftFiller,
    aggregator: TotalsAggregator,
    validator: RuleValidator,
    mapper: RequestMapper,
}

impl<C> RosterOrchestrator<C>
where
    C: RuleConfigReader,
{
    /// 创建新的编排器实例
    ///
    /// # 参数
    /// - config: 规则配置读取器
    pub fn new(config: Arc<C>) -> Self {
        Self {
            config,
            calendar: CalendarBuilder::new(),
            pre_assignment: PreAssignmentApplier::new(),
            filler: ShiftFiller::new(),
            aggregator: TotalsAggregator::new(),
            validator: RuleValidator::new(),
            mapper: RequestMapper::new(),
        }
    }

    /// 生成指定月份的排班表与合规报告
    ///
    /// # 参数
    /// - year / month: 排班月份
    /// - employees: 名册（顺序即平局裁决顺序）
    /// - absences: 缺勤区间
    /// - holidays: 节假日
    ///
    /// # 返回
    /// - Ok(RosterOutcome): 尽力而为的网格 + 报告（规则违规只记录在报告中）
    /// - Err: 仅限无效月份或规则配置读取失败
    #[instrument(skip(self, employees, absences, holidays), fields(employees = employees.len()))]
    pub fn generate(
        &self,
        year: i32,
        month: u32,
        employees: &[Employee],
        absences: &[Absence],
        holidays: &[Holiday],
    ) -> RosterResult<RosterOutcome> {
        let run_timer = PhaseTimer::start("generate");
        info!(
            year,
            month,
            employees_count = employees.len(),
            absences_count = absences.len(),
            holidays_count = holidays.len(),
            "开始生成排班"
        );

        // ==========================================
        // 步骤1: 规则快照 + 生成上下文
        // ==========================================
        debug!("步骤1: 读取规则参数并构建上下文");

        let rules = {
            let _timer = PhaseTimer::start("load_rules");
            self.config.load_rules()?
        };
        let ctx = RosterContext::new(rules, employees, absences, holidays);

        // ==========================================
        // 步骤2: Calendar Builder - 空网格
        // ==========================================
        debug!("步骤2: 构建月度网格");

        let mut grid = {
            let _timer = PhaseTimer::start("calendar_builder");
            self.calendar.build(year, month, &ctx)?
        };

        info!(days = grid.days_in_month(), "网格构建完成");

        // ==========================================
        // 步骤3: Pre-assignment - 假期与固定约束
        // ==========================================
        debug!("步骤3: 执行预分配");

        let pre_assignment = {
            let _timer = PhaseTimer::start("pre_assignment");
            let summary = self.pre_assignment.apply(&ctx, &mut grid);
            self.aggregator.recompute(&mut grid);
            summary
        };

        info!(
            leave_cells = pre_assignment.leave_cells,
            fixed_assignments = pre_assignment.fixed_assignments,
            fixed_days_off = pre_assignment.fixed_days_off,
            weekly_pattern_cells = pre_assignment.weekly_pattern_cells,
            "预分配完成"
        );

        // ==========================================
        // 步骤4: Shift Filler - 多轮填充
        // ==========================================
        debug!("步骤4: 执行多轮填充");

        let fill = {
            let _timer = PhaseTimer::start("shift_filler");
            self.filler.fill(&ctx, &mut grid)
        };

        let shortfalls: usize = fill.passes.iter().map(|p| p.shortfalls.len()).sum();
        info!(
            placements = fill.total_placements(),
            shortfalls, "多轮填充完成"
        );

        // ==========================================
        // 步骤5: Totals Aggregator - 汇总与核对
        // ==========================================
        debug!("步骤5: 重算汇总并核对");

        let totals_diagnostics = {
            let _timer = PhaseTimer::start("totals");
            self.aggregator.recompute(&mut grid);
            self.aggregator.audit(&grid)
        };

        // ==========================================
        // 步骤6: Rule Validator - 合规报告
        // ==========================================
        debug!("步骤6: 执行规则校验");

        let results = {
            let _timer = PhaseTimer::start("validator");
            self.validator.validate(&ctx, &grid)
        };

        let report = ValidationReport {
            results,
            meta: ReportMeta {
                run_id: Uuid::new_v4(),
                period: format!("{:04}-{:02}", year, month),
                elapsed_ms: run_timer.elapsed_ms(),
            },
        };

        let unresolved = report.unresolved_mandatory_violations();
        if unresolved > 0 {
            warn!(run_id = %report.meta.run_id, unresolved, "{}", report.summary());
        } else {
            info!(run_id = %report.meta.run_id, "{}", report.summary());
        }

        Ok(RosterOutcome {
            grid,
            report,
            import_warnings: Vec::new(),
            pre_assignment,
            fill,
            totals_diagnostics,
        })
    }

    /// 从原始请求生成（先映射为领域对象,跳过的记录附在结果中）
    pub fn generate_request(&self, request: &RosterRequest) -> RosterResult<RosterOutcome> {
        let mapped = {
            let _timer = PhaseTimer::start("request_mapper");
            self.mapper.map(request)
        };

        let mut outcome = self.generate(
            request.year,
            request.month,
            &mapped.employees,
            &mapped.absences,
            &mapped.holidays,
        )?;
        outcome.import_warnings = mapped.warnings;
        Ok(outcome)
    }
}
