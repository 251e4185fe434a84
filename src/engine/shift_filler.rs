// ==========================================
// 月度排班系统 - 多轮填充引擎
// ==========================================
// 职责: 按固定顺序逐轮填充空单元格
// 顺序: 基本覆盖 → 目标人数 → 周休分配 → 兜底填充
// 红线: 单向贪心,不回溯,不随机
// 红线: 每次落位后全量重算汇总
// 红线: 第 2 轮不占用周休目标与完整休息周末所需的单元格
// 红线: 填不上的单元格保持为空,由校验报告暴露
// ==========================================

mod core;
mod coverage;
mod guard;
mod rest;


pub use self::core::{FillPass, FillSummary, PassOutcome, ShiftFiller, Shortfall};
