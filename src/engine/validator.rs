// ==========================================
// 月度排班系统 - 规则校验与报告
// ==========================================
// 职责: 独立于填充过程,对成品网格重新判定每条规则
// 输入: 生成上下文 + 成品网格
// 输出: 排好序的 ValidationResult 列表
// 红线: 只读网格,不使用填充阶段的中间状态
// 红线: 违规只记录,不抛错
// ==========================================

mod core;
mod mandatory;
mod soft;


pub use self::core::RuleValidator;
