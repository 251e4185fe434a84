// ==========================================
// 月度排班系统 - 规则配置读取 Trait
// ==========================================
// 职责: 编排器读取规则参数的接口（不包含实现细节）
// 实现者: RuleConfig（内存）、RuleConfigManager（JSON 文件）
// ==========================================

use crate::config::rule_config::RuleConfig;
use crate::error::RosterResult;

// ==========================================
// RuleConfigReader Trait
// ==========================================
pub trait RuleConfigReader: Send + Sync {
    /// 读取本次生成使用的规则参数快照
    ///
    /// # 返回
    /// - 已通过 validate() 的 RuleConfig
    fn load_rules(&self) -> RosterResult<RuleConfig>;
}

impl RuleConfigReader for RuleConfig {
    fn load_rules(&self) -> RosterResult<RuleConfig> {
        self.validate()?;
        Ok(self.clone())
    }
}
