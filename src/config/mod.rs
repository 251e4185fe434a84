// ==========================================
// 月度排班系统 - 配置层
// ==========================================
// 职责: 规则阈值的定义、加载与验证
// 存储: JSON 文件 / 内存
// ==========================================

pub mod config_manager;
pub mod rule_config;
pub mod rule_config_trait;

// 重导出核心配置类型
pub use config_manager::{config_keys, get_default_rules_path, RuleConfigManager};
pub use rule_config::{RuleConfig, StaffingTarget};
pub use rule_config_trait::RuleConfigReader;
