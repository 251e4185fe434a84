// ==========================================
// 月度排班系统 - 配置管理器
// ==========================================
// 职责: 规则参数文件的定位、加载、保存
// 存储: JSON 文件（缺失时使用默认值）
// ==========================================

use crate::config::rule_config::RuleConfig;
use crate::config::rule_config_trait::RuleConfigReader;
use crate::error::{RosterError, RosterResult};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// 配置相关的环境变量与文件名
pub mod config_keys {
    /// 覆写规则文件路径
    pub const RULES_PATH_ENV: &str = "SHIFT_ROSTER_RULES";

    /// 配置目录下的子目录
    pub const APP_DIR: &str = "shift-roster";

    /// 规则文件名
    pub const RULES_FILE: &str = "rules.json";
}

// ==========================================
// RuleConfigManager - 规则文件管理器
// ==========================================
pub struct RuleConfigManager {
    path: PathBuf,
}

impl RuleConfigManager {
    /// 使用指定路径创建
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// 按默认规则定位配置文件
    ///
    /// # 顺序
    /// 1. 环境变量 SHIFT_ROSTER_RULES
    /// 2. 平台配置目录/shift-roster/rules.json
    /// 3. 当前目录 rules.json
    pub fn from_default_location() -> Self {
        Self::new(get_default_rules_path())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 保存规则参数（格式化 JSON）
    pub fn save(&self, config: &RuleConfig) -> RosterResult<()> {
        config.validate()?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| RosterError::ConfigIo {
                    path: parent.display().to_string(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(config)
            .map_err(|e| RosterError::invalid_config("*", e.to_string()))?;
        fs::write(&self.path, json).map_err(|source| RosterError::ConfigIo {
            path: self.path.display().to_string(),
            source,
        })?;

        info!(path = %self.path.display(), "规则配置已保存");
        Ok(())
    }
}

impl RuleConfigReader for RuleConfigManager {
    fn load_rules(&self) -> RosterResult<RuleConfig> {
        if !self.path.exists() {
            warn!(path = %self.path.display(), "规则配置文件不存在,使用默认值");
            return Ok(RuleConfig::default());
        }

        let raw = fs::read_to_string(&self.path).map_err(|source| RosterError::ConfigIo {
            path: self.path.display().to_string(),
            source,
        })?;

        let config: RuleConfig = serde_json::from_str(&raw)
            .map_err(|e| RosterError::invalid_config("*", format!("JSON 解析失败: {}", e)))?;
        config.validate()?;

        debug!(path = %self.path.display(), "规则配置加载完成");
        Ok(config)
    }
}

/// 默认规则文件路径
pub fn get_default_rules_path() -> PathBuf {
    if let Ok(path) = std::env::var(config_keys::RULES_PATH_ENV) {
        let path = path.trim();
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join(config_keys::APP_DIR).join(config_keys::RULES_FILE),
        None => PathBuf::from(config_keys::RULES_FILE),
    }
}
