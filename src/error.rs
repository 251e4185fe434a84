// ==========================================
// 月度排班系统 - 错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 仅覆盖输入/配置边界; 规则违规一律作为报告数据
// ==========================================

use thiserror::Error;

/// 排班系统错误类型
#[derive(Error, Debug)]
pub enum RosterError {
    // ===== 输入错误 =====
    #[error("无效的排班月份: year={year}, month={month}")]
    InvalidPeriod { year: i32, month: u32 },

    #[error("请求文件读取失败 (path={path}): {source}")]
    RequestIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("请求解析失败: {0}")]
    RequestParse(#[from] serde_json::Error),

    // ===== 配置错误 =====
    #[error("规则配置读取失败 (path={path}): {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("规则配置无效 (field={field}): {message}")]
    InvalidConfig { field: String, message: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// 统一结果类型
pub type RosterResult<T> = Result<T, RosterError>;

impl RosterError {
    pub fn invalid_config(field: impl Into<String>, message: impl Into<String>) -> Self {
        RosterError::InvalidConfig {
            field: field.into(),
            message: message.into(),
        }
    }
}
