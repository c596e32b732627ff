// ==========================================
// 出荷明细台账 - 配置错误类型
// ==========================================
// 工具: thiserror 派生宏
// 口径: 配置错误在任何汇总之前立即报告,不做静默修正
// ==========================================

use chrono::NaiveDate;
use thiserror::Error;

/// 配置错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    // ===== 日期窗口 =====
    #[error("日期窗口颠倒: 开始日 {start} 晚于结束日 {end}")]
    InvertedDateWindow { start: NaiveDate, end: NaiveDate },

    #[error("日期格式错误 ({field}): 期望 YYYY-MM-DD，实际 {value}")]
    InvalidDate { field: String, value: String },

    // ===== 容差 =====
    #[error("容差无效: {0}（必须为非负有限数）")]
    InvalidTolerance(String),

    // ===== 数量分桶 =====
    #[error("数量分桶配置无效: {0}")]
    InvalidBins(String),

    // ===== 配置文件 =====
    #[error("配置文件读取失败 ({path}): {message}")]
    FileRead { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    FileFormat { path: String, message: String },
}

/// Result 类型别名
pub type ConfigResult<T> = Result<T, ConfigError>;
