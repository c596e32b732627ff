// ==========================================
// 出荷明细台账 - 配置层
// ==========================================
// 职责: 分析配置 (日期窗口/容差/数量分桶) 的加载、覆写与校验
// 存储: 可选 JSON 配置文件
// ==========================================

pub mod analysis_config;
pub mod config_manager;
pub mod error;
pub mod quantity_bins;

// 重导出核心类型
pub use analysis_config::{
    parse_date_arg, parse_tolerance_arg, AnalysisConfig, DateWindow, DEFAULT_TOLERANCE,
};
pub use config_manager::{default_config_path, ConfigManager, ConfigOverrides};
pub use error::{ConfigError, ConfigResult};
pub use quantity_bins::{default_quantity_bins, locate_bin, validate_bins, QuantityBin};
