// ==========================================
// 出荷明细台账 - 核心库
// ==========================================
// 职责: 出荷明细的数据质量校验 + 多维 KPI 汇总
// 技术栈: Rust + tokio + csv/calamine
// 系统定位: 单次批处理 (加载一次, 只读计算, 平面文件输出)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 记录与报表行
pub mod domain;

// 配置层 - 日期窗口/容差/数量分桶
pub mod config;

// 引擎层 - KPI/品质规则/多维汇总/装配
pub mod engine;

// 导入层 - 外部文件
pub mod importer;

// 输出层 - CSV/JSON
pub mod export;

// 应用层 - 命令行
pub mod app;

// 日志系统
pub mod logging;

// 性能统计
pub mod perf;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{KpiSummary, QualityIssue, QualityRule, Ratio, SalesColumn, SalesRecord};

// 配置
pub use config::{AnalysisConfig, ConfigError, ConfigManager, DateWindow, QuantityBin};

// 引擎
pub use engine::{
    AggregationEngine, KpiEngine, QualityReport, QualityRuleEngine, SalesReport,
    SummaryAssembler,
};

// 导入/输出
pub use export::{ExportError, Manifest, ReportWriter};
pub use importer::{ImportError, SalesImporter, SalesImporterImpl};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "出荷明细台账分析";
