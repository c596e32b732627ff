// ==========================================
// 出荷明细台账 - 引擎层
// ==========================================
// 依赖顺序: KPI → {品质规则, 多维汇总} → 汇总装配器
// ==========================================
// 职责: 纯计算,不做 I/O
// 红线: 所有比率分母为零一律为 "不可用" (None), 不得 NaN 扩散
// ==========================================

pub mod aggregation;
pub mod assembler;
pub mod kpi;
pub mod quality;

// 重导出核心引擎
pub use aggregation::{AggregationEngine, AggregationTables, PriceBinTable};
pub use assembler::{ReportTable, SalesReport, SummaryAssembler};
pub use kpi::KpiEngine;
pub use quality::{price_qty_diff, QualityReport, QualityRuleEngine};
