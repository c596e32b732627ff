// ==========================================
// 出荷明细台账 - 领域模型层
// ==========================================
// 职责: 定义交易记录、品质规则、汇总报表行
// 红线: 不含 I/O,不含引擎逻辑
// ==========================================

pub mod record;
pub mod report;
pub mod types;

// 重导出核心类型
pub use record::{SalesColumn, SalesRecord};
pub use report::{
    CompanyRepRow, CustomerGroupRow, CustomerRepRow, GroupMetrics, KpiSummary, MonthlyRow,
    PriceBinRow, ProductGroupRow, ProductRow, ProductSubcategoryRow, QualityIssue, RegionRow,
    StoreRow, WeekdayMonthlyRow,
};
pub use types::{format_ratio, relative_change, safe_ratio, QualityRule, Ratio};
