// ==========================================
// 出荷明细台账 - 多维汇总引擎
// ==========================================
// 职责: 按时间/客户/产品/地域/担当者/数量分桶汇总 KPI
// 红线: 所有维度共用同一分组例程,派生比率口径一致
// 红线: 上卷维度独立重新分组,不依赖下层结果
// ==========================================
// 排序: 月次按年月升序; 分桶按配置顺序; 其余按 NetSales 降序
// ==========================================

mod axes;
mod bins;
mod core;
mod temporal;

#[cfg(test)]
mod tests;

pub use axes::{AggregationEngine, AggregationTables};
pub use bins::{price_bin_rows, PriceBinTable};
pub use self::core::{
    aggregate, distinct_counts, filtered_sums, sort_by_net_sales_desc, GroupResult, GroupSpec,
};
pub use temporal::{monthly_rows, weekday_monthly_rows, YOY_LAG};
