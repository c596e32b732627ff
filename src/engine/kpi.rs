// ==========================================
// 出荷明细台账 - KPI 引擎
// ==========================================
// 职责: 核心标量指标 (NetSales/PaidSales/Returns/ReturnRate/FreeRate/AvgPrice)
// 红线: 无状态纯函数; 分母为零一律返回 None
// ==========================================

use crate::domain::record::SalesRecord;
use crate::domain::report::KpiSummary;
use crate::domain::types::safe_ratio;

// ==========================================
// KpiEngine - KPI 引擎
// ==========================================
pub struct KpiEngine;

impl KpiEngine {
    pub fn new() -> Self {
        Self
    }

    /// 计算核心 KPI
    ///
    /// # 口径
    /// - NetSales = Σ 金额 (退货为负,无偿约为 0)
    /// - PaidSales = Σ 金额 (金额 > 0)
    /// - Returns = Σ |金额| (退货标志)
    /// - ReturnRate = Returns / PaidSales
    /// - FreeRate = 无偿件数 / 总件数
    /// - AvgPricePaid = PaidSales / Σ 个数 (金额 > 0)
    pub fn compute(&self, records: &[SalesRecord]) -> KpiSummary {
        let net_sales = net_sales(records);
        let paid_sales = paid_sales(records);
        let returns = returns(records);
        let free_count = free_count(records);
        let transactions = records.len();
        let qty_paid = paid_quantity(records);

        KpiSummary {
            net_sales,
            paid_sales,
            returns,
            return_rate: safe_ratio(returns, paid_sales),
            free_count,
            free_rate: safe_ratio(free_count as f64, transactions as f64),
            transactions,
            avg_price_paid: safe_ratio(paid_sales, qty_paid),
        }
    }
}

impl Default for KpiEngine {
    fn default() -> Self {
        Self::new()
    }
}

pub fn net_sales(records: &[SalesRecord]) -> f64 {
    records.iter().map(|r| r.amount_or_zero()).sum()
}

pub fn paid_sales(records: &[SalesRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_paid())
        .map(|r| r.amount_or_zero())
        .sum()
}

pub fn returns(records: &[SalesRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_return_flag)
        .map(|r| r.amount_or_zero().abs())
        .sum()
}

pub fn free_count(records: &[SalesRecord]) -> usize {
    records.iter().filter(|r| r.is_free_flag).count()
}

pub fn paid_quantity(records: &[SalesRecord]) -> f64 {
    records
        .iter()
        .filter(|r| r.is_paid())
        .map(|r| r.quantity_or_zero())
        .sum()
}
