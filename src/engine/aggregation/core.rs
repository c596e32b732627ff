use crate::domain::record::SalesRecord;
use crate::domain::report::GroupMetrics;
use crate::domain::types::safe_ratio;
use std::collections::{BTreeMap, BTreeSet};

// ==========================================
// GroupSpec - 单一维度的分组规格
// ==========================================
// key: 分组键 (返回 None 的记录不参与本维度)
// distinct_of: 组内去重计数的成员 (如地域下的店铺数)
pub struct GroupSpec<K> {
    pub axis: &'static str,
    pub key: fn(&SalesRecord) -> Option<K>,
    pub distinct_of: Option<fn(&SalesRecord) -> &str>,
}

/// 分组结果: 键 + 指标 + 组内去重计数
#[derive(Debug, Clone, PartialEq)]
pub struct GroupResult<K> {
    pub key: K,
    pub metrics: GroupMetrics,
    pub distinct: usize,
}

// ==========================================
// 阶段 (b): 直接求和的基础累加器
// ==========================================
#[derive(Debug, Clone, Default)]
struct BaseTotals {
    net_sales: f64,
    quantity: f64,
    transactions: usize,
    free_count: usize,
}

/// 单一参数化的分组 KPI 例程
///
/// 1. 按键分组,直接累加 NetSales/数量/件数/无偿件数
/// 2. 有偿金额、有偿数量、退货金额分别做过滤后的二次分组,按键合并 (缺失即 0)
/// 3. 按统一口径派生 ReturnRate/FreeRate/AvgPrice
///
/// 返回按键升序排列的结果
pub fn aggregate<K: Ord + Clone>(records: &[SalesRecord], spec: &GroupSpec<K>) -> Vec<GroupResult<K>> {
    let key_fn = spec.key;

    // 阶段 (b)
    let mut base: BTreeMap<K, BaseTotals> = BTreeMap::new();
    for record in records {
        let Some(key) = key_fn(record) else {
            continue;
        };
        let entry = base.entry(key).or_default();
        entry.net_sales += record.amount_or_zero();
        entry.quantity += record.quantity_or_zero();
        entry.transactions += 1;
        if record.is_free_flag {
            entry.free_count += 1;
        }
    }

    // 阶段 (c)
    let paid_sales = filtered_sums(records, key_fn, SalesRecord::is_paid, SalesRecord::amount_or_zero);
    let paid_qty = filtered_sums(records, key_fn, SalesRecord::is_paid, SalesRecord::quantity_or_zero);
    let returns = filtered_sums(records, key_fn, |r| r.is_return_flag, |r| r.amount_or_zero().abs());

    let distinct = spec
        .distinct_of
        .map(|member| distinct_counts(records, key_fn, member))
        .unwrap_or_default();

    // 阶段 (d)
    base.into_iter()
        .map(|(key, totals)| {
            let paid_sales = paid_sales.get(&key).copied().unwrap_or(0.0);
            let paid_quantity = paid_qty.get(&key).copied().unwrap_or(0.0);
            let returns = returns.get(&key).copied().unwrap_or(0.0);
            let distinct = distinct.get(&key).copied().unwrap_or(0);

            let metrics = GroupMetrics {
                net_sales: totals.net_sales,
                quantity: totals.quantity,
                transactions: totals.transactions,
                free_count: totals.free_count,
                paid_sales,
                paid_quantity,
                returns,
                return_rate: safe_ratio(returns, paid_sales),
                free_rate: safe_ratio(totals.free_count as f64, totals.transactions as f64),
                avg_price_paid: safe_ratio(paid_sales, paid_quantity),
            };

            GroupResult {
                key,
                metrics,
                distinct,
            }
        })
        .collect()
}

/// 过滤后的二次分组求和
pub fn filtered_sums<K: Ord>(
    records: &[SalesRecord],
    key_fn: fn(&SalesRecord) -> Option<K>,
    filter: fn(&SalesRecord) -> bool,
    value: fn(&SalesRecord) -> f64,
) -> BTreeMap<K, f64> {
    let mut sums: BTreeMap<K, f64> = BTreeMap::new();
    for record in records.iter().filter(|r| filter(r)) {
        if let Some(key) = key_fn(record) {
            *sums.entry(key).or_insert(0.0) += value(record);
        }
    }
    sums
}

/// 组内成员去重计数
pub fn distinct_counts<K: Ord>(
    records: &[SalesRecord],
    key_fn: fn(&SalesRecord) -> Option<K>,
    member: fn(&SalesRecord) -> &str,
) -> BTreeMap<K, usize> {
    let mut members: BTreeMap<K, BTreeSet<&str>> = BTreeMap::new();
    for record in records {
        if let Some(key) = key_fn(record) {
            members.entry(key).or_default().insert(member(record));
        }
    }
    members.into_iter().map(|(k, set)| (k, set.len())).collect()
}

/// NetSales 降序; 同值保持键升序 (稳定排序)
pub fn sort_by_net_sales_desc<K>(results: &mut [GroupResult<K>]) {
    results.sort_by(|a, b| b.metrics.net_sales.total_cmp(&a.metrics.net_sales));
}
