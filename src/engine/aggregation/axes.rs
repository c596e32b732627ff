use super::bins::{price_bin_rows, PriceBinTable};
use super::core::{aggregate, sort_by_net_sales_desc, GroupResult, GroupSpec};
use super::temporal::{monthly_rows, weekday_monthly_rows};
use crate::config::quantity_bins::QuantityBin;
use crate::domain::record::SalesRecord;
use crate::domain::report::{
    CompanyRepRow, CustomerGroupRow, CustomerRepRow, MonthlyRow, ProductGroupRow, ProductRow,
    ProductSubcategoryRow, RegionRow, StoreRow, WeekdayMonthlyRow,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

// 键字段 + GroupMetrics 全部指标列 → 扁平行
macro_rules! metric_row {
    ($row:ident { $($field:ident $(: $value:expr)?),* $(,)? }, $metrics:expr) => {{
        let m = $metrics;
        $row {
            $($field $(: $value)?,)*
            net_sales: m.net_sales,
            quantity: m.quantity,
            transactions: m.transactions,
            free_count: m.free_count,
            paid_sales: m.paid_sales,
            paid_quantity: m.paid_quantity,
            returns: m.returns,
            return_rate: m.return_rate,
            free_rate: m.free_rate,
            avg_price_paid: m.avg_price_paid,
        }
    }};
}

// ==========================================
// 各维度分组规格
// ==========================================

fn billing_group_key(r: &SalesRecord) -> Option<(String, String)> {
    Some((r.billing_group_id.clone(), r.billing_group_name.clone()))
}

fn store_key(r: &SalesRecord) -> Option<(String, String, String, String)> {
    Some((
        r.billing_group_id.clone(),
        r.billing_group_name.clone(),
        r.store_id.clone(),
        r.store_name.clone(),
    ))
}

fn product_key(r: &SalesRecord) -> Option<(String, String, String)> {
    Some((
        r.product_group.clone(),
        r.product_subcategory.clone(),
        r.product_name.clone(),
    ))
}

fn product_group_key(r: &SalesRecord) -> Option<String> {
    Some(r.product_group.clone())
}

fn product_subcategory_key(r: &SalesRecord) -> Option<(String, String)> {
    Some((r.product_group.clone(), r.product_subcategory.clone()))
}

fn region_key(r: &SalesRecord) -> Option<String> {
    Some(r.region.clone())
}

fn customer_rep_key(r: &SalesRecord) -> Option<(String, String)> {
    Some((r.customer_rep_id.clone(), r.customer_rep_name.clone()))
}

fn company_rep_key(r: &SalesRecord) -> Option<(String, String, String)> {
    Some((
        r.company_rep_id.clone(),
        r.company_rep_name.clone(),
        r.company_rep_territory.clone(),
    ))
}

fn store_member(r: &SalesRecord) -> &str {
    &r.store_id
}

fn product_member(r: &SalesRecord) -> &str {
    &r.product_name
}

fn billing_group_member(r: &SalesRecord) -> &str {
    &r.billing_group_id
}

// ==========================================
// AggregationTables - 全部汇总表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationTables {
    pub monthly: Vec<MonthlyRow>,
    pub weekday_monthly: Vec<WeekdayMonthlyRow>,
    pub customer_groups: Vec<CustomerGroupRow>,
    pub stores: Vec<StoreRow>,
    pub products: Vec<ProductRow>,
    pub product_groups: Vec<ProductGroupRow>,
    pub product_subcategories: Vec<ProductSubcategoryRow>,
    pub regions: Vec<RegionRow>,
    pub customer_reps: Vec<CustomerRepRow>,
    pub company_reps: Vec<CompanyRepRow>,
    pub price_bins: Vec<crate::domain::report::PriceBinRow>,
    pub unbinned_paid_records: usize,
}

// ==========================================
// AggregationEngine - 多维汇总引擎
// ==========================================
// 红线: 无状态纯函数; 各维度互相独立,不依赖彼此结果
pub struct AggregationEngine;

impl AggregationEngine {
    pub fn new() -> Self {
        Self
    }

    /// 运行全部维度
    pub fn run_all(&self, records: &[SalesRecord], bins: &[QuantityBin]) -> AggregationTables {
        let bin_table = self.price_quantity_bins(records, bins);
        AggregationTables {
            monthly: self.monthly(records),
            weekday_monthly: self.weekday_monthly(records),
            customer_groups: self.customer_groups(records),
            stores: self.stores(records),
            products: self.products(records),
            product_groups: self.product_groups(records),
            product_subcategories: self.product_subcategories(records),
            regions: self.regions(records),
            customer_reps: self.customer_reps(records),
            company_reps: self.company_reps(records),
            price_bins: bin_table.rows,
            unbinned_paid_records: bin_table.unbinned_paid_records,
        }
    }

    // ==========================================
    // 时间维度
    // ==========================================

    pub fn monthly(&self, records: &[SalesRecord]) -> Vec<MonthlyRow> {
        let rows = monthly_rows(records);
        debug!(axis = "monthly", groups = rows.len(), "汇总完成");
        rows
    }

    pub fn weekday_monthly(&self, records: &[SalesRecord]) -> Vec<WeekdayMonthlyRow> {
        weekday_monthly_rows(records)
    }

    // ==========================================
    // 客户层级 (两层独立计算)
    // ==========================================

    pub fn customer_groups(&self, records: &[SalesRecord]) -> Vec<CustomerGroupRow> {
        let spec = GroupSpec {
            axis: "customer_group",
            key: billing_group_key,
            distinct_of: Some(store_member),
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                let (billing_group_id, billing_group_name) = g.key;
                metric_row!(
                    CustomerGroupRow {
                        billing_group_id,
                        billing_group_name,
                        store_count: g.distinct,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    pub fn stores(&self, records: &[SalesRecord]) -> Vec<StoreRow> {
        let spec = GroupSpec {
            axis: "store",
            key: store_key,
            distinct_of: None,
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                let (billing_group_id, billing_group_name, store_id, store_name) = g.key;
                metric_row!(
                    StoreRow {
                        billing_group_id,
                        billing_group_name,
                        store_id,
                        store_name,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    // ==========================================
    // 产品层级 (三元组最细,上卷按子键独立重新分组)
    // ==========================================

    pub fn products(&self, records: &[SalesRecord]) -> Vec<ProductRow> {
        let spec = GroupSpec {
            axis: "product",
            key: product_key,
            distinct_of: None,
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                let (product_group, product_subcategory, product_name) = g.key;
                metric_row!(
                    ProductRow {
                        product_group,
                        product_subcategory,
                        product_name,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    pub fn product_groups(&self, records: &[SalesRecord]) -> Vec<ProductGroupRow> {
        let spec = GroupSpec {
            axis: "product_group",
            key: product_group_key,
            distinct_of: Some(product_member),
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                metric_row!(
                    ProductGroupRow {
                        product_group: g.key,
                        product_count: g.distinct,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    pub fn product_subcategories(&self, records: &[SalesRecord]) -> Vec<ProductSubcategoryRow> {
        let spec = GroupSpec {
            axis: "product_subcategory",
            key: product_subcategory_key,
            distinct_of: Some(product_member),
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                let (product_group, product_subcategory) = g.key;
                metric_row!(
                    ProductSubcategoryRow {
                        product_group,
                        product_subcategory,
                        product_count: g.distinct,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    // ==========================================
    // 地域
    // ==========================================

    pub fn regions(&self, records: &[SalesRecord]) -> Vec<RegionRow> {
        let spec = GroupSpec {
            axis: "region",
            key: region_key,
            distinct_of: Some(store_member),
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                metric_row!(
                    RegionRow {
                        region: g.key,
                        store_count: g.distinct,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    // ==========================================
    // 担当者 (客户侧/自社侧独立)
    // ==========================================

    pub fn customer_reps(&self, records: &[SalesRecord]) -> Vec<CustomerRepRow> {
        let spec = GroupSpec {
            axis: "customer_rep",
            key: customer_rep_key,
            distinct_of: Some(billing_group_member),
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                let (customer_rep_id, customer_rep_name) = g.key;
                metric_row!(
                    CustomerRepRow {
                        customer_rep_id,
                        customer_rep_name,
                        billing_group_count: g.distinct,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    pub fn company_reps(&self, records: &[SalesRecord]) -> Vec<CompanyRepRow> {
        let spec = GroupSpec {
            axis: "company_rep",
            key: company_rep_key,
            distinct_of: Some(billing_group_member),
        };
        ranked(records, &spec)
            .into_iter()
            .map(|g| {
                let (company_rep_id, company_rep_name, company_rep_territory) = g.key;
                metric_row!(
                    CompanyRepRow {
                        company_rep_id,
                        company_rep_name,
                        company_rep_territory,
                        billing_group_count: g.distinct,
                    },
                    g.metrics
                )
            })
            .collect()
    }

    // ==========================================
    // 价格×数量分桶
    // ==========================================

    pub fn price_quantity_bins(&self, records: &[SalesRecord], bins: &[QuantityBin]) -> PriceBinTable {
        let table = price_bin_rows(records, bins);
        if table.unbinned_paid_records > 0 {
            debug!(
                unbinned = table.unbinned_paid_records,
                "有偿记录数量不在任何分桶内"
            );
        }
        table
    }
}

impl Default for AggregationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 分组后按 NetSales 降序
fn ranked<K: Ord + Clone>(records: &[SalesRecord], spec: &GroupSpec<K>) -> Vec<GroupResult<K>> {
    let mut groups = aggregate(records, spec);
    sort_by_net_sales_desc(&mut groups);
    debug!(axis = spec.axis, groups = groups.len(), "汇总完成");
    groups
}
