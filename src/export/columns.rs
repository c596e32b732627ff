// ==========================================
// 出荷明细台账 - 输出表列定义
// ==========================================
// 空表也要输出表头行; 列名与行结构的字段名一一对应
// ==========================================

use crate::domain::report::{
    CompanyRepRow, CustomerGroupRow, CustomerRepRow, MonthlyRow, PriceBinRow, ProductGroupRow,
    ProductRow, ProductSubcategoryRow, QualityIssue, RegionRow, StoreRow, WeekdayMonthlyRow,
};
use serde::Serialize;

/// 可序列化为 CSV 的表行
pub trait TableRow: Serialize {
    const COLUMNS: &'static [&'static str];
}

macro_rules! table_columns {
    ($row:ty => [$($key:literal),* $(,)?] + metrics) => {
        impl TableRow for $row {
            const COLUMNS: &'static [&'static str] = &[
                $($key,)*
                "net_sales",
                "quantity",
                "transactions",
                "free_count",
                "paid_sales",
                "paid_quantity",
                "returns",
                "return_rate",
                "free_rate",
                "avg_price_paid",
            ];
        }
    };
    ($row:ty => [$($key:literal),* $(,)?]) => {
        impl TableRow for $row {
            const COLUMNS: &'static [&'static str] = &[$($key),*];
        }
    };
}

table_columns!(CustomerGroupRow => ["billing_group_id", "billing_group_name", "store_count"] + metrics);
table_columns!(StoreRow => ["billing_group_id", "billing_group_name", "store_id", "store_name"] + metrics);
table_columns!(ProductRow => ["product_group", "product_subcategory", "product_name"] + metrics);
table_columns!(ProductGroupRow => ["product_group", "product_count"] + metrics);
table_columns!(ProductSubcategoryRow => ["product_group", "product_subcategory", "product_count"] + metrics);
table_columns!(RegionRow => ["region", "store_count"] + metrics);
table_columns!(CustomerRepRow => ["customer_rep_id", "customer_rep_name", "billing_group_count"] + metrics);
table_columns!(CompanyRepRow => [
    "company_rep_id",
    "company_rep_name",
    "company_rep_territory",
    "billing_group_count",
] + metrics);

table_columns!(MonthlyRow => [
    "year_month",
    "net_sales",
    "quantity",
    "transactions",
    "free_count",
    "paid_sales",
    "paid_quantity",
    "returns",
    "return_rate",
    "free_rate",
    "avg_price_paid",
    "mom_net_sales",
    "yoy_net_sales",
]);

table_columns!(WeekdayMonthlyRow => ["year_month", "weekday", "weekday_index", "net_sales", "transactions"]);

table_columns!(PriceBinRow => [
    "qty_bin",
    "lower_exclusive",
    "upper_inclusive",
    "paid_sales",
    "paid_quantity",
    "transactions",
    "avg_price",
]);

table_columns!(QualityIssue => [
    "issue",
    "row_number",
    "document_id",
    "ship_date",
    "billing_group_id",
    "billing_group_name",
    "store_id",
    "store_name",
    "region",
    "customer_rep_id",
    "customer_rep_name",
    "company_rep_id",
    "company_rep_name",
    "company_rep_territory",
    "product_group",
    "product_subcategory",
    "product_name",
    "unit_price",
    "quantity",
    "total_amount",
    "is_return_flag",
    "is_free_flag",
    "calc_diff",
    "detail",
]);
