// ==========================================
// 出荷明细台账 - 汇总报表行类型
// ==========================================
// 职责: 定义各汇总表的行结构 (扁平、具名字段,可直接序列化为 CSV)
// 口径: Option<f64> 表示 "不可用",输出为空单元格 / JSON null
// ==========================================

use crate::domain::record::SalesRecord;
use crate::domain::types::{QualityRule, Ratio};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// KpiSummary - 核心 KPI
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiSummary {
    pub net_sales: f64,
    pub paid_sales: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_count: usize,
    pub free_rate: Ratio,
    pub transactions: usize,
    pub avg_price_paid: Ratio,
}

// ==========================================
// GroupMetrics - 分组通用指标
// ==========================================
// 各维度汇总表共用的 KPI 列
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupMetrics {
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

// ==========================================
// 月次汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyRow {
    pub year_month: String,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
    pub mom_net_sales: Ratio,
    pub yoy_net_sales: Ratio,
}

// ==========================================
// 曜日×月 汇总 (热力图数据源)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeekdayMonthlyRow {
    pub year_month: String,
    pub weekday: String, // Mon..Sun
    pub weekday_index: u32, // 0 = 周一
    pub net_sales: f64,
    pub transactions: usize,
}

// ==========================================
// 客户层级
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerGroupRow {
    pub billing_group_id: String,
    pub billing_group_name: String,
    pub store_count: usize,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreRow {
    pub billing_group_id: String,
    pub billing_group_name: String,
    pub store_id: String,
    pub store_name: String,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

// ==========================================
// 产品层级
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRow {
    pub product_group: String,
    pub product_subcategory: String,
    pub product_name: String,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGroupRow {
    pub product_group: String,
    pub product_count: usize,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductSubcategoryRow {
    pub product_group: String,
    pub product_subcategory: String,
    pub product_count: usize,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

// ==========================================
// 地域
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRow {
    pub region: String,
    pub store_count: usize,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

// ==========================================
// 担当者
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRepRow {
    pub customer_rep_id: String,
    pub customer_rep_name: String,
    pub billing_group_count: usize,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyRepRow {
    pub company_rep_id: String,
    pub company_rep_name: String,
    pub company_rep_territory: String,
    pub billing_group_count: usize,
    pub net_sales: f64,
    pub quantity: f64,
    pub transactions: usize,
    pub free_count: usize,
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub returns: f64,
    pub return_rate: Ratio,
    pub free_rate: Ratio,
    pub avg_price_paid: Ratio,
}

// ==========================================
// 价格×数量分桶
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBinRow {
    pub qty_bin: String,
    pub lower_exclusive: i64,
    pub upper_inclusive: Option<i64>, // None 表示无上限
    pub paid_sales: f64,
    pub paid_quantity: f64,
    pub transactions: usize,
    pub avg_price: Ratio,
}

// ==========================================
// QualityIssue - 品质问题 (扁平: 原记录全字段 + 规则标签 + 诊断值)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityIssue {
    pub issue: QualityRule,
    pub row_number: usize,
    pub document_id: String,
    pub ship_date: Option<NaiveDate>,
    pub billing_group_id: String,
    pub billing_group_name: String,
    pub store_id: String,
    pub store_name: String,
    pub region: String,
    pub customer_rep_id: String,
    pub customer_rep_name: String,
    pub company_rep_id: String,
    pub company_rep_name: String,
    pub company_rep_territory: String,
    pub product_group: String,
    pub product_subcategory: String,
    pub product_name: String,
    pub unit_price: Option<f64>,
    pub quantity: Option<i64>,
    pub total_amount: Option<f64>,
    pub is_return_flag: bool,
    pub is_free_flag: bool,
    /// 单价×个数 − 金额 (仅 PRICE_QTY_MISMATCH)
    pub calc_diff: Option<f64>,
    /// 诊断说明 (仅 UNPARSEABLE_FIELD: 无法转换的列)
    pub detail: Option<String>,
}

impl QualityIssue {
    pub fn from_record(
        record: &SalesRecord,
        issue: QualityRule,
        calc_diff: Option<f64>,
        detail: Option<String>,
    ) -> Self {
        Self {
            issue,
            row_number: record.row_number,
            document_id: record.document_id.clone(),
            ship_date: record.ship_date,
            billing_group_id: record.billing_group_id.clone(),
            billing_group_name: record.billing_group_name.clone(),
            store_id: record.store_id.clone(),
            store_name: record.store_name.clone(),
            region: record.region.clone(),
            customer_rep_id: record.customer_rep_id.clone(),
            customer_rep_name: record.customer_rep_name.clone(),
            company_rep_id: record.company_rep_id.clone(),
            company_rep_name: record.company_rep_name.clone(),
            company_rep_territory: record.company_rep_territory.clone(),
            product_group: record.product_group.clone(),
            product_subcategory: record.product_subcategory.clone(),
            product_name: record.product_name.clone(),
            unit_price: record.unit_price,
            quantity: record.quantity,
            total_amount: record.total_amount,
            is_return_flag: record.is_return_flag,
            is_free_flag: record.is_free_flag,
            calc_diff,
            detail,
        }
    }
}
