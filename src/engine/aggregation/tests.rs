use super::*;
use crate::config::quantity_bins::{default_quantity_bins, QuantityBin};
use crate::domain::record::SalesRecord;
use chrono::NaiveDate;

// ==========================================
// 测试辅助函数
// ==========================================

fn rec(date: Option<(i32, u32, u32)>, store: &str, product: &str, qty: i64, amount: f64) -> SalesRecord {
    SalesRecord {
        row_number: 0,
        document_id: format!("D-{}-{}", store, product),
        ship_date: date.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        billing_group_id: "G1".to_string(),
        billing_group_name: "グループ1".to_string(),
        store_id: store.to_string(),
        store_name: format!("店舗{}", store),
        region: "東京都".to_string(),
        customer_rep_id: "C1".to_string(),
        customer_rep_name: "佐藤".to_string(),
        company_rep_id: "E1".to_string(),
        company_rep_name: "鈴木".to_string(),
        company_rep_territory: "関東".to_string(),
        product_group: "食品".to_string(),
        product_subcategory: "菓子".to_string(),
        product_name: product.to_string(),
        unit_price: Some(if qty != 0 { (amount / qty as f64).abs() } else { 0.0 }),
        quantity: Some(qty),
        total_amount: Some(amount),
        is_return_flag: amount < 0.0,
        is_free_flag: false,
        unparsed_fields: Vec::new(),
    }
}

fn free(mut r: SalesRecord) -> SalesRecord {
    r.is_free_flag = true;
    r.total_amount = Some(0.0);
    r
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn ledger() -> Vec<SalesRecord> {
    vec![
        rec(Some((2023, 1, 5)), "S1", "A", 2, 200.0),
        rec(Some((2023, 1, 9)), "S2", "B", 1, 50.0),
        rec(Some((2023, 2, 1)), "S1", "A", -1, -100.0),
        free(rec(Some((2023, 2, 2)), "S3", "C", 1, 0.0)),
        rec(None, "S3", "C", 5, 500.0),
    ]
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_group_net_sales_sum_to_total() {
    let records = ledger();
    let engine = AggregationEngine::new();
    let total: f64 = records.iter().map(|r| r.amount_or_zero()).sum();

    let stores: f64 = engine.stores(&records).iter().map(|r| r.net_sales).sum();
    let products: f64 = engine.products(&records).iter().map(|r| r.net_sales).sum();
    let regions: f64 = engine.regions(&records).iter().map(|r| r.net_sales).sum();
    let reps: f64 = engine.company_reps(&records).iter().map(|r| r.net_sales).sum();

    assert!(approx(stores, total));
    assert!(approx(products, total));
    assert!(approx(regions, total));
    assert!(approx(reps, total));
}

#[test]
fn test_monthly_excludes_undated_records_only() {
    let records = ledger();
    let rows = AggregationEngine::new().monthly(&records);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].year_month, "2023-01");
    assert_eq!(rows[1].year_month, "2023-02");

    let monthly_total: f64 = rows.iter().map(|r| r.net_sales).sum();
    assert!(approx(monthly_total, 150.0));
}

#[test]
fn test_group_with_no_paid_sales_has_unavailable_rates() {
    let records = vec![
        free(rec(Some((2023, 3, 1)), "S9", "Z", 1, 0.0)),
        free(rec(Some((2023, 3, 2)), "S9", "Z", 2, 0.0)),
    ];
    let rows = AggregationEngine::new().stores(&records);
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert_eq!(row.paid_sales, 0.0);
    assert_eq!(row.return_rate, None);
    assert_eq!(row.avg_price_paid, None);
    assert_eq!(row.free_rate, Some(1.0));
}

#[test]
fn test_return_rate_and_avg_price_per_group() {
    let records = vec![
        rec(Some((2023, 1, 1)), "S1", "A", 4, 400.0),
        rec(Some((2023, 1, 2)), "S1", "A", -1, -100.0),
    ];
    let rows = AggregationEngine::new().products(&records);
    let row = &rows[0];
    assert!(approx(row.net_sales, 300.0));
    assert!(approx(row.paid_sales, 400.0));
    assert!(approx(row.returns, 100.0));
    assert_eq!(row.return_rate, Some(0.25));
    assert_eq!(row.avg_price_paid, Some(100.0));
    assert_eq!(row.transactions, 2);
}

#[test]
fn test_month_over_month_growth() {
    let records = vec![
        rec(Some((2023, 1, 10)), "S1", "A", 1, 100.0),
        rec(Some((2023, 2, 10)), "S1", "A", 1, 110.0),
        rec(Some((2023, 3, 10)), "S1", "A", 1, 121.0),
    ];
    let rows = AggregationEngine::new().monthly(&records);
    assert_eq!(rows[0].mom_net_sales, None);
    assert!(approx(rows[1].mom_net_sales.unwrap(), 0.10));
    assert!(approx(rows[2].mom_net_sales.unwrap(), 0.10));
    assert!(rows.iter().all(|r| r.yoy_net_sales.is_none()));
}

#[test]
fn test_year_over_year_needs_twelve_prior_periods() {
    let records: Vec<SalesRecord> = (0..13)
        .map(|i| {
            let (year, month) = if i < 12 { (2022, i + 1) } else { (2023, 1) };
            rec(Some((year, month as u32, 15)), "S1", "A", 1, 100.0 + i as f64 * 10.0)
        })
        .collect();
    let rows = AggregationEngine::new().monthly(&records);
    assert_eq!(rows.len(), 13);
    assert!(rows[..12].iter().all(|r| r.yoy_net_sales.is_none()));
    assert!(approx(rows[12].yoy_net_sales.unwrap(), 1.2));
}

#[test]
fn test_mom_unavailable_after_zero_month() {
    let records = vec![
        free(rec(Some((2023, 1, 10)), "S1", "A", 1, 0.0)),
        rec(Some((2023, 2, 10)), "S1", "A", 1, 50.0),
    ];
    let rows = AggregationEngine::new().monthly(&records);
    assert_eq!(rows[1].mom_net_sales, None);
}

#[test]
fn test_sorted_by_net_sales_descending() {
    let records = ledger();
    let rows = AggregationEngine::new().stores(&records);
    let values: Vec<f64> = rows.iter().map(|r| r.net_sales).collect();
    let mut sorted = values.clone();
    sorted.sort_by(|a, b| b.total_cmp(a));
    assert_eq!(values, sorted);
}

#[test]
fn test_inconsistent_taxonomy_yields_separate_groups() {
    let mut a = rec(Some((2023, 1, 1)), "S1", "A", 1, 10.0);
    let mut b = rec(Some((2023, 1, 1)), "S1", "A", 1, 20.0);
    a.product_subcategory = "菓子".to_string();
    b.product_subcategory = "飲料".to_string();
    let engine = AggregationEngine::new();

    assert_eq!(engine.products(&[a.clone(), b.clone()]).len(), 2);
    assert_eq!(engine.product_subcategories(&[a.clone(), b.clone()]).len(), 2);
    let groups = engine.product_groups(&[a, b]);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].product_count, 1);
}

#[test]
fn test_distinct_counts_per_axis() {
    let records = ledger();
    let engine = AggregationEngine::new();

    let groups = engine.customer_groups(&records);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].store_count, 3);

    let regions = engine.regions(&records);
    assert_eq!(regions[0].store_count, 3);

    let reps = engine.customer_reps(&records);
    assert_eq!(reps[0].billing_group_count, 1);
}

#[test]
fn test_price_bins_keep_all_configured_bins() {
    let records = vec![
        rec(Some((2023, 1, 1)), "S1", "A", 1, 100.0),
        rec(Some((2023, 1, 1)), "S1", "A", 3, 240.0),
        rec(Some((2023, 1, 1)), "S1", "A", -2, -200.0),
    ];
    let bins = default_quantity_bins();
    let table = AggregationEngine::new().price_quantity_bins(&records, &bins);

    assert_eq!(table.rows.len(), bins.len());
    assert_eq!(table.rows[0].qty_bin, "1");
    assert_eq!(table.rows[0].transactions, 1);
    assert_eq!(table.rows[1].avg_price, Some(80.0));
    let empty = &table.rows[7];
    assert_eq!(empty.transactions, 0);
    assert_eq!(empty.avg_price, None);
    assert_eq!(table.unbinned_paid_records, 0);
}

#[test]
fn test_paid_record_without_positive_quantity_is_unbinned() {
    let mut odd = rec(Some((2023, 1, 1)), "S1", "A", 0, 100.0);
    odd.unit_price = Some(100.0);
    let mut missing = rec(Some((2023, 1, 1)), "S1", "A", 1, 100.0);
    missing.quantity = None;

    let bins = vec![QuantityBin::new("1-10", 0, Some(10)), QuantityBin::new("10+", 10, None)];
    let table = price_bin_rows(&[odd, missing], &bins);
    assert_eq!(table.unbinned_paid_records, 2);
    assert!(table.rows.iter().all(|r| r.transactions == 0));
}

#[test]
fn test_weekday_monthly_labels() {
    // 2023-01-02 为周一, 2023-01-08 为周日
    let records = vec![
        rec(Some((2023, 1, 2)), "S1", "A", 1, 10.0),
        rec(Some((2023, 1, 8)), "S1", "A", 1, 20.0),
        rec(Some((2023, 1, 9)), "S1", "A", 1, 30.0),
    ];
    let rows = AggregationEngine::new().weekday_monthly(&records);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].weekday, "Mon");
    assert!(approx(rows[0].net_sales, 40.0));
    assert_eq!(rows[0].transactions, 2);
    assert_eq!(rows[1].weekday, "Sun");
    assert_eq!(rows[1].weekday_index, 6);
}

#[test]
fn test_empty_input_yields_empty_tables() {
    let tables = AggregationEngine::new().run_all(&[], &default_quantity_bins());
    assert!(tables.monthly.is_empty());
    assert!(tables.stores.is_empty());
    assert_eq!(tables.price_bins.len(), 8);
    assert_eq!(tables.unbinned_paid_records, 0);
}
