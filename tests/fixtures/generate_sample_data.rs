// ==========================================
// 样例台账生成器
// ==========================================
// 用途: 生成出荷明细台账样例 (日文表头, UTF-8 带 BOM)
// 输出: tests/fixtures/datasets/*.csv
// ==========================================

use chrono::{Duration, NaiveDate};
use csv::Writer;
use sales_insight::domain::record::SalesColumn;
use std::error::Error;
use std::fs::{self, File};
use std::io::Write;

const OUTPUT_DIR: &str = "tests/fixtures/datasets";
const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

const REGIONS: [&str; 4] = ["東京都", "大阪府", "愛知県", "福岡県"];
const PRODUCTS: [(&str, &str, &str, u32); 6] = [
    ("食品", "菓子", "チョコレート", 120),
    ("食品", "菓子", "キャンディ", 80),
    ("食品", "飲料", "緑茶", 150),
    ("日用品", "洗剤", "食器用洗剤", 298),
    ("日用品", "紙製品", "ティッシュ", 350),
    ("日用品", "紙製品", "トイレットペーパー", 420),
];

// 台账行
#[derive(Clone)]
struct LedgerRow {
    document_id: String,
    ship_date: String,
    billing_group_id: String,
    billing_group_name: String,
    store_id: String,
    store_name: String,
    region: String,
    customer_rep_id: String,
    customer_rep_name: String,
    company_rep_id: String,
    company_rep_name: String,
    company_rep_territory: String,
    product_group: String,
    product_subcategory: String,
    product_name: String,
    unit_price: String,
    quantity: String,
    total_amount: String,
    is_return_flag: String,
    is_free_flag: String,
}

impl LedgerRow {
    fn to_row(&self) -> Vec<String> {
        vec![
            self.document_id.clone(),
            self.ship_date.clone(),
            self.billing_group_id.clone(),
            self.billing_group_name.clone(),
            self.store_id.clone(),
            self.store_name.clone(),
            self.region.clone(),
            self.customer_rep_id.clone(),
            self.customer_rep_name.clone(),
            self.company_rep_id.clone(),
            self.company_rep_name.clone(),
            self.company_rep_territory.clone(),
            self.product_group.clone(),
            self.product_subcategory.clone(),
            self.product_name.clone(),
            self.unit_price.clone(),
            self.quantity.clone(),
            self.total_amount.clone(),
            self.is_return_flag.clone(),
            self.is_free_flag.clone(),
        ]
    }
}

// 生成通常有偿记录 (按序号确定, 可重复生成)
fn generate_paid_row(index: usize) -> LedgerRow {
    let base = NaiveDate::from_ymd_opt(2022, 1, 1).unwrap_or_default();
    let ship_date = base + Duration::days((index * 7 % 730) as i64);
    let store = index % 12;
    let group = store / 3;
    let (product_group, subcategory, product, price) = PRODUCTS[index % PRODUCTS.len()];
    let quantity = 1 + (index * 13 % 150) as i64;

    LedgerRow {
        document_id: format!("D{:07}", index + 1),
        ship_date: ship_date.format("%Y/%m/%d").to_string(),
        billing_group_id: format!("G{:03}", group + 1),
        billing_group_name: format!("株式会社グループ{}", group + 1),
        store_id: format!("S{:04}", store + 1),
        store_name: format!("店舗{}", store + 1),
        region: REGIONS[group % REGIONS.len()].to_string(),
        customer_rep_id: format!("C{:03}", store % 5 + 1),
        customer_rep_name: format!("顧客担当{}", store % 5 + 1),
        company_rep_id: format!("E{:03}", group + 1),
        company_rep_name: format!("営業{}", group + 1),
        company_rep_territory: format!("T{:02}", group % 2 + 1),
        product_group: product_group.to_string(),
        product_subcategory: subcategory.to_string(),
        product_name: product.to_string(),
        unit_price: price.to_string(),
        quantity: quantity.to_string(),
        total_amount: (price as i64 * quantity).to_string(),
        is_return_flag: "0".to_string(),
        is_free_flag: "0".to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    println!("开始生成样例台账...");
    fs::create_dir_all(OUTPUT_DIR)?;

    // 1. 正常数据 (500条)
    generate_clean_ledger()?;

    // 2. 混合品质问题数据
    generate_mixed_issues()?;

    println!("✓ 所有样例台账生成完成！");
    Ok(())
}

fn open_writer(name: &str) -> Result<Writer<File>, Box<dyn Error>> {
    let mut file = File::create(format!("{}/{}", OUTPUT_DIR, name))?;
    file.write_all(UTF8_BOM)?;
    let mut wtr = Writer::from_writer(file);
    let header: Vec<&str> = SalesColumn::ALL.iter().map(|c| c.header()).collect();
    wtr.write_record(&header)?;
    Ok(wtr)
}

fn generate_clean_ledger() -> Result<(), Box<dyn Error>> {
    let mut wtr = open_writer("01_clean_ledger.csv")?;
    for i in 0..500 {
        wtr.write_record(&generate_paid_row(i).to_row())?;
    }
    wtr.flush()?;
    println!("✓ 生成 01_clean_ledger.csv (500条)");
    Ok(())
}

fn generate_mixed_issues() -> Result<(), Box<dyn Error>> {
    let mut wtr = open_writer("02_mixed_issues.csv")?;

    for i in 0..100 {
        let mut row = generate_paid_row(i + 1000);
        match i % 10 {
            // 退货 (正确的负号)
            1 => {
                row.is_return_flag = "1".to_string();
                row.quantity = format!("-{}", row.quantity);
                row.total_amount = format!("-{}", row.total_amount);
            }
            // 退货但符号为正
            2 => row.is_return_flag = "1".to_string(),
            // 无偿且金额为零
            3 => {
                row.is_free_flag = "1".to_string();
                row.total_amount = "0".to_string();
            }
            // 无偿但金额非零
            4 => row.is_free_flag = "はい".to_string(),
            // 单价×个数 与金额不一致
            5 => row.total_amount = "1".to_string(),
            // 无法解析的日期与标志
            6 => {
                row.ship_date = "不明".to_string();
                row.is_free_flag = "?".to_string();
            }
            // 缺失金额
            7 => row.total_amount = String::new(),
            _ => {}
        }
        wtr.write_record(&row.to_row())?;
    }

    wtr.flush()?;
    println!("✓ 生成 02_mixed_issues.csv (100条，含品质问题)");
    Ok(())
}
