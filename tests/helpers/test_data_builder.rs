// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use sales_insight::domain::record::SalesRecord;

// ==========================================
// SalesRecord 构建器
// ==========================================
// 默认: 通常有偿, 单价 100 × 1 个 = 100
pub struct SalesRecordBuilder {
    record: SalesRecord,
}

impl SalesRecordBuilder {
    pub fn new(document_id: &str) -> Self {
        Self {
            record: SalesRecord {
                row_number: 1,
                document_id: document_id.to_string(),
                ship_date: NaiveDate::from_ymd_opt(2023, 1, 15),
                billing_group_id: "G001".to_string(),
                billing_group_name: "グループ1".to_string(),
                store_id: "S001".to_string(),
                store_name: "店舗1".to_string(),
                region: "東京都".to_string(),
                customer_rep_id: "C001".to_string(),
                customer_rep_name: "佐藤".to_string(),
                company_rep_id: "E001".to_string(),
                company_rep_name: "鈴木".to_string(),
                company_rep_territory: "T01".to_string(),
                product_group: "食品".to_string(),
                product_subcategory: "菓子".to_string(),
                product_name: "チョコ".to_string(),
                unit_price: Some(100.0),
                quantity: Some(1),
                total_amount: Some(100.0),
                is_return_flag: false,
                is_free_flag: false,
                unparsed_fields: Vec::new(),
            },
        }
    }

    pub fn row(mut self, row_number: usize) -> Self {
        self.record.row_number = row_number;
        self
    }

    pub fn date(mut self, year: i32, month: u32, day: u32) -> Self {
        self.record.ship_date = NaiveDate::from_ymd_opt(year, month, day);
        self
    }

    pub fn undated(mut self) -> Self {
        self.record.ship_date = None;
        self
    }

    pub fn billing_group(mut self, id: &str, name: &str) -> Self {
        self.record.billing_group_id = id.to_string();
        self.record.billing_group_name = name.to_string();
        self
    }

    pub fn store(mut self, id: &str, name: &str) -> Self {
        self.record.store_id = id.to_string();
        self.record.store_name = name.to_string();
        self
    }

    pub fn region(mut self, region: &str) -> Self {
        self.record.region = region.to_string();
        self
    }

    pub fn customer_rep(mut self, id: &str, name: &str) -> Self {
        self.record.customer_rep_id = id.to_string();
        self.record.customer_rep_name = name.to_string();
        self
    }

    pub fn company_rep(mut self, id: &str, name: &str, territory: &str) -> Self {
        self.record.company_rep_id = id.to_string();
        self.record.company_rep_name = name.to_string();
        self.record.company_rep_territory = territory.to_string();
        self
    }

    pub fn product(mut self, group: &str, subcategory: &str, name: &str) -> Self {
        self.record.product_group = group.to_string();
        self.record.product_subcategory = subcategory.to_string();
        self.record.product_name = name.to_string();
        self
    }

    /// 单价 × 个数, 金额按乘积设置
    pub fn line(mut self, unit_price: f64, quantity: i64) -> Self {
        self.record.unit_price = Some(unit_price);
        self.record.quantity = Some(quantity);
        self.record.total_amount = Some(unit_price * quantity as f64);
        self
    }

    pub fn amount(mut self, amount: f64) -> Self {
        self.record.total_amount = Some(amount);
        self
    }

    pub fn no_amount(mut self) -> Self {
        self.record.total_amount = None;
        self.record.unparsed_fields.push("total_amount".to_string());
        self
    }

    /// 退货: 个数与金额取负
    pub fn returned(mut self, unit_price: f64, quantity: i64) -> Self {
        self.record.is_return_flag = true;
        self.record.unit_price = Some(unit_price);
        self.record.quantity = Some(-quantity.abs());
        self.record.total_amount = Some(-(unit_price * quantity.abs() as f64));
        self
    }

    pub fn return_flag(mut self, flag: bool) -> Self {
        self.record.is_return_flag = flag;
        self
    }

    /// 无偿: 金额 0
    pub fn free(mut self) -> Self {
        self.record.is_free_flag = true;
        self.record.total_amount = Some(0.0);
        self
    }

    pub fn free_flag(mut self, flag: bool) -> Self {
        self.record.is_free_flag = flag;
        self
    }

    pub fn build(self) -> SalesRecord {
        self.record
    }
}
