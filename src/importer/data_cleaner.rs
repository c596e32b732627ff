// ==========================================
// 出荷明细台账 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 日期·数值·标志类型转换
// 红线: 单元格转换失败不丢弃记录; 字段置空 (标志置 false) 并记入 unparsed_fields
// ==========================================

use crate::domain::record::{SalesColumn, SalesRecord};
use crate::importer::sales_importer_trait::{DataCleaner as DataCleanerTrait, RawSalesRecord};
use chrono::{DateTime, NaiveDate, NaiveDateTime};

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"];

const DATETIME_FORMATS: [&str; 6] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M:%S%.f",
];

const TRUE_TOKENS: [&str; 7] = ["1", "true", "t", "y", "yes", "はい", "有"];
const FALSE_TOKENS: [&str; 7] = ["0", "false", "f", "n", "no", "いいえ", "無"];

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    fn normalize_null(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }

    fn parse_flag(&self, value: &str) -> Option<bool> {
        let token = value.trim().to_lowercase();
        if token.is_empty() || FALSE_TOKENS.contains(&token.as_str()) {
            Some(false)
        } else if TRUE_TOKENS.contains(&token.as_str()) {
            Some(true)
        } else {
            // 兼容 "1.0" / "0.0"
            match token.parse::<f64>() {
                Ok(v) if v == 1.0 => Some(true),
                Ok(v) if v == 0.0 => Some(false),
                _ => None,
            }
        }
    }

    fn parse_date(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }

        DATE_FORMATS
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
            .or_else(|| {
                DATETIME_FORMATS
                    .iter()
                    .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                    .map(|dt| dt.date())
            })
            .or_else(|| {
                DateTime::parse_from_rfc3339(value)
                    .ok()
                    .map(|dt| dt.date_naive())
            })
    }

    fn parse_decimal(&self, value: &str) -> Option<f64> {
        let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
        if cleaned.is_empty() {
            return None;
        }
        cleaned.parse::<f64>().ok().filter(|v| v.is_finite())
    }

    fn parse_quantity(&self, value: &str) -> Option<i64> {
        let cleaned: String = value.trim().chars().filter(|c| *c != ',').collect();
        if let Ok(q) = cleaned.parse::<i64>() {
            return Some(q);
        }
        // 整值小数 (如 "5.0")
        self.parse_decimal(&cleaned)
            .filter(|v| v.fract() == 0.0 && v.abs() <= i64::MAX as f64)
            .map(|v| v as i64)
    }

    fn to_sales_record(&self, raw: &RawSalesRecord) -> SalesRecord {
        let mut unparsed = Vec::new();
        let text = |column: SalesColumn| self.clean_text(raw.get(column));

        let ship_date = self.parse_date(raw.get(SalesColumn::ShipDate));
        if ship_date.is_none() {
            unparsed.push(SalesColumn::ShipDate);
        }

        let unit_price = self.parse_decimal(raw.get(SalesColumn::UnitPrice));
        if unit_price.is_none() {
            unparsed.push(SalesColumn::UnitPrice);
        }

        let quantity = self.parse_quantity(raw.get(SalesColumn::Quantity));
        if quantity.is_none() {
            unparsed.push(SalesColumn::Quantity);
        }

        let total_amount = self.parse_decimal(raw.get(SalesColumn::TotalAmount));
        if total_amount.is_none() {
            unparsed.push(SalesColumn::TotalAmount);
        }

        let mut flag = |column: SalesColumn| {
            self.parse_flag(raw.get(column)).unwrap_or_else(|| {
                unparsed.push(column);
                false
            })
        };
        let is_return_flag = flag(SalesColumn::IsReturnFlag);
        let is_free_flag = flag(SalesColumn::IsFreeFlag);

        SalesRecord {
            row_number: raw.row_number,
            document_id: text(SalesColumn::DocumentId),
            ship_date,
            billing_group_id: text(SalesColumn::BillingGroupId),
            billing_group_name: text(SalesColumn::BillingGroupName),
            store_id: text(SalesColumn::StoreId),
            store_name: text(SalesColumn::StoreName),
            region: text(SalesColumn::Region),
            customer_rep_id: text(SalesColumn::CustomerRepId),
            customer_rep_name: text(SalesColumn::CustomerRepName),
            company_rep_id: text(SalesColumn::CompanyRepId),
            company_rep_name: text(SalesColumn::CompanyRepName),
            company_rep_territory: text(SalesColumn::CompanyRepTerritory),
            product_group: text(SalesColumn::ProductGroup),
            product_subcategory: text(SalesColumn::ProductSubcategory),
            product_name: text(SalesColumn::ProductName),
            unit_price,
            quantity,
            total_amount,
            is_return_flag,
            is_free_flag,
            unparsed_fields: unparsed
                .into_iter()
                .map(|c| c.field_name().to_string())
                .collect(),
        }
    }
}
