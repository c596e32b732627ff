// ==========================================
// 出荷明细台账 - 交易记录模型
// ==========================================
// 职责: 定义一条出荷明细(shipment line)的强类型表示及列契约
// 红线: 记录加载后不可变,引擎只做只读计算
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SalesColumn - 列契约
// ==========================================
// 每列同时接受日文表头与英文字段名
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SalesColumn {
    DocumentId,
    ShipDate,
    BillingGroupId,
    BillingGroupName,
    StoreId,
    StoreName,
    Region,
    CustomerRepId,
    CustomerRepName,
    CompanyRepId,
    CompanyRepName,
    CompanyRepTerritory,
    ProductGroup,
    ProductSubcategory,
    ProductName,
    UnitPrice,
    Quantity,
    TotalAmount,
    IsReturnFlag,
    IsFreeFlag,
}

impl SalesColumn {
    /// 必需列全集(顺序即输出顺序)
    pub const ALL: [SalesColumn; 20] = [
        SalesColumn::DocumentId,
        SalesColumn::ShipDate,
        SalesColumn::BillingGroupId,
        SalesColumn::BillingGroupName,
        SalesColumn::StoreId,
        SalesColumn::StoreName,
        SalesColumn::Region,
        SalesColumn::CustomerRepId,
        SalesColumn::CustomerRepName,
        SalesColumn::CompanyRepId,
        SalesColumn::CompanyRepName,
        SalesColumn::CompanyRepTerritory,
        SalesColumn::ProductGroup,
        SalesColumn::ProductSubcategory,
        SalesColumn::ProductName,
        SalesColumn::UnitPrice,
        SalesColumn::Quantity,
        SalesColumn::TotalAmount,
        SalesColumn::IsReturnFlag,
        SalesColumn::IsFreeFlag,
    ];

    /// 源文件中的日文表头
    pub fn header(&self) -> &'static str {
        match self {
            SalesColumn::DocumentId => "伝票番号",
            SalesColumn::ShipDate => "出荷日",
            SalesColumn::BillingGroupId => "請求先顧客法人グループID",
            SalesColumn::BillingGroupName => "請求先顧客法人グループ法人名",
            SalesColumn::StoreId => "出荷先顧客店舗ID",
            SalesColumn::StoreName => "出荷先顧客店舗名",
            SalesColumn::Region => "所在都道府県",
            SalesColumn::CustomerRepId => "顧客担当者ID",
            SalesColumn::CustomerRepName => "顧客担当者名",
            SalesColumn::CompanyRepId => "自社担当者ID",
            SalesColumn::CompanyRepName => "出荷時自社担当者名",
            SalesColumn::CompanyRepTerritory => "出荷時自社担当者テリトリコード",
            SalesColumn::ProductGroup => "製品グループ名",
            SalesColumn::ProductSubcategory => "製品サブカテゴリ名",
            SalesColumn::ProductName => "製品名称",
            SalesColumn::UnitPrice => "単価",
            SalesColumn::Quantity => "個数",
            SalesColumn::TotalAmount => "合計出荷金額",
            SalesColumn::IsReturnFlag => "返品フラグ",
            SalesColumn::IsFreeFlag => "無償出荷フラグ",
        }
    }

    /// 英文字段名(同时作为别名表头)
    pub fn field_name(&self) -> &'static str {
        match self {
            SalesColumn::DocumentId => "document_id",
            SalesColumn::ShipDate => "ship_date",
            SalesColumn::BillingGroupId => "billing_group_id",
            SalesColumn::BillingGroupName => "billing_group_name",
            SalesColumn::StoreId => "store_id",
            SalesColumn::StoreName => "store_name",
            SalesColumn::Region => "region",
            SalesColumn::CustomerRepId => "customer_rep_id",
            SalesColumn::CustomerRepName => "customer_rep_name",
            SalesColumn::CompanyRepId => "company_rep_id",
            SalesColumn::CompanyRepName => "company_rep_name",
            SalesColumn::CompanyRepTerritory => "company_rep_territory",
            SalesColumn::ProductGroup => "product_group",
            SalesColumn::ProductSubcategory => "product_subcategory",
            SalesColumn::ProductName => "product_name",
            SalesColumn::UnitPrice => "unit_price",
            SalesColumn::Quantity => "quantity",
            SalesColumn::TotalAmount => "total_amount",
            SalesColumn::IsReturnFlag => "is_return_flag",
            SalesColumn::IsFreeFlag => "is_free_flag",
        }
    }

    /// 判断表头是否对应本列(日文表头或英文字段名)
    pub fn matches(&self, header: &str) -> bool {
        let h = header.trim();
        h == self.header() || h.eq_ignore_ascii_case(self.field_name())
    }
}

// ==========================================
// SalesRecord - 出荷明细
// ==========================================
// 数值/日期字段可为空: 加载器无法转换时置空,并记录到 unparsed_fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub row_number: usize, // 源文件数据行号(从 1 开始)

    pub document_id: String,
    pub ship_date: Option<NaiveDate>,

    // 客户层级
    pub billing_group_id: String,
    pub billing_group_name: String,
    pub store_id: String,
    pub store_name: String,
    pub region: String,

    // 担当者
    pub customer_rep_id: String,
    pub customer_rep_name: String,
    pub company_rep_id: String,
    pub company_rep_name: String,
    pub company_rep_territory: String,

    // 产品层级
    pub product_group: String,
    pub product_subcategory: String,
    pub product_name: String,

    // 金额与数量
    pub unit_price: Option<f64>,
    pub quantity: Option<i64>,
    pub total_amount: Option<f64>,

    // 标志(加载器边界已规范为原生 bool)
    pub is_return_flag: bool,
    pub is_free_flag: bool,

    /// 加载器无法转换的列(英文字段名)
    #[serde(default)]
    pub unparsed_fields: Vec<String>,
}

impl SalesRecord {
    /// 有偿出荷: total_amount > 0
    pub fn is_paid(&self) -> bool {
        self.total_amount.map_or(false, |a| a > 0.0)
    }

    /// 通常有偿: 非无偿、非退货且 total_amount > 0
    pub fn is_normal_paid(&self) -> bool {
        !self.is_free_flag && !self.is_return_flag && self.is_paid()
    }

    /// 金额求和口径: 空值不参与求和
    pub fn amount_or_zero(&self) -> f64 {
        self.total_amount.unwrap_or(0.0)
    }

    /// 数量求和口径: 空值不参与求和
    pub fn quantity_or_zero(&self) -> f64 {
        self.quantity.unwrap_or(0) as f64
    }

    /// 年月键 (YYYY-MM),日期为空时返回 None
    pub fn year_month(&self) -> Option<String> {
        self.ship_date.map(|d| d.format("%Y-%m").to_string())
    }

    /// 是否存在加载阶段的转换失败
    pub fn has_unparsed_fields(&self) -> bool {
        !self.unparsed_fields.is_empty()
    }
}
