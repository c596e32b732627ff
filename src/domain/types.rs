// ==========================================
// 出荷明细台账 - 领域类型定义
// ==========================================
// 职责: 品质规则标签、比率口径
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 品质规则 (Quality Rule)
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与输出文件一致)
// 顺序: 即品质问题清单的输出顺序
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QualityRule {
    FreeNonzeroAmount,  // 无偿但金额非零
    ReturnSignMismatch, // 退货但数量/金额符号不为负
    PriceQtyMismatch,   // 通常有偿但 单价×个数 ≠ 金额
    UnparseableField,   // 加载时存在无法转换的字段
}

impl QualityRule {
    pub const ALL: [QualityRule; 4] = [
        QualityRule::FreeNonzeroAmount,
        QualityRule::ReturnSignMismatch,
        QualityRule::PriceQtyMismatch,
        QualityRule::UnparseableField,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            QualityRule::FreeNonzeroAmount => "FREE_NONZERO_AMOUNT",
            QualityRule::ReturnSignMismatch => "RETURN_SIGN_MISMATCH",
            QualityRule::PriceQtyMismatch => "PRICE_QTY_MISMATCH",
            QualityRule::UnparseableField => "UNPARSEABLE_FIELD",
        }
    }
}

impl fmt::Display for QualityRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

// ==========================================
// 比率口径 (Ratio)
// ==========================================
// 红线: 分母为零时一律为 None ("不可用"),不得以 0 或 NaN 代替
pub type Ratio = Option<f64>;

/// 统一的除法口径: 分母为零(或结果非有限数)时返回 None
pub fn safe_ratio(numerator: f64, denominator: f64) -> Ratio {
    if denominator == 0.0 {
        return None;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        Some(value)
    } else {
        None
    }
}

/// 相对变化率 (curr - prev) / prev, prev 缺失或为零时返回 None
pub fn relative_change(current: f64, previous: Option<f64>) -> Ratio {
    previous.and_then(|prev| safe_ratio(current - prev, prev))
}

/// 用于回显的比率格式化: None 显示为 "n/a"
pub fn format_ratio(value: Ratio) -> String {
    match value {
        Some(v) => format!("{:.4}", v),
        None => "n/a".to_string(),
    }
}
