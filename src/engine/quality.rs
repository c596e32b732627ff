// ==========================================
// 出荷明细台账 - 品质规则引擎
// ==========================================
// 职责: 对全部记录逐条规则独立评估,输出带标签的违规清单
// 红线: 无状态、确定性; 同一记录可在多条规则下出现 (不去重)
// 红线: 空值不参与比较 (空值既不 < 0 也不 ≥ 0)
// ==========================================

use crate::domain::record::SalesRecord;
use crate::domain::report::QualityIssue;
use crate::domain::types::QualityRule;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info};

// ==========================================
// QualityReport - 品质报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub issues: Vec<QualityIssue>,
    pub counts_by_rule: BTreeMap<QualityRule, usize>,
}

impl QualityReport {
    pub fn total(&self) -> usize {
        self.issues.len()
    }

    pub fn count(&self, rule: QualityRule) -> usize {
        self.counts_by_rule.get(&rule).copied().unwrap_or(0)
    }

    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

// ==========================================
// QualityRuleEngine - 品质规则引擎
// ==========================================
pub struct QualityRuleEngine {
    tolerance: f64, // 单价×个数 与金额的允许偏差
}

impl QualityRuleEngine {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    /// 评估全部规则
    ///
    /// # 返回
    /// 按规则顺序拼接的违规清单 (规则内保持输入顺序)
    pub fn evaluate(&self, records: &[SalesRecord]) -> QualityReport {
        let mut issues = Vec::new();
        let mut counts_by_rule = BTreeMap::new();

        for rule in QualityRule::ALL {
            let found = self.evaluate_rule(rule, records);
            debug!(rule = %rule, violations = found.len(), "规则评估完成");
            counts_by_rule.insert(rule, found.len());
            issues.extend(found);
        }

        info!(
            records = records.len(),
            violations = issues.len(),
            "品质检查完成"
        );

        QualityReport {
            issues,
            counts_by_rule,
        }
    }

    /// 评估单条规则
    pub fn evaluate_rule(&self, rule: QualityRule, records: &[SalesRecord]) -> Vec<QualityIssue> {
        records
            .iter()
            .filter_map(|record| self.check(rule, record))
            .collect()
    }

    fn check(&self, rule: QualityRule, record: &SalesRecord) -> Option<QualityIssue> {
        match rule {
            QualityRule::FreeNonzeroAmount => {
                let amount = record.total_amount?;
                (record.is_free_flag && round_cents(amount) != 0.0)
                    .then(|| QualityIssue::from_record(record, rule, None, None))
            }
            QualityRule::ReturnSignMismatch => {
                let qty_not_negative = record.quantity.map_or(false, |q| q >= 0);
                let amount_not_negative = record.total_amount.map_or(false, |a| a >= 0.0);
                (record.is_return_flag && (qty_not_negative || amount_not_negative))
                    .then(|| QualityIssue::from_record(record, rule, None, None))
            }
            QualityRule::PriceQtyMismatch => {
                let diff = price_qty_diff(record)?;
                (diff.abs() > self.tolerance)
                    .then(|| QualityIssue::from_record(record, rule, Some(diff), None))
            }
            QualityRule::UnparseableField => record.has_unparsed_fields().then(|| {
                let detail = record.unparsed_fields.join(",");
                QualityIssue::from_record(record, rule, None, Some(detail))
            }),
        }
    }
}

/// 通常有偿记录的 单价×个数 − 金额; 非通常有偿或任一操作数为空时返回 None
pub fn price_qty_diff(record: &SalesRecord) -> Option<f64> {
    if !record.is_normal_paid() {
        return None;
    }
    let unit_price = record.unit_price?;
    let quantity = record.quantity? as f64;
    let amount = record.total_amount?;
    Some(unit_price * quantity - amount)
}

/// 四舍五入到 0.01
fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
