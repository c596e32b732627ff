// ==========================================
// 出荷明细台账 - 数量分桶配置
// ==========================================
// 口径: 区间左开右闭 (lower, upper], upper 为 None 表示无上限
// 分桶边界与标签为配置输入,不在业务逻辑中硬编码
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityBin {
    pub label: String,
    pub lower_exclusive: i64,
    pub upper_inclusive: Option<i64>,
}

impl QuantityBin {
    pub fn new(label: &str, lower_exclusive: i64, upper_inclusive: Option<i64>) -> Self {
        Self {
            label: label.to_string(),
            lower_exclusive,
            upper_inclusive,
        }
    }

    pub fn contains(&self, quantity: i64) -> bool {
        quantity > self.lower_exclusive && self.upper_inclusive.map_or(true, |u| quantity <= u)
    }
}

/// 默认分桶: 1 / 2-3 / 4-5 / 6-10 / 11-20 / 21-50 / 51-100 / 100+
pub fn default_quantity_bins() -> Vec<QuantityBin> {
    vec![
        QuantityBin::new("1", 0, Some(1)),
        QuantityBin::new("2-3", 1, Some(3)),
        QuantityBin::new("4-5", 3, Some(5)),
        QuantityBin::new("6-10", 5, Some(10)),
        QuantityBin::new("11-20", 10, Some(20)),
        QuantityBin::new("21-50", 20, Some(50)),
        QuantityBin::new("51-100", 50, Some(100)),
        QuantityBin::new("100+", 100, None),
    ]
}

/// 校验分桶: 非空、标签非空、区间有效、相邻区间首尾相接、无上限桶只能在最后
pub fn validate_bins(bins: &[QuantityBin]) -> ConfigResult<()> {
    if bins.is_empty() {
        return Err(ConfigError::InvalidBins("分桶列表为空".to_string()));
    }

    for (idx, bin) in bins.iter().enumerate() {
        if bin.label.trim().is_empty() {
            return Err(ConfigError::InvalidBins(format!("第 {} 个分桶标签为空", idx + 1)));
        }

        match bin.upper_inclusive {
            Some(upper) if upper <= bin.lower_exclusive => {
                return Err(ConfigError::InvalidBins(format!(
                    "分桶 {} 上限 {} 不大于下限 {}",
                    bin.label, upper, bin.lower_exclusive
                )));
            }
            None if idx + 1 != bins.len() => {
                return Err(ConfigError::InvalidBins(format!(
                    "无上限分桶 {} 必须位于最后",
                    bin.label
                )));
            }
            _ => {}
        }

        if let Some(prev) = idx.checked_sub(1).and_then(|i| bins.get(i)) {
            if prev.upper_inclusive != Some(bin.lower_exclusive) {
                return Err(ConfigError::InvalidBins(format!(
                    "分桶 {} 的下限 {} 与前一分桶 {} 的上限不连续",
                    bin.label, bin.lower_exclusive, prev.label
                )));
            }
        }
    }

    Ok(())
}

/// 查找数量所在分桶下标
pub fn locate_bin(bins: &[QuantityBin], quantity: i64) -> Option<usize> {
    bins.iter().position(|b| b.contains(quantity))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bins_are_valid() {
        assert!(validate_bins(&default_quantity_bins()).is_ok());
    }

    #[test]
    fn test_locate_bin_right_inclusive() {
        let bins = default_quantity_bins();
        assert_eq!(locate_bin(&bins, 1), Some(0));
        assert_eq!(locate_bin(&bins, 3), Some(1));
        assert_eq!(locate_bin(&bins, 4), Some(2));
        assert_eq!(locate_bin(&bins, 100), Some(6));
        assert_eq!(locate_bin(&bins, 101), Some(7));
        assert_eq!(locate_bin(&bins, 0), None);
        assert_eq!(locate_bin(&bins, -5), None);
    }

    #[test]
    fn test_validate_rejects_gap() {
        let bins = vec![QuantityBin::new("a", 0, Some(5)), QuantityBin::new("b", 6, None)];
        assert!(matches!(validate_bins(&bins), Err(ConfigError::InvalidBins(_))));
    }

    #[test]
    fn test_validate_rejects_open_bin_not_last() {
        let bins = vec![QuantityBin::new("a", 0, None), QuantityBin::new("b", 5, Some(9))];
        assert!(validate_bins(&bins).is_err());
    }

    #[test]
    fn test_validate_rejects_empty() {
        assert!(validate_bins(&[]).is_err());
    }
}
