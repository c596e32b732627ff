use crate::config::quantity_bins::{locate_bin, QuantityBin};
use crate::domain::record::SalesRecord;
use crate::domain::report::PriceBinRow;
use crate::domain::types::safe_ratio;

/// 价格×数量分桶结果
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBinTable {
    pub rows: Vec<PriceBinRow>,
    /// 有偿但数量不落入任何分桶的记录数 (数量 ≤ 0 或为空)
    pub unbinned_paid_records: usize,
}

#[derive(Debug, Clone, Default)]
struct BinTotals {
    paid_sales: f64,
    paid_quantity: f64,
    transactions: usize,
}

/// 仅统计有偿记录; 全部配置分桶都会输出 (空桶为 0, 平均单价不可用)
pub fn price_bin_rows(records: &[SalesRecord], bins: &[QuantityBin]) -> PriceBinTable {
    let mut totals = vec![BinTotals::default(); bins.len()];
    let mut unbinned_paid_records = 0;

    for record in records.iter().filter(|r| r.is_paid()) {
        let slot = record.quantity.and_then(|q| locate_bin(bins, q));
        match slot {
            Some(idx) => {
                let t = &mut totals[idx];
                t.paid_sales += record.amount_or_zero();
                t.paid_quantity += record.quantity_or_zero();
                t.transactions += 1;
            }
            None => unbinned_paid_records += 1,
        }
    }

    let rows = bins
        .iter()
        .zip(totals)
        .map(|(bin, t)| PriceBinRow {
            qty_bin: bin.label.clone(),
            lower_exclusive: bin.lower_exclusive,
            upper_inclusive: bin.upper_inclusive,
            paid_sales: t.paid_sales,
            paid_quantity: t.paid_quantity,
            transactions: t.transactions,
            avg_price: safe_ratio(t.paid_sales, t.paid_quantity),
        })
        .collect();

    PriceBinTable {
        rows,
        unbinned_paid_records,
    }
}
