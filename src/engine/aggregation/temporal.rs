use super::core::{aggregate, GroupSpec};
use crate::domain::record::SalesRecord;
use crate::domain::report::{MonthlyRow, WeekdayMonthlyRow};
use crate::domain::types::relative_change;
use chrono::Datelike;

/// 同比滞后期数
pub const YOY_LAG: usize = 12;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

fn year_month_key(record: &SalesRecord) -> Option<String> {
    record.year_month()
}

fn year_month_weekday_key(record: &SalesRecord) -> Option<(String, u32)> {
    let date = record.ship_date?;
    Some((
        date.format("%Y-%m").to_string(),
        date.weekday().num_days_from_monday(),
    ))
}

/// 月次汇总
///
/// 日期为空的记录仅从本维度排除。结果按年月升序,
/// 环比 (滞后 1 期) 与同比 (滞后 12 期) 均按序列位置计算。
pub fn monthly_rows(records: &[SalesRecord]) -> Vec<MonthlyRow> {
    let spec = GroupSpec {
        axis: "monthly",
        key: year_month_key,
        distinct_of: None,
    };

    let groups = aggregate(records, &spec);
    let series: Vec<f64> = groups.iter().map(|g| g.metrics.net_sales).collect();

    groups
        .into_iter()
        .enumerate()
        .map(|(idx, g)| {
            let m = g.metrics;
            let current = series[idx];
            let prev = idx.checked_sub(1).map(|i| series[i]);
            let prev_year = idx.checked_sub(YOY_LAG).map(|i| series[i]);

            MonthlyRow {
                year_month: g.key,
                net_sales: m.net_sales,
                quantity: m.quantity,
                transactions: m.transactions,
                free_count: m.free_count,
                paid_sales: m.paid_sales,
                paid_quantity: m.paid_quantity,
                returns: m.returns,
                return_rate: m.return_rate,
                free_rate: m.free_rate,
                avg_price_paid: m.avg_price_paid,
                mom_net_sales: relative_change(current, prev),
                yoy_net_sales: relative_change(current, prev_year),
            }
        })
        .collect()
}

/// 年月×曜日 的 NetSales (周一在前)
pub fn weekday_monthly_rows(records: &[SalesRecord]) -> Vec<WeekdayMonthlyRow> {
    let spec = GroupSpec {
        axis: "weekday_monthly",
        key: year_month_weekday_key,
        distinct_of: None,
    };

    aggregate(records, &spec)
        .into_iter()
        .map(|g| {
            let (year_month, weekday_index) = g.key;
            WeekdayMonthlyRow {
                year_month,
                weekday: WEEKDAY_LABELS[weekday_index as usize].to_string(),
                weekday_index,
                net_sales: g.metrics.net_sales,
                transactions: g.metrics.transactions,
            }
        })
        .collect()
}
