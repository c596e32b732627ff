// ==========================================
// 汇总性质测试 (proptest)
// ==========================================
// 性质: 各维度分组合计 = 全体 NetSales; 装配幂等; 品质问题数 ≤ 记录数 × 规则数
// ==========================================

mod helpers;

use helpers::SalesRecordBuilder;
use proptest::prelude::*;
use sales_insight::config::AnalysisConfig;
use sales_insight::domain::record::SalesRecord;
use sales_insight::engine::assembler::SummaryAssembler;

fn arb_record() -> impl Strategy<Value = SalesRecord> {
    (
        0usize..4,
        0usize..3,
        1u32..=12,
        1u32..=28,
        1i64..50,
        0u32..500,
        0u8..4,
    )
        .prop_map(|(store, product, month, day, qty, price, kind)| {
            let builder = SalesRecordBuilder::new("D")
                .date(2023, month, day)
                .store(&format!("S{}", store), &format!("店舗{}", store))
                .product("食品", "菓子", &format!("P{}", product));
            let price = price as f64;
            let builder = match kind {
                0 => builder.returned(price, qty),
                1 => builder.free(),
                2 => builder.line(price, qty).amount(price * qty as f64 + 1.0),
                _ => builder.line(price, qty),
            };
            builder.build()
        })
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6 * (1.0 + a.abs().max(b.abs()))
}

proptest! {
    #[test]
    fn prop_group_sums_equal_net_sales(records in prop::collection::vec(arb_record(), 0..60)) {
        let report = SummaryAssembler::new(AnalysisConfig::default())
            .assemble(&records)
            .unwrap();
        let net = report.kpis.net_sales;
        let tables = &report.tables;

        prop_assert!(close(tables.stores.iter().map(|r| r.net_sales).sum(), net));
        prop_assert!(close(tables.products.iter().map(|r| r.net_sales).sum(), net));
        prop_assert!(close(tables.regions.iter().map(|r| r.net_sales).sum(), net));
        prop_assert!(close(tables.monthly.iter().map(|r| r.net_sales).sum(), net));
        prop_assert!(close(tables.company_reps.iter().map(|r| r.net_sales).sum(), net));
    }

    #[test]
    fn prop_assembly_is_idempotent(records in prop::collection::vec(arb_record(), 0..40)) {
        let assembler = SummaryAssembler::new(AnalysisConfig::default());
        let first = assembler.assemble(&records).unwrap();
        let second = assembler.assemble(&records).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_ranked_tables_descend(records in prop::collection::vec(arb_record(), 0..40)) {
        let report = SummaryAssembler::new(AnalysisConfig::default())
            .assemble(&records)
            .unwrap();
        for pair in report.tables.stores.windows(2) {
            prop_assert!(pair[0].net_sales >= pair[1].net_sales);
        }
        for pair in report.tables.monthly.windows(2) {
            prop_assert!(pair[0].year_month < pair[1].year_month);
        }
    }

    #[test]
    fn prop_quality_counts_consistent(records in prop::collection::vec(arb_record(), 0..40)) {
        let report = SummaryAssembler::new(AnalysisConfig::default())
            .assemble(&records)
            .unwrap();
        let counted: usize = report.quality.counts_by_rule.values().sum();
        prop_assert_eq!(counted, report.quality.issues.len());
        prop_assert!(report.quality.issues.len() <= records.len() * 4);
    }
}
