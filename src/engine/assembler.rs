// ==========================================
// 出荷明细台账 - 汇总装配器
// ==========================================
// 职责: 日期窗口过滤 → KPI + 品质规则 + 全部汇总维度 → SalesReport
// 红线: 不做 I/O; (records, config) → report 的纯变换
// 红线: 唯一错误路径为配置错误 (日期窗口颠倒等),不得静默返回空结果
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use crate::config::error::ConfigResult;
use crate::domain::record::SalesRecord;
use crate::domain::report::{
    CompanyRepRow, CustomerGroupRow, CustomerRepRow, KpiSummary, MonthlyRow, PriceBinRow,
    ProductGroupRow, ProductRow, ProductSubcategoryRow, QualityIssue, RegionRow, StoreRow,
    WeekdayMonthlyRow,
};
use crate::engine::aggregation::{AggregationEngine, AggregationTables};
use crate::engine::kpi::KpiEngine;
use crate::engine::quality::{QualityReport, QualityRuleEngine};
use crate::perf::PerfGuard;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

// ==========================================
// SalesReport - 完整分析报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesReport {
    pub kpis: KpiSummary,
    pub quality: QualityReport,
    pub tables: AggregationTables,
    pub total_records: usize,    // 过滤前
    pub filtered_records: usize, // 日期窗口过滤后
    pub config: AnalysisConfig,
}

/// 供渲染器按固定顺序遍历的具名表
#[derive(Debug, Clone, Copy)]
pub enum ReportTable<'a> {
    Monthly(&'a [MonthlyRow]),
    CustomerGroups(&'a [CustomerGroupRow]),
    Stores(&'a [StoreRow]),
    Products(&'a [ProductRow]),
    ProductGroups(&'a [ProductGroupRow]),
    ProductSubcategories(&'a [ProductSubcategoryRow]),
    Regions(&'a [RegionRow]),
    CustomerReps(&'a [CustomerRepRow]),
    CompanyReps(&'a [CompanyRepRow]),
    PriceBins(&'a [PriceBinRow]),
    WeekdayMonthly(&'a [WeekdayMonthlyRow]),
    QualityIssues(&'a [QualityIssue]),
}

impl ReportTable<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            ReportTable::Monthly(_) => "monthly_summary",
            ReportTable::CustomerGroups(_) => "customer_group_summary",
            ReportTable::Stores(_) => "store_summary",
            ReportTable::Products(_) => "product_summary",
            ReportTable::ProductGroups(_) => "product_group_summary",
            ReportTable::ProductSubcategories(_) => "product_subcategory_summary",
            ReportTable::Regions(_) => "prefecture_summary",
            ReportTable::CustomerReps(_) => "reps_customer_summary",
            ReportTable::CompanyReps(_) => "reps_company_summary",
            ReportTable::PriceBins(_) => "price_quantity_bins",
            ReportTable::WeekdayMonthly(_) => "weekday_monthly_summary",
            ReportTable::QualityIssues(_) => "quality_issues",
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ReportTable::Monthly(rows) => rows.len(),
            ReportTable::CustomerGroups(rows) => rows.len(),
            ReportTable::Stores(rows) => rows.len(),
            ReportTable::Products(rows) => rows.len(),
            ReportTable::ProductGroups(rows) => rows.len(),
            ReportTable::ProductSubcategories(rows) => rows.len(),
            ReportTable::Regions(rows) => rows.len(),
            ReportTable::CustomerReps(rows) => rows.len(),
            ReportTable::CompanyReps(rows) => rows.len(),
            ReportTable::PriceBins(rows) => rows.len(),
            ReportTable::WeekdayMonthly(rows) => rows.len(),
            ReportTable::QualityIssues(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SalesReport {
    /// 全部具名表 (固定顺序)
    pub fn tables(&self) -> Vec<ReportTable<'_>> {
        let t = &self.tables;
        vec![
            ReportTable::Monthly(&t.monthly),
            ReportTable::CustomerGroups(&t.customer_groups),
            ReportTable::Stores(&t.stores),
            ReportTable::Products(&t.products),
            ReportTable::ProductGroups(&t.product_groups),
            ReportTable::ProductSubcategories(&t.product_subcategories),
            ReportTable::Regions(&t.regions),
            ReportTable::CustomerReps(&t.customer_reps),
            ReportTable::CompanyReps(&t.company_reps),
            ReportTable::PriceBins(&t.price_bins),
            ReportTable::WeekdayMonthly(&t.weekday_monthly),
            ReportTable::QualityIssues(&self.quality.issues),
        ]
    }

    pub fn unbinned_paid_records(&self) -> usize {
        self.tables.unbinned_paid_records
    }
}

// ==========================================
// SummaryAssembler - 汇总装配器
// ==========================================
pub struct SummaryAssembler {
    config: AnalysisConfig,
    kpi_engine: KpiEngine,
    quality_engine: QualityRuleEngine,
    aggregation_engine: AggregationEngine,
}

impl SummaryAssembler {
    pub fn new(config: AnalysisConfig) -> Self {
        let quality_engine = QualityRuleEngine::new(config.tolerance);
        Self {
            config,
            kpi_engine: KpiEngine::new(),
            quality_engine,
            aggregation_engine: AggregationEngine::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// 装配完整报告
    ///
    /// # 参数
    /// - records: 全量记录 (不可变)
    ///
    /// # 返回
    /// - Ok(SalesReport)
    /// - Err(ConfigError): 配置矛盾 (在任何汇总之前拒绝)
    #[instrument(skip(self, records), fields(total = records.len()))]
    pub fn assemble(&self, records: &[SalesRecord]) -> ConfigResult<SalesReport> {
        let _perf = PerfGuard::new("assemble").with_rows(records.len());

        // 配置校验先于一切计算
        self.config.validate()?;

        let window = &self.config.date_window;
        let filtered: Vec<SalesRecord> = {
            let _perf = PerfGuard::new("date_filter").with_rows(records.len());
            records
                .iter()
                .filter(|r| window.contains(r.ship_date))
                .cloned()
                .collect()
        };

        info!(
            total = records.len(),
            filtered = filtered.len(),
            start = ?window.start,
            end = ?window.end,
            "日期窗口过滤完成"
        );

        let kpis = {
            let _perf = PerfGuard::new("kpi").with_rows(filtered.len());
            self.kpi_engine.compute(&filtered)
        };

        // 出荷日为空的记录不受窗口限制, 仍参与品质检查
        let quality_scope: Vec<SalesRecord> = records
            .iter()
            .filter(|r| r.ship_date.is_none() || window.contains(r.ship_date))
            .cloned()
            .collect();
        let quality = {
            let _perf = PerfGuard::new("quality_rules").with_rows(quality_scope.len());
            self.quality_engine.evaluate(&quality_scope)
        };

        let tables = {
            let _perf = PerfGuard::new("aggregation").with_rows(filtered.len());
            self.aggregation_engine
                .run_all(&filtered, &self.config.quantity_bins)
        };

        Ok(SalesReport {
            kpis,
            quality,
            tables,
            total_records: records.len(),
            filtered_records: filtered.len(),
            config: self.config.clone(),
        })
    }
}
