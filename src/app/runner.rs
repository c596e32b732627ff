// ==========================================
// 出荷明细台账 - 运行流程
// ==========================================
// 流程: 配置加载 → 导入 → 装配 → 输出
// 红线: 配置/导入错误在写出任何文件之前中止
// ==========================================

use crate::app::cli::Cli;
use crate::config::config_manager::ConfigManager;
use crate::domain::types::format_ratio;
use crate::engine::assembler::{SalesReport, SummaryAssembler};
use crate::export::report_writer::{Manifest, ReportWriter};
use crate::importer::{SalesImporter, SalesImporterImpl};
use anyhow::Context;
use std::fmt::Write as _;
use tracing::info;

/// 一次完整运行的结果
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub report: SalesReport,
    pub manifest: Manifest,
}

/// 执行一次完整分析
pub async fn run(cli: &Cli) -> anyhow::Result<RunSummary> {
    let manager = match &cli.config {
        Some(path) => ConfigManager::with_path(path),
        None => ConfigManager::from_default_location(),
    };
    let config = manager
        .load(&cli.overrides())
        .context("配置无效")?;

    let importer = SalesImporterImpl::default();
    let outcome = importer
        .import_file(&cli.input)
        .await
        .with_context(|| format!("无法读取输入文件 {}", cli.input.display()))?;

    let report = SummaryAssembler::new(config)
        .assemble(&outcome.records)
        .context("汇总失败")?;

    let manifest = ReportWriter::new(&cli.outdir)
        .with_source(outcome.source.clone())
        .write(&report)
        .with_context(|| format!("无法写出报表到 {}", cli.outdir.display()))?;

    info!(run_id = %manifest.run_id, batch_id = %outcome.batch_id, "运行完成");
    Ok(RunSummary { report, manifest })
}

/// KPI 回显与输出清单 (比率不可用时显示 n/a)
pub fn render_recap(summary: &RunSummary) -> String {
    let kpis = &summary.report.kpis;
    let quality = &summary.report.quality;
    let mut out = String::new();

    let _ = writeln!(out, "=== KPI ===");
    let _ = writeln!(
        out,
        "records        : {} / {}",
        summary.report.filtered_records, summary.report.total_records
    );
    let _ = writeln!(out, "net_sales      : {:.2}", kpis.net_sales);
    let _ = writeln!(out, "paid_sales     : {:.2}", kpis.paid_sales);
    let _ = writeln!(out, "returns        : {:.2}", kpis.returns);
    let _ = writeln!(out, "return_rate    : {}", format_ratio(kpis.return_rate));
    let _ = writeln!(out, "free_count     : {}", kpis.free_count);
    let _ = writeln!(out, "free_rate      : {}", format_ratio(kpis.free_rate));
    let _ = writeln!(out, "avg_price_paid : {}", format_ratio(kpis.avg_price_paid));

    let _ = writeln!(out, "=== Quality ===");
    for (rule, count) in &quality.counts_by_rule {
        let _ = writeln!(out, "{:<22}: {}", rule, count);
    }
    if summary.report.unbinned_paid_records() > 0 {
        let _ = writeln!(
            out,
            "unbinned paid records : {}",
            summary.report.unbinned_paid_records()
        );
    }

    let _ = writeln!(out, "=== Artifacts ({}) ===", summary.manifest.output_dir);
    for artifact in &summary.manifest.artifacts {
        let _ = writeln!(out, "{} ({} rows)", artifact.file, artifact.rows);
    }
    out
}
