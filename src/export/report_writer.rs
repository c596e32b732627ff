// ==========================================
// 出荷明细台账 - 报表输出
// ==========================================
// 职责: SalesReport → <outdir>/<name>.csv + kpi_summary.json + manifest.json
// 格式: CSV 为 UTF-8 (带 BOM), 逗号分隔, 含表头; "不可用" 输出为空单元格
// ==========================================

use crate::config::analysis_config::AnalysisConfig;
use crate::domain::report::KpiSummary;
use crate::domain::types::QualityRule;
use crate::engine::assembler::{ReportTable, SalesReport};
use crate::export::columns::TableRow;
use crate::export::error::{ExportError, ExportResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use uuid::Uuid;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

pub const KPI_SUMMARY_FILE: &str = "kpi_summary.json";
pub const MANIFEST_FILE: &str = "manifest.json";

// ==========================================
// 输出清单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub name: String,
    pub file: String,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Manifest {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,
    pub output_dir: String,
    pub source: Option<String>,
    pub total_records: usize,
    pub filtered_records: usize,
    pub artifacts: Vec<Artifact>,
}

/// kpi_summary.json 内容
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KpiDocument {
    pub kpis: KpiSummary,
    pub quality_counts: BTreeMap<QualityRule, usize>,
    pub total_records: usize,
    pub filtered_records: usize,
    pub unbinned_paid_records: usize,
    pub config: AnalysisConfig,
}

impl KpiDocument {
    pub fn from_report(report: &SalesReport) -> Self {
        Self {
            kpis: report.kpis.clone(),
            quality_counts: report.quality.counts_by_rule.clone(),
            total_records: report.total_records,
            filtered_records: report.filtered_records,
            unbinned_paid_records: report.unbinned_paid_records(),
            config: report.config.clone(),
        }
    }
}

// ==========================================
// ReportWriter - 报表输出器
// ==========================================
pub struct ReportWriter {
    output_dir: PathBuf,
    source: Option<String>,
}

impl ReportWriter {
    pub fn new<P: AsRef<Path>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.as_ref().to_path_buf(),
            source: None,
        }
    }

    /// 在清单中记录输入来源
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 写出全部表与 JSON, 返回清单
    pub fn write(&self, report: &SalesReport) -> ExportResult<Manifest> {
        fs::create_dir_all(&self.output_dir).map_err(|e| ExportError::OutputDir {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let mut artifacts = Vec::new();
        for table in report.tables() {
            artifacts.push(self.write_table(&table)?);
        }

        self.write_json(KPI_SUMMARY_FILE, &KpiDocument::from_report(report))?;
        artifacts.push(Artifact {
            name: "kpi_summary".to_string(),
            file: KPI_SUMMARY_FILE.to_string(),
            rows: 1,
        });

        let manifest = Manifest {
            run_id: Uuid::new_v4().to_string(),
            generated_at: Utc::now(),
            output_dir: self.output_dir.display().to_string(),
            source: self.source.clone(),
            total_records: report.total_records,
            filtered_records: report.filtered_records,
            artifacts,
        };
        self.write_json(MANIFEST_FILE, &manifest)?;

        info!(
            run_id = %manifest.run_id,
            output_dir = %manifest.output_dir,
            artifacts = manifest.artifacts.len(),
            "报表输出完成"
        );
        Ok(manifest)
    }

    fn write_table(&self, table: &ReportTable<'_>) -> ExportResult<Artifact> {
        let name = table.name();
        let rows = match *table {
            ReportTable::Monthly(rows) => self.write_csv(name, rows)?,
            ReportTable::CustomerGroups(rows) => self.write_csv(name, rows)?,
            ReportTable::Stores(rows) => self.write_csv(name, rows)?,
            ReportTable::Products(rows) => self.write_csv(name, rows)?,
            ReportTable::ProductGroups(rows) => self.write_csv(name, rows)?,
            ReportTable::ProductSubcategories(rows) => self.write_csv(name, rows)?,
            ReportTable::Regions(rows) => self.write_csv(name, rows)?,
            ReportTable::CustomerReps(rows) => self.write_csv(name, rows)?,
            ReportTable::CompanyReps(rows) => self.write_csv(name, rows)?,
            ReportTable::PriceBins(rows) => self.write_csv(name, rows)?,
            ReportTable::WeekdayMonthly(rows) => self.write_csv(name, rows)?,
            ReportTable::QualityIssues(rows) => self.write_csv(name, rows)?,
        };

        Ok(Artifact {
            name: name.to_string(),
            file: format!("{}.csv", name),
            rows,
        })
    }

    fn write_csv<T: TableRow>(&self, name: &str, rows: &[T]) -> ExportResult<usize> {
        let path = self.output_dir.join(format!("{}.csv", name));
        let file_err = |e: std::io::Error| ExportError::FileWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        };
        let csv_err = |e: csv::Error| ExportError::CsvSerialize {
            table: name.to_string(),
            message: e.to_string(),
        };

        let mut out = BufWriter::new(File::create(&path).map_err(file_err)?);
        out.write_all(UTF8_BOM).map_err(file_err)?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(!rows.is_empty())
            .from_writer(out);
        if rows.is_empty() {
            writer.write_record(T::COLUMNS).map_err(csv_err)?;
        }
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
        }
        writer.flush().map_err(file_err)?;

        debug!(table = name, rows = rows.len(), "CSV 写出");
        Ok(rows.len())
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> ExportResult<()> {
        let path = self.output_dir.join(file);
        let json = serde_json::to_string_pretty(value).map_err(|e| ExportError::JsonSerialize {
            file: file.to_string(),
            message: e.to_string(),
        })?;
        fs::write(&path, json).map_err(|e| ExportError::FileWrite {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::report::{PriceBinRow, StoreRow};
    use tempfile::TempDir;

    fn read_csv(path: &Path) -> (Vec<String>, Vec<Vec<String>>) {
        let bytes = fs::read(path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));
        let mut reader = csv::Reader::from_reader(&bytes[UTF8_BOM.len()..]);
        let headers = reader.headers().unwrap().iter().map(String::from).collect();
        let rows = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        (headers, rows)
    }

    #[test]
    fn test_empty_table_still_has_header() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path());
        let rows: Vec<StoreRow> = Vec::new();
        writer.write_csv("store_summary", &rows).unwrap();

        let (headers, data) = read_csv(&dir.path().join("store_summary.csv"));
        assert_eq!(headers, StoreRow::COLUMNS);
        assert!(data.is_empty());
    }

    #[test]
    fn test_unavailable_ratio_is_empty_cell() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path());
        let rows = vec![PriceBinRow {
            qty_bin: "100+".to_string(),
            lower_exclusive: 100,
            upper_inclusive: None,
            paid_sales: 0.0,
            paid_quantity: 0.0,
            transactions: 0,
            avg_price: None,
        }];
        writer.write_csv("price_quantity_bins", &rows).unwrap();

        let (headers, data) = read_csv(&dir.path().join("price_quantity_bins.csv"));
        assert_eq!(headers, PriceBinRow::COLUMNS);
        assert_eq!(data[0][2], "");
        assert_eq!(data[0][6], "");
    }
}
