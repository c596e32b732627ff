// ==========================================
// 出荷明细台账 - 输出层
// ==========================================
// 职责: 将汇总报告序列化为平面文件 (CSV + JSON)
// 红线: 不做任何计算, 只消费 SalesReport
// ==========================================

pub mod columns;
pub mod error;
pub mod report_writer;

pub use columns::TableRow;
pub use error::{ExportError, ExportResult};
pub use report_writer::{
    Artifact, KpiDocument, Manifest, ReportWriter, KPI_SUMMARY_FILE, MANIFEST_FILE,
};
