// ==========================================
// 出荷明细台账 - 导入器实现
// ==========================================
// 职责: 整合导入流程, 从文件到不可变记录集合
// 流程: 读取 (tokio::fs) → 解析 → 列契约解析 → 映射 → 清洗/类型转换
// ==========================================

use crate::importer::data_cleaner::DataCleaner as DataCleanerImpl;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::sales_importer_trait::{
    DataCleaner, FieldMapper, ImportOutcome, SalesImporter,
};
use crate::perf::PerfGuard;
use async_trait::async_trait;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// SalesImporterImpl - 出荷明细导入器
// ==========================================
pub struct SalesImporterImpl {
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
}

impl SalesImporterImpl {
    /// 使用自定义映射器/清洗器
    pub fn new(field_mapper: Box<dyn FieldMapper>, data_cleaner: Box<dyn DataCleaner>) -> Self {
        Self {
            file_parser: UniversalFileParser,
            field_mapper,
            data_cleaner,
        }
    }
}

impl Default for SalesImporterImpl {
    fn default() -> Self {
        Self::new(Box::new(FieldMapperImpl), Box::new(DataCleanerImpl))
    }
}

#[async_trait]
impl SalesImporter for SalesImporterImpl {
    #[instrument(skip(self, file_path), fields(batch_id))]
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<ImportOutcome> {
        let start_time = Instant::now();
        let path = file_path.as_ref();
        let batch_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("batch_id", batch_id.as_str());

        let source = path.display().to_string();
        info!(batch_id = %batch_id, file_path = %source, "开始导入出荷明细");

        // === 步骤 1: 读取文件 ===
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ImportError::FileNotFound(source));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(bytes = bytes.len(), "文件读取完成");

        // === 步骤 2: 解析文件 ===
        let table = {
            let _perf = PerfGuard::new("import_parse");
            self.file_parser.parse(path, &bytes)?
        };
        info!(
            rows = table.rows.len(),
            skipped_blank_rows = table.skipped_blank_rows,
            "文件解析完成"
        );

        // === 步骤 3: 列契约解析 ===
        let columns = self.field_mapper.resolve_columns(&table.headers)?;

        // === 步骤 4: 映射 + 清洗 ===
        let records: Vec<_> = {
            let _perf = PerfGuard::new("import_clean").with_rows(table.rows.len());
            table
                .rows
                .iter()
                .map(|row| {
                    let raw = self.field_mapper.map_row(row, &columns);
                    self.data_cleaner.to_sales_record(&raw)
                })
                .collect()
        };

        let records_with_unparsed_fields = records.iter().filter(|r| r.has_unparsed_fields()).count();
        if records_with_unparsed_fields > 0 {
            warn!(
                records = records_with_unparsed_fields,
                "部分单元格无法转换, 已置空并交由品质规则报告"
            );
        }

        let elapsed_ms = start_time.elapsed().as_millis() as u64;
        info!(
            batch_id = %batch_id,
            records = records.len(),
            elapsed_ms,
            "导入完成"
        );

        Ok(ImportOutcome {
            batch_id,
            source,
            records,
            skipped_blank_rows: table.skipped_blank_rows,
            records_with_unparsed_fields,
            elapsed_ms,
        })
    }
}
