// ==========================================
// 出荷明细台账 - 导入层
// ==========================================
// 职责: 外部文件 → 满足列契约的不可变记录集合
// 支持: CSV/TSV (UTF-8), Excel
// 口径: 标志在此边界规范为原生 bool; 数值/日期转换失败置空并记录列名
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod sales_importer_impl;
pub mod sales_importer_trait;

// 重导出核心类型
pub use data_cleaner::DataCleaner as DataCleanerImpl;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{sniff_delimiter, CsvParser, ExcelParser, UniversalFileParser};
pub use sales_importer_impl::SalesImporterImpl;

// 重导出 Trait 接口
pub use sales_importer_trait::{
    ColumnMap, DataCleaner, FieldMapper, FileParser, ImportOutcome, RawRow, RawSalesRecord,
    RawTable, SalesImporter,
};
