// ==========================================
// 出荷明细台账 - 导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 管道: 读取 → 解析 → 列解析与映射 → 清洗与类型转换
// ==========================================

use crate::domain::record::{SalesColumn, SalesRecord};
use crate::importer::error::ImportResult;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ==========================================
// 管道中间结构
// ==========================================

/// 解析后的一行原始数据 (表头 → 单元格文本)
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub row_number: usize, // 数据行号 (从 1 开始, 不含表头)
    pub cells: HashMap<String, String>,
}

/// 解析后的原始表
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
    pub skipped_blank_rows: usize,
}

/// 列契约解析结果: 列 → 源文件实际表头
pub type ColumnMap = HashMap<SalesColumn, String>;

/// 映射后、类型转换前的记录
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSalesRecord {
    pub row_number: usize,
    pub values: HashMap<SalesColumn, String>,
}

impl RawSalesRecord {
    pub fn get(&self, column: SalesColumn) -> &str {
        self.values.get(&column).map(String::as_str).unwrap_or("")
    }
}

/// 导入结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub batch_id: String,
    pub source: String,
    pub records: Vec<SalesRecord>,
    pub skipped_blank_rows: usize,
    pub records_with_unparsed_fields: usize,
    pub elapsed_ms: u64,
}

// ==========================================
// SalesImporter Trait
// ==========================================
// 用途: 导入主接口
// 实现者: SalesImporterImpl
#[async_trait]
pub trait SalesImporter: Send + Sync {
    /// 从文件导入出荷明细
    ///
    /// # 参数
    /// - file_path: .csv/.tsv/.txt/.xlsx/.xls
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 全部记录 (单元格转换失败不丢弃记录)
    /// - Err: 文件不存在、格式/编码不支持、缺少必需列
    async fn import_file<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<ImportOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 将文件内容解析为原始表 (首行为表头, 完全空白行跳过)
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 列契约解析 + 行映射
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 解析表头; 任一必需列缺失时一次性报告全部缺失列
    fn resolve_columns(&self, headers: &[String]) -> ImportResult<ColumnMap>;

    /// 按列契约提取一行
    fn map_row(&self, row: &RawRow, columns: &ColumnMap) -> RawSalesRecord;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 清洗与类型转换
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// TRIM
    fn clean_text(&self, value: &str) -> String;

    /// 空字符串/空白 → None
    fn normalize_null(&self, value: &str) -> Option<String>;

    /// 标志规范化
    ///
    /// # 返回
    /// - Some(bool): 可识别 (空白视为 false)
    /// - None: 无法识别的取值
    fn parse_flag(&self, value: &str) -> Option<bool>;

    /// 解析日期 (含日期时间,截断为日期)
    fn parse_date(&self, value: &str) -> Option<NaiveDate>;

    /// 解析实数 (允许千分位)
    fn parse_decimal(&self, value: &str) -> Option<f64>;

    /// 解析整数个数 (允许整值小数,如 "5.0")
    fn parse_quantity(&self, value: &str) -> Option<i64>;

    /// 转换为强类型记录, 失败的列置空并记录到 unparsed_fields
    fn to_sales_record(&self, raw: &RawSalesRecord) -> SalesRecord;
}
