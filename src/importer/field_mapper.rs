// ==========================================
// 出荷明细台账 - 字段映射器实现
// ==========================================
// 职责: 源表头 → 列契约解析; 行 → RawSalesRecord
// 表头接受日文原名或英文字段名 (大小写不敏感)
// ==========================================

use crate::domain::record::SalesColumn;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sales_importer_trait::{
    ColumnMap, FieldMapper as FieldMapperTrait, RawRow, RawSalesRecord,
};
use std::collections::HashMap;
use tracing::debug;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn resolve_columns(&self, headers: &[String]) -> ImportResult<ColumnMap> {
        let mut columns = HashMap::new();
        let mut missing = Vec::new();

        for column in SalesColumn::ALL {
            // 同一列出现多个候选表头时取第一个
            match headers.iter().find(|h| column.matches(h)) {
                Some(header) => {
                    columns.insert(column, header.clone());
                }
                None => missing.push(column.header().to_string()),
            }
        }

        if !missing.is_empty() {
            return Err(ImportError::MissingColumns(missing));
        }

        debug!(columns = columns.len(), "列契约解析完成");
        Ok(columns)
    }

    fn map_row(&self, row: &RawRow, columns: &ColumnMap) -> RawSalesRecord {
        let values = columns
            .iter()
            .filter_map(|(column, header)| {
                row.cells
                    .get(header)
                    .map(|value| (*column, value.trim().to_string()))
            })
            .collect();

        RawSalesRecord {
            row_number: row.row_number,
            values,
        }
    }
}
