// ==========================================
// 出荷明细台账 - 文件解析器实现
// ==========================================
// 支持: 分隔文本 (.csv/.tsv/.txt) / Excel (.xlsx/.xls, 首个工作表)
// 编码: UTF-8 (可带 BOM); 非 UTF-8 报 UnsupportedEncoding
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::sales_importer_trait::{FileParser, RawRow, RawTable};
use calamine::{open_workbook_auto_from_rs, Data, DataType, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// 候选分隔符 (同频时按此顺序优先)
const DELIMITER_CANDIDATES: [u8; 4] = [b',', b'\t', b';', b'|'];

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    delimiter: Option<u8>, // None 表示按表头行嗅探
}

impl CsvParser {
    pub fn new() -> Self {
        Self { delimiter: None }
    }

    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }
}

impl Default for CsvParser {
    fn default() -> Self {
        Self::new()
    }
}

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let text = decode_utf8(bytes)?;
        if text.trim().is_empty() {
            return Err(ImportError::EmptyFile("无表头".to_string()));
        }

        let delimiter = self
            .delimiter
            .unwrap_or_else(|| sniff_delimiter(text.lines().next().unwrap_or("")));

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .delimiter(delimiter)
            .flexible(true) // 允许行长度不一致
            .from_reader(text.as_bytes());

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut table = RawTable {
            headers,
            ..RawTable::default()
        };

        // 读取所有行
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let cells = zip_cells(&table.headers, record.iter().map(str::to_string));
            push_row(&mut table, row_idx + 1, cells);
        }

        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8]) -> ImportResult<RawTable> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::EmptyFile(format!("工作表 {} 无数据", sheet_name)))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell_text(cell).trim().to_string())
            .collect();

        let mut table = RawTable {
            headers,
            ..RawTable::default()
        };

        for (row_idx, data_row) in rows.enumerate() {
            let cells = zip_cells(&table.headers, data_row.iter().map(cell_text));
            push_row(&mut table, row_idx + 1, cells);
        }

        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 按扩展名选择解析器
    pub fn for_path(&self, path: &Path) -> ImportResult<Box<dyn FileParser>> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" | "txt" => Ok(Box::new(CsvParser::new())),
            "tsv" => Ok(Box::new(CsvParser::with_delimiter(b'\t'))),
            "xlsx" | "xlsm" | "xls" => Ok(Box::new(ExcelParser)),
            _ => Err(ImportError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn parse(&self, path: &Path, bytes: &[u8]) -> ImportResult<RawTable> {
        self.for_path(path)?.parse_bytes(bytes)
    }
}

// ==========================================
// 辅助函数
// ==========================================

/// 去除 BOM 并校验 UTF-8
fn decode_utf8(bytes: &[u8]) -> ImportResult<&str> {
    let body = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    std::str::from_utf8(body).map_err(|e| {
        ImportError::UnsupportedEncoding(format!("第 {} 字节处非 UTF-8", e.valid_up_to()))
    })
}

/// 表头行中出现次数最多的候选分隔符; 均未出现时为逗号
pub fn sniff_delimiter(header_line: &str) -> u8 {
    let mut best = b',';
    let mut best_count = 0;
    for candidate in DELIMITER_CANDIDATES {
        let count = header_line.bytes().filter(|b| *b == candidate).count();
        if count > best_count {
            best = candidate;
            best_count = count;
        }
    }
    best
}

fn zip_cells<I>(headers: &[String], values: I) -> HashMap<String, String>
where
    I: Iterator<Item = String>,
{
    headers
        .iter()
        .zip(values)
        .map(|(h, v)| (h.clone(), v.trim().to_string()))
        .collect()
}

fn push_row(table: &mut RawTable, row_number: usize, cells: HashMap<String, String>) {
    // 跳过完全空白的行
    if cells.values().all(|v| v.is_empty()) {
        table.skipped_blank_rows += 1;
        return;
    }
    table.rows.push(RawRow { row_number, cells });
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::DateTime(_) => cell
            .as_date()
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| cell.to_string()),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        _ => cell.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_csv_parser_basic() {
        let data = "伝票番号,個数\nD001,3\nD002,5\n";
        let table = CsvParser::new().parse_bytes(data.as_bytes()).unwrap();

        assert_eq!(table.headers, vec!["伝票番号", "個数"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].cells.get("伝票番号"), Some(&"D001".to_string()));
        assert_eq!(table.rows[1].row_number, 2);
    }

    #[test]
    fn test_csv_parser_strips_bom() {
        let mut data = UTF8_BOM.to_vec();
        data.extend_from_slice("伝票番号,個数\nD001,3\n".as_bytes());
        let table = CsvParser::new().parse_bytes(&data).unwrap();
        assert_eq!(table.headers[0], "伝票番号");
    }

    #[test]
    fn test_csv_parser_rejects_non_utf8() {
        // Shift_JIS の "伝票"
        let data = [0x93, 0x60, 0x95, 0x5B, b'\n', b'1', b'\n'];
        let err = CsvParser::new().parse_bytes(&data).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedEncoding(_)));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let data = "a,b\n1,2\n,\n3,4\n";
        let table = CsvParser::new().parse_bytes(data.as_bytes()).unwrap();

        // 应跳过空行, 行号保持源文件位置
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped_blank_rows, 1);
        assert_eq!(table.rows[1].row_number, 3);
    }

    #[test]
    fn test_empty_file() {
        let err = CsvParser::new().parse_bytes(b"").unwrap_err();
        assert!(matches!(err, ImportError::EmptyFile(_)));
    }

    #[test]
    fn test_sniff_delimiter() {
        assert_eq!(sniff_delimiter("a,b,c"), b',');
        assert_eq!(sniff_delimiter("a\tb\tc"), b'\t');
        assert_eq!(sniff_delimiter("a;b;c,d"), b';');
        assert_eq!(sniff_delimiter("a|b"), b'|');
        assert_eq!(sniff_delimiter("single"), b',');
    }

    #[test]
    fn test_semicolon_file() {
        let data = "x;y\n1;2\n";
        let table = CsvParser::new().parse_bytes(data.as_bytes()).unwrap();
        assert_eq!(table.rows[0].cells.get("y"), Some(&"2".to_string()));
    }

    #[test]
    fn test_universal_parser_dispatch() {
        let parser = UniversalFileParser;
        assert!(parser.for_path(Path::new("ledger.CSV")).is_ok());
        assert!(parser.for_path(Path::new("ledger.xlsx")).is_ok());
        assert!(matches!(
            parser.for_path(Path::new("ledger.pdf")),
            Err(ImportError::UnsupportedFormat(_))
        ));
    }
}
