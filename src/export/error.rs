// ==========================================
// 出荷明细台账 - 输出层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 输出层错误类型
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("输出目录无法创建 ({path}): {message}")]
    OutputDir { path: String, message: String },

    #[error("文件写入失败 ({path}): {message}")]
    FileWrite { path: String, message: String },

    #[error("CSV 序列化失败 ({table}): {message}")]
    CsvSerialize { table: String, message: String },

    #[error("JSON 序列化失败 ({file}): {message}")]
    JsonSerialize { file: String, message: String },
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
