// ==========================================
// 出荷明细台账 - 应用层
// ==========================================
// 职责: 命令行入口与运行编排, 连接导入/引擎/输出
// ==========================================

pub mod cli;
pub mod runner;

// 重导出
pub use cli::Cli;
pub use runner::{render_recap, run, RunSummary};
