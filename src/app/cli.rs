// ==========================================
// 出荷明细台账 - 命令行参数
// ==========================================
// 工具: clap derive
// 日期/容差以字符串接收, 由配置管理器统一解析与校验
// ==========================================

use crate::config::config_manager::ConfigOverrides;
use clap::Parser;
use std::path::PathBuf;

/// 出荷明细台账的数据质量校验与多维汇总
///
/// 读取出荷明细 (CSV/TSV/Excel), 执行品质规则检查与各维度汇总,
/// 将结果写出为 CSV 表与 JSON 摘要。
#[derive(Parser, Debug, Clone)]
#[command(name = "sales-insight", version, about, long_about = None)]
pub struct Cli {
    /// 输入文件 (.csv/.tsv/.txt/.xlsx/.xls)
    #[arg(short, long)]
    pub input: PathBuf,

    /// 输出目录 (不存在时创建)
    #[arg(short, long)]
    pub outdir: PathBuf,

    /// 期间开始日 (含), YYYY-MM-DD
    #[arg(long)]
    pub start: Option<String>,

    /// 期间结束日 (含), YYYY-MM-DD
    #[arg(long)]
    pub end: Option<String>,

    /// 单价×个数 与金额的允许偏差
    #[arg(long = "tol")]
    pub tolerance: Option<String>,

    /// 配置文件 (JSON); 省略时读取用户配置目录下的 sales-insight/config.json
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// 以 JSON 行格式输出日志
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            start: self.start.clone(),
            end: self.end.clone(),
            tolerance: self.tolerance.clone(),
        }
    }
}
