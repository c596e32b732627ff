// ==========================================
// 出荷明细台账 - 命令行主入口
// ==========================================
// 成功: stdout 输出 KPI 回显与产物清单, 退出码 0
// 失败: stderr 输出错误链, 退出码 1
// ==========================================

use clap::Parser;
use sales_insight::app::{render_recap, run, Cli};
use sales_insight::logging;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // 初始化日志系统
    if cli.log_json {
        logging::init_json();
    } else {
        logging::init();
    }

    tracing::info!("{} v{}", sales_insight::APP_NAME, sales_insight::VERSION);

    match run(&cli).await {
        Ok(summary) => {
            print!("{}", render_recap(&summary));
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}
