//! `roster`：足球队名册管理命令行
//!
//! 启动顺序：
//! 1. 解析命令行并读取配置；
//! 2. 初始化日志（`RUST_LOG` 优先，其次 `logging.level`）；
//! 3. 加载上次的快照并装配事件订阅；
//! 4. 运行控制台，直到选择退出、输入结束或收到 Ctrl-C；
//! 5. 写出最终快照，排空事件总线，再关闭持久化监听器。

use clap::Parser;
use roster_cli::console::spawn_line_reader;
use roster_cli::{Cli, RosterApp, RosterConfig};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = RosterConfig::load(&cli)?;
    init_logging(&config.logging.level);

    let app = RosterApp::bootstrap(&config).await?;

    // 阻塞读取放在运行时之外，Ctrl-C 后进程可以直接退出
    let stdin = spawn_line_reader(std::io::BufReader::new(std::io::stdin()))?;
    let stdout = tokio::io::stdout();
    tokio::select! {
        result = app.run_console(stdin, stdout) => {
            if let Err(err) = result {
                tracing::error!(error = %err, "console stopped");
            }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("interrupted");
        }
    }

    app.shutdown().await;
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    // 日志走 stderr，菜单独占 stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
