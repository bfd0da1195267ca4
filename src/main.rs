use clap::Parser;
use env_logger::{Builder, Env};
use std::io::Write;

use lsb_payload::{
    cli::{Cli, Commands},
    handler::{handle_hide, handle_inspect, handle_recover},
};

/// 程序的主入口点
///
/// 初始化日志 (默认级别 `warn`，可通过 `RUST_LOG` 调整)，解析命令行参数，
/// 并根据指定的子命令将执行分派到相应的处理函数
fn main() -> anyhow::Result<()> {
    Builder::from_env(Env::default().default_filter_or("warn"))
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    // 解析命令行参数
    let cli = Cli::parse();

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Hide(args) => handle_hide(args),
        Commands::Recover(args) => handle_recover(args),
        Commands::Inspect(args) => handle_inspect(args),
    }
}
