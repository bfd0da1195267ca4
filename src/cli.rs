//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::bits::BitOrder;
use clap::Parser;
use std::path::PathBuf;

/// 一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复任意文件。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款基于 LSB (最低有效位) 隐写术的命令行工具，用于在无损格式图像 (如 PNG, BMP) 中隐藏或恢复任意文件。\n每个像素的 R、G、B 通道各使用低 3 位，头部包含魔数 0xED 与 4 字节载荷长度。"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：hide (隐藏)、recover (恢复) 和 inspect (检查)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 在无损格式图像中隐藏文件内容。
    Hide(HideArgs),

    /// 从经过隐写的图像中恢复隐藏的文件。
    Recover(RecoverArgs),

    /// 报告图像容量以及是否带有隐写标记。
    Inspect(InspectArgs),
}

/// 'hide' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct HideArgs {
    /// 用于隐写的载体图像文件路径 (如 PNG, BMP)。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 要隐藏的载荷文件路径。
    #[arg(short, long)]
    pub payload: PathBuf,

    /// 结果图像的输出路径。默认为输入图像旁的 `doctored_<文件名>.png`。
    #[arg(short, long)]
    pub dest: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 比特顺序，恢复时必须使用相同的值。
    #[arg(short, long, value_enum, default_value_t = BitOrder::Lsb)]
    pub bit_order: BitOrder,
}

/// 'recover' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct RecoverArgs {
    /// 已隐藏数据的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 恢复出的载荷的保存路径。默认为图像旁的 `recovered_<文件名>.bin`。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 比特顺序，必须与隐藏时一致。
    #[arg(short, long, value_enum, default_value_t = BitOrder::Lsb)]
    pub bit_order: BitOrder,
}

/// 'inspect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// 要检查的图像文件路径。
    #[arg(short, long)]
    pub image: PathBuf,

    /// 比特顺序。
    #[arg(short, long, value_enum, default_value_t = BitOrder::Lsb)]
    pub bit_order: BitOrder,
}
