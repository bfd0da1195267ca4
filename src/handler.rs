//! # 命令处理逻辑模块
//!
//! 包含处理 `hide`、`recover` 和 `inspect` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用核心隐写算法以及向用户报告结果。

use crate::cli::{HideArgs, InspectArgs, RecoverArgs};
use crate::grid::PixelGrid;
use crate::header::Header;
use crate::steganography::LsbCodec;
use anyhow::{Context, Result};
use colored::Colorize;
use image::RgbImage;
use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

/// 处理 'Hide' 命令的执行逻辑。
///
/// 负责读取载体图像和载荷文件、检查隐写空间是否足够、调用隐写核心嵌入头部和载荷，
/// 最后将结果写入目标图像文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与比特顺序的 `HideArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 目标文件已存在且未指定 `--force`。
/// * 无法读取输入的图像或载荷文件。
/// * 图像没有足够的空间来隐藏载荷。
/// * 无法写入到目标图像文件。
pub fn handle_hide(args: HideArgs) -> Result<()> {
    let dest = args
        .dest
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, "doctored_", "png"));
    ensure_writable(&dest, args.force)?;

    let mut picture = load_image(&args.image)?;

    let payload = fs::read(&args.payload).with_context(|| {
        format!(
            "Unable to read payload file: {}",
            args.payload.to_string_lossy().red().bold()
        )
    })?;

    let header = Header::for_payload_len(payload.len())?.with_filename(
        args.payload
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default(),
    );

    let codec = LsbCodec::new(args.bit_order);
    let available_space = codec.payload_capacity(&picture);
    anyhow::ensure!(
        available_space >= payload.len() as u64,
        "Not enough space in the image to hide the payload. \nRequired: {}, Available: {}",
        payload.len().to_string().red().bold(),
        available_space.to_string().green().bold()
    );

    codec.encode(&mut picture, &payload).with_context(|| {
        format!(
            "Failed to hide {} in the image.",
            header.filename.as_deref().unwrap_or("payload").red().bold()
        )
    })?;

    picture.save(&dest).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            dest.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} ({} bytes) has been successfully hidden and saved: {}",
        header.filename.as_deref().unwrap_or("payload"),
        header.length,
        dest.to_string_lossy().green().bold()
    );

    Ok(())
}

/// 处理 'Recover' 命令的执行逻辑。
///
/// 负责读取经过隐写的图像文件、检查魔数、调用恢复核心函数提取载荷，
/// 最后将恢复的内容写入目标文件。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与比特顺序的 `RecoverArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 输出文件已存在且未指定 `--force`。
/// * 无法读取输入的图像文件。
/// * 图像不含隐写标记，或头部声明的长度无效。
/// * 无法写入到目标文件。
pub fn handle_recover(args: RecoverArgs) -> Result<()> {
    let output = args
        .output
        .clone()
        .unwrap_or_else(|| sibling_path(&args.image, "recovered_", "bin"));
    ensure_writable(&output, args.force)?;

    let picture = load_image(&args.image)?;
    let codec = LsbCodec::new(args.bit_order);

    let payload = codec.decode(&picture).with_context(|| {
        format!(
            "Failed to recover payload from '{}'. \nThe image may not contain a hidden payload, or it was hidden with a different bit order.",
            args.image.to_string_lossy().red().bold()
        )
    })?;

    fs::write(&output, &payload).with_context(|| {
        format!(
            "Unable to write to target file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;

    println!(
        "{} bytes have been successfully recovered and saved: {}",
        payload.len(),
        output.to_string_lossy().green().bold()
    );
    Ok(())
}

/// 处理 'Inspect' 命令的执行逻辑。
///
/// 报告图像尺寸、可用容量、是否检测到魔数以及头部声明的载荷长度。
/// 魔数检测只是启发式判断。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    let picture = load_image(&args.image)?;
    let codec = LsbCodec::new(args.bit_order);

    println!(
        "Image: {} ({}x{}, {} pixels)",
        args.image.to_string_lossy().bold(),
        picture.width(),
        picture.height(),
        PixelGrid::pixel_count(&picture)
    );
    println!(
        "Capacity: {} bytes of payload",
        codec.payload_capacity(&picture).to_string().green().bold()
    );

    if !codec.is_encoded(&picture) {
        println!("Marker: {}", "not found".yellow().bold());
        return Ok(());
    }

    match codec.read_header(&picture) {
        Ok(header) if u64::from(header.length) <= codec.payload_capacity(&picture) => {
            println!(
                "Marker: {} (declared payload: {} bytes)",
                "found".green().bold(),
                header.length.to_string().green().bold()
            );
        }
        Ok(header) => {
            println!(
                "Marker: {} but the declared length {} exceeds capacity; likely a false positive",
                "found".yellow().bold(),
                header.length.to_string().red().bold()
            );
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}

/// 读取图像并转换为 8 位 RGB。
fn load_image(path: &Path) -> Result<RgbImage> {
    let picture = image::open(path)
        .with_context(|| {
            format!(
                "Unable to read image file: {}",
                path.to_string_lossy().red().bold()
            )
        })?
        .to_rgb8();
    debug!(
        "loaded {} ({}x{})",
        path.display(),
        picture.width(),
        picture.height()
    );
    Ok(picture)
}

/// 未指定 `--force` 时拒绝覆盖已存在的文件。
fn ensure_writable(path: &Path, force: bool) -> Result<()> {
    anyhow::ensure!(
        force || !path.exists(),
        "Output file already exists: {}. \nUse --force to overwrite it.",
        path.to_string_lossy().red().bold()
    );
    Ok(())
}

/// 在 `source` 同目录下生成 `<prefix><文件名主干>.<extension>` 路径。
fn sibling_path(source: &Path, prefix: &str, extension: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    source.with_file_name(format!("{prefix}{stem}.{extension}"))
}
