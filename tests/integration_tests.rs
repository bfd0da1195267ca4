use image::{ImageBuffer, Rgba};
use lsb_payload::{
    BitOrder,
    cli::{HideArgs, InspectArgs, RecoverArgs},
    handler::{handle_hide, handle_inspect, handle_recover},
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

/// 生成随机二进制载荷
fn random_payload(len: usize) -> Vec<u8> {
    let mut payload = vec![0u8; len];
    rand::rng().fill_bytes(&mut payload);
    payload
}

/// 验证从隐藏到恢复的完整流程
#[test]
fn test_handle_hide_and_recover_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let source_payload_path = dir.path().join("source.bin");
    let recovered_payload_path = dir.path().join("recovered.bin");

    create_test_image(&original_image_path, 100, 100);
    let original_payload = random_payload(4096);
    fs::write(&source_payload_path, &original_payload)?;

    // 2. 测试 handle_hide
    let hide_args = HideArgs {
        image: original_image_path.clone(),
        payload: source_payload_path.clone(),
        dest: Some(hidden_image_path.clone()),
        force: false,
        bit_order: BitOrder::Lsb,
    };
    handle_hide(hide_args)?;
    assert!(
        hidden_image_path.exists(),
        "Hidden image should be created."
    );

    // 3. 测试 handle_recover
    let recover_args = RecoverArgs {
        image: hidden_image_path.clone(),
        output: Some(recovered_payload_path.clone()),
        force: false,
        bit_order: BitOrder::Lsb,
    };
    handle_recover(recover_args)?;
    assert!(
        recovered_payload_path.exists(),
        "Recovered payload file should be created."
    );

    // 4. 验证结果
    let recovered_payload = fs::read(&recovered_payload_path)?;
    assert_eq!(
        original_payload, recovered_payload,
        "Recovered payload must match the original."
    );

    Ok(())
}

/// 验证当用户不提供输出路径时，是否能正确生成默认路径并完成操作
#[test]
fn test_handle_hide_and_recover_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.bmp");
    let source_payload_path = dir.path().join("source.txt");

    create_test_image(&original_image_path, 64, 64);
    let original_text = "Testing default path generation. 测试默认路径生成。";
    fs::write(&source_payload_path, original_text)?;

    // 2. 测试 handle_hide，不提供 dest 路径
    let hide_args = HideArgs {
        image: original_image_path.clone(),
        payload: source_payload_path.clone(),
        dest: None,
        force: false,
        bit_order: BitOrder::Msb,
    };
    handle_hide(hide_args)?;

    // 验证默认的隐藏图像文件是否已创建
    let expected_hidden_path = dir.path().join("doctored_original.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // 3. 测试 handle_recover，不提供输出路径
    let recover_args = RecoverArgs {
        image: expected_hidden_path,
        output: None,
        force: false,
        bit_order: BitOrder::Msb,
    };
    handle_recover(recover_args)?;

    // 验证默认的恢复文件是否已创建
    let expected_recovered_path = dir.path().join("recovered_doctored_original.bin");
    assert!(
        expected_recovered_path.exists(),
        "Default recovered file should be created at: {:?}",
        expected_recovered_path
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&expected_recovered_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text from default file must match the original."
    );

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let payload_path = dir.path().join("payload.bin");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);
    fs::write(&payload_path, "some payload")?;

    // 2. 场景一：测试覆盖保护
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    let hide_args_no_force = HideArgs {
        image: image_path.clone(),
        payload: payload_path.clone(),
        dest: Some(dest_path.clone()),
        force: false,
        bit_order: BitOrder::Lsb,
    };

    let result = handle_hide(hide_args_no_force);
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let hide_args_with_force = HideArgs {
        image: image_path.clone(),
        payload: payload_path.clone(),
        dest: Some(dest_path.clone()),
        force: true,
        bit_order: BitOrder::Lsb,
    };

    let result = handle_hide(hide_args_with_force);
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理，且不会写出目标文件
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let payload_path = dir.path().join("large.bin");
    let dest_path = dir.path().join("dest.png");

    // 10x10 的图片最多容纳 112 - 5 = 107 字节载荷
    create_test_image(&image_path, 10, 10);
    fs::write(&payload_path, random_payload(108))?;

    // 2. 执行并断言错误
    let hide_args = HideArgs {
        image: image_path,
        payload: payload_path,
        dest: Some(dest_path.clone()),
        force: false,
        bit_order: BitOrder::Lsb,
    };
    let result = handle_hide(hide_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }
    assert!(!dest_path.exists());

    Ok(())
}

/// 验证从未隐写的图像恢复会失败
#[test]
fn test_handle_recover_rejects_plain_image() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("plain.png");
    let output_path = dir.path().join("out.bin");

    // 全黑图像的低位全为 0，不可能命中魔数
    ImageBuffer::from_pixel(20, 20, Rgba([0u8, 0, 0, 255])).save(&image_path)?;

    let recover_args = RecoverArgs {
        image: image_path,
        output: Some(output_path.clone()),
        force: false,
        bit_order: BitOrder::Lsb,
    };
    let result = handle_recover(recover_args);

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Failed to recover payload"));
    }
    assert!(!output_path.exists());

    Ok(())
}

/// 验证使用不同的比特顺序无法恢复
#[test]
fn test_recover_with_mismatched_bit_order_fails() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("black.png");
    let payload_path = dir.path().join("payload.bin");
    let hidden_path = dir.path().join("hidden.png");

    ImageBuffer::from_pixel(30, 30, Rgba([0u8, 0, 0, 255])).save(&image_path)?;
    fs::write(&payload_path, b"bit order matters")?;

    handle_hide(HideArgs {
        image: image_path,
        payload: payload_path,
        dest: Some(hidden_path.clone()),
        force: false,
        bit_order: BitOrder::Lsb,
    })?;

    let result = handle_recover(RecoverArgs {
        image: hidden_path,
        output: Some(dir.path().join("out.bin")),
        force: false,
        bit_order: BitOrder::Msb,
    });
    assert!(result.is_err());

    Ok(())
}

/// 验证 inspect 子命令在隐写前后都能正常运行
#[test]
fn test_handle_inspect() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let payload_path = dir.path().join("payload.bin");
    let hidden_path = dir.path().join("hidden.png");

    create_test_image(&image_path, 40, 40);
    fs::write(&payload_path, random_payload(256))?;

    handle_inspect(InspectArgs {
        image: image_path.clone(),
        bit_order: BitOrder::Lsb,
    })?;

    handle_hide(HideArgs {
        image: image_path,
        payload: payload_path,
        dest: Some(hidden_path.clone()),
        force: false,
        bit_order: BitOrder::Lsb,
    })?;

    handle_inspect(InspectArgs {
        image: hidden_path,
        bit_order: BitOrder::Lsb,
    })?;

    Ok(())
}
