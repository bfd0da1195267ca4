//! # 像素网格模块
//!
//! 隐写核心只通过 [`PixelGrid`] 访问像素；图像文件的读写由 `image` crate 负责。

use image::{Rgb, RgbImage};

/// 按行优先顺序寻址的 8 位 RGB 像素网格。
pub trait PixelGrid {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    fn pixel_count(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3];

    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]);

    /// 按扫描序号 (`y * width + x`) 读取像素。
    fn pixel_at(&self, index: u64) -> [u8; 3] {
        let (x, y) = coordinates(index, self.width());
        self.get_pixel(x, y)
    }
}

/// 将扫描序号换算为 `(x, y)` 坐标。
#[inline]
pub fn coordinates(index: u64, width: u32) -> (u32, u32) {
    let width = u64::from(width);
    ((index % width) as u32, (index / width) as u32)
}

impl PixelGrid for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn get_pixel(&self, x: u32, y: u32) -> [u8; 3] {
        image::ImageBuffer::get_pixel(self, x, y).0
    }

    fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        self.put_pixel(x, y, Rgb(rgb));
    }
}
