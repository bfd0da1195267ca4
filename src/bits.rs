//! # 比特寻址模块
//!
//! 编码与解码共用的比特运算：单个字节内的比特读写，以及比特流偏移量
//! 到 (像素, 通道, 通道内比特位) 的映射。

use crate::constants::{BITS_PER_CHANNEL, CHANNELS};

/// 比特顺序。编码和解码必须使用同一个值。
///
/// * `Lsb` - 第 `n` 位指从最低位数起的第 `n` 位。
/// * `Msb` - 第 `n` 位指从最高位数起的第 `n` 位。
///
/// 该设置同时作用于比特流字节内的比特顺序与通道内写入的比特位置。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BitOrder {
    #[default]
    Lsb,
    Msb,
}

impl BitOrder {
    /// 第 `n` 位 (`0..8`) 对应的位掩码。
    #[inline]
    pub const fn mask(self, n: u32) -> u8 {
        match self {
            BitOrder::Lsb => 1 << n,
            BitOrder::Msb => 1 << (7 - n),
        }
    }
}

/// 读取 `byte` 的第 `n` 位。
#[inline]
pub fn get_bit(byte: u8, n: u32, order: BitOrder) -> bool {
    byte & order.mask(n) != 0
}

/// 将 `byte` 的第 `n` 位设置为 `value`，其余位不变。
#[inline]
pub fn set_bit(byte: &mut u8, n: u32, value: bool, order: BitOrder) {
    let mask = order.mask(n);
    if value {
        *byte |= mask;
    } else {
        *byte &= !mask;
    }
}

/// 读取比特流中偏移量为 `offset` 的比特。
///
/// # Panics
///
/// `offset` 超出 `stream.len() * 8` 时会越界。
#[inline]
pub fn stream_bit(stream: &[u8], offset: u64, order: BitOrder) -> bool {
    get_bit(stream[(offset / 8) as usize], (offset % 8) as u32, order)
}

/// 写入比特流中偏移量为 `offset` 的比特。
#[inline]
pub fn set_stream_bit(stream: &mut [u8], offset: u64, value: bool, order: BitOrder) {
    set_bit(
        &mut stream[(offset / 8) as usize],
        (offset % 8) as u32,
        value,
        order,
    );
}

/// 比特流中某个偏移量在图像中的落点。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slot {
    /// 扫描顺序下的像素序号 (`y * width + x`)。
    pub pixel: u64,
    /// 通道序号：0 = 红，1 = 绿，2 = 蓝。
    pub channel: usize,
    /// 通道内的比特位置 (`0..BITS_PER_CHANNEL`)。
    pub bit: u32,
}

/// 一个通道段的长度 (比特)。
#[inline]
pub const fn segment_len(pixel_count: u64) -> u64 {
    pixel_count * BITS_PER_CHANNEL
}

/// 通道 `channel` 的像素游标 `cursor` 加上通道内位置 `n` 后得到的比特流偏移量。
///
/// `cursor` 每经过一个像素增加 `BITS_PER_CHANNEL`。
#[inline]
pub const fn stream_offset(cursor: u64, channel: usize, n: u64, pixel_count: u64) -> u64 {
    cursor + segment_len(pixel_count) * channel as u64 + n
}

/// 计算比特流偏移量 `offset` 在图像中的落点，超出容量时返回 `None`。
pub fn locate(offset: u64, pixel_count: u64) -> Option<Slot> {
    let segment = segment_len(pixel_count);
    if segment == 0 || offset >= segment * CHANNELS {
        return None;
    }

    let within = offset % segment;
    Some(Slot {
        pixel: within / BITS_PER_CHANNEL,
        channel: (offset / segment) as usize,
        bit: (within % BITS_PER_CHANNEL) as u32,
    })
}
