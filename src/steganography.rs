//! # 通道比特打包模块
//!
//! 把比特流 `header || payload` 写入 (或读出) 每个像素 R、G、B 通道的低
//! `BITS_PER_CHANNEL` 位。比特流被分成三个等长的通道段：
//!
//! ```text
//! 偏移量  [0, P*3)      -> 红色通道
//!         [P*3, P*6)    -> 绿色通道
//!         [P*6, P*9)    -> 蓝色通道        (P = 像素总数)
//! ```
//!
//! 每个段内按行优先的扫描顺序逐像素写入，每像素 3 比特。

use crate::bits::{self, BitOrder};
use crate::constants::{BITS_PER_CHANNEL, BITS_PER_PIXEL, HEADER_BITS, HEADER_SIZE};
use crate::error::{DecodeError, EncodeError};
use crate::grid::PixelGrid;
use crate::header::{self, Header};
use log::{debug, info, warn};

/// LSB 编解码器。唯一的状态是编码与解码共享的比特顺序。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LsbCodec {
    bit_order: BitOrder,
}

impl LsbCodec {
    pub fn new(bit_order: BitOrder) -> Self {
        Self { bit_order }
    }

    pub fn bit_order(&self) -> BitOrder {
        self.bit_order
    }

    /// 图像可承载的总比特数 (含头部)。
    pub fn capacity<G: PixelGrid + ?Sized>(&self, grid: &G) -> u64 {
        grid.pixel_count() * BITS_PER_PIXEL
    }

    /// 扣除头部后可容纳的载荷字节数。
    pub fn payload_capacity<G: PixelGrid + ?Sized>(&self, grid: &G) -> u64 {
        self.capacity(grid).saturating_sub(HEADER_BITS) / 8
    }

    /// 将 `payload` 嵌入 `grid`。
    ///
    /// 超出比特流长度的通道位保持原值，不做补零。
    ///
    /// # Errors
    ///
    /// 在修改任何像素之前进行检查：
    /// * 载荷超过 `u32::MAX` 字节时返回 [`EncodeError::PayloadTooLarge`]。
    /// * 头部加载荷超出图像容量时返回 [`EncodeError::CapacityExceeded`]。
    pub fn encode<G: PixelGrid + ?Sized>(
        &self,
        grid: &mut G,
        payload: &[u8],
    ) -> Result<(), EncodeError> {
        let header = Header::for_payload_len(payload.len())?;

        let required = HEADER_BITS + payload.len() as u64 * 8;
        let available = self.capacity(grid);
        if required > available {
            return Err(EncodeError::CapacityExceeded {
                required,
                available,
            });
        }

        let mut stream = Vec::with_capacity(HEADER_SIZE + payload.len());
        stream.extend_from_slice(&header.to_bytes());
        stream.extend_from_slice(payload);
        debug!(
            "embedding {} bits into {} available ({:?} bit order)",
            required, available, self.bit_order
        );

        let pixel_count = grid.pixel_count();
        let total_bits = stream.len() as u64 * 8;
        let (width, height) = (grid.width(), grid.height());
        let mut cursor: u64 = 0;

        'scan: for y in 0..height {
            for x in 0..width {
                if cursor >= total_bits {
                    // 其后所有偏移量 (含绿、蓝段) 都已越过比特流末尾。
                    break 'scan;
                }

                let mut rgb = grid.get_pixel(x, y);
                for (channel, value) in rgb.iter_mut().enumerate() {
                    for n in 0..BITS_PER_CHANNEL {
                        let offset = bits::stream_offset(cursor, channel, n, pixel_count);
                        if offset < total_bits {
                            let bit = bits::stream_bit(&stream, offset, self.bit_order);
                            bits::set_bit(value, n as u32, bit, self.bit_order);
                        }
                    }
                }
                grid.set_pixel(x, y, rgb);
                cursor += BITS_PER_CHANNEL;
            }
        }

        info!("embedded {} payload bytes", payload.len());
        Ok(())
    }

    /// 从 `grid` 中提取载荷。
    ///
    /// 先读出头部得到长度，再恰好读取 `length` 字节，不会扫描到载荷之后的区域。
    ///
    /// # Errors
    ///
    /// * 图像连头部都装不下时返回 [`DecodeError::GridTooSmall`]。
    /// * 魔数不匹配时返回 [`DecodeError::NotEncoded`]。
    /// * 声明的长度超出图像容量时返回 [`DecodeError::LengthOutOfRange`]。
    pub fn decode<G: PixelGrid + ?Sized>(&self, grid: &G) -> Result<Vec<u8>, DecodeError> {
        self.ensure_header_fits(grid)?;

        let header = Header::from_bytes(&self.extract(grid, 0, HEADER_SIZE))?;
        let available = self.payload_capacity(grid);
        if u64::from(header.length) > available {
            warn!(
                "header declares {} bytes, only {} fit; marker is likely a false positive",
                header.length, available
            );
            return Err(DecodeError::LengthOutOfRange {
                length: header.length,
                available,
            });
        }

        let payload = self.extract(grid, HEADER_BITS, header.length as usize);
        info!("extracted {} payload bytes", payload.len());
        Ok(payload)
    }

    /// 读取解码所需的头部，不提取载荷。
    pub fn read_header<G: PixelGrid + ?Sized>(&self, grid: &G) -> Result<Header, DecodeError> {
        self.ensure_header_fits(grid)?;
        Header::from_bytes(&self.extract(grid, 0, HEADER_SIZE))
    }

    /// 检查图像是否带有魔数标记。
    ///
    /// 只读取比特流的前 8 位，耗时与图像大小无关。这是启发式判断，
    /// 未经修改的自然图像也可能恰好命中。
    ///
    /// # Errors
    ///
    /// 图像连头部都装不下时返回 [`DecodeError::GridTooSmall`]。
    pub fn detect<G: PixelGrid + ?Sized>(&self, grid: &G) -> Result<bool, DecodeError> {
        self.ensure_header_fits(grid)?;
        Ok(header::detect(&self.extract(grid, 0, 1)))
    }

    /// [`LsbCodec::detect`] 的便捷版本，图像过小时视为未编码。
    pub fn is_encoded<G: PixelGrid + ?Sized>(&self, grid: &G) -> bool {
        self.detect(grid).unwrap_or(false)
    }

    fn ensure_header_fits<G: PixelGrid + ?Sized>(&self, grid: &G) -> Result<(), DecodeError> {
        let available = self.capacity(grid);
        if available < HEADER_BITS {
            return Err(DecodeError::GridTooSmall {
                required: HEADER_BITS,
                available,
            });
        }
        Ok(())
    }

    /// 从比特流偏移量 `start` 起读出 `len` 字节。调用方保证范围在容量之内。
    fn extract<G: PixelGrid + ?Sized>(&self, grid: &G, start: u64, len: usize) -> Vec<u8> {
        let pixel_count = grid.pixel_count();
        let mut out = vec![0u8; len];
        let mut cached: Option<(u64, [u8; 3])> = None;

        for i in 0..len as u64 * 8 {
            let Some(slot) = bits::locate(start + i, pixel_count) else {
                break;
            };
            let rgb = match cached {
                Some((pixel, rgb)) if pixel == slot.pixel => rgb,
                _ => {
                    let rgb = grid.pixel_at(slot.pixel);
                    cached = Some((slot.pixel, rgb));
                    rgb
                }
            };
            let bit = bits::get_bit(rgb[slot.channel], slot.bit, self.bit_order);
            bits::set_stream_bit(&mut out, i, bit, self.bit_order);
        }

        out
    }
}
