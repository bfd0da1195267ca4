//! # 头部编解码模块
//!
//! 头部布局 (共 `HEADER_SIZE` 字节)：
//!
//! | 字节 | 长度 | 字段     | 说明                                |
//! |------|------|----------|-------------------------------------|
//! | 0    | 1    | `magic`  | 固定为 `0xED`，仅用于检测           |
//! | 1    | 4    | `length` | 载荷字节数，大端序，不含头部本身    |

use crate::constants::{HEADER_MAGIC, HEADER_SIZE, MAX_PAYLOAD_LEN};
use crate::error::{DecodeError, EncodeError};

/// 内存中的头部记录。
///
/// `filename` 只用于向用户报告，不会被序列化进图像。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Header {
    pub filename: Option<String>,
    pub length: u32,
}

impl Header {
    pub fn new(length: u32) -> Self {
        Self {
            filename: None,
            length,
        }
    }

    /// 为 `len` 字节的载荷构建头部。
    ///
    /// # Errors
    ///
    /// `len` 超过 `u32::MAX` 时返回 [`EncodeError::PayloadTooLarge`]。
    pub fn for_payload_len(len: usize) -> Result<Self, EncodeError> {
        let length = u32::try_from(len).map_err(|_| EncodeError::PayloadTooLarge {
            len: len as u64,
            max: MAX_PAYLOAD_LEN,
        })?;
        Ok(Self::new(length))
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        serialize(self.length)
    }

    /// 从缓冲区解析头部，先校验魔数。
    pub fn from_bytes(buffer: &[u8]) -> Result<Self, DecodeError> {
        if !detect(buffer) {
            return Err(DecodeError::NotEncoded {
                found: buffer.first().copied().unwrap_or_default(),
            });
        }
        deserialize(buffer).map(Self::new)
    }
}

/// 将长度字段序列化为带魔数的头部。任意 `u32` 都可表示。
pub fn serialize(length: u32) -> [u8; HEADER_SIZE] {
    let mut buffer = [0u8; HEADER_SIZE];
    buffer[0] = HEADER_MAGIC;
    buffer[1..].copy_from_slice(&length.to_be_bytes());
    buffer
}

/// 检查缓冲区首字节是否为魔数。
///
/// 这只是启发式判断：自然图像的低位可能恰好组成 `0xED`，
/// 因此返回 `true` 并不代表图像一定含有有效载荷。
pub fn detect(buffer: &[u8]) -> bool {
    buffer.first() == Some(&HEADER_MAGIC)
}

/// 读取大端序长度字段。不校验长度与图像容量是否相符，这由调用方负责。
pub fn deserialize(buffer: &[u8]) -> Result<u32, DecodeError> {
    let field: [u8; 4] = buffer
        .get(1..HEADER_SIZE)
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or(DecodeError::Truncated {
            expected: HEADER_SIZE,
            actual: buffer.len(),
        })?;
    Ok(u32::from_be_bytes(field))
}
