//! # 错误类型模块
//!
//! 隐写核心返回的类型化错误。命令处理层 (`handler`) 会将它们包装进 `anyhow`。

use thiserror::Error;

/// 嵌入载荷时可能发生的错误。失败时图像保持原样，不会被部分修改。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// 载荷超过 32 位长度字段所能表示的范围。
    #[error("Payload of {len} bytes exceeds the maximum encodable size of {max} bytes")]
    PayloadTooLarge { len: u64, max: u64 },

    /// 头部加载荷所需的比特数超出图像容量。
    #[error("Not enough space in the image: {required} bits required, {available} bits available")]
    CapacityExceeded { required: u64, available: u64 },
}

/// 提取或检测载荷时可能发生的错误。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// 图像连头部都装不下。
    #[error("Image holds {available} bits, fewer than the {required} bits of a header")]
    GridTooSmall { required: u64, available: u64 },

    /// 魔数不匹配，图像中没有嵌入数据。
    #[error("Image does not carry an embedded payload (magic byte {found:#04x})")]
    NotEncoded { found: u8 },

    /// 头部声明的长度超出图像实际容量，数据已损坏或是误判。
    #[error("Header declares {length} bytes but the image can only hold {available} bytes")]
    LengthOutOfRange { length: u32, available: u64 },

    /// 头部缓冲区长度不足。
    #[error("Header buffer is {actual} bytes, expected at least {expected}")]
    Truncated { expected: usize, actual: usize },
}
