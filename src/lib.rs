//! # lsb_payload 库
//!
//! 本库包含 LSB 隐写工具的核心逻辑：头部编解码、比特寻址以及通道比特打包。
//!
//! 注意：这不是加密方案，不提供保密性、认证或抗隐写分析能力。

// 声明库包含的所有模块。

pub mod bits;
pub mod cli;
pub mod constants;
pub mod error;
pub mod grid;
pub mod handler;
pub mod header;
pub mod steganography;

pub use bits::BitOrder;
pub use error::{DecodeError, EncodeError};
pub use grid::PixelGrid;
pub use header::Header;
pub use steganography::LsbCodec;
