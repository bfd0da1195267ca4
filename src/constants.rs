/// 标记图像中存在嵌入数据的魔数字节 ("Encoded Data")。
/// 仅用于检测，不参与长度字段的定位。
pub const HEADER_MAGIC: u8 = 0xED;

/// 头部大小 (字节)：1 字节魔数 + 4 字节大端长度。
pub const HEADER_SIZE: usize = 5;

/// 头部占用的比特数。
pub const HEADER_BITS: u64 = (HEADER_SIZE * 8) as u64;

/// 每个颜色通道中用于隐写的低位比特数。
pub const BITS_PER_CHANNEL: u64 = 3;

/// 参与隐写的颜色通道数 (R, G, B)。
pub const CHANNELS: u64 = 3;

/// 每个像素可承载的比特数。
pub const BITS_PER_PIXEL: u64 = BITS_PER_CHANNEL * CHANNELS;

/// 长度字段 (`u32`) 能表示的最大载荷字节数。
pub const MAX_PAYLOAD_LEN: u64 = u32::MAX as u64;
