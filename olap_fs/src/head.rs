//! Fixed-size file header with zerocopy
//! 定长文件头（zerocopy）
//!
//! ## File Layout
//! ```text
//! | signature(8) | version(4) | payload_len(4) | file_len(8) | checksum(4) | head_crc(4) | payload |
//! |<------------------------- head_crc covers ------------------------->|
//!                                                              checksum covers payload
//! ```

use zerocopy::{
  FromBytes, Immutable, IntoBytes, KnownLayout,
  little_endian::{U32, U64},
};

use crate::{CorruptKind, Error, Result};

/// File signature
/// 文件签名
pub const SIGNATURE: [u8; 8] = *b"OLAPMETA";

/// Current format version
/// 当前格式版本
pub const FORMAT_VERSION: u32 = 1;

/// Head size (32 bytes)
/// 头大小（32 字节）
pub const HEAD_SIZE: usize = size_of::<Head>();

/// CRC32 size
pub const CRC_SIZE: usize = 4;

/// Fixed-size head (32 bytes), all integers little endian
/// 定长头（32 字节），整数均为小端
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout, Clone, Copy, Debug)]
#[repr(C)]
pub struct Head {
  pub signature: [u8; 8],
  pub version: U32,
  pub payload_len: U32,
  pub file_len: U64,
  /// crc32 of payload / payload 的 crc32
  pub checksum: U32,
  /// crc32 of all preceding head bytes / 头部前序字节的 crc32
  pub head_crc: U32,
}

impl Head {
  /// Build head for `payload`
  /// 为 `payload` 构建头
  pub fn new(payload: &[u8]) -> Result<Self> {
    let payload_len = u32::try_from(payload.len()).map_err(|_| Error::TooLarge(payload.len()))?;
    let mut head = Self {
      signature: SIGNATURE,
      version: U32::new(FORMAT_VERSION),
      payload_len: U32::new(payload_len),
      file_len: U64::new((HEAD_SIZE + payload.len()) as u64),
      checksum: U32::new(crc32fast::hash(payload)),
      head_crc: U32::ZERO,
    };
    head.head_crc = U32::new(head.calc_head_crc());
    Ok(head)
  }

  #[inline]
  fn calc_head_crc(&self) -> u32 {
    crc32fast::hash(&self.as_bytes()[..HEAD_SIZE - CRC_SIZE])
  }

  /// Validate whole file buffer, return payload
  /// 校验整个文件缓冲区，返回 payload
  pub fn check(buf: &[u8]) -> Result<&[u8]> {
    let corrupt = |kind| Err(Error::Corrupt(kind));

    let Ok((head, payload)) = Self::read_from_prefix(buf) else {
      return corrupt(CorruptKind::Short);
    };
    if head.signature != SIGNATURE {
      return corrupt(CorruptKind::Signature);
    }
    if head.head_crc.get() != head.calc_head_crc() {
      return corrupt(CorruptKind::HeadChecksum);
    }
    if head.version.get() != FORMAT_VERSION {
      return corrupt(CorruptKind::Version);
    }
    if head.file_len.get() != buf.len() as u64 || head.payload_len.get() as usize != payload.len()
    {
      return corrupt(CorruptKind::Length);
    }
    if head.checksum.get() != crc32fast::hash(payload) {
      return corrupt(CorruptKind::Checksum);
    }
    Ok(payload)
  }
}
